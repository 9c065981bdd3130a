//! Card preview modal
//!
//! Shows the card for one record. A press outside the card closes it; the
//! download button exports the card shown.

use dioxus::prelude::*;
use ktm_core::card::card_svg;
use ktm_core::{CardPreview, Notice};
use ktm_ui::{Button, ButtonVariant, CloseButton};

use crate::components::record_table::spawn_export;
use crate::context::use_app;

#[component]
pub fn CardPreviewModal() -> Element {
    let app = use_app();
    let mut preview = use_context::<Signal<CardPreview>>();
    let notice = use_context::<Signal<Option<Notice>>>();

    let Some(record) = preview.read().record().cloned() else {
        return rsx! {};
    };

    let photo = app.photo_src(&record);
    let svg = card_svg(&record, photo.as_deref());
    let download_record = record.clone();

    rsx! {
        div {
            class: "modal-overlay",
            onclick: move |_| {
                preview.write().pointer_down(false);
            },

            div {
                class: "card-modal",
                onclick: move |e| e.stop_propagation(),

                div { class: "card-modal__header",
                    h2 { class: "modal-title", "KTM {record.name}" }
                    CloseButton { onclick: move |_| preview.write().close() }
                }

                div {
                    class: "ktm-card",
                    onmounted: move |_| preview.write().mark_attached(),
                    dangerous_inner_html: "{svg}",
                }

                div { class: "modal-actions",
                    Button {
                        variant: ButtonVariant::Download,
                        onclick: move |_| {
                            spawn_export(app.clone(), preview, notice, download_record.clone());
                        },
                        "Download"
                    }
                }
            }
        }
    }
}
