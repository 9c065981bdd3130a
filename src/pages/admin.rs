//! Admin page
//!
//! Notice banner, record form, record table and the card preview. The table
//! is reloaded on mount and after every successful mutation.

use dioxus::prelude::*;
use ktm_core::table::load_records;
use ktm_core::{Notice, RecordTable};
use ktm_ui::NoticeBanner;

use crate::components::{CardPreviewModal, RecordFormPanel, RecordTableView};
use crate::context::{use_app, use_refresh};

#[component]
pub fn Admin() -> Element {
    let app = use_app();
    let refresh = use_refresh();
    let mut table = use_context::<Signal<RecordTable>>();
    let mut notice = use_context::<Signal<Option<Notice>>>();

    // Reload whenever the refresh counter changes
    use_effect(move || {
        let tick = (refresh.0)();
        let app = app.clone();
        table.write().set_loading(true);
        spawn(async move {
            let records = load_records(app.gateway.as_ref()).await;
            tracing::debug!(tick, count = records.len(), "Records loaded");
            table.write().replace(records);
        });
    });

    rsx! {
        div { class: "admin-page",
            header { class: "admin-header",
                h1 { class: "app-title", "KTM Admin" }
                p { class: "app-subtitle", "Kartu Tanda Mahasiswa" }
            }

            if let Some(current) = notice() {
                NoticeBanner {
                    notice: current,
                    ondismiss: move |_| notice.set(None),
                }
            }

            RecordFormPanel {}
            RecordTableView {}
            CardPreviewModal {}
        }
    }
}
