//! Record Form
//!
//! Create and edit student records. On success the draft is cleared and the
//! table reloaded; on failure the draft stays as entered.

use dioxus::prelude::*;
use ktm_core::{catalog, Notice, RecordForm};
use ktm_ui::{options_from, Button, ButtonVariant, Input, Select};

use crate::components::PhotoPicker;
use crate::context::{use_app, use_refresh};

/// Element id the table scrolls to on "Edit".
pub const FORM_ID: &str = "record-form";

#[component]
pub fn RecordFormPanel() -> Element {
    let app = use_app();
    let refresh = use_refresh();
    let mut form = use_context::<Signal<RecordForm>>();
    let mut notice = use_context::<Signal<Option<Notice>>>();
    let mut submitting = use_signal(|| false);

    let handle_submit = move |e: FormEvent| {
        e.prevent_default();
        if submitting() {
            return;
        }

        let payload = form.read().payload();
        let editing = form.read().editing().cloned();
        let app = app.clone();
        submitting.set(true);

        spawn(async move {
            let is_edit = editing.is_some();
            match RecordForm::send(payload, editing, app.gateway.as_ref()).await {
                Ok(outcome) => {
                    form.write().reset();
                    notice.set(Some(Notice::submitted(&outcome)));
                    refresh.bump();
                }
                Err(e) => {
                    if !e.is_validation() {
                        tracing::error!("Error submitting student: {}", e);
                    }
                    notice.set(Some(Notice::submit_failed(is_edit, &e)));
                }
            }
            submitting.set(false);
        });
    };

    let draft = form.read().draft().clone();
    let majors = options_from(form.read().available_majors());
    let faculties = options_from(&catalog::faculties());
    let preview = form.read().photo_preview().map(str::to_string);
    let is_editing = form.read().is_editing();

    rsx! {
        form { id: FORM_ID, class: "record-form", onsubmit: handle_submit,
            h2 { class: "form-title",
                if is_editing { "Edit Data Mahasiswa" } else { "Tambah Data Mahasiswa" }
            }

            div { class: "form-grid",
                Input {
                    label: "NIM".to_string(),
                    value: draft.nim.clone(),
                    placeholder: "Masukkan NIM".to_string(),
                    oninput: move |v: String| form.write().set_nim(v),
                }
                Input {
                    label: "Nama".to_string(),
                    value: draft.name.clone(),
                    placeholder: "Masukkan nama lengkap".to_string(),
                    oninput: move |v: String| form.write().set_name(v),
                }
                Select {
                    label: "Fakultas".to_string(),
                    value: draft.faculty.clone(),
                    options: faculties,
                    placeholder: "Pilih Fakultas".to_string(),
                    onchange: move |v: String| form.write().set_faculty(v),
                }
                Select {
                    label: "Jurusan".to_string(),
                    value: draft.major.clone(),
                    options: majors,
                    placeholder: "Pilih Jurusan".to_string(),
                    disabled: draft.faculty.is_empty(),
                    onchange: move |v: String| form.write().set_major(v),
                }
            }

            div { class: "form-photo",
                if let Some(src) = preview {
                    img { class: "photo-preview", src: "{src}", alt: "Foto" }
                } else {
                    div { class: "photo-preview photo-preview--empty", "Belum ada foto" }
                }
                PhotoPicker { on_pick: move |photo| form.write().attach_photo(photo) }
            }

            div { class: "form-actions",
                Button {
                    button_type: "submit".to_string(),
                    disabled: submitting(),
                    if is_editing { "Update Data" } else { "Tambah Data" }
                }
                if is_editing {
                    Button {
                        variant: ButtonVariant::Secondary,
                        onclick: move |_| form.write().cancel_edit(),
                        "Batal"
                    }
                }
            }
        }
    }
}
