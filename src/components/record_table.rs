//! Record Table
//!
//! Searchable list of records with per-row view, download, edit and delete
//! actions. Actions run independently; none blocks another.

use dioxus::prelude::*;
use ktm_core::table::{delete_record, DeleteOutcome};
use ktm_core::{CardPreview, KtmError, Notice, RecordForm, RecordTable, StudentRecord};
use ktm_ui::{Button, ButtonVariant, SearchInput};

use crate::components::record_form::FORM_ID;
use crate::context::{use_app, use_refresh, AppState, DialogConfirm, PreviewSignal};

/// Export `record` through the preview, reporting failures as a notice.
pub fn spawn_export(app: AppState, preview: Signal<CardPreview>, mut notice: Signal<Option<Notice>>, record: StudentRecord) {
    spawn(async move {
        let sink = app.export_sink();
        let surface = PreviewSignal(preview);
        match app
            .exporter
            .export(app.gateway.as_ref(), &surface, &sink, &record)
            .await
        {
            Ok(card) => tracing::info!(file = %card.file_name, "KTM downloaded"),
            Err(KtmError::ExportCancelled) => {}
            Err(_) => notice.set(Some(Notice::export_failed())),
        }
    });
}

#[component]
pub fn RecordTableView() -> Element {
    let app = use_app();
    let refresh = use_refresh();
    let mut table = use_context::<Signal<RecordTable>>();
    let mut form = use_context::<Signal<RecordForm>>();
    let mut preview = use_context::<Signal<CardPreview>>();
    let notice = use_context::<Signal<Option<Notice>>>();

    let query = table.read().query().to_string();
    let rows: Vec<StudentRecord> = table.read().visible().into_iter().cloned().collect();
    let empty = table.read().empty_state();
    let table_class = if table.read().is_loading() { "students students--loading" } else { "students" };

    rsx! {
        section { class: "record-table",
            div { class: "table-toolbar",
                h2 { class: "table-title", "Data Mahasiswa" }
                SearchInput {
                    value: query,
                    oninput: move |q: String| table.write().set_query(q),
                }
            }

            table { class: table_class,
                thead {
                    tr {
                        th { "Foto" }
                        th { "NIM" }
                        th { "Nama" }
                        th { "Fakultas" }
                        th { "Jurusan" }
                        th { "Aksi" }
                    }
                }
                tbody {
                    if let Some(state) = empty {
                        tr { class: "empty-row",
                            td { colspan: "6", "{state.message()}" }
                        }
                    }
                    for record in rows {
                        {
                            let photo = app.photo_src(&record);
                            let app_edit = app.clone();
                            let app_delete = app.clone();
                            let app_download = app.clone();
                            let view_record = record.clone();
                            let edit_record = record.clone();
                            let download_record = record.clone();
                            let id = record.id.clone();

                            rsx! {
                                tr { key: "{record.id}",
                                    td { class: "photo-cell",
                                        if let Some(src) = photo {
                                            img { class: "row-photo", src: "{src}", alt: "{record.name}" }
                                        } else {
                                            span { class: "no-photo", "-" }
                                        }
                                    }
                                    td { "{record.nim}" }
                                    td { "{record.name}" }
                                    td { "{record.faculty}" }
                                    td { "{record.major}" }
                                    td { class: "row-actions",
                                        Button {
                                            variant: ButtonVariant::Secondary,
                                            onclick: move |_| preview.write().show(view_record.clone()),
                                            "View"
                                        }
                                        Button {
                                            variant: ButtonVariant::Download,
                                            onclick: move |_| {
                                                spawn_export(app_download.clone(), preview, notice, download_record.clone());
                                            },
                                            "Download"
                                        }
                                        Button {
                                            variant: ButtonVariant::Edit,
                                            onclick: move |_| {
                                                let stored = app_edit.photo_src(&edit_record);
                                                form.write().begin_edit(&edit_record, stored);
                                                let _ = document::eval(&format!(
                                                    "document.getElementById('{}')?.scrollIntoView({{ behavior: 'smooth' }})",
                                                    FORM_ID
                                                ));
                                            },
                                            "Edit"
                                        }
                                        Button {
                                            variant: ButtonVariant::Danger,
                                            onclick: move |_| {
                                                let app = app_delete.clone();
                                                let id = id.clone();
                                                let mut notice = notice;
                                                spawn(async move {
                                                    match delete_record(app.gateway.as_ref(), &DialogConfirm, &id).await {
                                                        Ok(DeleteOutcome::Deleted) => {
                                                            notice.set(Some(Notice::deleted()));
                                                            refresh.bump();
                                                        }
                                                        Ok(DeleteOutcome::Declined) => {}
                                                        Err(e) => {
                                                            tracing::error!(id = %id, "Error deleting student: {}", e);
                                                            notice.set(Some(Notice::delete_failed(&e)));
                                                        }
                                                    }
                                                });
                                            },
                                            "Delete"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
