//! Application context for KTM Admin.
//!
//! The gateway, exporter and configuration are shared through [`AppState`];
//! the form, table, preview and notice live in signals provided by the root
//! component.
//!
//! ## Usage
//!
//! ```ignore
//! let app = use_app();
//! let mut table = use_context::<Signal<RecordTable>>();
//!
//! spawn(async move {
//!     let records = load_records(app.gateway.as_ref()).await;
//!     table.write().replace(records);
//! });
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use dioxus::prelude::*;
use ktm_core::{
    CardExporter, CardPreview, ClientConfig, DirectorySink, ExportSink, HttpGateway, KtmError,
    KtmResult, MemoryGateway, MutationAck, PreviewSurface, StudentGateway, StudentId,
    StudentPayload, StudentRecord,
};
use ktm_core::table::Confirm;
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};

/// The gateway the window talks to.
#[derive(Debug)]
pub enum AppGateway {
    Http(HttpGateway),
    /// `--offline`
    Memory(MemoryGateway),
}

impl StudentGateway for AppGateway {
    async fn list_students(&self) -> KtmResult<Vec<StudentRecord>> {
        match self {
            AppGateway::Http(g) => g.list_students().await,
            AppGateway::Memory(g) => g.list_students().await,
        }
    }

    async fn create_student(&self, payload: &StudentPayload) -> KtmResult<MutationAck> {
        match self {
            AppGateway::Http(g) => g.create_student(payload).await,
            AppGateway::Memory(g) => g.create_student(payload).await,
        }
    }

    async fn update_student(
        &self,
        id: &StudentId,
        payload: &StudentPayload,
    ) -> KtmResult<MutationAck> {
        match self {
            AppGateway::Http(g) => g.update_student(id, payload).await,
            AppGateway::Memory(g) => g.update_student(id, payload).await,
        }
    }

    async fn delete_student(&self, id: &StudentId) -> KtmResult<()> {
        match self {
            AppGateway::Http(g) => g.delete_student(id).await,
            AppGateway::Memory(g) => g.delete_student(id).await,
        }
    }

    async fn fetch_photo(&self, path: &str) -> KtmResult<Vec<u8>> {
        match self {
            AppGateway::Http(g) => g.fetch_photo(path).await,
            AppGateway::Memory(g) => g.fetch_photo(path).await,
        }
    }

    fn photo_location(&self, path: &str) -> Option<String> {
        match self {
            AppGateway::Http(g) => g.photo_location(path),
            AppGateway::Memory(g) => g.photo_location(path),
        }
    }
}

/// Everything built from the command line before launch.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<AppGateway>,
    pub exporter: CardExporter,
    pub config: ClientConfig,
    pub ask_save_location: bool,
}

impl AppState {
    /// Where exported cards go.
    pub fn export_sink(&self) -> AppSink {
        if self.ask_save_location {
            AppSink::Dialog(self.config.export_dir.clone())
        } else {
            AppSink::Directory(DirectorySink::new(self.config.export_dir.clone()))
        }
    }

    /// Displayable address of a record's stored photo.
    pub fn photo_src(&self, record: &StudentRecord) -> Option<String> {
        record
            .photo_url
            .as_deref()
            .and_then(|p| self.gateway.photo_location(p))
    }
}

/// Hook to access the application state.
pub fn use_app() -> AppState {
    use_context::<AppState>()
}

/// Bumped after every mutation to reload the record list.
#[derive(Clone, Copy)]
pub struct Refresh(pub Signal<u64>);

impl Refresh {
    pub fn bump(mut self) {
        *self.0.write() += 1;
    }
}

pub fn use_refresh() -> Refresh {
    use_context::<Refresh>()
}

/// Export destination: the configured directory or a save dialog.
pub enum AppSink {
    Directory(DirectorySink),
    /// Save dialog opened in this directory
    Dialog(PathBuf),
}

impl ExportSink for AppSink {
    async fn save(&self, file_name: &str, bytes: Vec<u8>) -> KtmResult<PathBuf> {
        match self {
            AppSink::Directory(sink) => sink.save(file_name, bytes).await,
            AppSink::Dialog(dir) => {
                let dir = dir.clone();
                let name = file_name.to_string();
                // Blocking picker, off the UI thread
                let picked = tokio::task::spawn_blocking(move || {
                    FileDialog::new()
                        .add_filter("PNG image", &["png"])
                        .set_directory(&dir)
                        .set_file_name(&name)
                        .set_title("Simpan KTM")
                        .save_file()
                })
                .await
                .map_err(|e| KtmError::Io(std::io::Error::other(e)))?;

                let path = picked.ok_or(KtmError::ExportCancelled)?;
                tokio::fs::write(&path, bytes).await?;
                tracing::info!(path = %path.display(), "Card exported");
                Ok(path)
            }
        }
    }
}

/// Yes/no message box.
pub struct DialogConfirm;

impl Confirm for DialogConfirm {
    async fn confirm(&self, prompt: &str) -> bool {
        let prompt = prompt.to_string();
        let answer = tokio::task::spawn_blocking(move || {
            MessageDialog::new()
                .set_level(MessageLevel::Warning)
                .set_title("Konfirmasi")
                .set_description(&prompt)
                .set_buttons(MessageButtons::YesNo)
                .show()
        })
        .await;
        matches!(answer, Ok(MessageDialogResult::Yes))
    }
}

/// The card preview signal as an export surface.
#[derive(Clone, Copy)]
pub struct PreviewSignal(pub Signal<CardPreview>);

impl PreviewSurface for PreviewSignal {
    fn show(&self, record: &StudentRecord) {
        let mut signal = self.0;
        signal.write().show(record.clone());
    }

    fn is_attached(&self) -> bool {
        self.0.peek().is_attached()
    }

    fn clear(&self) {
        let mut signal = self.0;
        signal.write().close();
    }
}
