//! User-facing notices.
//!
//! The messages the admin shows after an action, in the app's language.

use crate::error::KtmError;
use crate::form::SubmitOutcome;

/// Shown when a required field is empty.
pub const MSG_FIELDS_REQUIRED: &str = "Semua field harus diisi!";
/// Delete confirmation prompt.
pub const MSG_CONFIRM_DELETE: &str = "Apakah anda yakin ingin menghapus data ini?";
/// Generic export failure.
pub const MSG_EXPORT_FAILED: &str = "Failed to download KTM";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }

    pub fn submitted(outcome: &SubmitOutcome) -> Self {
        match outcome {
            SubmitOutcome::Created(_) => Self::info("Data berhasil ditambahkan!"),
            SubmitOutcome::Updated(..) => Self::info("Data berhasil diupdate!"),
        }
    }

    /// Failure of a create (`editing == false`) or update.
    pub fn submit_failed(editing: bool, err: &KtmError) -> Self {
        if err.is_validation() {
            return Self::error(MSG_FIELDS_REQUIRED);
        }
        let verb = if editing { "mengupdate" } else { "menambahkan" };
        Self::error(format!("Gagal {} data: {}", verb, err.user_message()))
    }

    pub fn deleted() -> Self {
        Self::info("Data berhasil dihapus!")
    }

    pub fn delete_failed(err: &KtmError) -> Self {
        Self::error(format!("Gagal menghapus data: {}", err.user_message()))
    }

    pub fn export_failed() -> Self {
        Self::error(MSG_EXPORT_FAILED)
    }
}
