//! Error types for KTM Admin

use thiserror::Error;

use crate::form::RequiredField;

/// Main error type for KTM Admin operations
#[derive(Error, Debug)]
pub enum KtmError {
    /// One or more required form fields are empty
    #[error("All fields are required (missing: {})", join_fields(.0))]
    MissingFields(Vec<RequiredField>),

    /// The gateway answered with a non-success status
    #[error("{message}")]
    Gateway {
        /// HTTP status code
        status: u16,
        /// Message from the `error` field, or a generic status message
        message: String,
    },

    /// The request never produced a response (connection refused, DNS, ...)
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Gateway base address could not be parsed
    #[error("Invalid gateway URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Record id unknown to the gateway
    #[error("Student not found: {0}")]
    NotFound(String),

    /// Card document could not be parsed or rasterized
    #[error("Render error: {0}")]
    Render(String),

    /// Image decode/encode failure
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Error during serialization/deserialization
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// General I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// User dismissed the save dialog
    #[error("Export cancelled")]
    ExportCancelled,
}

impl KtmError {
    /// True for client-side validation failures (no request was sent).
    pub fn is_validation(&self) -> bool {
        matches!(self, KtmError::MissingFields(_))
    }

    /// Message suitable for showing to the user.
    ///
    /// Gateway errors carry the server's own text; everything else uses the
    /// display form.
    pub fn user_message(&self) -> String {
        match self {
            KtmError::Gateway { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

fn join_fields(fields: &[RequiredField]) -> String {
    fields
        .iter()
        .map(|f| f.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type alias using KtmError
pub type KtmResult<T> = Result<T, KtmError>;
