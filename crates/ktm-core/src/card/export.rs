//! Export file naming and destinations.

use std::future::Future;
use std::path::{Path, PathBuf};

use crate::error::KtmResult;

/// `KTM_<name>.png`, with internal whitespace runs collapsed to `_`.
///
/// Leading and trailing whitespace is dropped; an empty name gives
/// `KTM_.png`.
pub fn export_file_name(name: &str) -> String {
    let joined = name.split_whitespace().collect::<Vec<_>>().join("_");
    format!("KTM_{}.png", joined)
}

/// Where an exported card goes.
pub trait ExportSink {
    /// Store `bytes` under `file_name`; returns where it ended up.
    fn save(&self, file_name: &str, bytes: Vec<u8>) -> impl Future<Output = KtmResult<PathBuf>> + Send;
}

/// Writes exports into a fixed directory, like a browser download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// Replace characters that would escape the target directory.
pub fn sanitize_file_name(file_name: &str) -> String {
    let cleaned: String = file_name
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' | ':' => '_',
            c => c,
        })
        .collect();
    match cleaned.as_str() {
        "" | "." | ".." => "KTM_.png".to_string(),
        _ => cleaned,
    }
}

impl ExportSink for DirectorySink {
    async fn save(&self, file_name: &str, bytes: Vec<u8>) -> KtmResult<PathBuf> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.dir.join(sanitize_file_name(file_name));
        tokio::fs::write(&path, bytes).await?;
        tracing::info!(path = %path.display(), "Card exported");
        Ok(path)
    }
}
