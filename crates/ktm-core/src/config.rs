//! Client configuration
//!
//! Defaults match a gateway running locally on port 8080. Binaries override
//! these from their command-line arguments.

use std::path::PathBuf;
use std::time::Duration;

/// Gateway address used when none is given.
pub const DEFAULT_GATEWAY_URL: &str = "http://localhost:8080";

/// Wait before rasterizing a preview that has not mounted yet.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base address of the student gateway (no trailing path)
    pub gateway_url: String,
    /// Application data directory (activity logs live under `logs/`)
    pub data_dir: PathBuf,
    /// Where exported card images are written
    pub export_dir: PathBuf,
    /// Layout settle delay before export
    pub settle_delay: Duration,
    /// Per-request timeout; `None` leaves requests unbounded
    pub request_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            gateway_url: DEFAULT_GATEWAY_URL.to_string(),
            data_dir: default_data_dir(),
            export_dir: default_export_dir(),
            settle_delay: DEFAULT_SETTLE_DELAY,
            request_timeout: None,
        }
    }
}

impl ClientConfig {
    pub fn with_gateway_url(mut self, url: impl Into<String>) -> Self {
        self.gateway_url = url.into();
        self
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn with_export_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.export_dir = dir.into();
        self
    }

    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Directory for activity log files.
    pub fn logs_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }
}

/// `<platform data dir>/ktm-admin`, or `./ktm-admin` when unknown.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ktm-admin")
}

/// The user's downloads folder, mirroring a browser download.
pub fn default_export_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}
