//! Tracing layer that mirrors events into the activity log.

use std::fmt::Write as FmtWrite;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use super::entry::ActivityEntry;
use super::writer::ActivityWriter;

/// Filter used when neither `RUST_LOG` nor an explicit filter is set.
pub const DEFAULT_FILTER: &str = "info";

/// Writes every event it sees to an [`ActivityWriter`].
pub struct ActivityLayer {
    writer: Arc<ActivityWriter>,
}

impl ActivityLayer {
    pub fn new(logs_dir: impl AsRef<Path>, session: impl Into<String>) -> std::io::Result<Self> {
        let writer = ActivityWriter::new(logs_dir, session)?;
        Ok(Self {
            writer: Arc::new(writer),
        })
    }

    pub fn log_path(&self) -> &Path {
        self.writer.path()
    }
}

impl<S: Subscriber> Layer<S> for ActivityLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();

        let mut visitor = JsonVisitor::default();
        event.record(&mut visitor);

        let mut entry = ActivityEntry::new(
            metadata.level().as_str().to_lowercase(),
            self.writer.session(),
            metadata.target(),
            visitor.message.unwrap_or_default(),
        );
        if !visitor.fields.is_empty() {
            entry = entry.with_fields(serde_json::Value::Object(visitor.fields));
        }

        // Never let a logging failure take down the caller
        let _ = self.writer.write(&entry);
    }
}

#[derive(Default)]
struct JsonVisitor {
    message: Option<String>,
    fields: serde_json::Map<String, serde_json::Value>,
}

impl JsonVisitor {
    fn put(&mut self, field: &Field, value: serde_json::Value) {
        self.fields.insert(field.name().to_string(), value);
    }
}

impl Visit for JsonVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let mut buf = String::new();
        let _ = write!(&mut buf, "{:?}", value);
        if field.name() == "message" {
            self.message = Some(buf);
        } else {
            self.put(field, serde_json::Value::String(buf));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.put(field, serde_json::Value::String(value.to_string()));
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.put(field, value.into());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.put(field, value.into());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.put(field, value.into());
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        if let Some(n) = serde_json::Number::from_f64(value) {
            self.put(field, serde_json::Value::Number(n));
        }
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.put(field, serde_json::Value::String(value.to_string()));
    }
}

/// Sets up the global subscriber: env filter, console output and the
/// activity log.
pub struct LoggingBuilder {
    session: String,
    logs_dir: Option<PathBuf>,
    env_filter: Option<String>,
}

impl LoggingBuilder {
    pub fn new(session: impl Into<String>) -> Self {
        Self {
            session: session.into(),
            logs_dir: None,
            env_filter: None,
        }
    }

    /// Also append events to a JSONL file in `logs_dir`.
    pub fn with_logs_dir(mut self, logs_dir: impl Into<PathBuf>) -> Self {
        self.logs_dir = Some(logs_dir.into());
        self
    }

    /// Filter directive used when `RUST_LOG` is unset.
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Install the subscriber. Returns the activity log path, if any.
    ///
    /// An unwritable log directory falls back to console-only logging.
    pub fn init(self) -> Option<PathBuf> {
        let fallback = self.env_filter.as_deref().unwrap_or(DEFAULT_FILTER);
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

        let mut open_error = None;
        let activity = self.logs_dir.as_ref().and_then(|dir| {
            ActivityLayer::new(dir, self.session.as_str())
                .map_err(|e| open_error = Some((dir.clone(), e)))
                .ok()
        });
        let log_path = activity.as_ref().map(|l| l.log_path().to_path_buf());

        let console = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

        let installed = tracing_subscriber::registry()
            .with(filter)
            .with(console)
            .with(activity)
            .try_init();

        if let Some((dir, e)) = open_error {
            tracing::warn!(dir = %dir.display(), "Activity log disabled: {}", e);
        }
        if installed.is_err() {
            tracing::debug!("Global subscriber already installed");
        }
        log_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_activity_layer_captures_events() {
        let temp = TempDir::new().unwrap();

        let layer = ActivityLayer::new(temp.path(), "test").unwrap();
        let log_path = layer.log_path().to_path_buf();

        let subscriber = tracing_subscriber::registry().with(layer);

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("Fetched students");
            tracing::warn!(count = 3, ok = false, "Gateway slow");
        });

        let content = std::fs::read_to_string(&log_path).unwrap();
        let lines: Vec<_> = content.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Fetched students"));
        assert!(lines[0].contains("\"level\":\"info\""));
        assert!(lines[1].contains("\"count\":3"));
        assert!(lines[1].contains("\"ok\":false"));
    }
}
