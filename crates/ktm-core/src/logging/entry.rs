//! Activity log entries.
//!
//! One self-contained JSON object per line, so a file stays readable even
//! if the process dies mid-session.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single activity log line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    /// RFC 3339 timestamp with milliseconds
    pub ts: String,

    /// trace, debug, info, warn, error
    pub level: String,

    /// Which program wrote it ("desktop", "cli")
    pub session: String,

    /// Module path, e.g. "ktm_core::table"
    pub target: String,

    pub msg: String,

    /// Structured event fields (id, count, path, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Value>,
}

impl ActivityEntry {
    pub fn new(
        level: impl Into<String>,
        session: impl Into<String>,
        target: impl Into<String>,
        msg: impl Into<String>,
    ) -> Self {
        Self {
            ts: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            level: level.into(),
            session: session.into(),
            target: target.into(),
            msg: msg.into(),
            fields: None,
        }
    }

    pub fn with_fields(mut self, fields: Value) -> Self {
        self.fields = Some(fields);
        self
    }

    pub fn to_json_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json_line(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_serialization() {
        let entry = ActivityEntry::new("info", "cli", "ktm_core::table", "Student deleted")
            .with_fields(serde_json::json!({ "id": "4" }));

        let json = entry.to_json_line().unwrap();
        assert!(json.contains("\"level\":\"info\""));
        assert!(json.contains("\"session\":\"cli\""));
        assert!(json.contains("\"id\":\"4\""));

        let parsed = ActivityEntry::from_json_line(&json).unwrap();
        assert_eq!(parsed, entry);
    }

    #[test]
    fn test_fields_omitted_when_empty() {
        let json = ActivityEntry::new("warn", "desktop", "t", "m")
            .to_json_line()
            .unwrap();
        assert!(!json.contains("fields"));
    }
}
