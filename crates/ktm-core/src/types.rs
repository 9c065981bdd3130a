//! Core types for KTM Admin
//!
//! Records as the gateway serves them, plus the payload the client sends.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::photo::PhotoAttachment;

/// Gateway-assigned record identifier.
///
/// Opaque to the client. The gateway may send it as a JSON number or a
/// string; both are kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct StudentId(String);

impl StudentId {
    /// Wrap an id string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as sent in request paths
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for StudentId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for StudentId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for StudentId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Int(i64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Int(n) => StudentId(n.to_string()),
            RawId::Text(s) => StudentId(s),
        })
    }
}

/// A student card record as listed by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub id: StudentId,
    /// Student number (shown as "NPM")
    #[serde(default)]
    pub nim: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub faculty: String,
    #[serde(default)]
    pub major: String,
    /// Relative path of the stored photo, resolved against the gateway base
    #[serde(default, deserialize_with = "blank_as_none")]
    pub photo_url: Option<String>,
}

fn blank_as_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

/// Fields sent on create and update.
///
/// `photo: None` on update keeps the photo already stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentPayload {
    pub nim: String,
    pub name: String,
    pub faculty: String,
    pub major: String,
    pub photo: Option<PhotoAttachment>,
}

/// Body returned by create/update.
///
/// Only used for logging; the list is always refetched after a mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MutationAck {
    #[serde(default)]
    pub id: Option<StudentId>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_id_deserializes() {
        let record: StudentRecord = serde_json::from_str(
            r#"{"id":7,"nim":"50421","name":"Ilham Nur","faculty":"EKONOMI","major":"S1 - MANAJEMEN","photo_url":"/uploads/a.png"}"#,
        )
        .unwrap();
        assert_eq!(record.id, StudentId::new("7"));
        assert_eq!(record.photo_url.as_deref(), Some("/uploads/a.png"));
    }

    #[test]
    fn test_string_id_and_blank_photo() {
        let record: StudentRecord =
            serde_json::from_str(r#"{"id":"abc","nim":"1","name":"A","photo_url":""}"#).unwrap();
        assert_eq!(record.id.as_str(), "abc");
        assert_eq!(record.photo_url, None);
        assert_eq!(record.faculty, "");
    }

    #[test]
    fn test_ack_tolerates_extra_fields() {
        let ack: MutationAck = serde_json::from_str(
            r#"{"success":true,"id":3,"photo_url":"/uploads/x.jpg"}"#,
        )
        .unwrap();
        assert_eq!(ack.id, Some(StudentId::from(3)));
        assert_eq!(ack.message, None);
    }
}
