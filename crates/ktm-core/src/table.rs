//! Record table
//!
//! Holds the last fetched record set, filters it by a free-text query and
//! runs the row actions that need the gateway.

use std::future::Future;

use crate::error::KtmResult;
use crate::gateway::StudentGateway;
use crate::notice::MSG_CONFIRM_DELETE;
use crate::types::{StudentId, StudentRecord};

/// Whether `record` matches an already lowercased query.
fn matches_lowered(record: &StudentRecord, query: &str) -> bool {
    record.name.to_lowercase().contains(query) || record.nim.to_lowercase().contains(query)
}

/// Case-insensitive substring match on name or NIM.
pub fn matches_query(record: &StudentRecord, query: &str) -> bool {
    matches_lowered(record, &query.to_lowercase())
}

/// Records whose name or NIM contains `query`, in original order.
///
/// An empty query returns every record.
pub fn filter_records<'a>(records: &'a [StudentRecord], query: &str) -> Vec<&'a StudentRecord> {
    if query.is_empty() {
        return records.iter().collect();
    }
    let query = query.to_lowercase();
    records
        .iter()
        .filter(|r| matches_lowered(r, &query))
        .collect()
}

/// Why the table has no rows to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    Loading,
    /// The gateway has no records at all
    NoRecords,
    /// Records exist but none match the query
    NoMatches,
}

impl EmptyState {
    pub fn message(&self) -> &'static str {
        match self {
            EmptyState::Loading => "Loading...",
            EmptyState::NoRecords => "No students found",
            EmptyState::NoMatches => "No matching results",
        }
    }
}

/// Record set plus the current search query.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordTable {
    records: Vec<StudentRecord>,
    query: String,
    loading: bool,
}

impl Default for RecordTable {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordTable {
    /// Empty table waiting for its first load.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            query: String::new(),
            loading: true,
        }
    }

    /// Mark a reload in flight; rows are hidden until the next `replace`.
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Swap in a freshly fetched record set and stop loading.
    pub fn replace(&mut self, records: Vec<StudentRecord>) {
        self.records = records;
        self.loading = false;
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    /// Rows matching the current query.
    pub fn visible(&self) -> Vec<&StudentRecord> {
        filter_records(&self.records, &self.query)
    }

    pub fn find(&self, id: &StudentId) -> Option<&StudentRecord> {
        self.records.iter().find(|r| &r.id == id)
    }

    /// `None` when there are rows to show.
    pub fn empty_state(&self) -> Option<EmptyState> {
        if self.loading {
            Some(EmptyState::Loading)
        } else if self.records.is_empty() {
            Some(EmptyState::NoRecords)
        } else if self.visible().is_empty() {
            Some(EmptyState::NoMatches)
        } else {
            None
        }
    }
}

/// Fetch every record.
///
/// A failed fetch yields an empty list; the error is logged, not raised.
pub async fn load_records<G: StudentGateway>(gateway: &G) -> Vec<StudentRecord> {
    match gateway.list_students().await {
        Ok(records) => {
            tracing::debug!(count = records.len(), "Fetched students");
            records
        }
        Err(e) => {
            tracing::error!("Error fetching students: {}", e);
            Vec::new()
        }
    }
}

/// Asks the user to confirm a destructive action.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> impl Future<Output = bool> + Send;
}

/// A fixed answer, for `--yes` flags and tests.
impl Confirm for bool {
    async fn confirm(&self, _prompt: &str) -> bool {
        *self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The user said no; nothing was sent
    Declined,
    Deleted,
}

/// Confirm, then delete. The caller refreshes the list after `Deleted`.
pub async fn delete_record<G: StudentGateway, C: Confirm>(
    gateway: &G,
    confirm: &C,
    id: &StudentId,
) -> KtmResult<DeleteOutcome> {
    if !confirm.confirm(MSG_CONFIRM_DELETE).await {
        tracing::debug!(id = %id, "Delete declined");
        return Ok(DeleteOutcome::Declined);
    }
    gateway.delete_student(id).await?;
    tracing::info!(id = %id, "Student deleted");
    Ok(DeleteOutcome::Deleted)
}
