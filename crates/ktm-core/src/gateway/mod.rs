//! Student gateway
//!
//! The remote REST service owning all student records. The client only
//! lists, creates, updates and deletes through it, and fetches stored photos
//! by path.
//!
//! ## Endpoints
//!
//! ```text
//! GET    /students        → [StudentRecord] | null
//! POST   /students        multipart(nim, name, faculty, major, photo?)
//! PUT    /students/{id}   multipart(nim, name, faculty, major, photo?)
//! DELETE /students/{id}
//! GET    {photo_url}      → image bytes
//! ```
//!
//! Error bodies are `{"error": "..."}`; anything unparseable becomes
//! `HTTP error! status: N`.

mod http;
mod memory;

use std::future::Future;

pub use http::{resolve_photo_url, HttpGateway};
pub use memory::{GatewayCall, MemoryGateway};

use crate::error::KtmResult;
use crate::types::{MutationAck, StudentId, StudentPayload, StudentRecord};

/// Operations the client needs from the record store.
pub trait StudentGateway {
    /// Fetch every record.
    fn list_students(&self) -> impl Future<Output = KtmResult<Vec<StudentRecord>>> + Send;

    /// Create a record; the gateway assigns the id.
    fn create_student(
        &self,
        payload: &StudentPayload,
    ) -> impl Future<Output = KtmResult<MutationAck>> + Send;

    /// Replace the fields of an existing record. A payload without a photo
    /// keeps the stored one.
    fn update_student(
        &self,
        id: &StudentId,
        payload: &StudentPayload,
    ) -> impl Future<Output = KtmResult<MutationAck>> + Send;

    fn delete_student(&self, id: &StudentId) -> impl Future<Output = KtmResult<()>> + Send;

    /// Download a stored photo by its record path.
    fn fetch_photo(&self, path: &str) -> impl Future<Output = KtmResult<Vec<u8>>> + Send;

    /// Address a UI can display a stored photo from, if any.
    fn photo_location(&self, path: &str) -> Option<String>;
}
