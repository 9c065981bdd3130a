//! In-process gateway.
//!
//! Keeps records in memory and remembers every call it receives. Used by the
//! tests and for running the admin window without a server (`--offline`).

use std::collections::HashMap;

use parking_lot::Mutex;

use super::StudentGateway;
use crate::error::{KtmError, KtmResult};
use crate::photo::{self, PhotoAttachment};
use crate::types::{MutationAck, StudentId, StudentPayload, StudentRecord};

/// A request observed by [`MemoryGateway`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    List,
    Create,
    Update(StudentId),
    Delete(StudentId),
    FetchPhoto(String),
}

#[derive(Debug, Default)]
struct MemoryState {
    records: Vec<StudentRecord>,
    photos: HashMap<String, PhotoAttachment>,
    next_id: u64,
    calls: Vec<GatewayCall>,
    failure: Option<KtmError>,
    offline: bool,
}

#[derive(Debug, Default)]
pub struct MemoryGateway {
    state: Mutex<MemoryState>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with existing records; new ids continue after the largest
    /// numeric id.
    pub fn with_records(records: Vec<StudentRecord>) -> Self {
        let next_id = records
            .iter()
            .filter_map(|r| r.id.as_str().parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        Self {
            state: Mutex::new(MemoryState {
                records,
                next_id,
                ..Default::default()
            }),
        }
    }

    /// Every call received so far, oldest first.
    pub fn calls(&self) -> Vec<GatewayCall> {
        self.state.lock().calls.clone()
    }

    /// Current contents, bypassing the call log.
    pub fn records(&self) -> Vec<StudentRecord> {
        self.state.lock().records.clone()
    }

    /// Make every following call fail as if the server were unreachable.
    pub fn set_offline(&self, offline: bool) {
        self.state.lock().offline = offline;
    }

    /// Fail the next call with a gateway error carrying `message`.
    pub fn fail_next(&self, status: u16, message: impl Into<String>) {
        self.state.lock().failure = Some(KtmError::Gateway {
            status,
            message: message.into(),
        });
    }

    /// Store a photo under `path` so records can refer to it.
    pub fn put_photo(&self, path: impl Into<String>, photo: PhotoAttachment) {
        self.state.lock().photos.insert(path.into(), photo);
    }

    fn begin(&self, call: GatewayCall) -> KtmResult<parking_lot::MutexGuard<'_, MemoryState>> {
        let mut state = self.state.lock();
        state.calls.push(call);
        if state.offline {
            return Err(KtmError::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "gateway unreachable",
            )));
        }
        if let Some(err) = state.failure.take() {
            return Err(err);
        }
        Ok(state)
    }
}

fn store_photo(state: &mut MemoryState, photo: &Option<PhotoAttachment>) -> Option<String> {
    photo.as_ref().map(|p| {
        let path = format!("/uploads/{}_{}", state.next_id, p.file_name);
        state.photos.insert(path.clone(), p.clone());
        path
    })
}

impl StudentGateway for MemoryGateway {
    async fn list_students(&self) -> KtmResult<Vec<StudentRecord>> {
        let state = self.begin(GatewayCall::List)?;
        Ok(state.records.clone())
    }

    async fn create_student(&self, payload: &StudentPayload) -> KtmResult<MutationAck> {
        let mut state = self.begin(GatewayCall::Create)?;
        state.next_id += 1;
        let id = StudentId::from(state.next_id);
        let photo_url = store_photo(&mut state, &payload.photo);

        state.records.push(StudentRecord {
            id: id.clone(),
            nim: payload.nim.clone(),
            name: payload.name.clone(),
            faculty: payload.faculty.clone(),
            major: payload.major.clone(),
            photo_url: photo_url.clone(),
        });

        Ok(MutationAck {
            id: Some(id),
            photo_url,
            message: None,
        })
    }

    async fn update_student(
        &self,
        id: &StudentId,
        payload: &StudentPayload,
    ) -> KtmResult<MutationAck> {
        let mut state = self.begin(GatewayCall::Update(id.clone()))?;
        let index = state
            .records
            .iter()
            .position(|r| &r.id == id)
            .ok_or_else(|| KtmError::NotFound(id.to_string()))?;

        let new_photo = store_photo(&mut state, &payload.photo);
        let record = &mut state.records[index];

        record.nim = payload.nim.clone();
        record.name = payload.name.clone();
        record.faculty = payload.faculty.clone();
        record.major = payload.major.clone();
        if new_photo.is_some() {
            record.photo_url = new_photo;
        }

        Ok(MutationAck {
            id: Some(id.clone()),
            photo_url: record.photo_url.clone(),
            message: Some("Student updated successfully".to_string()),
        })
    }

    async fn delete_student(&self, id: &StudentId) -> KtmResult<()> {
        let mut state = self.begin(GatewayCall::Delete(id.clone()))?;
        let before = state.records.len();
        state.records.retain(|r| &r.id != id);
        if state.records.len() == before {
            return Err(KtmError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn fetch_photo(&self, path: &str) -> KtmResult<Vec<u8>> {
        let state = self.begin(GatewayCall::FetchPhoto(path.to_string()))?;
        state
            .photos
            .get(path)
            .map(|p| p.bytes.clone())
            .ok_or_else(|| KtmError::NotFound(path.to_string()))
    }

    fn photo_location(&self, path: &str) -> Option<String> {
        let state = self.state.lock();
        state
            .photos
            .get(path)
            .map(|p| photo::data_uri(&p.mime_type, &p.bytes))
    }
}
