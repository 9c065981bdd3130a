//! Record form
//!
//! A draft record plus an optional photo, submitted as create or update
//! depending on whether an existing record is being edited.
//!
//! Submission rules:
//! - any empty required field fails locally, before any request
//! - success clears the draft, the photo preview and the edit target
//! - failure leaves everything in place so the user can retry

use crate::catalog;
use crate::error::{KtmError, KtmResult};
use crate::gateway::StudentGateway;
use crate::photo::PhotoAttachment;
use crate::types::{MutationAck, StudentId, StudentPayload, StudentRecord};

/// Fields that must be non-empty before submitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    Nim,
    Name,
    Major,
    Faculty,
}

impl RequiredField {
    pub fn label(&self) -> &'static str {
        match self {
            RequiredField::Nim => "nim",
            RequiredField::Name => "name",
            RequiredField::Major => "major",
            RequiredField::Faculty => "faculty",
        }
    }
}

/// Text fields of a record being entered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordDraft {
    pub nim: String,
    pub name: String,
    pub faculty: String,
    pub major: String,
}

impl RecordDraft {
    pub fn from_record(record: &StudentRecord) -> Self {
        Self {
            nim: record.nim.clone(),
            name: record.name.clone(),
            faculty: record.faculty.clone(),
            major: record.major.clone(),
        }
    }

    /// Change faculty, dropping a major the new faculty does not offer.
    pub fn set_faculty(&mut self, faculty: impl Into<String>) {
        self.faculty = faculty.into();
        if !catalog::is_valid_pair(&self.faculty, &self.major) {
            self.major.clear();
        }
    }

    /// Majors selectable for the current faculty.
    pub fn available_majors(&self) -> &'static [&'static str] {
        catalog::majors_for(&self.faculty)
    }

    /// Required fields that are still empty, in form order.
    pub fn missing_fields(&self) -> Vec<RequiredField> {
        [
            (RequiredField::Nim, &self.nim),
            (RequiredField::Name, &self.name),
            (RequiredField::Major, &self.major),
            (RequiredField::Faculty, &self.faculty),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| field)
        .collect()
    }

    pub fn validate(&self) -> KtmResult<()> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(KtmError::MissingFields(missing))
        }
    }
}

/// What a successful submission did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(MutationAck),
    Updated(StudentId, MutationAck),
}

/// Form state: draft, attachment, preview and edit target.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordForm {
    draft: RecordDraft,
    photo: Option<PhotoAttachment>,
    preview: Option<String>,
    editing: Option<StudentId>,
}

impl RecordForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &RecordDraft {
        &self.draft
    }

    pub fn set_nim(&mut self, nim: impl Into<String>) {
        self.draft.nim = nim.into();
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
    }

    pub fn set_faculty(&mut self, faculty: impl Into<String>) {
        self.draft.set_faculty(faculty);
    }

    pub fn set_major(&mut self, major: impl Into<String>) {
        self.draft.major = major.into();
    }

    pub fn available_majors(&self) -> &'static [&'static str] {
        self.draft.available_majors()
    }

    /// Attach a newly chosen photo, replacing any previous preview.
    pub fn attach_photo(&mut self, photo: PhotoAttachment) {
        self.preview = Some(photo.preview_data_uri());
        self.photo = Some(photo);
    }

    pub fn photo(&self) -> Option<&PhotoAttachment> {
        self.photo.as_ref()
    }

    /// Image source for the preview (data URI or stored photo address).
    pub fn photo_preview(&self) -> Option<&str> {
        self.preview.as_deref()
    }

    /// Id of the record being edited, if any.
    pub fn editing(&self) -> Option<&StudentId> {
        self.editing.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Load an existing record for editing.
    ///
    /// The photo attachment stays empty (no re-upload needed); the stored
    /// photo, if any, is shown from `stored_photo`.
    pub fn begin_edit(&mut self, record: &StudentRecord, stored_photo: Option<String>) {
        self.draft = RecordDraft::from_record(record);
        self.photo = None;
        self.preview = stored_photo;
        self.editing = Some(record.id.clone());
    }

    /// Leave edit mode and clear everything.
    pub fn cancel_edit(&mut self) {
        self.reset();
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Request body for the current draft.
    pub fn payload(&self) -> StudentPayload {
        StudentPayload {
            nim: self.draft.nim.clone(),
            name: self.draft.name.clone(),
            faculty: self.draft.faculty.clone(),
            major: self.draft.major.clone(),
            photo: self.photo.clone(),
        }
    }

    /// Validate and send the draft.
    ///
    /// The form itself is not touched; call [`RecordForm::reset`] after a
    /// success.
    pub async fn send<G: StudentGateway>(
        payload: StudentPayload,
        editing: Option<StudentId>,
        gateway: &G,
    ) -> KtmResult<SubmitOutcome> {
        RecordDraft {
            nim: payload.nim.clone(),
            name: payload.name.clone(),
            faculty: payload.faculty.clone(),
            major: payload.major.clone(),
        }
        .validate()?;

        match editing {
            Some(id) => {
                let ack = gateway.update_student(&id, &payload).await?;
                tracing::info!(id = %id, "Student updated");
                Ok(SubmitOutcome::Updated(id, ack))
            }
            None => {
                let ack = gateway.create_student(&payload).await?;
                tracing::info!(id = ?ack.id, "Student created");
                Ok(SubmitOutcome::Created(ack))
            }
        }
    }

    /// Validate, send, and reset on success.
    pub async fn submit<G: StudentGateway>(&mut self, gateway: &G) -> KtmResult<SubmitOutcome> {
        let outcome = Self::send(self.payload(), self.editing.clone(), gateway).await?;
        self.reset();
        Ok(outcome)
    }
}
