//! Card preview state.
//!
//! At most one record is previewed at a time. The preview closes on a
//! pointer press outside the card and after every export, successful or not.

use parking_lot::Mutex;

use crate::types::StudentRecord;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PreviewState {
    #[default]
    Hidden,
    Showing(StudentRecord),
}

impl PreviewState {
    pub fn record(&self) -> Option<&StudentRecord> {
        match self {
            PreviewState::Hidden => None,
            PreviewState::Showing(record) => Some(record),
        }
    }

    pub fn is_showing(&self) -> bool {
        matches!(self, PreviewState::Showing(_))
    }
}

/// Preview state plus whether its surface is laid out yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardPreview {
    state: PreviewState,
    attached: bool,
}

impl CardPreview {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PreviewState {
        &self.state
    }

    pub fn record(&self) -> Option<&StudentRecord> {
        self.state.record()
    }

    pub fn is_showing(&self) -> bool {
        self.state.is_showing()
    }

    /// Show `record`. A different record needs a fresh layout.
    pub fn show(&mut self, record: StudentRecord) {
        if self.state.record() != Some(&record) {
            self.attached = false;
        }
        self.state = PreviewState::Showing(record);
    }

    /// The surface for the current record has been mounted.
    pub fn mark_attached(&mut self) {
        if self.state.is_showing() {
            self.attached = true;
        }
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Handle a pointer press. Returns true if it closed the preview.
    pub fn pointer_down(&mut self, inside_card: bool) -> bool {
        if self.state.is_showing() && !inside_card {
            self.close();
            true
        } else {
            false
        }
    }

    pub fn close(&mut self) {
        self.state = PreviewState::Hidden;
        self.attached = false;
    }
}

/// The visual surface an export renders from.
pub trait PreviewSurface {
    fn show(&self, record: &StudentRecord);
    fn is_attached(&self) -> bool;
    fn clear(&self);
}

impl PreviewSurface for Mutex<CardPreview> {
    fn show(&self, record: &StudentRecord) {
        self.lock().show(record.clone());
    }

    fn is_attached(&self) -> bool {
        self.lock().is_attached()
    }

    fn clear(&self) {
        self.lock().close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StudentId;

    fn record(id: u64) -> StudentRecord {
        StudentRecord {
            id: StudentId::from(id),
            nim: id.to_string(),
            name: format!("Student {}", id),
            faculty: String::new(),
            major: String::new(),
            photo_url: None,
        }
    }

    #[test]
    fn outside_press_closes() {
        let mut preview = CardPreview::new();
        preview.show(record(1));
        assert!(!preview.pointer_down(true));
        assert!(preview.is_showing());
        assert!(preview.pointer_down(false));
        assert_eq!(preview.state(), &PreviewState::Hidden);
    }

    #[test]
    fn press_while_hidden_is_ignored() {
        let mut preview = CardPreview::new();
        assert!(!preview.pointer_down(false));
    }

    #[test]
    fn switching_record_requires_new_layout() {
        let mut preview = CardPreview::new();
        preview.show(record(1));
        preview.mark_attached();
        assert!(preview.is_attached());

        preview.show(record(1));
        assert!(preview.is_attached());

        preview.show(record(2));
        assert!(!preview.is_attached());
        assert_eq!(preview.record().unwrap().id, StudentId::from(2));
    }

    #[test]
    fn attach_needs_a_record() {
        let mut preview = CardPreview::new();
        preview.mark_attached();
        assert!(!preview.is_attached());
    }
}
