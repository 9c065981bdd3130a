//! UI Components for KTM Admin.

mod card_preview;
mod photo_picker;
mod record_form;
mod record_table;

pub use card_preview::CardPreviewModal;
pub use photo_picker::PhotoPicker;
pub use record_form::RecordFormPanel;
pub use record_table::RecordTableView;
