//! Template records and persistence
//!
//! A template is a named layout document owned by a school. Three kinds
//! exist (certificates, ID cards, admit cards); only admit cards carry a
//! free-form element canvas.

mod kind;
mod record;
mod store;

pub use kind::TemplateKind;
pub use record::{NewTemplate, TemplateDraft, TemplateRecord, MIN_NAME_LEN};
pub use store::{
    endpoint_path, interpret_delete_response, interpret_response, interpret_response_for,
    record_path, MemoryTemplateStore, SaveError, StoreAction, TemplateStore, DEFAULT_SAVE_ERROR,
};
