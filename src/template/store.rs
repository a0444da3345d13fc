//! Template persistence seam
//!
//! The real store is an HTTP endpoint; this module holds the request path
//! convention, the response interpretation, and an in-memory store for
//! tests and offline use.

use std::cell::RefCell;

use log::warn;
use serde::Deserialize;
use thiserror::Error;

use crate::error::ValidationError;

use super::kind::TemplateKind;
use super::record::{NewTemplate, TemplateRecord};

/// Message shown when the server gives no reason of its own
pub const DEFAULT_SAVE_ERROR: &str = "Failed to create template";

/// A write against the template store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreAction {
    Create,
    Update,
    Delete,
}

impl StoreAction {
    /// Fallback message when a rejection carries no `error` of its own
    pub fn default_error(&self) -> &'static str {
        match self {
            StoreAction::Create => DEFAULT_SAVE_ERROR,
            StoreAction::Update => "Failed to update template",
            StoreAction::Delete => "Failed to delete",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SaveError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// Non-2xx response; `message` is the server's `error` or the default
    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("invalid response from template store: {0}")]
    MalformedResponse(String),

    #[error("Template not found")]
    NotFound { id: String },
}

/// Anything that can persist templates
pub trait TemplateStore {
    fn create(
        &self,
        school_id: &str,
        kind: TemplateKind,
        request: &NewTemplate,
    ) -> Result<TemplateRecord, SaveError>;

    fn get(&self, school_id: &str, kind: TemplateKind, id: &str) -> Result<TemplateRecord, SaveError>;

    /// Replace the name, subtype, default flag and layout of an existing record
    fn update(
        &self,
        school_id: &str,
        kind: TemplateKind,
        id: &str,
        request: &NewTemplate,
    ) -> Result<TemplateRecord, SaveError>;

    fn delete(&self, school_id: &str, kind: TemplateKind, id: &str) -> Result<(), SaveError>;
}

/// `POST` path for creating a template of `kind`
pub fn endpoint_path(school_id: &str, kind: TemplateKind) -> String {
    format!("/api/documents/{}/{}", school_id, kind.api_endpoint())
}

/// `GET`, `PUT` and `DELETE` path for one existing template
pub fn record_path(school_id: &str, kind: TemplateKind, id: &str) -> String {
    format!("{}/{}", endpoint_path(school_id, kind), id)
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Turn a create response into a record or a `SaveError`
pub fn interpret_response(status: u16, body: &str) -> Result<TemplateRecord, SaveError> {
    interpret_response_for(StoreAction::Create, status, body)
}

/// Turn a create or update response into a record or a `SaveError`
pub fn interpret_response_for(
    action: StoreAction,
    status: u16,
    body: &str,
) -> Result<TemplateRecord, SaveError> {
    check_status(action, status, body)?;
    serde_json::from_str(body).map_err(|e| SaveError::MalformedResponse(e.to_string()))
}

/// A delete response carries no record; only its status matters
pub fn interpret_delete_response(status: u16, body: &str) -> Result<(), SaveError> {
    check_status(StoreAction::Delete, status, body)
}

fn check_status(action: StoreAction, status: u16, body: &str) -> Result<(), SaveError> {
    if (200..300).contains(&status) {
        return Ok(());
    }

    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| action.default_error().to_string());
    warn!("template {:?} failed with status {}: {}", action, status, message);
    Err(SaveError::Rejected { status, message })
}

/// A store that keeps records in memory
///
/// Marking a record as default clears the flag on every other record of
/// the same school, kind and subtype.
#[derive(Debug, Default)]
pub struct MemoryTemplateStore {
    records: RefCell<Vec<(TemplateKind, TemplateRecord)>>,
    next_id: RefCell<u64>,
}

impl MemoryTemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }

    /// Records of one kind belonging to `school_id`, oldest first
    pub fn list(&self, school_id: &str, kind: TemplateKind) -> Vec<TemplateRecord> {
        self.records
            .borrow()
            .iter()
            .filter(|(k, r)| *k == kind && r.school_id == school_id)
            .map(|(_, r)| r.clone())
            .collect()
    }

    /// The default record for a (school, kind, subtype), if any
    pub fn default_for(&self, school_id: &str, kind: TemplateKind, subtype: &str) -> Option<TemplateRecord> {
        self.list(school_id, kind)
            .into_iter()
            .find(|r| r.is_default && r.subtype == subtype)
    }
}

impl MemoryTemplateStore {
    fn clear_other_defaults(
        records: &mut [(TemplateKind, TemplateRecord)],
        kind: TemplateKind,
        keep: &TemplateRecord,
    ) {
        for (k, other) in records.iter_mut() {
            if *k == kind
                && other.id != keep.id
                && other.school_id == keep.school_id
                && other.subtype == keep.subtype
            {
                other.is_default = false;
            }
        }
    }
}

impl TemplateStore for MemoryTemplateStore {
    fn create(
        &self,
        school_id: &str,
        kind: TemplateKind,
        request: &NewTemplate,
    ) -> Result<TemplateRecord, SaveError> {
        let id = {
            let mut next = self.next_id.borrow_mut();
            *next += 1;
            format!("tpl-{}", *next)
        };
        let record = TemplateRecord::from_request(id, school_id, request);

        let mut records = self.records.borrow_mut();
        if record.is_default {
            Self::clear_other_defaults(&mut records, kind, &record);
        }
        records.push((kind, record.clone()));
        Ok(record)
    }

    fn get(&self, school_id: &str, kind: TemplateKind, id: &str) -> Result<TemplateRecord, SaveError> {
        self.records
            .borrow()
            .iter()
            .find(|(k, r)| *k == kind && r.school_id == school_id && r.id == id)
            .map(|(_, r)| r.clone())
            .ok_or_else(|| SaveError::NotFound { id: id.to_string() })
    }

    fn update(
        &self,
        school_id: &str,
        kind: TemplateKind,
        id: &str,
        request: &NewTemplate,
    ) -> Result<TemplateRecord, SaveError> {
        let mut records = self.records.borrow_mut();
        let Some(index) = records
            .iter()
            .position(|(k, r)| *k == kind && r.school_id == school_id && r.id == id)
        else {
            return Err(SaveError::NotFound { id: id.to_string() });
        };

        let record = {
            let stored = &mut records[index].1;
            stored.name = request.name.clone();
            stored.description = request.description.clone();
            stored.subtype = request.subtype.clone();
            stored.is_default = request.is_default;
            stored.layout_config = request.layout_config.clone();
            stored.clone()
        };
        if record.is_default {
            Self::clear_other_defaults(&mut records, kind, &record);
        }
        Ok(record)
    }

    fn delete(&self, school_id: &str, kind: TemplateKind, id: &str) -> Result<(), SaveError> {
        let mut records = self.records.borrow_mut();
        let before = records.len();
        records.retain(|(k, r)| !(*k == kind && r.school_id == school_id && r.id == id));
        if records.len() == before {
            return Err(SaveError::NotFound { id: id.to_string() });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::TemplateDraft;

    fn request(name: &str, subtype: &str, is_default: bool) -> NewTemplate {
        TemplateDraft::new(TemplateKind::IdCard)
            .with_name(name)
            .with_subtype(subtype)
            .with_default(is_default)
            .to_request("user-1")
            .unwrap()
    }

    #[test]
    fn test_endpoint_path() {
        assert_eq!(
            endpoint_path("abc", TemplateKind::AdmitCard),
            "/api/documents/abc/admitcard-templates"
        );
        assert_eq!(
            endpoint_path("abc", TemplateKind::Certificate),
            "/api/documents/abc/certificate-templates"
        );
    }

    #[test]
    fn test_interpret_success() {
        let body = r##"{"id":"t1","schoolId":"s1","name":"Final exams","type":"final","isDefault":true,"layoutConfig":{"primaryColor":"#000000"},"createdAt":"2026-01-01"}"##;
        let record = interpret_response(201, body).unwrap();
        assert_eq!(record.id, "t1");
        assert_eq!(record.subtype, "final");
        assert!(record.is_default);
        assert_eq!(record.layout_config.style.primary_color, "#000000");
    }

    #[test]
    fn test_interpret_server_error_message() {
        let err = interpret_response(409, r#"{"error":"Template name already exists"}"#).unwrap_err();
        assert_eq!(err.to_string(), "Template name already exists");
        assert!(matches!(err, SaveError::Rejected { status: 409, .. }));
    }

    #[test]
    fn test_interpret_fallback_message() {
        for body in ["", "<html>oops</html>", "{}", r#"{"error":""}"#] {
            let err = interpret_response(500, body).unwrap_err();
            assert_eq!(err.to_string(), DEFAULT_SAVE_ERROR);
        }
    }

    #[test]
    fn test_interpret_malformed_success_body() {
        assert!(matches!(
            interpret_response(200, "not json"),
            Err(SaveError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_memory_store_assigns_ids() {
        let store = MemoryTemplateStore::new();
        let a = store.create("s1", TemplateKind::IdCard, &request("Alpha", "student", false)).unwrap();
        let b = store.create("s1", TemplateKind::IdCard, &request("Beta", "student", false)).unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(store.len(), 2);
        assert!(store.list("s2", TemplateKind::IdCard).is_empty());
    }

    #[test]
    fn test_memory_store_single_default() {
        let store = MemoryTemplateStore::new();
        store.create("s1", TemplateKind::IdCard, &request("Alpha", "student", true)).unwrap();
        store.create("s1", TemplateKind::IdCard, &request("Staff", "staff", true)).unwrap();
        store.create("s2", TemplateKind::IdCard, &request("Other school", "student", true)).unwrap();
        let beta = store.create("s1", TemplateKind::IdCard, &request("Beta", "student", true)).unwrap();

        let defaults: Vec<_> = store
            .list("s1", TemplateKind::IdCard)
            .into_iter()
            .filter(|r| r.is_default)
            .map(|r| r.name)
            .collect();
        assert_eq!(defaults, vec!["Staff".to_string(), "Beta".to_string()]);
        assert_eq!(store.default_for("s1", TemplateKind::IdCard, "student"), Some(beta));
        assert!(store.default_for("s2", TemplateKind::IdCard, "student").is_some());
    }

    #[test]
    fn test_record_path() {
        assert_eq!(
            record_path("abc", TemplateKind::IdCard, "tpl-3"),
            "/api/documents/abc/idcard-templates/tpl-3"
        );
    }

    #[test]
    fn test_update_and_delete_fallback_messages() {
        let err = interpret_response_for(StoreAction::Update, 500, "").unwrap_err();
        assert_eq!(err.to_string(), "Failed to update template");
        let err = interpret_delete_response(404, "{}").unwrap_err();
        assert_eq!(err.to_string(), "Failed to delete");
        assert_eq!(interpret_delete_response(200, ""), Ok(()));
    }

    #[test]
    fn test_memory_store_update_moves_default() {
        let store = MemoryTemplateStore::new();
        let alpha = store.create("s1", TemplateKind::IdCard, &request("Alpha", "student", true)).unwrap();
        let beta = store.create("s1", TemplateKind::IdCard, &request("Beta", "student", false)).unwrap();

        let updated = store
            .update("s1", TemplateKind::IdCard, &beta.id, &request("Beta v2", "student", true))
            .unwrap();
        assert_eq!(updated.id, beta.id);
        assert_eq!(updated.name, "Beta v2");
        assert!(!store.get("s1", TemplateKind::IdCard, &alpha.id).unwrap().is_default);
        assert_eq!(
            store.default_for("s1", TemplateKind::IdCard, "student").map(|r| r.id),
            Some(beta.id)
        );
    }

    #[test]
    fn test_memory_store_unknown_id() {
        let store = MemoryTemplateStore::new();
        let a = store.create("s1", TemplateKind::IdCard, &request("Alpha", "student", false)).unwrap();
        assert_eq!(
            store.get("s2", TemplateKind::IdCard, &a.id),
            Err(SaveError::NotFound { id: a.id.clone() })
        );
        assert!(store.update("s1", TemplateKind::Certificate, &a.id, &request("Gamma", "staff", false)).is_err());
        assert!(store.delete("s1", TemplateKind::IdCard, "tpl-99").is_err());

        assert_eq!(store.delete("s1", TemplateKind::IdCard, &a.id), Ok(()));
        assert!(store.is_empty());
    }
}
