//! Batched attendance edits
//!
//! Edits made in an attendance grid accumulate locally and are sent in one
//! bulk call. The batch succeeds or fails as a whole: on failure every
//! pending change is kept so the user can retry.

use std::collections::BTreeMap;

use log::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
    HalfDay,
    OnLeave,
}

/// Unsaved edits for one person
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingChange {
    pub status: Option<AttendanceStatus>,
    pub remark: Option<String>,
}

/// One entry of the bulk request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceUpdate {
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AttendanceStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommitError {
    #[error("Failed to save attendance: {0}")]
    Rejected(String),
}

/// Receives a whole batch in a single call
pub trait AttendanceSink {
    fn commit(&self, updates: &[AttendanceUpdate]) -> Result<(), CommitError>;
}

#[derive(Debug, Clone, Default)]
pub struct PendingChanges {
    changes: BTreeMap<String, PendingChange>,
}

impl PendingChanges {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_status(&mut self, id: impl Into<String>, status: AttendanceStatus) {
        self.changes.entry(id.into()).or_default().status = Some(status);
    }

    pub fn set_remark(&mut self, id: impl Into<String>, remark: impl Into<String>) {
        self.changes.entry(id.into()).or_default().remark = Some(remark.into());
    }

    pub fn get(&self, id: &str) -> Option<&PendingChange> {
        self.changes.get(id)
    }

    /// Drop the pending edits for one person
    pub fn discard(&mut self, id: &str) -> bool {
        self.changes.remove(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn updates(&self) -> Vec<AttendanceUpdate> {
        self.changes
            .iter()
            .map(|(id, change)| AttendanceUpdate {
                user_id: id.clone(),
                status: change.status,
                remarks: change.remark.clone(),
            })
            .collect()
    }

    /// Send every pending change in one call. Clears on success; keeps
    /// everything on failure.
    pub fn commit(&mut self, sink: &dyn AttendanceSink) -> Result<usize, CommitError> {
        if self.is_empty() {
            return Ok(0);
        }
        let updates = self.updates();
        match sink.commit(&updates) {
            Ok(()) => {
                info!("saved {} attendance change(s)", updates.len());
                self.changes.clear();
                Ok(updates.len())
            }
            Err(e) => {
                warn!("attendance batch of {} failed: {}", updates.len(), e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingSink {
        fail: bool,
        calls: RefCell<Vec<Vec<AttendanceUpdate>>>,
    }

    impl AttendanceSink for RecordingSink {
        fn commit(&self, updates: &[AttendanceUpdate]) -> Result<(), CommitError> {
            self.calls.borrow_mut().push(updates.to_vec());
            if self.fail {
                Err(CommitError::Rejected("server unavailable".to_string()))
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn test_edits_merge_per_person() {
        let mut pending = PendingChanges::new();
        pending.set_status("s1", AttendanceStatus::Absent);
        pending.set_remark("s1", "sick");
        pending.set_status("s1", AttendanceStatus::HalfDay);
        assert_eq!(pending.len(), 1);
        assert_eq!(
            pending.get("s1"),
            Some(&PendingChange {
                status: Some(AttendanceStatus::HalfDay),
                remark: Some("sick".to_string()),
            })
        );
    }

    #[test]
    fn test_commit_sends_one_batch_and_clears() {
        let mut pending = PendingChanges::new();
        pending.set_status("s2", AttendanceStatus::Present);
        pending.set_status("s1", AttendanceStatus::Late);
        let sink = RecordingSink::default();
        assert_eq!(pending.commit(&sink), Ok(2));
        assert!(pending.is_empty());

        let calls = sink.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0][0].user_id, "s1");
    }

    #[test]
    fn test_failed_commit_keeps_everything() {
        let mut pending = PendingChanges::new();
        pending.set_status("s1", AttendanceStatus::Absent);
        pending.set_remark("s2", "left early");
        let sink = RecordingSink {
            fail: true,
            ..RecordingSink::default()
        };
        assert!(pending.commit(&sink).is_err());
        assert_eq!(pending.len(), 2);
        assert_eq!(pending.get("s2").and_then(|c| c.remark.as_deref()), Some("left early"));
    }

    #[test]
    fn test_empty_commit_skips_sink() {
        let sink = RecordingSink::default();
        assert_eq!(PendingChanges::new().commit(&sink), Ok(0));
        assert!(sink.calls.borrow().is_empty());
    }

    #[test]
    fn test_update_json() {
        let mut pending = PendingChanges::new();
        pending.set_status("t9", AttendanceStatus::OnLeave);
        let json = serde_json::to_string(&pending.updates()).unwrap();
        assert_eq!(json, r#"[{"userId":"t9","status":"ON_LEAVE"}]"#);
    }
}
