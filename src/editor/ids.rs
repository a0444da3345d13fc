//! Fresh element ids: a type prefix plus a millisecond timestamp token

use std::fmt;

use crate::layout::{Element, ElementType};

/// Source of the timestamp part of element ids
pub trait Clock: fmt::Debug {
    fn now_millis(&self) -> i64;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// A clock frozen at one instant, for reproducible ids
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.0
    }
}

/// Generate `"{type}-{millis}"`, bumping the timestamp until no element in
/// `existing` already uses it.
pub fn fresh_id(element_type: ElementType, clock: &dyn Clock, existing: &[Element]) -> String {
    let prefix = element_type.as_str();
    let mut millis = clock.now_millis();
    loop {
        let candidate = format!("{}-{}", prefix, millis);
        if !existing.iter().any(|e| e.id == candidate) {
            return candidate;
        }
        millis += 1;
    }
}
