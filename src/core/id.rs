use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

use crate::core::expense::ExpenseId;

pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> ExpenseId;
}

/// Ids are the wall-clock time in milliseconds. Two calls within the
/// same millisecond (or a clock stepping backwards) get `last + 1`, so
/// ids keep increasing and never repeat within one generator.
#[derive(Debug, Default)]
pub struct TimestampIds {
    last: AtomicI64,
}

impl TimestampIds {
    pub fn new() -> TimestampIds {
        TimestampIds::default()
    }

    fn successor(last: i64, now: i64) -> i64 {
        if now > last { now } else { last + 1 }
    }

    fn next_after(&self, now: i64) -> i64 {
        let previous = self.last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| Some(Self::successor(last, now)))
            .unwrap_or_else(|last| last);
        return Self::successor(previous, now);
    }
}

impl IdGenerator for TimestampIds {
    fn generate(&self) -> ExpenseId {
        self.next_after(Utc::now().timestamp_millis()).to_string()
    }
}
