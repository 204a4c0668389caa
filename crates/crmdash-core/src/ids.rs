// ── Local record ids ──
//
// New records get a millisecond timestamp id, like the demo APIs' own
// clients do. Two creates within the same millisecond, or a timestamp
// that collides with a remote id, bump the candidate until it is free.

use chrono::Utc;

use crate::model::RecordId;

/// Hands out strictly increasing ids, never one `taken` reports in use.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next id based on the wall clock.
    pub fn next_id(&mut self, taken: impl Fn(RecordId) -> bool) -> RecordId {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default();
        self.next_at(now, taken)
    }

    /// Next id given the current time in epoch milliseconds.
    ///
    /// Past `u64::MAX` the search wraps to 1, so it ends as long as `taken`
    /// leaves any id free.
    pub fn next_at(&mut self, now_ms: u64, taken: impl Fn(RecordId) -> bool) -> RecordId {
        let start = now_ms.max(self.last.saturating_add(1));
        let candidate = (start..=u64::MAX)
            .chain(1..start)
            .find(|&raw| !taken(RecordId::new(raw)))
            .unwrap_or(start);
        self.last = candidate;
        RecordId::new(candidate)
    }
}
