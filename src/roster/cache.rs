//! Generation-counted cache of the remote user collection.
//!
//! After every successful mutation the collection is re-read wholesale and
//! the cache replaced, never patched in place. Each replacement bumps the
//! generation; a consumer holding a view derived from an older generation
//! must discard it and recompute.

use crate::model::UserRecord;

#[derive(Debug, Default)]
pub struct RecordCache {
    records: Vec<UserRecord>,
    generation: u64,
    valid: bool,
}

impl RecordCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the cached collection and return the new generation.
    pub fn populate(&mut self, records: Vec<UserRecord>) -> u64 {
        self.records = records;
        self.valid = true;
        self.generation += 1;
        self.generation
    }

    /// Mark the cached collection as stale. The generation advances so that
    /// views derived before the invalidation can be detected as stale even
    /// if a later populate restores identical data.
    pub fn invalidate(&mut self) {
        self.valid = false;
        self.generation += 1;
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether a view derived at `generation` may still be shown.
    pub fn is_current(&self, generation: u64) -> bool {
        self.valid && self.generation == generation
    }

    /// The cached records, or `None` if no valid fetch has happened.
    pub fn records(&self) -> Option<&[UserRecord]> {
        if self.valid {
            Some(&self.records)
        } else {
            None
        }
    }
}
