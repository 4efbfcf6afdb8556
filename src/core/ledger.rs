//! TimerLedger: bookkeeping for timer handles that cancel on drop
//!
//! Browser timer handles stop their timer when dropped, and dropping one
//! while its own callback runs frees the closure under the caller. The
//! ledger tracks which handles are live, which have fired or been cleared,
//! and hands retired handles back for dropping only when that is safe:
//!
//! ```text
//! insert ──► live ──retire──► retired ──leave/purge──► returned to caller
//!                  (stopped)            (depth 0, not the running timer)
//! ```
//!
//! `leave` runs at the end of every callback, so a page whose only activity
//! is a self-rescheduling timer keeps at most the running handle retired.

use std::collections::HashMap;

use crate::core::clock::TimerId;

pub struct TimerLedger<H> {
    next_id: u64,
    live: HashMap<TimerId, H>,
    retired: Vec<(TimerId, H)>,
    /// Callbacks currently executing
    depth: u32,
}

impl<H> Default for TimerLedger<H> {
    fn default() -> Self {
        Self { next_id: 0, live: HashMap::new(), retired: Vec::new(), depth: 0 }
    }
}

impl<H> TimerLedger<H> {
    pub fn allocate(&mut self) -> TimerId {
        self.next_id += 1;
        TimerId(self.next_id)
    }

    pub fn insert(&mut self, id: TimerId, handle: H) {
        self.live.insert(id, handle);
    }

    pub fn live(&self) -> usize { self.live.len() }

    pub fn retired(&self) -> usize { self.retired.len() }

    /// Move a live handle to the retired list. `stop` runs first so the
    /// timer never fires again even though the handle is kept.
    pub fn retire(&mut self, id: TimerId, stop: impl FnOnce(H) -> H) {
        if let Some(handle) = self.live.remove(&id) {
            self.retired.push((id, stop(handle)));
        }
    }

    /// Mark a callback as running; false when its timer was cleared
    pub fn enter(&mut self, id: TimerId) -> bool {
        if !self.live.contains_key(&id) {
            return false;
        }
        self.depth += 1;
        true
    }

    /// End of a callback. Once no callback is running, every retired
    /// handle except the caller's own is returned for dropping.
    #[must_use]
    pub fn leave(&mut self, running: TimerId) -> Vec<H> {
        self.depth = self.depth.saturating_sub(1);
        if self.depth > 0 {
            return Vec::new();
        }
        let (keep, stale): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.retired).into_iter().partition(|(id, _)| *id == running);
        self.retired = keep;
        stale.into_iter().map(|(_, handle)| handle).collect()
    }

    /// Every retired handle, or nothing while a callback is running
    #[must_use]
    pub fn purge(&mut self) -> Vec<H> {
        if self.depth > 0 {
            return Vec::new();
        }
        std::mem::take(&mut self.retired).into_iter().map(|(_, handle)| handle).collect()
    }
}
