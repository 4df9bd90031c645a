//! Debounce deadline queue.
//!
//! Deadlines are never removed when they are superseded or cancelled; they
//! stay queued and are recognized as stale by generation when they come due.
//! The queue is compacted once stale entries dominate it.

use crate::id::ElementId;
use core_types::Millis;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Below this many queued entries compaction is never worth it.
const COMPACT_FLOOR: usize = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct Deadline {
    pub(crate) at: Millis,
    pub(crate) generation: u64,
    pub(crate) element: ElementId,
}

#[derive(Debug, Default)]
pub(crate) struct DeadlineQueue {
    heap: BinaryHeap<Reverse<Deadline>>,
}

impl DeadlineQueue {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, deadline: Deadline) {
        self.heap.push(Reverse(deadline));
    }

    /// Earliest queued deadline, stale or not.
    pub(crate) fn peek(&self) -> Option<&Deadline> {
        self.heap.peek().map(|Reverse(d)| d)
    }

    /// Pop the earliest deadline if it is due at `now`. Ties resolve in arm order.
    pub(crate) fn pop_due(&mut self, now: Millis) -> Option<Deadline> {
        if self.peek()?.at > now {
            return None;
        }
        self.heap.pop().map(|Reverse(d)| d)
    }

    pub(crate) fn pop(&mut self) -> Option<Deadline> {
        self.heap.pop().map(|Reverse(d)| d)
    }

    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }

    /// Drop stale entries when they outnumber live ones.
    pub(crate) fn compact_if_sparse(
        &mut self,
        live: impl FnOnce() -> usize,
        mut is_current: impl FnMut(&Deadline) -> bool,
    ) -> usize {
        let len = self.heap.len();
        if len < COMPACT_FLOOR || len < live().saturating_mul(2) {
            return 0;
        }
        self.heap.retain(|Reverse(d)| is_current(d));
        len - self.heap.len()
    }
}
