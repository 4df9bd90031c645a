//! Per-element timing state.
//!
//! Only [`TimingStore`](crate::store::TimingStore) holds these. An element
//! without an entry is idle.

use core_types::Millis;
use std::fmt;

/// Deferred work handed to the scheduler. Receives the caller's host context
/// when it finally runs.
pub type Callback<C> = Box<dyn FnOnce(&mut C)>;

pub(crate) enum TimingState<C> {
    DebouncePending {
        deadline: Millis,
        /// Matches exactly one entry in the deadline queue; every other
        /// queued deadline for this element is stale.
        generation: u64,
        callback: Callback<C>,
    },
    ThrottleLocked {
        window_end: Millis,
    },
}

impl<C> TimingState<C> {
    pub(crate) fn phase(&self) -> TimingPhase {
        match self {
            TimingState::DebouncePending { deadline, .. } => TimingPhase::DebouncePending {
                deadline: *deadline,
            },
            TimingState::ThrottleLocked { window_end } => TimingPhase::ThrottleLocked {
                window_end: *window_end,
            },
        }
    }
}

impl<C> fmt::Debug for TimingState<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimingState::DebouncePending {
                deadline,
                generation,
                ..
            } => f
                .debug_struct("DebouncePending")
                .field("deadline", deadline)
                .field("generation", generation)
                .finish_non_exhaustive(),
            TimingState::ThrottleLocked { window_end } => f
                .debug_struct("ThrottleLocked")
                .field("window_end", window_end)
                .finish(),
        }
    }
}

/// Observable view of an element's timing state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TimingPhase {
    #[default]
    Idle,
    DebouncePending {
        deadline: Millis,
    },
    /// The window may already have elapsed; expiry is only noticed when the
    /// next call arrives.
    ThrottleLocked {
        window_end: Millis,
    },
}
