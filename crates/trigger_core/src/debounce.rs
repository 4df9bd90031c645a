//! Trailing-edge debounce.
//!
//! Every call re-arms the element: the previous callback is discarded and a
//! fresh deadline `ms` after the call is queued under a new generation.

use crate::id::ElementId;
use crate::state::{Callback, TimingState};
use crate::store::TimingStore;
use crate::timers::{Deadline, DeadlineQueue};
use core_types::Millis;

pub(crate) fn arm<C>(
    store: &mut TimingStore<C>,
    queue: &mut DeadlineQueue,
    element: ElementId,
    now: Millis,
    ms: Millis,
    callback: Callback<C>,
) -> Millis {
    let deadline = now.saturating_add(ms);
    let generation = store.bump_generation();
    let previous = store.insert_state(
        element,
        TimingState::DebouncePending {
            deadline,
            generation,
            callback,
        },
    );
    if let Some(TimingState::DebouncePending { deadline: old, .. }) = previous {
        log::trace!(target: "trigger.timer", "{element}: superseded deadline {old} -> {deadline}");
    }
    queue.push(Deadline {
        at: deadline,
        generation,
        element,
    });
    deadline
}

/// Discard the pending callback, if any. The queued deadline goes stale.
pub(crate) fn cancel<C>(store: &mut TimingStore<C>, element: ElementId) -> bool {
    if !matches!(
        store.state(element),
        Some(TimingState::DebouncePending { .. })
    ) {
        return false;
    }
    store.remove_state(element).is_some()
}

/// Take the callback armed under `generation`, leaving the element idle.
/// Returns `None` when that arm has been superseded or cancelled.
pub(crate) fn take_if_current<C>(
    store: &mut TimingStore<C>,
    element: ElementId,
    generation: u64,
) -> Option<Callback<C>> {
    match store.state(element) {
        Some(TimingState::DebouncePending { generation: g, .. }) if *g == generation => {}
        _ => return None,
    }
    match store.remove_state(element) {
        Some(TimingState::DebouncePending { callback, .. }) => Some(callback),
        _ => None,
    }
}

/// Generation of the element's current arm, if it has one.
pub(crate) fn current_generation<C>(store: &TimingStore<C>, element: ElementId) -> Option<u64> {
    match store.state(element) {
        Some(TimingState::DebouncePending { generation, .. }) => Some(*generation),
        _ => None,
    }
}
