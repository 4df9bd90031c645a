//! Leading-edge-only throttle.
//!
//! No timer is involved: window expiry is a comparison against the time of
//! the next call. Calls absorbed inside a window are gone for good.

use crate::id::ElementId;
use crate::state::TimingState;
use crate::store::TimingStore;
use core_types::Millis;

/// Returns `true` when the call passes the gate, in which case a new window
/// `[now, now + ms)` has been opened and the caller must fire.
pub(crate) fn admit<C>(
    store: &mut TimingStore<C>,
    element: ElementId,
    now: Millis,
    ms: Millis,
) -> bool {
    if let Some(TimingState::ThrottleLocked { window_end }) = store.state(element)
        && now < *window_end
    {
        return false;
    }
    store.insert_state(
        element,
        TimingState::ThrottleLocked {
            window_end: now.saturating_add(ms),
        },
    );
    true
}

/// Clear the lock whether or not the window has elapsed.
pub(crate) fn unlock<C>(store: &mut TimingStore<C>, element: ElementId) -> bool {
    if !matches!(
        store.state(element),
        Some(TimingState::ThrottleLocked { .. })
    ) {
        return false;
    }
    store.remove_state(element).is_some()
}
