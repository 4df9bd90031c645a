//! Cancellation coordinator: lifecycle events sweeping a scope.

use crate::debounce;
use crate::id::ElementId;
use crate::spec::TriggerSpec;
use crate::store::TimingStore;
use crate::throttle;
use crate::tree::ElementTree;

/// A lifecycle event observed on `scope`.
///
/// `exclude` names the element whose own interaction produced the event; its
/// state is left untouched. Submit-style events carry no originator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CancelRequest {
    pub scope: ElementId,
    pub exclude: Option<ElementId>,
}

impl CancelRequest {
    pub fn all(scope: ElementId) -> Self {
        Self {
            scope,
            exclude: None,
        }
    }

    pub fn excluding(scope: ElementId, originator: ElementId) -> Self {
        Self {
            scope,
            exclude: Some(originator),
        }
    }
}

/// What a sweep did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CancelReport {
    pub debounces_discarded: usize,
    pub throttles_unlocked: usize,
    /// Elements in scope that were skipped as the originator.
    pub excluded: usize,
    /// Entries of detached elements dropped along the way.
    pub pruned: usize,
}

impl CancelReport {
    pub fn cancelled(&self) -> usize {
        self.debounces_discarded + self.throttles_unlocked
    }
}

pub(crate) fn sweep<C, T: ElementTree + ?Sized>(
    store: &mut TimingStore<C>,
    tree: &T,
    request: CancelRequest,
) -> CancelReport {
    let mut report = CancelReport::default();

    for element in store.ids_with_state() {
        if !tree.is_live(element) {
            store.evict(element);
            report.pruned += 1;
            continue;
        }
        if !tree.contains(request.scope, element) {
            continue;
        }
        if request.exclude == Some(element) {
            report.excluded += 1;
            continue;
        }
        match store.spec(element) {
            Some(TriggerSpec::Delayed(_)) => {
                if debounce::cancel(store, element) {
                    report.debounces_discarded += 1;
                }
            }
            Some(TriggerSpec::Throttled(_)) => {
                if throttle::unlock(store, element) {
                    report.throttles_unlocked += 1;
                }
            }
            Some(TriggerSpec::Immediate) | None => {}
        }
    }

    report
}
