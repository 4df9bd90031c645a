//! The per-element trigger scheduler.
//!
//! Single-threaded and turn based: each raw event, lifecycle event, or timer
//! turn calls into the scheduler once and runs to completion. The caller owns
//! the clock and the event loop; it samples `now`, passes it in through a
//! [`TurnCtx`], and asks [`TriggerScheduler::next_deadline`] when the next
//! timer turn is needed.

use crate::cancel::{self, CancelReport, CancelRequest};
use crate::config::{SchedulerConfig, TriggerAttrs};
use crate::debounce;
use crate::error::TriggerError;
use crate::id::ElementId;
use crate::spec::{self, TriggerSpec};
use crate::state::{Callback, TimingPhase};
use crate::store::TimingStore;
use crate::throttle;
use crate::timers::DeadlineQueue;
use crate::tree::ElementTree;
use core_types::Millis;

/// Everything a single turn needs besides the scheduler itself.
pub struct TurnCtx<'a, T: ElementTree + ?Sized, C> {
    pub tree: &'a T,
    pub now: Millis,
    /// Handed to callbacks that fire during this turn.
    pub host: &'a mut C,
}

impl<'a, T: ElementTree + ?Sized, C> TurnCtx<'a, T, C> {
    pub fn new(tree: &'a T, now: Millis, host: &'a mut C) -> Self {
        Self { tree, now, host }
    }
}

/// Outcome of a single `schedule` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dispatch {
    /// The callback ran synchronously.
    Fired,
    /// The callback will run at `deadline` unless superseded or cancelled.
    Armed { deadline: Millis },
    /// Suppressed by an open throttle window; it will never run.
    Dropped,
}

pub struct TriggerScheduler<C> {
    config: SchedulerConfig,
    store: TimingStore<C>,
    deadlines: DeadlineQueue,
}

impl<C> TriggerScheduler<C> {
    pub fn new(config: SchedulerConfig) -> Self {
        Self {
            config,
            store: TimingStore::new(),
            deadlines: DeadlineQueue::new(),
        }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Trigger mode of `element`, resolved on first use and cached for the
    /// element's lifetime. Failures are not cached.
    pub fn resolve<T: ElementTree + ?Sized>(
        &mut self,
        tree: &T,
        element: ElementId,
        attrs: TriggerAttrs<'_>,
    ) -> Result<TriggerSpec, TriggerError> {
        if let Some(spec) = self.store.spec(element) {
            return Ok(spec);
        }
        let spec = spec::resolve(tree, element, attrs, &self.config).inspect_err(|err| {
            log::warn!(target: "trigger.schedule", "{err}");
        })?;
        log::debug!(target: "trigger.schedule", "{element} resolved to {spec:?}");
        self.store.cache_spec(element, spec);
        Ok(spec)
    }

    /// Handle one raw interaction event on `element`.
    pub fn schedule<T: ElementTree + ?Sized>(
        &mut self,
        turn: TurnCtx<'_, T, C>,
        element: ElementId,
        attrs: TriggerAttrs<'_>,
        callback: Callback<C>,
    ) -> Result<Dispatch, TriggerError> {
        let TurnCtx { tree, now, host } = turn;

        if !tree.is_live(element) {
            self.store.evict(element);
            self.settle_deadlines();
            return Err(TriggerError::Detached { element });
        }

        let spec = self.resolve(tree, element, attrs)?;
        let dispatch = match spec {
            TriggerSpec::Immediate => {
                callback(host);
                Dispatch::Fired
            }
            TriggerSpec::Delayed(ms) => {
                let deadline = debounce::arm(
                    &mut self.store,
                    &mut self.deadlines,
                    element,
                    now,
                    ms,
                    callback,
                );
                self.settle_deadlines();
                Dispatch::Armed { deadline }
            }
            TriggerSpec::Throttled(ms) => {
                if throttle::admit(&mut self.store, element, now, ms) {
                    callback(host);
                    Dispatch::Fired
                } else {
                    Dispatch::Dropped
                }
            }
        };

        log::trace!(target: "trigger.schedule", "{element} @{now}: {spec:?} -> {dispatch:?}");
        Ok(dispatch)
    }

    /// Handle one lifecycle event. Takes effect immediately: nothing cancelled
    /// here fires unless it is scheduled again.
    pub fn cancel<T: ElementTree + ?Sized>(
        &mut self,
        tree: &T,
        request: CancelRequest,
    ) -> CancelReport {
        let report = cancel::sweep(&mut self.store, tree, request);
        self.settle_deadlines();
        log::debug!(
            target: "trigger.cancel",
            "scope {} (excluding {:?}): {report:?}",
            request.scope,
            request.exclude
        );
        report
    }

    /// Timer turn: fire every current debounce whose deadline is at or before
    /// `now`, in deadline order. Returns how many callbacks ran.
    pub fn run_due<T: ElementTree + ?Sized>(&mut self, turn: TurnCtx<'_, T, C>) -> usize {
        let TurnCtx { tree, now, host } = turn;
        let mut fired = 0;

        while let Some(due) = self.deadlines.pop_due(now) {
            let Some(callback) =
                debounce::take_if_current(&mut self.store, due.element, due.generation)
            else {
                log::trace!(
                    target: "trigger.timer",
                    "{} @{}: stale deadline",
                    due.element,
                    due.at
                );
                continue;
            };
            if !tree.is_live(due.element) {
                self.store.evict(due.element);
                log::debug!(
                    target: "trigger.timer",
                    "{} detached before its deadline",
                    due.element
                );
                continue;
            }
            log::trace!(target: "trigger.timer", "{} @{}: fire", due.element, now);
            callback(&mut *host);
            fired += 1;
        }

        self.settle_deadlines();
        fired
    }

    /// Fire `element`'s pending debounce right away. Returns `false` if there
    /// was nothing pending.
    pub fn flush<T: ElementTree + ?Sized>(
        &mut self,
        turn: TurnCtx<'_, T, C>,
        element: ElementId,
    ) -> bool {
        let TurnCtx { tree, host, .. } = turn;

        let Some(generation) = debounce::current_generation(&self.store, element) else {
            return false;
        };
        let callback = debounce::take_if_current(&mut self.store, element, generation);
        self.settle_deadlines();
        let Some(callback) = callback else {
            return false;
        };
        if !tree.is_live(element) {
            self.store.evict(element);
            self.settle_deadlines();
            return false;
        }
        callback(host);
        true
    }

    /// Earliest deadline that still has a callback behind it.
    pub fn next_deadline(&self) -> Option<Millis> {
        self.deadlines.peek().map(|d| d.at)
    }

    /// Forget every element that has left the document.
    pub fn prune<T: ElementTree + ?Sized>(&mut self, tree: &T) -> usize {
        let pruned = self.store.prune(tree);
        self.settle_deadlines();
        if pruned > 0 {
            log::debug!(target: "trigger.schedule", "pruned {pruned} detached elements");
        }
        pruned
    }

    pub fn spec_of(&self, element: ElementId) -> Option<TriggerSpec> {
        self.store.spec(element)
    }

    pub fn state_of(&self, element: ElementId) -> TimingPhase {
        self.store
            .state(element)
            .map(|s| s.phase())
            .unwrap_or_default()
    }

    /// Number of debounces waiting for their deadline.
    pub fn pending_len(&self) -> usize {
        self.store.pending_debounces()
    }

    /// Number of elements holding non-idle state.
    pub fn tracked_len(&self) -> usize {
        self.store.state_len()
    }

    /// Keep the head of the queue current and the queue from filling up with
    /// superseded deadlines.
    fn settle_deadlines(&mut self) {
        let store = &self.store;
        let is_current = |d: &crate::timers::Deadline| {
            debounce::current_generation(store, d.element) == Some(d.generation)
        };

        self.deadlines
            .compact_if_sparse(|| store.pending_debounces(), is_current);
        while let Some(head) = self.deadlines.peek() {
            if is_current(head) {
                break;
            }
            self.deadlines.pop();
        }
    }

    /// Queued deadlines, current or not yet recognized as stale.
    pub fn queued_deadlines(&self) -> usize {
        self.deadlines.len()
    }
}

impl<C> Default for TriggerScheduler<C> {
    fn default() -> Self {
        Self::new(SchedulerConfig::default())
    }
}

impl<C> std::fmt::Debug for TriggerScheduler<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TriggerScheduler")
            .field("config", &self.config)
            .field("store", &self.store)
            .field("deadlines", &self.deadlines)
            .finish()
    }
}
