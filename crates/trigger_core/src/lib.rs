//! # trigger_core
//!
//! UI-agnostic per-element invocation scheduler for the page runtime.
//!
//! Interaction events on an element (typing, blurring, clicking) call
//! [`TriggerScheduler::schedule`]; the element's declared trigger mode decides
//! whether the callback runs now, later, or not at all:
//! - [`TriggerSpec::Immediate`]: every call fires synchronously
//! - [`TriggerSpec::Delayed`]: trailing-edge debounce, last callback wins
//! - [`TriggerSpec::Throttled`]: leading-edge-only throttle, no trailing fire
//!
//! Lifecycle events on a form-like ancestor call [`TriggerScheduler::cancel`],
//! which discards pending debounces and reopens throttle windows under the
//! scope, sparing the element that caused the event.
//!
//! ## Design Principles
//!
//! This crate does not own elements, read values, or run an event loop. It
//! depends on:
//! - an [`ElementTree`] for liveness, attributes and ancestry
//! - a `now` sampled by the caller (see [`Clock`])
//!
//! Debounce deadlines are tagged with a generation instead of being cancelled;
//! the caller drives timer turns with [`TriggerScheduler::run_due`] at or
//! after [`TriggerScheduler::next_deadline`].

mod cancel;
mod clock;
mod config;
mod debounce;
mod error;
mod id;
mod scheduler;
mod spec;
mod state;
mod store;
mod throttle;
mod timers;
mod tree;

#[cfg(test)]
mod test_tree;

pub use cancel::{CancelReport, CancelRequest};
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use config::{AmbiguityPolicy, SchedulerConfig, TriggerAttrs};
pub use error::TriggerError;
pub use id::ElementId;
pub use scheduler::{Dispatch, TriggerScheduler, TurnCtx};
pub use spec::{TriggerSpec, resolve};
pub use state::{Callback, TimingPhase};
pub use tree::ElementTree;

pub use core_types::Millis;
