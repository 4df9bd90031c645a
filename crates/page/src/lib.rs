//! Event wiring between a live document and the trigger scheduler.
//!
//! Raw interaction events (`input`, `blur`, `click`) on elements with a
//! registered listener become `schedule` calls; lifecycle events on a form
//! (`change`, `submit`) become cancel sweeps. Each scheduled callback records
//! a [`Push`] carrying the element's value at the time it ran.

mod error;
mod event;
mod input_store;
mod page;

pub use error::PageError;
pub use event::{LifecycleEvent, RawEvent};
pub use input_store::InputValueStore;
pub use page::{Page, PageConfig, PageState, Push};
