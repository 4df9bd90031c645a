//! Live document model the page runtime paces interactions against.
//!
//! Node keys are generational: a key outlives its node only as a stale key,
//! never as a reference to whatever reuses the slot. That property is what
//! lets the trigger scheduler key its state by [`ElementId`](trigger_core::ElementId)
//! without a weak map.

mod document;
mod error;
mod key;

pub use document::{Attribute, Document};
pub use error::DomError;
pub use key::NodeKey;
