use core_types::{LifecycleKind, RawEventKind};
use dom::NodeKey;

/// A raw interaction event as observed on a single element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RawEvent {
    /// The element's value changed to the carried string.
    Input(String),
    Blur,
    Click,
}

impl RawEvent {
    pub fn kind(&self) -> RawEventKind {
        match self {
            RawEvent::Input(_) => RawEventKind::Input,
            RawEvent::Blur => RawEventKind::Blur,
            RawEvent::Click => RawEventKind::Click,
        }
    }
}

/// A lifecycle event observed on a form-like element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// A value-change round trip finished. `triggered_by` is the control whose
    /// interaction caused it, when known.
    Change { triggered_by: Option<NodeKey> },
    Submit,
}

impl LifecycleEvent {
    pub fn kind(&self) -> LifecycleKind {
        match self {
            LifecycleEvent::Change { .. } => LifecycleKind::Change,
            LifecycleEvent::Submit => LifecycleKind::Submit,
        }
    }

    /// The element to spare from cancellation.
    pub fn originator(&self) -> Option<NodeKey> {
        match self {
            LifecycleEvent::Change { triggered_by } => *triggered_by,
            LifecycleEvent::Submit => None,
        }
    }
}
