use crate::id::ElementId;

/// Configuration errors surfaced by `schedule`.
///
/// Superseded deadlines and cancels that find nothing to cancel are not
/// errors and never show up here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TriggerError {
    /// Neither the debounce nor the throttle attribute is declared.
    MissingTrigger { element: ElementId },
    /// A declared value is neither the blur sentinel nor a non-negative integer.
    InvalidValue {
        element: ElementId,
        attr: String,
        value: String,
    },
    /// Both attributes are declared and the policy refuses to pick one.
    Ambiguous {
        element: ElementId,
        debounce: String,
        throttle: String,
    },
    /// The element is not part of the live document.
    Detached { element: ElementId },
}

impl std::fmt::Display for TriggerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TriggerError::MissingTrigger { element } => {
                write!(f, "{element} declares no debounce or throttle value")
            }
            TriggerError::InvalidValue {
                element,
                attr,
                value,
            } => write!(f, "invalid {attr} value {value:?} on {element}"),
            TriggerError::Ambiguous {
                element,
                debounce,
                throttle,
            } => write!(
                f,
                "{element} declares both debounce ({debounce:?}) and throttle ({throttle:?})"
            ),
            TriggerError::Detached { element } => {
                write!(f, "{element} is not attached to the document")
            }
        }
    }
}

impl std::error::Error for TriggerError {}
