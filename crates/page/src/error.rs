use dom::DomError;
use trigger_core::TriggerError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageError {
    Dom(DomError),
    Trigger(TriggerError),
}

impl std::fmt::Display for PageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PageError::Dom(err) => write!(f, "document: {err}"),
            PageError::Trigger(err) => write!(f, "trigger: {err}"),
        }
    }
}

impl std::error::Error for PageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PageError::Dom(err) => Some(err),
            PageError::Trigger(err) => Some(err),
        }
    }
}

impl From<DomError> for PageError {
    fn from(err: DomError) -> Self {
        PageError::Dom(err)
    }
}

impl From<TriggerError> for PageError {
    fn from(err: TriggerError) -> Self {
        PageError::Trigger(err)
    }
}
