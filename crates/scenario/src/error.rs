use core_types::Millis;
use page::PageError;
use std::path::PathBuf;

#[derive(Debug)]
pub enum ScenarioError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(toml::de::Error),
    UnknownElement(String),
    DuplicateElement(String),
    UnknownEvent {
        element: String,
        event: String,
    },
    InvalidConfig {
        field: &'static str,
        value: String,
    },
    /// A step is dated before the one preceding it.
    TimeTravel {
        step: usize,
        at: Millis,
        previous: Millis,
    },
    /// Building the document failed.
    Setup(PageError),
}

impl std::fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScenarioError::Io { path, source } => {
                write!(f, "failed to read scenario {}: {source}", path.display())
            }
            ScenarioError::Parse(err) => write!(f, "invalid scenario: {err}"),
            ScenarioError::UnknownElement(id) => write!(f, "unknown element id '{id}'"),
            ScenarioError::DuplicateElement(id) => write!(f, "element id '{id}' declared twice"),
            ScenarioError::UnknownEvent { element, event } => {
                write!(f, "element '{element}' listens to unknown event '{event}'")
            }
            ScenarioError::InvalidConfig { field, value } => {
                write!(f, "invalid config.{field}: {value:?}")
            }
            ScenarioError::TimeTravel { step, at, previous } => write!(
                f,
                "step {step} at {at}ms is earlier than the previous step at {previous}ms"
            ),
            ScenarioError::Setup(err) => write!(f, "building the document failed: {err}"),
        }
    }
}

impl std::error::Error for ScenarioError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScenarioError::Io { source, .. } => Some(source),
            ScenarioError::Parse(err) => Some(err),
            ScenarioError::Setup(err) => Some(err),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for ScenarioError {
    fn from(err: toml::de::Error) -> Self {
        ScenarioError::Parse(err)
    }
}
