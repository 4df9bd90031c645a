use crate::NodeKey;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DomError {
    /// The key's node was removed (or never existed).
    StaleKey(NodeKey),
    WrongNodeKind(NodeKey),
    InvalidParent(NodeKey),
    CycleDetected { parent: NodeKey, child: NodeKey },
    RootRemoval,
}

impl std::fmt::Display for DomError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomError::StaleKey(key) => write!(f, "stale node key {key}"),
            DomError::WrongNodeKind(key) => write!(f, "node {key} has the wrong kind"),
            DomError::InvalidParent(key) => write!(f, "node {key} cannot be appended here"),
            DomError::CycleDetected { parent, child } => {
                write!(f, "appending {child} under {parent} would create a cycle")
            }
            DomError::RootRemoval => write!(f, "the document root cannot be removed"),
        }
    }
}

impl std::error::Error for DomError {}
