use thiserror::Error;

/// Structural errors raised while collapsing or editing a dialog flow graph.
///
/// None of these are transient: the caller is expected to surface them and
/// block the save, never to retry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    #[error("Expected exactly one node flagged as the first node, found {candidates}")]
    RootNotFound { candidates: usize },

    #[error("Cycle detected: node '{node_id}' is revisited on its own path from the first node")]
    CycleDetected { node_id: String },

    #[error(
        "Node '{missing_node_id}' not found, which is required by '{referenced_by}'"
    )]
    UnknownNodeReference {
        missing_node_id: String,
        referenced_by: String,
    },

    #[error("Edit not permitted: cannot {operation}")]
    EditNotPermitted { operation: String },

    #[error("First node '{node_id}' has an incoming edge from '{parent}'")]
    FirstNodeHasParent { node_id: String, parent: String },

    #[error("Node id '{0}' is used by more than one node")]
    DuplicateNodeId(String),

    #[error("Node '{node_id}' has more than one incoming edge ('{first_parent}' and '{second_parent}')")]
    MultipleParents {
        node_id: String,
        first_parent: String,
        second_parent: String,
    },
}

/// Errors that can occur when turning external data into a `ScenarioChatNode` tree
/// or a `FlowGraph`.
#[derive(Error, Debug, Clone)]
pub enum ConversionError {
    #[error("Failed to parse JSON: {0}")]
    JsonParseError(String),

    #[error("Failed to serialize JSON: {0}")]
    JsonWriteError(String),

    #[error("Invalid custom data: {0}")]
    ValidationError(String),
}

impl From<serde_json::Error> for ConversionError {
    fn from(err: serde_json::Error) -> Self {
        ConversionError::JsonParseError(err.to_string())
    }
}
