use serde::{Deserialize, Serialize};

/// A parent-to-child connection between two dialog nodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DialogFlowEdge {
    pub id: String,
    /// The parent node.
    pub source: String,
    /// The child node.
    pub target: String,
}

impl DialogFlowEdge {
    /// Builds the edge between two nodes, deriving its id from the endpoints.
    pub fn between(source: impl Into<String>, target: impl Into<String>) -> Self {
        let source = source.into();
        let target = target.into();
        Self {
            id: edge_id(&source, &target),
            source,
            target,
        }
    }
}

/// Edge ids are a pure function of their endpoints so re-expansion yields the same ids
/// for the same node ids.
pub fn edge_id(source: &str, target: &str) -> String {
    format!("e{}-{}", source, target)
}
