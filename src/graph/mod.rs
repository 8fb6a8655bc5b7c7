pub mod edge;
pub mod ids;
pub mod layout;
pub mod node;

pub use edge::*;
pub use ids::*;
pub use layout::*;
pub use node::*;

use crate::error::{ConversionError, FlowError};
use ahash::AHashSet;
use serde::{Deserialize, Serialize};

/// The flattened, editable form of a scenario dialog: nodes plus parent-to-child edges.
///
/// A graph belongs to one edit session. It is produced by the expander, changed through
/// the editor, collapsed back into a tree for saving, and then thrown away.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowGraph {
    pub nodes: Vec<DialogFlowNode>,
    pub edges: Vec<DialogFlowEdge>,
    /// Whether the editor may mutate this graph at all.
    #[serde(default)]
    pub editable: bool,
}

impl FlowGraph {
    pub fn from_parts(
        nodes: Vec<DialogFlowNode>,
        edges: Vec<DialogFlowEdge>,
        editable: bool,
    ) -> Self {
        Self {
            nodes,
            edges,
            editable,
        }
    }

    pub fn into_parts(self) -> (Vec<DialogFlowNode>, Vec<DialogFlowEdge>) {
        (self.nodes, self.edges)
    }

    pub fn node(&self, id: &str) -> Option<&DialogFlowNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.node(id).is_some()
    }

    /// All nodes flagged as the first node. A well-formed graph has exactly one.
    pub fn first_nodes(&self) -> impl Iterator<Item = &DialogFlowNode> {
        self.nodes.iter().filter(|n| n.is_first_node())
    }

    /// The first node, if exactly one node carries the flag.
    pub fn first_node(&self) -> Option<&DialogFlowNode> {
        let mut first = self.first_nodes();
        match (first.next(), first.next()) {
            (Some(node), None) => Some(node),
            _ => None,
        }
    }

    /// Child ids of `id`, in edge order.
    pub fn children_of<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.edges
            .iter()
            .filter(move |e| e.source == id)
            .map(|e| e.target.as_str())
    }

    pub fn parent_of(&self, id: &str) -> Option<&str> {
        self.edges
            .iter()
            .find(|e| e.target == id)
            .map(|e| e.source.as_str())
    }

    /// Distance from `id` up to a node with no parent, following incoming edges.
    pub fn depth_of(&self, id: &str) -> Result<u32, FlowError> {
        if !self.contains(id) {
            return Err(FlowError::UnknownNodeReference {
                missing_node_id: id.to_string(),
                referenced_by: "depth lookup".to_string(),
            });
        }

        let mut seen = AHashSet::new();
        let mut current = id;
        let mut depth = 0;
        while let Some(parent) = self.parent_of(current) {
            if !seen.insert(current) {
                return Err(FlowError::CycleDetected {
                    node_id: current.to_string(),
                });
            }
            current = parent;
            depth += 1;
        }
        Ok(depth)
    }

    pub fn from_json(json: &str) -> Result<Self, ConversionError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConversionError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ConversionError::JsonWriteError(e.to_string()))
    }
}
