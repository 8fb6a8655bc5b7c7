use crate::scenario::{OutcomeState, Speaker};
use serde::{Deserialize, Serialize};

/// The node type name the editor canvas registers dialog nodes under.
pub const DIALOG_NODE_TYPE: &str = "dialogNode";

/// A 2D canvas coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Editable payload carried by every graph node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    #[serde(default)]
    pub dialog: String,
    #[serde(default)]
    pub intent: String,
    #[serde(default)]
    pub topic: String,
    pub speaker: Speaker,
    #[serde(default)]
    pub outcome_state: Option<OutcomeState>,
    /// Display form of the depth, e.g. `"L2"`. Informational only; never trusted on collapse.
    #[serde(default)]
    pub level: String,
    #[serde(rename = "isFirstNode", alias = "is_first_node", default)]
    pub is_first_node: bool,
    #[serde(default)]
    pub editable: bool,
}

/// A single node of the editable dialog graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogFlowNode {
    pub id: String,
    #[serde(rename = "type", default = "default_node_type")]
    pub node_type: String,
    #[serde(default)]
    pub position: Position,
    pub data: NodeData,
}

fn default_node_type() -> String {
    DIALOG_NODE_TYPE.to_string()
}

impl DialogFlowNode {
    pub fn new(id: impl Into<String>, position: Position, data: NodeData) -> Self {
        Self {
            id: id.into(),
            node_type: default_node_type(),
            position,
            data,
        }
    }

    pub fn is_first_node(&self) -> bool {
        self.data.is_first_node
    }
}

/// Formats a depth the way the graph displays it.
pub fn level_label(depth: u32) -> String {
    format!("L{}", depth)
}

/// Reads a depth back out of a `"L#"` label.
pub fn parse_level_label(label: &str) -> Option<u32> {
    label.strip_prefix('L')?.parse().ok()
}
