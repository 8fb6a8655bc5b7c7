//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and functions from the taiwa crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use taiwa::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let json = std::fs::read_to_string("path/to/scenario.json")?;
//! let tree = tree_from_json(&json)?;
//!
//! let graph = expand_default(&tree, true);
//! let round_tripped = collapse_graph(&graph)?;
//! assert_eq!(round_tripped, tree);
//! # Ok(())
//! # }
//! ```

// Conversion engine
pub use crate::collapser::{collapse, collapse_graph};
pub use crate::editor::{DialogPayload, FlowEditor, NodePayloadPatch};
pub use crate::expander::{Expander, ExpanderBuilder, expand, expand_default};

// Tree model
pub use crate::scenario::{
    IntoScenario, OutcomeState, ScenarioChatNode, ScenarioDocument, Speaker, ValidationReport,
    outline, tree_from_json, validate,
};

// Graph model
pub use crate::graph::{
    DialogFlowEdge, DialogFlowNode, FlowGraph, IdGenerator, LayoutConfig, NodeData, Position,
    SequentialIds,
};

// Error types
pub use crate::error::{ConversionError, FlowError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
