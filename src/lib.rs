//! # Taiwa - Scenario Dialog Flow Engine
//!
//! **Taiwa** converts between the two shapes a training-scenario dialog takes: the
//! hierarchical `ScenarioChatNode` tree that gets persisted, and the flat, positioned
//! node/edge graph an interactive node editor works on.
//!
//! ## Core Workflow
//!
//! 1.  **Load the tree**: Deserialize a `ScenarioChatNode` (or a `{ "chats": ... }`
//!     `ScenarioDocument`), or implement `IntoScenario` for your own payload type.
//! 2.  **Expand**: Use `Expander::builder` to build an expander and turn the tree into a
//!     `FlowGraph` of `DialogFlowNode`s and `DialogFlowEdge`s for the canvas.
//! 3.  **Edit**: Wrap the graph in a `FlowEditor` and apply `add_child`, `remove_node` and
//!     `update_node_payload`. Each keeps the graph a single-rooted tree.
//! 4.  **Collapse**: Turn the edited graph back into a fresh tree with `collapse` and save it.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use taiwa::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let tree = ScenarioChatNode::new("Hi", Speaker::Avatar).with_child(
//!         ScenarioChatNode::new("Hello!", Speaker::Visitor).with_outcome(OutcomeState::Positive),
//!     );
//!
//!     // Expand into an editable graph and open an edit session on it.
//!     let expander = Expander::builder().build();
//!     let mut editor = FlowEditor::open(expander, &tree, true, Position::default())?;
//!
//!     // Add a second reply under the first node.
//!     let root_id = editor.graph().first_node().map(|n| n.id.clone()).unwrap_or_default();
//!     editor.add_child(
//!         &root_id,
//!         DialogPayload::new("Go away.", Speaker::Visitor).with_outcome(OutcomeState::Negative),
//!     )?;
//!
//!     // Collapse back into a tree ready for persistence.
//!     let saved = ScenarioDocument::new(editor.collapse()?);
//!     println!("{}", saved.to_json()?);
//!     Ok(())
//! }
//! ```

pub mod collapser;
pub mod editor;
pub mod error;
pub mod expander;
pub mod graph;
pub mod prelude;
pub mod scenario;
