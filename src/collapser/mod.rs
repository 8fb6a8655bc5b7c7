//! Graph → tree collapse.
//!
//! Rebuilds the canonical `ScenarioChatNode` tree from an edited graph. Only what is
//! reachable from the first node ends up in the tree; child order is edge order.

use crate::error::FlowError;
use crate::graph::{DialogFlowEdge, DialogFlowNode, FlowGraph};
use crate::scenario::{ScenarioChatNode, validate};
use ahash::AHashSet;
use tracing::{debug, warn};

mod index;

use index::GraphIndex;

/// Collapses a node/edge pair back into a scenario tree.
///
/// # Errors
///
/// * [`FlowError::DuplicateNodeId`] if two nodes share an id.
/// * [`FlowError::UnknownNodeReference`] if an edge points at a node that does not exist.
/// * [`FlowError::MultipleParents`] if a node is the target of more than one edge.
/// * [`FlowError::RootNotFound`] unless exactly one node is flagged as the first node.
/// * [`FlowError::FirstNodeHasParent`] if an edge points at the first node.
/// * [`FlowError::CycleDetected`] if a path from the first node comes back on itself.
///
/// Nodes that cannot be reached from the first node are left out without an error.
/// `chat_level` is recomputed from depth; the `level` label stored on the nodes is ignored.
pub fn collapse(
    nodes: &[DialogFlowNode],
    edges: &[DialogFlowEdge],
) -> Result<ScenarioChatNode, FlowError> {
    let index = GraphIndex::build(nodes, edges)?;
    let root = index.first_node()?;

    let mut rebuild = Rebuild {
        index: &index,
        on_path: AHashSet::new(),
        visited: 0,
    };
    let tree = rebuild.node(root, 0)?;
    // A parent reachable from the first node was already reported as a cycle.
    if let Some(parent) = index.parent(&root.id) {
        return Err(FlowError::FirstNodeHasParent {
            node_id: root.id.clone(),
            parent: parent.to_string(),
        });
    }

    let dropped = index.node_count() - rebuild.visited;
    if dropped > 0 {
        warn!(dropped, "unreachable dialog nodes left out of the collapsed tree");
    }
    for issue in validate(&tree).advisories() {
        warn!("{}", issue);
    }
    debug!(
        nodes = rebuild.visited,
        edges = edges.len(),
        "collapsed dialog graph"
    );

    Ok(tree)
}

/// Collapses a whole graph; see [`collapse`].
pub fn collapse_graph(graph: &FlowGraph) -> Result<ScenarioChatNode, FlowError> {
    collapse(&graph.nodes, &graph.edges)
}

struct Rebuild<'i, 'a> {
    index: &'i GraphIndex<'a>,
    /// Ids on the path from the first node down to the node being rebuilt.
    on_path: AHashSet<&'a str>,
    visited: usize,
}

impl<'a> Rebuild<'_, 'a> {
    fn node(
        &mut self,
        node: &'a DialogFlowNode,
        level: u32,
    ) -> Result<ScenarioChatNode, FlowError> {
        if !self.on_path.insert(node.id.as_str()) {
            return Err(FlowError::CycleDetected {
                node_id: node.id.clone(),
            });
        }
        self.visited += 1;

        let index = self.index;
        let mut subchat = Vec::new();
        for child_id in index.children(&node.id) {
            let child = index
                .node(child_id)
                .ok_or_else(|| FlowError::UnknownNodeReference {
                    missing_node_id: child_id.to_string(),
                    referenced_by: node.id.clone(),
                })?;
            subchat.push(self.node(child, level + 1)?);
        }

        self.on_path.remove(node.id.as_str());

        let data = &node.data;
        Ok(ScenarioChatNode {
            dialog: data.dialog.clone(),
            intent: data.intent.clone(),
            topic: data.topic.clone(),
            chat_level: level,
            speaker: data.speaker,
            outcome_state: data.outcome_state,
            subchat,
        })
    }
}
