//! Invariant-preserving edits on a live dialog graph.
//!
//! A `FlowEditor` owns the graph of one edit session together with an id → slot
//! index over its nodes. Every operation runs to completion synchronously and either
//! leaves the graph a valid single-rooted tree or returns an error without touching it.
//! No operation moves a node under a different parent.

use crate::collapser::collapse_graph;
use crate::error::FlowError;
use crate::expander::Expander;
use crate::graph::ids::fresh_id;
use crate::graph::layout::RowCursor;
use crate::graph::{
    DialogFlowEdge, DialogFlowNode, FlowGraph, IdGenerator, LayoutConfig, NodeData, Position,
    SequentialIds, level_label,
};
use crate::scenario::ScenarioChatNode;
use ahash::{AHashMap, AHashSet};
use tracing::debug;

mod payload;

pub use payload::*;

pub struct FlowEditor<G: IdGenerator = SequentialIds> {
    graph: FlowGraph,
    /// Node id → position in `graph.nodes`.
    index: AHashMap<String, usize>,
    layout: LayoutConfig,
    origin: Position,
    ids: G,
    /// Ids of removed nodes. They are never handed out again.
    retired: AHashSet<String>,
}

impl FlowEditor<SequentialIds> {
    /// Takes ownership of a graph, e.g. one handed back by the canvas.
    ///
    /// New ids continue after the highest `node_N` id already in the graph.
    /// Fails with [`FlowError::DuplicateNodeId`] if two nodes share an id.
    pub fn new(graph: FlowGraph) -> Result<Self, FlowError> {
        let index = index_nodes(&graph.nodes)?;
        let origin = graph
            .first_node()
            .map(|n| n.position)
            .unwrap_or_default();
        let ids = SequentialIds::new().resume_after(graph.nodes.iter().map(|n| n.id.as_str()));
        Ok(Self {
            graph,
            index,
            layout: LayoutConfig::default(),
            origin,
            ids,
            retired: AHashSet::new(),
        })
    }
}

impl<G: IdGenerator> FlowEditor<G> {
    /// Expands `root` and opens an editor on the result, continuing the expander's id sequence.
    pub fn open(
        mut expander: Expander<G>,
        root: &ScenarioChatNode,
        editable: bool,
        origin: Position,
    ) -> Result<Self, FlowError> {
        let graph = expander.expand(root, editable, origin, None);
        let index = index_nodes(&graph.nodes)?;
        Ok(Self {
            graph,
            index,
            layout: expander.layout(),
            origin,
            ids: expander.into_id_generator(),
            retired: AHashSet::new(),
        })
    }

    pub fn with_id_generator<H: IdGenerator>(self, ids: H) -> FlowEditor<H> {
        FlowEditor {
            graph: self.graph,
            index: self.index,
            layout: self.layout,
            origin: self.origin,
            ids,
            retired: self.retired,
        }
    }

    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    /// Where [`relayout`](Self::relayout) places the first node.
    pub fn with_origin(mut self, origin: Position) -> Self {
        self.origin = origin;
        self
    }

    pub fn graph(&self) -> &FlowGraph {
        &self.graph
    }

    pub fn into_graph(self) -> FlowGraph {
        self.graph
    }

    pub fn is_editable(&self) -> bool {
        self.graph.editable
    }

    pub fn node(&self, id: &str) -> Option<&DialogFlowNode> {
        self.index.get(id).map(|&slot| &self.graph.nodes[slot])
    }

    /// Appends a new node under `parent_id` and returns its id.
    ///
    /// The new node is placed one column right of its parent and one row below its
    /// lowest existing sibling, and its edge goes after the parent's existing edges so
    /// it becomes the last branch. Siblings never overlap, but the new cell may already
    /// be used by a node of another branch in the same column; [`relayout`](Self::relayout)
    /// clears that up.
    ///
    /// The id is never one that is in the graph or was removed from it.
    pub fn add_child(
        &mut self,
        parent_id: &str,
        payload: DialogPayload,
    ) -> Result<String, FlowError> {
        self.ensure_editable("add a dialog node")?;
        let parent = self.require(parent_id, "add_child")?;
        let depth = self.graph.depth_of(parent_id)? + 1;

        let last_sibling_y = self
            .graph
            .children_of(parent_id)
            .filter_map(|id| self.node(id))
            .map(|n| n.position.y)
            .reduce(f64::max);
        let position = Position {
            x: parent.position.x + self.layout.column_width,
            y: last_sibling_y.map_or(parent.position.y, |y| y + self.layout.row_height),
        };

        let (index, retired) = (&self.index, &self.retired);
        let id = fresh_id(&mut self.ids, index.len() + retired.len(), |candidate| {
            index.contains_key(candidate) || retired.contains(candidate)
        });

        self.index.insert(id.clone(), self.graph.nodes.len());
        self.graph.nodes.push(DialogFlowNode::new(
            id.clone(),
            position,
            NodeData {
                dialog: payload.dialog,
                intent: payload.intent,
                topic: payload.topic,
                speaker: payload.speaker,
                outcome_state: payload.outcome_state,
                level: level_label(depth),
                is_first_node: false,
                editable: true,
            },
        ));
        self.graph
            .edges
            .push(DialogFlowEdge::between(parent_id, id.clone()));

        debug!(node = %id, parent = parent_id, depth, "added dialog node");
        Ok(id)
    }

    /// Removes a node together with every node below it, plus all edges touching them.
    ///
    /// Returns the removed ids, the requested node first. The first node cannot be removed.
    pub fn remove_node(&mut self, node_id: &str) -> Result<Vec<String>, FlowError> {
        self.ensure_editable("remove a dialog node")?;
        if self.require(node_id, "remove_node")?.is_first_node() {
            return Err(FlowError::EditNotPermitted {
                operation: "remove the first node".to_string(),
            });
        }

        let removed = self.subtree_of(node_id);
        let doomed: AHashSet<&str> = removed.iter().map(String::as_str).collect();
        self.graph.nodes.retain(|n| !doomed.contains(n.id.as_str()));
        self.graph.edges.retain(|e| {
            !doomed.contains(e.source.as_str()) && !doomed.contains(e.target.as_str())
        });
        self.index = index_nodes(&self.graph.nodes)?;
        self.retired.extend(removed.iter().cloned());

        debug!(node = node_id, removed = removed.len(), "removed dialog subtree");
        Ok(removed)
    }

    /// Merges `patch` into the node's payload. Id, position and edges stay as they are.
    pub fn update_node_payload(
        &mut self,
        node_id: &str,
        patch: NodePayloadPatch,
    ) -> Result<(), FlowError> {
        self.ensure_editable("update a dialog node")?;
        let slot = self.slot(node_id, "update_node_payload")?;
        patch.apply(&mut self.graph.nodes[slot].data);
        debug!(node = node_id, "updated dialog node payload");
        Ok(())
    }

    /// Records a position the user dragged a node to.
    pub fn move_node(&mut self, node_id: &str, position: Position) -> Result<(), FlowError> {
        self.ensure_editable("move a dialog node")?;
        let slot = self.slot(node_id, "move_node")?;
        self.graph.nodes[slot].position = position;
        Ok(())
    }

    /// Lays every node reachable from the first node out again, exactly as the expander
    /// would for the same tree, and refreshes their level labels. Unreachable nodes keep
    /// their positions.
    pub fn relayout(&mut self) -> Result<(), FlowError> {
        self.ensure_editable("rearrange the graph")?;
        let root = self
            .graph
            .first_node()
            .map(|n| n.id.clone())
            .ok_or_else(|| FlowError::RootNotFound {
                candidates: self.graph.first_nodes().count(),
            })?;

        let children = self.children_map();
        let mut placements: Vec<(String, Position, u32)> = Vec::new();
        let mut rows = RowCursor::new();
        let mut visited = AHashSet::new();
        // (node, depth, parent row, eldest sibling)
        let mut stack: Vec<(String, u32, Option<u32>, bool)> = vec![(root, 0, None, true)];
        while let Some((id, depth, parent_row, first_child)) = stack.pop() {
            if !visited.insert(id.clone()) {
                return Err(FlowError::CycleDetected { node_id: id });
            }
            let row = rows.claim(parent_row, first_child);
            placements.push((id.clone(), self.layout.place(self.origin, depth, row), depth));
            if let Some(kids) = children.get(&id) {
                for (rank, kid) in kids.iter().enumerate().rev() {
                    stack.push((kid.clone(), depth + 1, Some(row), rank == 0));
                }
            }
        }

        for (id, position, depth) in placements {
            if let Some(&slot) = self.index.get(&id) {
                let node = &mut self.graph.nodes[slot];
                node.position = position;
                node.data.level = level_label(depth);
            }
        }
        Ok(())
    }

    /// Collapses the current graph into a tree, ready to be saved.
    pub fn collapse(&self) -> Result<ScenarioChatNode, FlowError> {
        collapse_graph(&self.graph)
    }

    fn ensure_editable(&self, operation: &str) -> Result<(), FlowError> {
        if self.graph.editable {
            Ok(())
        } else {
            Err(FlowError::EditNotPermitted {
                operation: format!("{} on a view-only graph", operation),
            })
        }
    }

    fn slot(&self, node_id: &str, referenced_by: &str) -> Result<usize, FlowError> {
        self.index
            .get(node_id)
            .copied()
            .ok_or_else(|| FlowError::UnknownNodeReference {
                missing_node_id: node_id.to_string(),
                referenced_by: referenced_by.to_string(),
            })
    }

    fn require(&self, node_id: &str, referenced_by: &str) -> Result<&DialogFlowNode, FlowError> {
        self.slot(node_id, referenced_by)
            .map(|slot| &self.graph.nodes[slot])
    }

    fn children_map(&self) -> AHashMap<String, Vec<String>> {
        let mut children: AHashMap<String, Vec<String>> = AHashMap::new();
        for edge in &self.graph.edges {
            children
                .entry(edge.source.clone())
                .or_default()
                .push(edge.target.clone());
        }
        children
    }

    /// `node_id` and everything below it, in pre-order.
    fn subtree_of(&self, node_id: &str) -> Vec<String> {
        let children = self.children_map();
        let mut seen = AHashSet::new();
        let mut order = Vec::new();
        let mut stack = vec![node_id.to_string()];
        while let Some(id) = stack.pop() {
            if !seen.insert(id.clone()) {
                continue;
            }
            if let Some(kids) = children.get(&id) {
                stack.extend(kids.iter().rev().cloned());
            }
            order.push(id);
        }
        order
    }
}

fn index_nodes(nodes: &[DialogFlowNode]) -> Result<AHashMap<String, usize>, FlowError> {
    let mut index = AHashMap::with_capacity(nodes.len());
    for (slot, node) in nodes.iter().enumerate() {
        if index.insert(node.id.clone(), slot).is_some() {
            return Err(FlowError::DuplicateNodeId(node.id.clone()));
        }
    }
    Ok(index)
}
