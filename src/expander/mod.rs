//! Tree → graph expansion.
//!
//! Walks a `ScenarioChatNode` tree depth-first and flattens it into positioned
//! `DialogFlowNode`s plus parent-to-child `DialogFlowEdge`s for the editor canvas.

use crate::graph::ids::fresh_id;
use crate::graph::layout::RowCursor;
use crate::graph::{
    DialogFlowEdge, DialogFlowNode, FlowGraph, IdGenerator, LayoutConfig, NodeData, Position,
    SequentialIds, level_label,
};
use crate::scenario::ScenarioChatNode;
use ahash::AHashSet;
use tracing::debug;

/// Converts scenario trees into editable graphs.
///
/// An expander owns the id generator it draws from, so consecutive expansions never
/// hand out the same id twice.
pub struct Expander<G: IdGenerator = SequentialIds> {
    layout: LayoutConfig,
    ids: G,
}

pub struct ExpanderBuilder<G: IdGenerator = SequentialIds> {
    layout: LayoutConfig,
    ids: G,
}

impl ExpanderBuilder<SequentialIds> {
    pub fn new() -> Self {
        Self {
            layout: LayoutConfig::default(),
            ids: SequentialIds::new(),
        }
    }
}

impl Default for ExpanderBuilder<SequentialIds> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: IdGenerator> ExpanderBuilder<G> {
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_id_generator<H: IdGenerator>(self, ids: H) -> ExpanderBuilder<H> {
        ExpanderBuilder {
            layout: self.layout,
            ids,
        }
    }

    pub fn build(self) -> Expander<G> {
        Expander {
            layout: self.layout,
            ids: self.ids,
        }
    }
}

impl Expander<SequentialIds> {
    pub fn builder() -> ExpanderBuilder<SequentialIds> {
        ExpanderBuilder::new()
    }
}

/// Per-call traversal state.
struct Expansion<'a, G: IdGenerator> {
    layout: LayoutConfig,
    ids: &'a mut G,
    editable: bool,
    origin: Position,
    base_level: u32,
    rows: RowCursor,
    taken: AHashSet<String>,
    nodes: Vec<DialogFlowNode>,
    edges: Vec<DialogFlowEdge>,
}

impl<G: IdGenerator> Expander<G> {
    /// Flattens `root` into a graph.
    ///
    /// * `editable` is stamped into every node and onto the graph; it does not change topology.
    /// * `origin` is where the root lands; deeper levels go right, later branches go down.
    /// * `parent_id`, when given, names an existing node the expanded subtree hangs under:
    ///   an edge from it to the expanded root is emitted first, and the expanded root is
    ///   not flagged as the first node. Levels then continue from `root.chat_level`.
    ///
    /// The input tree is never modified. Nodes come out in depth-first pre-order and
    /// every edge is created when its child is visited, so the edges leaving any one
    /// parent appear in the same order as its `subchat`. Edges are not grouped by parent;
    /// only the order among one parent's edges is guaranteed.
    pub fn expand(
        &mut self,
        root: &ScenarioChatNode,
        editable: bool,
        origin: Position,
        parent_id: Option<&str>,
    ) -> FlowGraph {
        let mut expansion = Expansion {
            layout: self.layout,
            ids: &mut self.ids,
            editable,
            origin,
            base_level: if parent_id.is_some() { root.chat_level } else { 0 },
            rows: RowCursor::new(),
            taken: AHashSet::new(),
            nodes: Vec::with_capacity(root.node_count()),
            edges: Vec::with_capacity(root.node_count()),
        };
        if let Some(parent) = parent_id {
            expansion.taken.insert(parent.to_string());
        }

        expansion.visit(root, 0, parent_id.map(|p| (p, None)), true);

        debug!(
            nodes = expansion.nodes.len(),
            edges = expansion.edges.len(),
            editable,
            "expanded scenario tree"
        );
        FlowGraph::from_parts(expansion.nodes, expansion.edges, editable)
    }

    /// Hands the id generator back, e.g. so an editor can keep drawing from the same sequence.
    pub fn into_id_generator(self) -> G {
        self.ids
    }

    pub fn layout(&self) -> LayoutConfig {
        self.layout
    }
}

impl<G: IdGenerator> Expansion<'_, G> {
    /// `parent` is the parent's id and, when it was laid out in this pass, its row.
    fn visit(
        &mut self,
        node: &ScenarioChatNode,
        column: u32,
        parent: Option<(&str, Option<u32>)>,
        first_child: bool,
    ) {
        let taken = &self.taken;
        let id = fresh_id(&mut *self.ids, taken.len(), |candidate| {
            taken.contains(candidate)
        });
        self.taken.insert(id.clone());

        let row = self
            .rows
            .claim(parent.and_then(|(_, row)| row), first_child);
        let position = self.layout.place(self.origin, column, row);

        if let Some((parent_id, _)) = parent {
            self.edges.push(DialogFlowEdge::between(parent_id, id.clone()));
        }

        self.nodes.push(DialogFlowNode::new(
            id.clone(),
            position,
            NodeData {
                dialog: node.dialog.clone(),
                intent: node.intent.clone(),
                topic: node.topic.clone(),
                speaker: node.speaker,
                outcome_state: node.outcome_state,
                level: level_label(self.base_level + column),
                is_first_node: parent.is_none(),
                editable: self.editable,
            },
        ));

        for (index, child) in node.subchat.iter().enumerate() {
            self.visit(child, column + 1, Some((id.as_str(), Some(row))), index == 0);
        }
    }
}

/// Expands with a fresh default expander (sequential ids, default layout).
pub fn expand(
    root: &ScenarioChatNode,
    editable: bool,
    origin: Position,
    parent_id: Option<&str>,
) -> FlowGraph {
    Expander::builder()
        .build()
        .expand(root, editable, origin, parent_id)
}

/// Expands a whole scenario at the canvas origin.
pub fn expand_default(root: &ScenarioChatNode, editable: bool) -> FlowGraph {
    expand(root, editable, Position::default(), None)
}
