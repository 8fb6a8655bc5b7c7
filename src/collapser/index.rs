use crate::error::FlowError;
use crate::graph::{DialogFlowEdge, DialogFlowNode};
use ahash::AHashMap;
use itertools::Itertools;

/// Lookup tables built from one pass over the nodes and one pass over the edges.
pub(super) struct GraphIndex<'a> {
    nodes: AHashMap<&'a str, &'a DialogFlowNode>,
    /// Child ids per parent id, in edge order.
    children: AHashMap<&'a str, Vec<&'a str>>,
    parents: AHashMap<&'a str, &'a str>,
}

impl<'a> GraphIndex<'a> {
    pub(super) fn build(
        nodes: &'a [DialogFlowNode],
        edges: &'a [DialogFlowEdge],
    ) -> Result<Self, FlowError> {
        if let Some(duplicate) = nodes.iter().map(|n| n.id.as_str()).duplicates().next() {
            return Err(FlowError::DuplicateNodeId(duplicate.to_string()));
        }
        let by_id: AHashMap<&str, &DialogFlowNode> =
            nodes.iter().map(|n| (n.id.as_str(), n)).collect();

        let mut children: AHashMap<&str, Vec<&str>> = AHashMap::new();
        let mut parents: AHashMap<&str, &str> = AHashMap::new();
        for edge in edges {
            for endpoint in [&edge.source, &edge.target] {
                if !by_id.contains_key(endpoint.as_str()) {
                    return Err(FlowError::UnknownNodeReference {
                        missing_node_id: endpoint.clone(),
                        referenced_by: edge.id.clone(),
                    });
                }
            }
            if let Some(existing) = parents.insert(edge.target.as_str(), edge.source.as_str()) {
                return Err(FlowError::MultipleParents {
                    node_id: edge.target.clone(),
                    first_parent: existing.to_string(),
                    second_parent: edge.source.clone(),
                });
            }
            children
                .entry(edge.source.as_str())
                .or_default()
                .push(edge.target.as_str());
        }

        Ok(Self {
            nodes: by_id,
            children,
            parents,
        })
    }

    pub(super) fn node(&self, id: &str) -> Option<&'a DialogFlowNode> {
        self.nodes.get(id).copied()
    }

    pub(super) fn children(&self, id: &str) -> &[&'a str] {
        self.children.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    pub(super) fn parent(&self, id: &str) -> Option<&'a str> {
        self.parents.get(id).copied()
    }

    pub(super) fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Locates the single node flagged as the first node.
    pub(super) fn first_node(&self) -> Result<&'a DialogFlowNode, FlowError> {
        let candidates: Vec<&'a DialogFlowNode> = self
            .nodes
            .values()
            .copied()
            .filter(|n| n.is_first_node())
            .collect();
        match candidates.as_slice() {
            [root] => Ok(*root),
            _ => Err(FlowError::RootNotFound {
                candidates: candidates.len(),
            }),
        }
    }
}
