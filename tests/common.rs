//! Common test utilities for building scenario trees and hand-made graphs.
use taiwa::prelude::*;

/// The smallest useful scenario: one greeting and one positive reply.
#[allow(dead_code)]
pub fn greeting_tree() -> ScenarioChatNode {
    ScenarioChatNode {
        dialog: "Hi".to_string(),
        intent: String::new(),
        topic: String::new(),
        chat_level: 0,
        speaker: Speaker::Avatar,
        outcome_state: None,
        subchat: vec![ScenarioChatNode {
            dialog: "Hello!".to_string(),
            intent: String::new(),
            topic: String::new(),
            chat_level: 1,
            speaker: Speaker::Visitor,
            outcome_state: Some(OutcomeState::Positive),
            subchat: vec![],
        }],
    }
}

/// A hotel front-desk scenario with three branches of uneven depth.
///
/// Pre-order with default ids:
/// ```text
/// node_0 Welcome            (row 0)
///   node_1 reservation      (row 0)
///     node_2 ID please      (row 0)
///       node_3 sure         (row 0)
///       node_4 rather not   (row 1)
///   node_5 restroom         (row 2)
///     node_6 down the hall  (row 2)
///   node_7 mumble           (row 3)
/// ```
#[allow(dead_code)]
pub fn front_desk_tree() -> ScenarioChatNode {
    ScenarioChatNode::new("Welcome to the front desk. How can I help?", Speaker::Avatar)
        .with_topic("reception")
        .with_child(
            ScenarioChatNode::new("I have a reservation.", Speaker::Visitor)
                .with_intent("check_in")
                .with_child(
                    ScenarioChatNode::new("Great, may I see your ID?", Speaker::Avatar)
                        .with_child(
                            ScenarioChatNode::new("Sure, here it is.", Speaker::Visitor)
                                .with_outcome(OutcomeState::Positive),
                        )
                        .with_child(
                            ScenarioChatNode::new("I'd rather not.", Speaker::Visitor)
                                .with_outcome(OutcomeState::Negative),
                        ),
                ),
        )
        .with_child(
            ScenarioChatNode::new("Where is the restroom?", Speaker::Visitor)
                .with_intent("directions")
                .with_child(
                    ScenarioChatNode::new("Down the hall, on the left.", Speaker::Avatar)
                        .with_outcome(OutcomeState::General),
                ),
        )
        .with_child(
            ScenarioChatNode::new("*mumbles*", Speaker::Visitor)
                .with_outcome(OutcomeState::Retry),
        )
}

/// `root -> A -> B`.
#[allow(dead_code)]
pub fn chain_tree() -> ScenarioChatNode {
    ScenarioChatNode::new("root", Speaker::Avatar).with_child(
        ScenarioChatNode::new("A", Speaker::Visitor).with_child(
            ScenarioChatNode::new("B", Speaker::Avatar).with_outcome(OutcomeState::Terminal),
        ),
    )
}

/// A hand-made graph node with the given id.
#[allow(dead_code)]
pub fn graph_node(id: &str, dialog: &str, first: bool) -> DialogFlowNode {
    DialogFlowNode::new(
        id,
        Position::default(),
        NodeData {
            dialog: dialog.to_string(),
            intent: String::new(),
            topic: String::new(),
            speaker: Speaker::Avatar,
            outcome_state: None,
            level: String::new(),
            is_first_node: first,
            editable: true,
        },
    )
}

#[allow(dead_code)]
pub fn graph_edge(source: &str, target: &str) -> DialogFlowEdge {
    DialogFlowEdge::between(source, target)
}

/// Edges as `(source index, target index)` pairs, indices into the node list.
/// Two graphs with the same shape give the same pairs whatever their ids are.
#[allow(dead_code)]
pub fn edge_shape(graph: &FlowGraph) -> Vec<(usize, usize)> {
    let slot = |id: &str| {
        graph
            .nodes
            .iter()
            .position(|n| n.id == id)
            .expect("edge endpoint must exist")
    };
    graph
        .edges
        .iter()
        .map(|e| (slot(&e.source), slot(&e.target)))
        .collect()
}
