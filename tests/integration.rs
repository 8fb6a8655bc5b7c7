//! Integration tests for Taiwa
//!
//! End-to-end flows through the JSON shapes the backend and the canvas exchange.
mod common;
use common::*;
use pretty_assertions::assert_eq;
use taiwa::prelude::*;

const GREETING_JSON: &str = r#"{
    "dialog": "Hi",
    "intent": "",
    "topic": "",
    "speaker": "AVATAR",
    "chat_level": 0,
    "subchat": [
        {
            "dialog": "Hello!",
            "intent": "",
            "topic": "",
            "speaker": "VISITOR",
            "chat_level": 1,
            "outcome_state": "POSITIVE",
            "subchat": []
        }
    ]
}"#;

#[test]
fn test_tree_json_parses_into_the_model() {
    let tree = tree_from_json(GREETING_JSON).expect("Failed to parse tree");
    assert_eq!(tree, greeting_tree());
}

#[test]
fn test_chats_envelope_and_bare_tree_are_both_accepted() {
    let wrapped = format!(r#"{{ "chats": {} }}"#, GREETING_JSON);
    let from_envelope = tree_from_json(&wrapped).expect("Failed to parse document");
    let from_bare = tree_from_json(GREETING_JSON).expect("Failed to parse tree");
    assert_eq!(from_envelope, from_bare);
}

#[test]
fn test_non_object_tree_json_is_rejected() {
    let result = tree_from_json("[1, 2, 3]");
    assert!(matches!(result, Err(ConversionError::ValidationError(_))));
    assert!(matches!(
        tree_from_json("{ not json"),
        Err(ConversionError::JsonParseError(_))
    ));
}

#[test]
fn test_graph_json_uses_canvas_field_names() {
    let graph = expand_default(&greeting_tree(), true);
    let json = graph.to_json().expect("Failed to write graph");
    let value: serde_json::Value = serde_json::from_str(&json).expect("graph JSON is valid");

    let first = &value["nodes"][0];
    assert_eq!(first["id"], "node_0");
    assert_eq!(first["type"], "dialogNode");
    assert_eq!(first["position"]["x"], 0.0);
    assert_eq!(first["data"]["isFirstNode"], true);
    assert_eq!(first["data"]["level"], "L0");
    assert_eq!(first["data"]["speaker"], "AVATAR");
    assert_eq!(value["nodes"][1]["data"]["outcome_state"], "POSITIVE");
    assert_eq!(value["edges"][0]["source"], "node_0");
    assert_eq!(value["edges"][0]["target"], "node_1");
}

#[test]
fn test_full_session_through_json() {
    // Backend -> expand -> canvas (JSON) -> edit -> collapse -> backend.
    let tree = tree_from_json(GREETING_JSON).expect("Failed to parse tree");
    let canvas_json = expand_default(&tree, true)
        .to_json()
        .expect("Failed to write graph");

    let graph = FlowGraph::from_json(&canvas_json).expect("Failed to read graph");
    let mut editor = FlowEditor::new(graph).expect("Failed to open editor");
    let follow_up = editor
        .add_child(
            "node_1",
            DialogPayload::new("Welcome in!", Speaker::Avatar)
                .with_topic("lobby")
                .with_outcome(OutcomeState::Terminal),
        )
        .expect("Failed to add child");
    editor
        .update_node_payload(
            "node_1",
            NodePayloadPatch::default().outcome_state(None),
        )
        .expect("Failed to update");
    assert_eq!(follow_up, "node_2");

    let document = ScenarioDocument::new(editor.collapse().expect("Failed to collapse"));
    let saved = document.to_json().expect("Failed to write document");
    let reloaded = ScenarioDocument::from_json(&saved).expect("Failed to reload document");

    let expected = ScenarioChatNode::new("Hi", Speaker::Avatar).with_child(
        ScenarioChatNode::new("Hello!", Speaker::Visitor).with_child(
            ScenarioChatNode::new("Welcome in!", Speaker::Avatar)
                .with_topic("lobby")
                .with_outcome(OutcomeState::Terminal),
        ),
    );
    assert_eq!(reloaded.chats, expected);
    assert!(validate(&reloaded.chats).issues.is_empty());
}

#[test]
fn test_collapsed_tree_serializes_without_absent_outcome() {
    let graph = expand_default(&chain_tree(), true);
    let tree = collapse_graph(&graph).expect("Failed to collapse");
    let json = serde_json::to_value(&tree).expect("tree serializes");

    assert!(json.get("outcome_state").is_none());
    assert_eq!(json["chat_level"], 0);
    assert_eq!(json["subchat"][0]["subchat"][0]["outcome_state"], "TERMINAL");
}

#[test]
fn test_into_scenario_passes_documents_through() {
    let document = ScenarioDocument::new(front_desk_tree());
    let tree = document.into_scenario().expect("Failed to convert");
    assert_eq!(tree, front_desk_tree());
}
