//! Unit tests for the tree model, validation, labels, payload patches and errors.
mod common;
use common::*;
use taiwa::graph::{level_label, parse_level_label};
use taiwa::prelude::*;
use taiwa::scenario::{NodePath, Severity, TreeIssue};

#[test]
fn test_builder_stamps_levels() {
    let tree = front_desk_tree();
    assert_eq!(tree.chat_level, 0);
    assert_eq!(tree.subchat[0].chat_level, 1);
    assert_eq!(tree.subchat[0].subchat[0].chat_level, 2);
    assert_eq!(tree.subchat[0].subchat[0].subchat[1].chat_level, 3);
    assert_eq!(tree.node_count(), 8);
    assert_eq!(tree.depth(), 4);
}

#[test]
fn test_valid_tree_has_no_issues() {
    let report = validate(&front_desk_tree());
    assert!(report.is_valid());
    assert!(report.issues.is_empty());
}

#[test]
fn test_level_mismatch_is_an_error() {
    let mut tree = front_desk_tree();
    tree.subchat[1].subchat[0].chat_level = 5;

    let report = validate(&tree);
    assert!(!report.is_valid());
    let errors: Vec<_> = report.errors().collect();
    assert_eq!(
        errors,
        vec![&TreeIssue::LevelMismatch {
            path: NodePath(vec![1, 0]),
            expected: 2,
            found: 5,
        }]
    );
    assert_eq!(
        errors[0].to_string(),
        "root/1/0: chat_level is 5 but the node sits at depth 2"
    );
}

#[test]
fn test_outcome_rules_are_advisory() {
    let mut tree = chain_tree();
    tree.subchat[0].outcome_state = Some(OutcomeState::General);
    tree.subchat[0].subchat[0].outcome_state = None;

    let report = validate(&tree);
    assert!(report.is_valid());
    let advisories: Vec<_> = report.advisories().cloned().collect();
    assert_eq!(
        advisories,
        vec![
            TreeIssue::OutcomeWithBranches {
                path: NodePath(vec![0])
            },
            TreeIssue::LeafWithoutOutcome {
                path: NodePath(vec![0, 0])
            },
        ]
    );
    assert!(advisories.iter().all(|i| i.severity() == Severity::Advisory));
}

#[test]
fn test_lone_root_is_not_flagged() {
    let tree = ScenarioChatNode::new("Hello?", Speaker::Avatar);
    assert!(validate(&tree).issues.is_empty());
}

#[test]
fn test_level_labels() {
    assert_eq!(level_label(0), "L0");
    assert_eq!(level_label(12), "L12");
    assert_eq!(parse_level_label("L7"), Some(7));
    assert_eq!(parse_level_label("7"), None);
    assert_eq!(parse_level_label("Lx"), None);
}

#[test]
fn test_outline_rendering() {
    let text = outline(&greeting_tree());
    assert_eq!(text, "[L0] AVATAR: Hi\n  [L1] VISITOR: Hello! (POSITIVE)");

    let tagged = outline(&ScenarioChatNode::new("Hi", Speaker::Avatar).with_intent("greet").with_topic("lobby"));
    assert_eq!(tagged, "[L0] AVATAR: Hi <greet, lobby>");
}

#[test]
fn test_patch_json_distinguishes_null_from_missing() {
    let keep: NodePayloadPatch =
        serde_json::from_str(r#"{"dialog": "new line"}"#).expect("valid patch");
    assert_eq!(keep.dialog.as_deref(), Some("new line"));
    assert_eq!(keep.outcome_state, None);

    let clear: NodePayloadPatch =
        serde_json::from_str(r#"{"outcome_state": null}"#).expect("valid patch");
    assert_eq!(clear.outcome_state, Some(None));

    let set: NodePayloadPatch =
        serde_json::from_str(r#"{"outcome_state": "RETRY", "speaker": "AVATAR"}"#)
            .expect("valid patch");
    assert_eq!(set.outcome_state, Some(Some(OutcomeState::Retry)));
    assert_eq!(set.speaker, Some(Speaker::Avatar));
}

#[test]
fn test_sequential_ids() {
    let mut ids = SequentialIds::with_prefix("d").starting_at(5);
    assert_eq!(ids.next_id(), "d5");
    assert_eq!(ids.next_id(), "d6");
}

#[test]
fn test_sequential_ids_resume_after_existing() {
    let mut ids = SequentialIds::new().resume_after(["node_3", "node_11", "custom_40", "node_x"]);
    assert_eq!(ids.next_id(), "node_12");

    let mut untouched = SequentialIds::new().starting_at(20).resume_after(["node_4"]);
    assert_eq!(untouched.next_id(), "node_20");
}

#[test]
fn test_error_display() {
    let err = FlowError::UnknownNodeReference {
        missing_node_id: "node_B".to_string(),
        referenced_by: "enode_A-node_B".to_string(),
    };
    assert!(err.to_string().contains("node_B"));
    assert!(err.to_string().contains("enode_A-node_B"));

    let root_err = FlowError::RootNotFound { candidates: 3 };
    assert!(root_err.to_string().contains('3'));

    let cycle = FlowError::CycleDetected {
        node_id: "n1".to_string(),
    };
    assert!(cycle.to_string().contains("n1"));

    let edit = FlowError::EditNotPermitted {
        operation: "remove the first node".to_string(),
    };
    assert!(edit.to_string().contains("remove the first node"));

    let parse = ConversionError::JsonParseError("eof".to_string());
    assert!(parse.to_string().contains("eof"));
}
