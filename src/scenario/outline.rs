use super::chat::ScenarioChatNode;
use itertools::Itertools;

/// Renders a tree as an indented, human-readable outline, one node per line.
///
/// ```text
/// [L0] AVATAR: Hi
///   [L1] VISITOR: Hello! (POSITIVE)
/// ```
pub fn outline(root: &ScenarioChatNode) -> String {
    let mut lines = Vec::new();
    push_lines(root, 0, &mut lines);
    lines.into_iter().join("\n")
}

fn push_lines(node: &ScenarioChatNode, depth: usize, lines: &mut Vec<String>) {
    let mut line = format!(
        "{}[L{}] {}: {}",
        "  ".repeat(depth),
        node.chat_level,
        node.speaker,
        node.dialog
    );
    let tags = [&node.intent, &node.topic]
        .into_iter()
        .filter(|t| !t.is_empty())
        .join(", ");
    if !tags.is_empty() {
        line.push_str(&format!(" <{}>", tags));
    }
    if let Some(outcome) = node.outcome_state {
        line.push_str(&format!(" ({})", outcome));
    }
    lines.push(line);

    for child in &node.subchat {
        push_lines(child, depth + 1, lines);
    }
}
