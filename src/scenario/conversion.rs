use super::chat::ScenarioChatNode;
use super::document::ScenarioDocument;
use crate::error::ConversionError;

/// A trait for backend payloads that can be turned into a `ScenarioChatNode` tree.
///
/// This is the seam for feeding the engine from formats other than the canonical
/// JSON shape. Implement it on your own response structs to translate them into
/// the tree the expander consumes.
///
/// # Example
///
/// ```rust,no_run
/// use taiwa::scenario::{IntoScenario, ScenarioChatNode, Speaker};
/// use taiwa::error::ConversionError;
///
/// struct LegacyLine { text: String, from_avatar: bool, replies: Vec<LegacyLine> }
///
/// impl IntoScenario for LegacyLine {
///     fn into_scenario(self) -> Result<ScenarioChatNode, ConversionError> {
///         let speaker = if self.from_avatar { Speaker::Avatar } else { Speaker::Visitor };
///         let mut node = ScenarioChatNode::new(self.text, speaker);
///         for reply in self.replies {
///             node = node.with_child(reply.into_scenario()?);
///         }
///         Ok(node)
///     }
/// }
/// ```
pub trait IntoScenario {
    /// Consumes the object and converts it into a scenario dialog tree.
    fn into_scenario(self) -> Result<ScenarioChatNode, ConversionError>;
}

impl IntoScenario for ScenarioChatNode {
    fn into_scenario(self) -> Result<ScenarioChatNode, ConversionError> {
        Ok(self)
    }
}

impl IntoScenario for ScenarioDocument {
    fn into_scenario(self) -> Result<ScenarioChatNode, ConversionError> {
        Ok(self.chats)
    }
}

/// Accepts either a bare root node or an object wrapping it under `chats`.
impl IntoScenario for serde_json::Value {
    fn into_scenario(self) -> Result<ScenarioChatNode, ConversionError> {
        match self {
            serde_json::Value::Object(mut map) if map.contains_key("chats") => {
                let chats = map.remove("chats").unwrap_or_default();
                Ok(serde_json::from_value(chats)?)
            }
            value @ serde_json::Value::Object(_) => Ok(serde_json::from_value(value)?),
            other => Err(ConversionError::ValidationError(format!(
                "expected a dialog object, found {}",
                json_kind(&other)
            ))),
        }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
