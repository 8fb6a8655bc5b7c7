use super::chat::ScenarioChatNode;
use super::conversion::IntoScenario;
use crate::error::ConversionError;
use serde::{Deserialize, Serialize};

/// The envelope a scenario tree travels in when it is saved: the tree sits under `chats`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioDocument {
    pub chats: ScenarioChatNode,
}

impl ScenarioDocument {
    pub fn new(chats: ScenarioChatNode) -> Self {
        Self { chats }
    }

    pub fn from_json(json: &str) -> Result<Self, ConversionError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConversionError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ConversionError::JsonWriteError(e.to_string()))
    }
}

/// Reads a tree from JSON that holds either a bare root node or a `{ "chats": ... }` document.
pub fn tree_from_json(json: &str) -> Result<ScenarioChatNode, ConversionError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    value.into_scenario()
}
