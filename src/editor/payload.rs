use crate::graph::NodeData;
use crate::scenario::{OutcomeState, Speaker};
use serde::{Deserialize, Deserializer, Serialize};

/// The dialog content of a new node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogPayload {
    #[serde(default)]
    pub dialog: String,
    #[serde(default)]
    pub intent: String,
    #[serde(default)]
    pub topic: String,
    pub speaker: Speaker,
    #[serde(default)]
    pub outcome_state: Option<OutcomeState>,
}

impl DialogPayload {
    pub fn new(dialog: impl Into<String>, speaker: Speaker) -> Self {
        Self {
            dialog: dialog.into(),
            intent: String::new(),
            topic: String::new(),
            speaker,
            outcome_state: None,
        }
    }

    pub fn with_intent(mut self, intent: impl Into<String>) -> Self {
        self.intent = intent.into();
        self
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = topic.into();
        self
    }

    pub fn with_outcome(mut self, outcome: OutcomeState) -> Self {
        self.outcome_state = Some(outcome);
        self
    }
}

/// A partial update to a node's payload. Fields left as `None` are not touched.
///
/// `outcome_state` is doubly optional so a patch can clear it: `Some(None)` removes the
/// outcome, `None` leaves it alone. In JSON an explicit `null` clears, a missing key keeps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodePayloadPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dialog: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<Speaker>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub outcome_state: Option<Option<OutcomeState>>,
}

impl NodePayloadPatch {
    pub fn dialog(mut self, dialog: impl Into<String>) -> Self {
        self.dialog = Some(dialog.into());
        self
    }

    pub fn intent(mut self, intent: impl Into<String>) -> Self {
        self.intent = Some(intent.into());
        self
    }

    pub fn topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    pub fn speaker(mut self, speaker: Speaker) -> Self {
        self.speaker = Some(speaker);
        self
    }

    pub fn outcome_state(mut self, outcome: Option<OutcomeState>) -> Self {
        self.outcome_state = Some(outcome);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.dialog.is_none()
            && self.intent.is_none()
            && self.topic.is_none()
            && self.speaker.is_none()
            && self.outcome_state.is_none()
    }

    /// Merges the patch into `data`. Level, first-node flag and editability are never touched.
    pub fn apply(self, data: &mut NodeData) {
        if let Some(dialog) = self.dialog {
            data.dialog = dialog;
        }
        if let Some(intent) = self.intent {
            data.intent = intent;
        }
        if let Some(topic) = self.topic {
            data.topic = topic;
        }
        if let Some(speaker) = self.speaker {
            data.speaker = speaker;
        }
        if let Some(outcome) = self.outcome_state {
            data.outcome_state = outcome;
        }
    }
}

// A key that is present, even as `null`, deserializes to `Some`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}
