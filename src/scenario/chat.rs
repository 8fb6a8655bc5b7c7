use serde::{Deserialize, Serialize};
use std::fmt;

/// Who utters a line of dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Speaker {
    Avatar,
    Visitor,
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Speaker::Avatar => write!(f, "AVATAR"),
            Speaker::Visitor => write!(f, "VISITOR"),
        }
    }
}

/// Classification of how a dialog branch ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutcomeState {
    Terminal,
    Positive,
    Negative,
    General,
    Retry,
}

impl fmt::Display for OutcomeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutcomeState::Terminal => "TERMINAL",
            OutcomeState::Positive => "POSITIVE",
            OutcomeState::Negative => "NEGATIVE",
            OutcomeState::General => "GENERAL",
            OutcomeState::Retry => "RETRY",
        };
        write!(f, "{}", name)
    }
}

/// One node of the persisted scenario dialog tree.
///
/// The tree is owned recursively: every node owns its ordered `subchat` branches,
/// and the order of those branches is the presentation order of the response options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioChatNode {
    #[serde(default)]
    pub dialog: String,
    #[serde(default)]
    pub intent: String,
    #[serde(default)]
    pub topic: String,
    /// Depth from the root, which sits at level 0.
    #[serde(default)]
    pub chat_level: u32,
    pub speaker: Speaker,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome_state: Option<OutcomeState>,
    #[serde(default)]
    pub subchat: Vec<ScenarioChatNode>,
}

impl ScenarioChatNode {
    /// Creates a leaf node at level 0 with empty intent and topic.
    pub fn new(dialog: impl Into<String>, speaker: Speaker) -> Self {
        Self {
            dialog: dialog.into(),
            intent: String::new(),
            topic: String::new(),
            chat_level: 0,
            speaker,
            outcome_state: None,
            subchat: Vec::new(),
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

    /// Appends a branch, stamping it (and its own branches) with the correct levels.
    pub fn with_child(mut self, mut child: ScenarioChatNode) -> Self {
        child.set_levels_from(self.chat_level + 1);
        self.subchat.push(child);
        self
    }

    /// Rewrites `chat_level` for this node and all descendants, starting at `level`.
    pub fn set_levels_from(&mut self, level: u32) {
        self.chat_level = level;
        for child in &mut self.subchat {
            child.set_levels_from(level + 1);
        }
    }

    /// Total number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.subchat.iter().map(|c| c.node_count()).sum::<usize>()
    }

    /// Number of levels in this subtree; a single leaf has depth 1.
    pub fn depth(&self) -> usize {
        1 + self.subchat.iter().map(|c| c.depth()).max().unwrap_or(0)
    }
}
