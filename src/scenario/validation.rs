use super::chat::ScenarioChatNode;
use std::fmt;

/// Location of a node inside a tree, as the sibling index taken at every step from the root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NodePath(pub Vec<usize>);

impl NodePath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    fn child(&self, index: usize) -> Self {
        let mut steps = self.0.clone();
        steps.push(index);
        Self(steps)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "root")?;
        for step in &self.0 {
            write!(f, "/{}", step)?;
        }
        Ok(())
    }
}

/// How much weight an issue carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Breaks a structural invariant of the tree.
    Error,
    /// Worth flagging to the author, but never blocks anything.
    Advisory,
}

/// A single finding produced by [`validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeIssue {
    /// `chat_level` differs from the node's actual depth.
    LevelMismatch {
        path: NodePath,
        expected: u32,
        found: u32,
    },
    /// A node carries an `outcome_state` but still has branches below it.
    OutcomeWithBranches { path: NodePath },
    /// A leaf ends the conversation without saying how.
    LeafWithoutOutcome { path: NodePath },
}

impl TreeIssue {
    pub fn severity(&self) -> Severity {
        match self {
            TreeIssue::LevelMismatch { .. } => Severity::Error,
            TreeIssue::OutcomeWithBranches { .. } | TreeIssue::LeafWithoutOutcome { .. } => {
                Severity::Advisory
            }
        }
    }

    pub fn path(&self) -> &NodePath {
        match self {
            TreeIssue::LevelMismatch { path, .. }
            | TreeIssue::OutcomeWithBranches { path }
            | TreeIssue::LeafWithoutOutcome { path } => path,
        }
    }
}

impl fmt::Display for TreeIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeIssue::LevelMismatch {
                path,
                expected,
                found,
            } => write!(
                f,
                "{}: chat_level is {} but the node sits at depth {}",
                path, found, expected
            ),
            TreeIssue::OutcomeWithBranches { path } => {
                write!(f, "{}: node has an outcome_state but also has sub-dialogs", path)
            }
            TreeIssue::LeafWithoutOutcome { path } => {
                write!(f, "{}: leaf node has no outcome_state", path)
            }
        }
    }
}

/// The full result of checking a tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub issues: Vec<TreeIssue>,
}

impl ValidationReport {
    /// `true` when no issue of [`Severity::Error`] was found.
    pub fn is_valid(&self) -> bool {
        self.errors().next().is_none()
    }

    pub fn errors(&self) -> impl Iterator<Item = &TreeIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity() == Severity::Error)
    }

    pub fn advisories(&self) -> impl Iterator<Item = &TreeIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity() == Severity::Advisory)
    }
}

/// Checks the structural invariants of a tree without modifying it.
///
/// A tree value always has exactly one root and cannot contain cycles, so the
/// checks left are level numbering (root at 0, +1 per step) and the advisory
/// rules around `outcome_state`.
pub fn validate(root: &ScenarioChatNode) -> ValidationReport {
    let mut report = ValidationReport::default();
    visit(root, 0, NodePath::root(), &mut report);
    report
}

fn visit(node: &ScenarioChatNode, depth: u32, path: NodePath, report: &mut ValidationReport) {
    if node.chat_level != depth {
        report.issues.push(TreeIssue::LevelMismatch {
            path: path.clone(),
            expected: depth,
            found: node.chat_level,
        });
    }

    match (node.outcome_state.is_some(), node.subchat.is_empty()) {
        (true, false) => report.issues.push(TreeIssue::OutcomeWithBranches { path: path.clone() }),
        // A lone root is an empty scenario being authored, not an unfinished branch.
        (false, true) if depth > 0 => report
            .issues
            .push(TreeIssue::LeafWithoutOutcome { path: path.clone() }),
        _ => {}
    }

    for (index, child) in node.subchat.iter().enumerate() {
        visit(child, depth + 1, path.child(index), report);
    }
}
