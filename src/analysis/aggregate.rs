//! Board/sprint grouping of issues for display.

use serde::Serialize;

use crate::ports::Issue;

/// Line shown for a sprint without issues.
pub const NO_ISSUES: &str = "No issues.";

/// Issues of one sprint, as display lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SprintSection {
    /// Sprint display name.
    pub name: String,
    /// `"KEY: summary"` lines in listing order, or the single [`NO_ISSUES`] line.
    pub lines: Vec<String>,
}

/// Sprints of one board, in listing order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardSection {
    /// Board display name.
    pub name: String,
    /// Sprints in listing order.
    pub sprints: Vec<SprintSection>,
}

/// `board name -> sprint name -> lines`, in listing order throughout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SprintTable {
    boards: Vec<BoardSection>,
}

impl SprintSection {
    /// Builds a sprint section from the sprint's issues.
    #[must_use]
    pub fn new(name: &str, issues: &[Issue]) -> Self {
        let lines = if issues.is_empty() {
            vec![NO_ISSUES.to_string()]
        } else {
            issues.iter().map(display_line).collect()
        };
        Self { name: name.to_string(), lines }
    }
}

impl SprintTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a board section.
    pub fn push_board(&mut self, name: &str, sprints: Vec<SprintSection>) {
        self.boards.push(BoardSection { name: name.to_string(), sprints });
    }

    /// Board sections in listing order.
    #[must_use]
    pub fn boards(&self) -> &[BoardSection] {
        &self.boards
    }

    /// Display lines for a sprint, looked up by board and sprint name.
    #[must_use]
    pub fn lines(&self, board: &str, sprint: &str) -> Option<&[String]> {
        self.boards
            .iter()
            .find(|b| b.name == board)
            .and_then(|b| b.sprints.iter().find(|s| s.name == sprint))
            .map(|s| s.lines.as_slice())
    }
}

fn display_line(issue: &Issue) -> String {
    format!("{}: {}", issue.key, issue.summary)
}
