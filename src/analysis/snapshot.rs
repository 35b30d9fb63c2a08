//! Fetches a project's board/sprint/issue hierarchy in one traversal.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::{AnalysisError, FetchCall};
use crate::ports::{Board, Issue, IssueTracker, Sprint};

/// A sprint together with the issues it lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SprintSnapshot {
    /// The sprint as listed on its board.
    pub sprint: Sprint,
    /// Issues in listing order.
    pub issues: Vec<Issue>,
}

/// A board together with its sprints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    /// The board.
    pub board: Board,
    /// Sprints in listing order.
    pub sprints: Vec<SprintSnapshot>,
}

/// Read-only snapshot of a project, taken fresh for every analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSnapshot {
    /// Project key the snapshot was taken for.
    pub project_key: String,
    /// Boards in listing order; never empty.
    pub boards: Vec<BoardSnapshot>,
}

impl ProjectSnapshot {
    /// Total number of sprints across all boards.
    #[must_use]
    pub fn sprint_count(&self) -> usize {
        self.boards.iter().map(|b| b.sprints.len()).sum()
    }

    /// Total number of issue listings across all sprints.
    #[must_use]
    pub fn issue_count(&self) -> usize {
        self.boards.iter().flat_map(|b| &b.sprints).map(|s| s.issues.len()).sum()
    }
}

/// Walks boards, then each board's sprints, then each sprint's issues.
///
/// Each listing is requested once. The first failing call aborts the walk.
///
/// # Errors
///
/// Returns [`AnalysisError::NoBoards`] if the project has no boards and
/// [`AnalysisError::Fetch`] if any tracker call fails.
pub async fn fetch_snapshot(
    tracker: &dyn IssueTracker,
    project_key: &str,
) -> Result<ProjectSnapshot, AnalysisError> {
    let boards = tracker.list_boards(project_key).await.map_err(|source| AnalysisError::Fetch {
        call: FetchCall::ListBoards { project_key: project_key.to_string() },
        source,
    })?;
    if boards.is_empty() {
        return Err(AnalysisError::NoBoards { project_key: project_key.to_string() });
    }
    debug!(project = project_key, boards = boards.len(), "listed boards");

    let mut board_snapshots = Vec::with_capacity(boards.len());
    for board in boards {
        let sprints = tracker.list_sprints(board.id).await.map_err(|source| {
            AnalysisError::Fetch { call: FetchCall::ListSprints { board_id: board.id }, source }
        })?;
        debug!(board = %board.name, board_id = board.id, sprints = sprints.len(), "listed sprints");

        let mut sprint_snapshots = Vec::with_capacity(sprints.len());
        for sprint in sprints {
            let issues = tracker.list_issues(sprint.id).await.map_err(|source| {
                AnalysisError::Fetch { call: FetchCall::ListIssues { sprint_id: sprint.id }, source }
            })?;
            debug!(sprint = %sprint.name, sprint_id = sprint.id, issues = issues.len(), "listed issues");
            sprint_snapshots.push(SprintSnapshot { sprint, issues });
        }
        board_snapshots.push(BoardSnapshot { board, sprints: sprint_snapshots });
    }

    let snapshot = ProjectSnapshot { project_key: project_key.to_string(), boards: board_snapshots };
    debug!(
        project = project_key,
        boards = snapshot.boards.len(),
        sprints = snapshot.sprint_count(),
        issues = snapshot.issue_count(),
        "snapshot fetched"
    );
    Ok(snapshot)
}
