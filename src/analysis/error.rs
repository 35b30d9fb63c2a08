//! Errors raised while running an analysis.

use std::fmt;

use crate::ports::{BoardId, SprintId, TrackerError};

/// The tracker call that failed, with its argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchCall {
    /// Listing the boards of a project.
    ListBoards {
        /// Project key passed to the tracker.
        project_key: String,
    },
    /// Listing the sprints of a board.
    ListSprints {
        /// Board whose sprints were requested.
        board_id: BoardId,
    },
    /// Listing the issues of a sprint.
    ListIssues {
        /// Sprint whose issues were requested.
        sprint_id: SprintId,
    },
}

impl fmt::Display for FetchCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ListBoards { project_key } => write!(f, "list_boards({project_key})"),
            Self::ListSprints { board_id } => write!(f, "list_sprints(board {board_id})"),
            Self::ListIssues { sprint_id } => write!(f, "list_issues(sprint {sprint_id})"),
        }
    }
}

/// Failure of a whole analysis run. There are no partial results.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// The project has no boards.
    #[error("no boards found for project {project_key}")]
    NoBoards {
        /// Project key that was analyzed.
        project_key: String,
    },
    /// A tracker call failed; the traversal stopped there.
    #[error("{call} failed: {source}")]
    Fetch {
        /// Which call failed.
        call: FetchCall,
        /// Error reported by the tracker adapter.
        #[source]
        source: TrackerError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_names_the_failed_call() {
        let err = AnalysisError::Fetch {
            call: FetchCall::ListIssues { sprint_id: 7 },
            source: "HTTP 500".into(),
        };
        assert_eq!(err.to_string(), "list_issues(sprint 7) failed: HTTP 500");
    }

    #[test]
    fn no_boards_names_the_project() {
        let err = AnalysisError::NoBoards { project_key: "PROJ".into() };
        assert_eq!(err.to_string(), "no boards found for project PROJ");
    }
}
