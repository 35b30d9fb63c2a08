//! Recording adapter for the `IssueTracker` port.

use serde::Serialize;

use super::{record_result, SharedRecorder};
use crate::ports::{Board, BoardId, Issue, IssueTracker, Sprint, SprintId, TrackerFuture};

/// Records tracker interactions while delegating to an inner implementation.
pub struct RecordingIssueTracker {
    inner: Box<dyn IssueTracker>,
    recorder: SharedRecorder,
}

impl RecordingIssueTracker {
    /// Creates a new recording tracker wrapping the given implementation.
    pub fn new(inner: Box<dyn IssueTracker>, recorder: SharedRecorder) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct ListBoardsInput<'a> {
    project_key: &'a str,
}

#[derive(Serialize)]
struct ListSprintsInput {
    board_id: BoardId,
}

#[derive(Serialize)]
struct ListIssuesInput {
    sprint_id: SprintId,
}

impl IssueTracker for RecordingIssueTracker {
    fn list_boards<'a>(&'a self, project_key: &'a str) -> TrackerFuture<'a, Vec<Board>> {
        Box::pin(async move {
            let result = self.inner.list_boards(project_key).await;
            let input = ListBoardsInput { project_key };
            record_result(&self.recorder, "tracker", "list_boards", &input, &result);
            result
        })
    }

    fn list_sprints(&self, board_id: BoardId) -> TrackerFuture<'_, Vec<Sprint>> {
        Box::pin(async move {
            let result = self.inner.list_sprints(board_id).await;
            let input = ListSprintsInput { board_id };
            record_result(&self.recorder, "tracker", "list_sprints", &input, &result);
            result
        })
    }

    fn list_issues(&self, sprint_id: SprintId) -> TrackerFuture<'_, Vec<Issue>> {
        Box::pin(async move {
            let result = self.inner.list_issues(sprint_id).await;
            let input = ListIssuesInput { sprint_id };
            record_result(&self.recorder, "tracker", "list_issues", &input, &result);
            result
        })
    }
}
