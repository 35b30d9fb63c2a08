//! Replaying adapter for the `IssueTracker` port.

use std::sync::Mutex;

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::{Board, BoardId, Issue, IssueTracker, Sprint, SprintId, TrackerFuture};

/// Serves recorded tracker listings from a cassette.
pub struct ReplayingIssueTracker {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingIssueTracker {
    /// Create a replaying tracker backed by the given replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl IssueTracker for ReplayingIssueTracker {
    fn list_boards<'a>(&'a self, _project_key: &'a str) -> TrackerFuture<'a, Vec<Board>> {
        let output = next_output(&self.replayer, "tracker", "list_boards");
        Box::pin(async move { replay_result(output) })
    }

    fn list_sprints(&self, _board_id: BoardId) -> TrackerFuture<'_, Vec<Sprint>> {
        let output = next_output(&self.replayer, "tracker", "list_sprints");
        Box::pin(async move { replay_result(output) })
    }

    fn list_issues(&self, _sprint_id: SprintId) -> TrackerFuture<'_, Vec<Issue>> {
        let output = next_output(&self.replayer, "tracker", "list_issues");
        Box::pin(async move { replay_result(output) })
    }
}
