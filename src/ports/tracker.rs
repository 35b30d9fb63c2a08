//! Issue tracker port: the read-only board/sprint/issue listings an
//! analysis run is built from.

use std::error::Error;
use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

/// Error type returned by every tracker call.
pub type TrackerError = Box<dyn Error + Send + Sync>;

/// Boxed future returned by [`IssueTracker`] methods to keep the trait dyn-compatible.
pub type TrackerFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, TrackerError>> + Send + 'a>>;

/// Identifier of an agile board.
pub type BoardId = u64;

/// Identifier of a sprint, unique within a project.
pub type SprintId = u64;

/// An agile board belonging to a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Tracker-assigned board id.
    pub id: BoardId,
    /// Display name.
    pub name: String,
}

/// A sprint as listed on a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprint {
    /// Tracker-assigned sprint id.
    pub id: SprintId,
    /// Display name.
    pub name: String,
}

/// An inward "is blocked by" link recorded on an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InwardLink {
    /// The link type's inward label, e.g. `"is blocked by"`.
    pub link_type: String,
    /// Id of the blocking issue.
    pub blocker_id: String,
    /// Human key of the blocking issue.
    pub blocker_key: String,
    /// Summary of the blocking issue.
    pub blocker_summary: String,
}

/// An issue as listed in a sprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Tracker-assigned issue id.
    pub id: String,
    /// Human key such as `PROJ-12`.
    pub key: String,
    /// One-line summary.
    pub summary: String,
    /// Links where this issue is the blocked side.
    #[serde(default)]
    pub inward_links: Vec<InwardLink>,
}

/// Read-only access to a project's boards, sprints and issues.
///
/// Abstracting the tracker allows deterministic replay and testing
/// without touching a real tracker API.
pub trait IssueTracker: Send + Sync {
    /// Lists the boards of a project.
    ///
    /// # Errors
    ///
    /// Returns an error if the tracker request fails.
    fn list_boards<'a>(&'a self, project_key: &'a str) -> TrackerFuture<'a, Vec<Board>>;

    /// Lists a board's sprints in the board's own (chronological) order.
    ///
    /// # Errors
    ///
    /// Returns an error if the tracker request fails.
    fn list_sprints(&self, board_id: BoardId) -> TrackerFuture<'_, Vec<Sprint>>;

    /// Lists the issues of a sprint, each with its inward links.
    ///
    /// # Errors
    ///
    /// Returns an error if the tracker request fails.
    fn list_issues(&self, sprint_id: SprintId) -> TrackerFuture<'_, Vec<Issue>>;
}
