//! Issue position index: where every listed issue sits in the sprint order.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::ordering::Rank;
use crate::ports::SprintId;

/// Position of an issue in the sprint order.
///
/// `Unresolved` marks an issue that no analyzed sprint lists, typically a
/// blocker living in another project. It orders after every found position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum IssuePosition {
    /// The issue is listed in `sprint_id`, ranked `rank`.
    Found {
        /// Rank of the issue's sprint.
        rank: Rank,
        /// Sprint the issue is listed in.
        sprint_id: SprintId,
    },
    /// No analyzed sprint lists the issue.
    Unresolved,
}

impl IssuePosition {
    /// Compares two positions by rank alone, with `Unresolved` greater than
    /// any found rank and equal to itself.
    #[must_use]
    pub fn cmp_rank(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Found { rank: a, .. }, Self::Found { rank: b, .. }) => a.cmp(b),
            (Self::Found { .. }, Self::Unresolved) => Ordering::Less,
            (Self::Unresolved, Self::Found { .. }) => Ordering::Greater,
            (Self::Unresolved, Self::Unresolved) => Ordering::Equal,
        }
    }

    /// Sprint id, when found.
    #[must_use]
    pub fn sprint_id(&self) -> Option<SprintId> {
        match self {
            Self::Found { sprint_id, .. } => Some(*sprint_id),
            Self::Unresolved => None,
        }
    }
}

/// `issue_id -> (rank, sprint_id)` for one analysis run.
#[derive(Debug, Default)]
pub struct PositionIndex {
    positions: HashMap<String, (Rank, SprintId)>,
}

impl PositionIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the issues listed in one ranked sprint.
    ///
    /// An issue already recorded from another sprint is overwritten.
    pub fn record_sprint<'a, I>(&mut self, rank: Rank, sprint_id: SprintId, issue_ids: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        for id in issue_ids {
            if let Some((_, previous)) =
                self.positions.insert(id.to_string(), (rank, sprint_id))
            {
                if previous != sprint_id {
                    tracing::debug!(issue = id, previous, sprint_id, "issue listed in several sprints");
                }
            }
        }
    }

    /// Looks up an issue's position.
    #[must_use]
    pub fn lookup(&self, issue_id: &str) -> IssuePosition {
        self.positions
            .get(issue_id)
            .map_or(IssuePosition::Unresolved, |&(rank, sprint_id)| IssuePosition::Found {
                rank,
                sprint_id,
            })
    }

    /// Number of indexed issues.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns `true` if no issue has been indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
