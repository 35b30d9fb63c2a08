//! Dependency conflict classification for inward blocking links.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::ordering::Rank;
use super::position::{IssuePosition, PositionIndex};
use crate::ports::{Issue, SprintId};

/// Classification of a blocking link that needs attention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictCategory {
    /// Blocker and blocked issue share a sprint.
    Internal,
    /// Blocker and blocked issue share a rank but not a sprint.
    External,
    /// The blocker is scheduled after the issue it blocks.
    Conflict,
}

impl ConflictCategory {
    /// Decides the category of a link from the two positions, or `None` when
    /// the blocker is scheduled strictly earlier.
    #[must_use]
    pub fn of(blocked_rank: Rank, blocked_sprint: SprintId, blocker: IssuePosition) -> Option<Self> {
        let blocked = IssuePosition::Found { rank: blocked_rank, sprint_id: blocked_sprint };
        match blocker.cmp_rank(&blocked) {
            Ordering::Less => None,
            Ordering::Greater => Some(Self::Conflict),
            Ordering::Equal if blocker.sprint_id() == Some(blocked_sprint) => Some(Self::Internal),
            Ordering::Equal => Some(Self::External),
        }
    }

    /// Lowercase label used in reports.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Internal => "internal",
            Self::External => "external",
            Self::Conflict => "conflict",
        }
    }
}

impl fmt::Display for ConflictCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One side of a classified link.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LinkEnd {
    /// Human key.
    pub key: String,
    /// Summary text.
    pub summary: String,
    /// Tracker id.
    pub id: String,
    /// Position in the sprint order.
    pub position: IssuePosition,
}

/// A classified blocking link. Equal records describe the same finding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConflictRecord {
    /// The blocked issue.
    pub blocked: LinkEnd,
    /// Inward label of the link type.
    pub link_type: String,
    /// The blocking issue.
    pub blocker: LinkEnd,
    /// Classification outcome.
    pub category: ConflictCategory,
}

/// Classified records, one set per category.
///
/// Sets iterate in record order; insertion order is not kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictReport {
    /// Blockers scheduled after the issue they block.
    pub conflicts: BTreeSet<ConflictRecord>,
    /// Same-sprint dependencies.
    pub internal: BTreeSet<ConflictRecord>,
    /// Same-rank dependencies across different sprints.
    pub external: BTreeSet<ConflictRecord>,
}

impl ConflictReport {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Classifies every inward link of `issue`, which sits at `rank` in
    /// `sprint_id`, and records the ones that need attention.
    ///
    /// Returns how many records were newly added.
    pub fn classify_issue(
        &mut self,
        issue: &Issue,
        rank: Rank,
        sprint_id: SprintId,
        index: &PositionIndex,
    ) -> usize {
        let mut added = 0;
        for link in &issue.inward_links {
            let blocker_position = index.lookup(&link.blocker_id);
            let Some(category) = ConflictCategory::of(rank, sprint_id, blocker_position) else {
                continue;
            };
            if blocker_position == IssuePosition::Unresolved {
                tracing::warn!(
                    blocked = %issue.key,
                    blocker = %link.blocker_key,
                    "blocker is not listed in any analyzed sprint; reporting as conflict"
                );
            }
            let record = ConflictRecord {
                blocked: LinkEnd {
                    key: issue.key.clone(),
                    summary: issue.summary.clone(),
                    id: issue.id.clone(),
                    position: IssuePosition::Found { rank, sprint_id },
                },
                link_type: link.link_type.clone(),
                blocker: LinkEnd {
                    key: link.blocker_key.clone(),
                    summary: link.blocker_summary.clone(),
                    id: link.blocker_id.clone(),
                    position: blocker_position,
                },
                category,
            };
            if self.insert(record) {
                added += 1;
            }
        }
        added
    }

    /// Inserts a record into the set for its category.
    ///
    /// Returns `false` if an identical record was already present.
    pub fn insert(&mut self, record: ConflictRecord) -> bool {
        match record.category {
            ConflictCategory::Conflict => self.conflicts.insert(record),
            ConflictCategory::Internal => self.internal.insert(record),
            ConflictCategory::External => self.external.insert(record),
        }
    }

    /// The set holding `category`.
    #[must_use]
    pub fn records(&self, category: ConflictCategory) -> &BTreeSet<ConflictRecord> {
        match category {
            ConflictCategory::Conflict => &self.conflicts,
            ConflictCategory::Internal => &self.internal,
            ConflictCategory::External => &self.external,
        }
    }

    /// Total number of records across all categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.conflicts.len() + self.internal.len() + self.external.len()
    }

    /// Returns `true` if no record was produced.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
