//! Runs the two analysis passes over a project snapshot.

use serde::Serialize;
use tracing::info;

use super::aggregate::{SprintSection, SprintTable};
use super::classify::ConflictReport;
use super::error::AnalysisError;
use super::ordering::{RankCounter, RankScope, SprintRanks};
use super::position::{IssuePosition, PositionIndex};
use super::snapshot::{fetch_snapshot, ProjectSnapshot};
use crate::ports::IssueTracker;

/// Knobs for one analysis run.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalysisOptions {
    /// Whether sprint ranks run across the whole project or restart per board.
    pub rank_scope: RankScope,
}

/// Everything an analysis run produces.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Project key that was analyzed.
    pub project_key: String,
    /// Issues grouped by board and sprint.
    pub boards: SprintTable,
    /// Classified blocking links.
    pub conflicts: ConflictReport,
}

/// Fetches a fresh snapshot of `project_key` and analyzes it.
///
/// # Errors
///
/// Returns an error if the project has no boards or any tracker call fails.
pub async fn analyze(
    tracker: &dyn IssueTracker,
    project_key: &str,
    options: AnalysisOptions,
) -> Result<AnalysisReport, AnalysisError> {
    let snapshot = fetch_snapshot(tracker, project_key).await?;
    Ok(analyze_snapshot(&snapshot, options))
}

/// Analyzes an already fetched snapshot.
///
/// Pass one ranks sprints and indexes issue positions; pass two builds the
/// display table and classifies every inward link. All working state lives
/// in this call.
#[must_use]
pub fn analyze_snapshot(snapshot: &ProjectSnapshot, options: AnalysisOptions) -> AnalysisReport {
    let mut counter = RankCounter::new();
    let mut ranks = SprintRanks::new(options.rank_scope);
    let mut index = PositionIndex::new();

    for board in &snapshot.boards {
        let assigned = ranks.rank_board(&mut counter, board.sprints.iter().map(|s| s.sprint.id));
        for (sprint, rank) in board.sprints.iter().zip(assigned) {
            index.record_sprint(rank, sprint.sprint.id, sprint.issues.iter().map(|i| i.id.as_str()));
        }
    }

    let mut table = SprintTable::new();
    let mut conflicts = ConflictReport::new();

    for board in &snapshot.boards {
        let mut sections = Vec::with_capacity(board.sprints.len());
        for sprint in &board.sprints {
            sections.push(SprintSection::new(&sprint.sprint.name, &sprint.issues));
            for issue in &sprint.issues {
                // Carried-over issues are classified from the sprint the index kept.
                let IssuePosition::Found { rank, sprint_id } = index.lookup(&issue.id) else {
                    continue;
                };
                conflicts.classify_issue(issue, rank, sprint_id, &index);
            }
        }
        table.push_board(&board.board.name, sections);
    }

    info!(
        project = %snapshot.project_key,
        sprints = ranks.len(),
        issues = index.len(),
        conflicts = conflicts.conflicts.len(),
        internal = conflicts.internal.len(),
        external = conflicts.external.len(),
        "analysis complete"
    );

    AnalysisReport { project_key: snapshot.project_key.clone(), boards: table, conflicts }
}
