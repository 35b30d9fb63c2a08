//! Text and JSON rendering of analysis results.

use std::fmt::Write as _;

use crate::analysis::{
    AnalysisReport, ConflictCategory, ConflictRecord, IssuePosition, LinkEnd, SprintTable,
};

/// Output format for reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Indented plain text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Renders the board/sprint table.
#[must_use]
pub fn render_table(table: &SprintTable) -> String {
    let mut out = String::new();
    for board in table.boards() {
        let _ = writeln!(out, "{}", board.name);
        if board.sprints.is_empty() {
            let _ = writeln!(out, "  (no sprints)");
        }
        for sprint in &board.sprints {
            let _ = writeln!(out, "  {}", sprint.name);
            for line in &sprint.lines {
                let _ = writeln!(out, "    - {line}");
            }
        }
    }
    out
}

/// Renders the full report: the table followed by the three conflict sections.
#[must_use]
pub fn render_text(report: &AnalysisReport) -> String {
    let mut out = format!("Project {}\n\n", report.project_key);
    out.push_str(&render_table(&report.boards));

    for (title, category) in [
        ("Conflicts", ConflictCategory::Conflict),
        ("Internal dependencies", ConflictCategory::Internal),
        ("External dependencies", ConflictCategory::External),
    ] {
        let records = report.conflicts.records(category);
        let _ = writeln!(out, "\n{title} ({})", records.len());
        if records.is_empty() {
            let _ = writeln!(out, "  none");
        }
        for record in records {
            let _ = writeln!(out, "  {}", record_line(record));
        }
    }
    out
}

/// Renders the whole report as JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_json<T: serde::Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

fn record_line(record: &ConflictRecord) -> String {
    format!(
        "{} {} {}",
        end_label(&record.blocked),
        record.link_type,
        end_label(&record.blocker)
    )
}

fn end_label(end: &LinkEnd) -> String {
    let position = match end.position {
        IssuePosition::Found { rank, sprint_id } => format!("rank {rank}, sprint {sprint_id}"),
        IssuePosition::Unresolved => "not in any analyzed sprint".to_string(),
    };
    format!("{} \"{}\" [{position}]", end.key, end.summary)
}
