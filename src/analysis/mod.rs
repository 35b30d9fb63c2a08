//! Sprint-ordering and dependency-conflict analysis.
//!
//! A run fetches a [`ProjectSnapshot`], ranks sprints by listing order,
//! indexes where every issue sits, then classifies each inward blocking link
//! and groups issues for display.

pub mod aggregate;
pub mod classify;
pub mod error;
pub mod ordering;
pub mod pipeline;
pub mod position;
pub mod snapshot;

#[cfg(test)]
pub(crate) mod fixture;

pub use aggregate::{BoardSection, SprintSection, SprintTable, NO_ISSUES};
pub use classify::{ConflictCategory, ConflictRecord, ConflictReport, LinkEnd};
pub use error::{AnalysisError, FetchCall};
pub use ordering::{Rank, RankCounter, RankScope, SprintRanks};
pub use pipeline::{analyze, analyze_snapshot, AnalysisOptions, AnalysisReport};
pub use position::{IssuePosition, PositionIndex};
pub use snapshot::{fetch_snapshot, BoardSnapshot, ProjectSnapshot, SprintSnapshot};
