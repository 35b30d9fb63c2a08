//! Port traits defining external boundaries.
//!
//! The issue tracker is the only boundary the analysis crosses.
//! Implementations live in `src/adapters/`.

pub mod tracker;

pub use tracker::{
    Board, BoardId, InwardLink, Issue, IssueTracker, Sprint, SprintId, TrackerError,
    TrackerFuture,
};
