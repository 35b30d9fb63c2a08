//! Service context bundling the tracker port.

use std::path::Path;
use std::sync::Arc;

use crate::adapters::live::LiveIssueTracker;
use crate::adapters::recording::RecordingIssueTracker;
use crate::adapters::replaying::ReplayingIssueTracker;
use crate::cassette::format::Cassette;
use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::session::RecordingSession;
use crate::config::TrackerConfig;
use crate::ports::IssueTracker;

/// Bundles the port trait objects an analysis needs.
///
/// Constructors wire up different adapter implementations (live,
/// recording, replaying). A context belongs to one invocation.
pub struct ServiceContext {
    /// Issue tracker serving boards, sprints and issues.
    pub tracker: Box<dyn IssueTracker>,
}

impl ServiceContext {
    /// Creates a live context talking to the configured tracker.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn live(config: TrackerConfig) -> Result<Self, String> {
        let tracker = LiveIssueTracker::new(config).map_err(|e| e.to_string())?;
        Ok(Self { tracker: Box::new(tracker) })
    }

    /// Creates a live context whose tracker calls are recorded into a new
    /// session below `root`.
    ///
    /// The session must be finished after the context is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the session directory or HTTP client cannot be created.
    pub fn recording_at(
        root: &Path,
        label: &str,
        config: TrackerConfig,
    ) -> Result<(Self, RecordingSession), String> {
        let session = RecordingSession::new(root, label)?;
        let live = LiveIssueTracker::new(config).map_err(|e| e.to_string())?;
        let tracker = RecordingIssueTracker::new(Box::new(live), Arc::clone(&session.tracker));
        Ok((Self { tracker: Box::new(tracker) }, session))
    }

    /// Creates a replaying context from a cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        let cassette = Cassette::load(path)?;
        Ok(Self::from_cassette(&cassette))
    }

    /// Creates a replaying context from an in-memory cassette.
    #[must_use]
    pub fn from_cassette(cassette: &Cassette) -> Self {
        Self { tracker: Box::new(ReplayingIssueTracker::new(CassetteReplayer::new(cassette))) }
    }
}
