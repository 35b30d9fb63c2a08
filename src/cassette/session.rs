//! Recording session for the tracker port.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::Utc;

use super::recorder::CassetteRecorder;

/// File name of the tracker cassette inside a session directory.
pub const TRACKER_CASSETTE: &str = "tracker.cassette.yaml";

/// Owns the tracker recorder of one recording run.
///
/// Cassettes are stored in a timestamped directory below the chosen root.
pub struct RecordingSession {
    /// Recorder for tracker interactions.
    pub tracker: Arc<Mutex<CassetteRecorder>>,
    /// Output directory containing the cassette file.
    output_dir: PathBuf,
}

impl RecordingSession {
    /// Create a new recording session at `<root>/<timestamp>/`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The cassette directory already exists
    /// - The directory cannot be created
    pub fn new(root: &Path, label: &str) -> Result<Self, String> {
        let timestamp = Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        let output_dir = root.join(&timestamp);

        if output_dir.exists() {
            return Err(format!("Cassette directory already exists: {}", output_dir.display()));
        }

        std::fs::create_dir_all(&output_dir)
            .map_err(|e| format!("Failed to create cassette directory: {e}"))?;

        let recorder = CassetteRecorder::new(
            output_dir.join(TRACKER_CASSETTE),
            format!("{timestamp}-{label}"),
            get_commit_hash(),
        );

        Ok(Self { tracker: Arc::new(Mutex::new(recorder)), output_dir })
    }

    /// Directory the cassette is written to.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Writes the tracker cassette and returns the session directory.
    ///
    /// # Errors
    ///
    /// Returns an error if a recording adapter still holds the recorder or
    /// the cassette file cannot be written.
    pub fn finish(self) -> Result<PathBuf, String> {
        let recorder = Arc::try_unwrap(self.tracker)
            .map_err(|_| "Recording adapter for tracker still has references".to_string())?
            .into_inner()
            .map_err(|e| format!("Recorder lock for tracker poisoned: {e}"))?;
        recorder.finish().map_err(|e| format!("Failed to write tracker cassette: {e}"))?;
        Ok(self.output_dir)
    }
}

/// Get the current git commit hash, or "unknown" with a warning if unavailable.
fn get_commit_hash() -> String {
    let hash = std::process::Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().to_string());

    if let Some(h) = hash {
        h
    } else {
        tracing::warn!("could not get git commit hash, using 'unknown'");
        "unknown".to_string()
    }
}
