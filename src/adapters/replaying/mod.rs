//! Replaying adapters that serve recorded interactions.

pub mod tracker;

pub use tracker::ReplayingIssueTracker;

use std::sync::Mutex;

use serde::de::DeserializeOwned;

use crate::cassette::replayer::CassetteReplayer;
use crate::ports::TrackerError;

/// Pull the recorded output of the next `port::method` interaction.
///
/// Mirror of `recording::record_result` - reads instead of writes.
pub(crate) fn next_output(
    replayer: &Mutex<CassetteReplayer>,
    port: &str,
    method: &str,
) -> serde_json::Value {
    let mut guard = replayer.lock().expect("replayer lock poisoned");
    guard.next_interaction(port, method).output.clone()
}

/// Decode a recorded `Result` using the Ok/Err JSON convention.
///
/// - `{"Ok": v}` deserializes `v` into `T`
/// - `{"Err": msg}` becomes an error carrying `msg`
pub(crate) fn replay_result<T>(output: serde_json::Value) -> Result<T, TrackerError>
where
    T: DeserializeOwned,
{
    if let Some(err) = output.get("Err") {
        let msg = err.as_str().unwrap_or("unknown error").to_string();
        return Err(msg.into());
    }
    let value = output.get("Ok").ok_or("recorded output has neither Ok nor Err")?;
    serde_json::from_value(value.clone()).map_err(|e| -> TrackerError {
        format!("Failed to decode recorded output: {e}").into()
    })
}
