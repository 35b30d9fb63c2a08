//! Command dispatch and handlers.

pub mod analyze;
pub mod boards;

use std::env;
use std::path::PathBuf;

use crate::cassette::session::RecordingSession;
use crate::cli::Command;
use crate::context::ServiceContext;

/// Environment variable naming a cassette to replay instead of calling the tracker.
pub const REPLAY_ENV: &str = "SPRINTORDER_REPLAY";

/// Environment variable naming a directory to record tracker interactions into.
pub const RECORD_ENV: &str = "SPRINTORDER_RECORD";

/// Dispatch a parsed command to its handler.
///
/// When `SPRINTORDER_REPLAY` is set to a cassette path, the tracker is
/// served from that cassette. Otherwise, when `SPRINTORDER_RECORD` is set to
/// a directory path, every tracker interaction is recorded below it.
///
/// # Errors
///
/// Returns an error string if the context cannot be built or the command fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    let (ctx, session) = build_context(command)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start async runtime: {e}"))?;
    let result = runtime.block_on(dispatch_with_context(command, &ctx));

    // Finish recording after command completes (even on error)
    if let Some(session) = session {
        // Drop context first to release Arc references
        drop(ctx);
        finish_recording(session)?;
    }

    result
}

fn build_context(command: &Command) -> Result<(ServiceContext, Option<RecordingSession>), String> {
    if let Ok(path) = env::var(REPLAY_ENV) {
        tracing::debug!(cassette = %path, "replaying tracker interactions");
        return Ok((ServiceContext::replaying(&PathBuf::from(path))?, None));
    }

    let target = command.target();
    let config = target.tracker_config().map_err(|e| e.to_string())?;
    if let Ok(dir) = env::var(RECORD_ENV) {
        let (ctx, session) =
            ServiceContext::recording_at(&PathBuf::from(dir), &target.project_key, config)?;
        Ok((ctx, Some(session)))
    } else {
        Ok((ServiceContext::live(config)?, None))
    }
}

/// Dispatch a command with the given service context.
async fn dispatch_with_context(command: &Command, ctx: &ServiceContext) -> Result<(), String> {
    match command {
        Command::Analyze { target, format, rank_scope } => {
            analyze::run(ctx, &target.project_key, (*rank_scope).into(), *format).await
        }
        Command::Boards { target, format } => boards::run(ctx, &target.project_key, *format).await,
    }
}

/// Finish a recording session and print the output directory.
fn finish_recording(session: RecordingSession) -> Result<(), String> {
    let output_dir = session.finish()?;
    eprintln!("Recording saved to: {}", output_dir.display());
    Ok(())
}
