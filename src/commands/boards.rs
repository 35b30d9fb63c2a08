//! `sprintorder boards` command.

use crate::analysis::{analyze, AnalysisOptions};
use crate::context::ServiceContext;
use crate::report::{render_json, render_table, OutputFormat};

/// Execute the `boards` command.
///
/// Prints every board's sprints and their issues in listing order.
///
/// # Errors
///
/// Returns an error string if the tracker traversal fails.
pub async fn run(ctx: &ServiceContext, project_key: &str, format: OutputFormat) -> Result<(), String> {
    let report = analyze(ctx.tracker.as_ref(), project_key, AnalysisOptions::default())
        .await
        .map_err(|e| e.to_string())?;
    match format {
        OutputFormat::Text => print!("{}", render_table(&report.boards)),
        OutputFormat::Json => {
            let json =
                render_json(&report.boards).map_err(|e| format!("Failed to render boards: {e}"))?;
            println!("{json}");
        }
    }
    Ok(())
}
