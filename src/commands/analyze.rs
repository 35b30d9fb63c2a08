//! `sprintorder analyze` command.

use crate::analysis::{analyze, AnalysisOptions, RankScope};
use crate::context::ServiceContext;
use crate::report::{render_json, render_text, OutputFormat};

/// Execute the `analyze` command.
///
/// Prints the board/sprint table followed by the conflict, internal and
/// external dependency sections.
///
/// # Errors
///
/// Returns an error string if the analysis fails or the report cannot be rendered.
pub async fn run(
    ctx: &ServiceContext,
    project_key: &str,
    rank_scope: RankScope,
    format: OutputFormat,
) -> Result<(), String> {
    print!("{}", render(ctx, project_key, rank_scope, format).await?);
    Ok(())
}

async fn render(
    ctx: &ServiceContext,
    project_key: &str,
    rank_scope: RankScope,
    format: OutputFormat,
) -> Result<String, String> {
    let report = analyze(ctx.tracker.as_ref(), project_key, AnalysisOptions { rank_scope })
        .await
        .map_err(|e| e.to_string())?;
    match format {
        OutputFormat::Text => Ok(render_text(&report)),
        OutputFormat::Json => render_json(&report)
            .map(|json| json + "\n")
            .map_err(|e| format!("Failed to render report: {e}")),
    }
}
