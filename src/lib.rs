//! Core library entry for the `sprintorder` CLI.
//!
//! Reads a project's boards, sprints and issues from an issue tracker,
//! orders sprints by their listing position and reports blocking links
//! whose blocker is scheduled in the same or a later sprint.

pub mod adapters;
pub mod analysis;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod ports;
pub mod report;

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        // --help and --version are requests, not failures.
        Err(err) if !err.use_stderr() => {
            print!("{err}");
            return Ok(());
        }
        Err(err) => return Err(err.to_string()),
    };
    commands::dispatch(&cli.command)
}

#[cfg(test)]
mod tests {
    use super::run;

    #[test]
    fn run_errors_without_project_key() {
        let result = run(["sprintorder", "analyze"]);
        assert!(result.is_err());
    }

    #[test]
    fn run_accepts_help() {
        assert!(run(["sprintorder", "--help"]).is_ok());
    }

    #[test]
    fn run_errors_on_unknown_subcommand() {
        let result = run(["sprintorder", "unknown"]);
        assert!(result.is_err());
    }
}
