//! CLI argument definitions.

use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::analysis::RankScope;
use crate::config::{ConfigError, TrackerConfig};
use crate::report::OutputFormat;

/// Top-level CLI parser for `sprintorder`.
#[derive(Debug, Parser)]
#[command(
    name = "sprintorder",
    version,
    about = "Find blocking links scheduled out of sprint order"
)]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Classify every blocking link across a project's sprints.
    Analyze {
        /// Project and tracker to analyze.
        #[command(flatten)]
        target: TargetArgs,
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Whether sprint ranks continue across boards or restart per board.
        #[arg(long, value_enum, default_value_t = RankScopeArg::Project)]
        rank_scope: RankScopeArg,
    },
    /// Show issues grouped by board and sprint.
    Boards {
        /// Project and tracker to list.
        #[command(flatten)]
        target: TargetArgs,
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

impl Command {
    /// The target arguments shared by every subcommand.
    #[must_use]
    pub fn target(&self) -> &TargetArgs {
        match self {
            Self::Analyze { target, .. } | Self::Boards { target, .. } => target,
        }
    }
}

/// Which project to read and how to reach the tracker.
#[derive(Debug, Args)]
pub struct TargetArgs {
    /// Key of the project whose boards are read.
    pub project_key: String,
    /// Tracker base URL, e.g. `https://example.atlassian.net`.
    #[arg(long, env = "JIRA_BASE_URL")]
    pub base_url: Option<String>,
    /// Account email for basic auth.
    #[arg(long, env = "JIRA_EMAIL")]
    pub email: Option<String>,
    /// API token for basic auth.
    #[arg(long, env = "JIRA_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,
    /// Per-request timeout in seconds.
    #[arg(long, env = "SPRINTORDER_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,
}

impl TargetArgs {
    /// Builds the tracker connection settings from the flags.
    ///
    /// # Errors
    ///
    /// Returns an error if a credential is missing or the base URL is invalid.
    pub fn tracker_config(&self) -> Result<TrackerConfig, ConfigError> {
        let base_url = required(self.base_url.as_deref(), "base URL", "base-url", "JIRA_BASE_URL")?;
        let email = required(self.email.as_deref(), "email", "email", "JIRA_EMAIL")?;
        let api_token =
            required(self.api_token.as_deref(), "API token", "api-token", "JIRA_API_TOKEN")?;
        Ok(TrackerConfig::new(base_url, email, api_token)?
            .with_timeout(Duration::from_secs(self.timeout_secs)))
    }
}

fn required<'a>(
    value: Option<&'a str>,
    name: &'static str,
    flag: &'static str,
    env: &'static str,
) -> Result<&'a str, ConfigError> {
    value.filter(|v| !v.trim().is_empty()).ok_or(ConfigError::Missing { name, flag, env })
}

/// Command-line spelling of [`RankScope`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RankScopeArg {
    /// One rank sequence across all boards.
    Project,
    /// Ranks restart at 0 on every board.
    Board,
}

impl From<RankScopeArg> for RankScope {
    fn from(arg: RankScopeArg) -> Self {
        match arg {
            RankScopeArg::Project => Self::Project,
            RankScopeArg::Board => Self::Board,
        }
    }
}
