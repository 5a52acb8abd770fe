//! Command line and action inputs.
//!
//! Every argument falls back to the environment variable the GitHub Actions
//! runner sets for it. In a workflow job the trigger context comes from the
//! runner and only the token and configuration path are passed:
//!
//! ```yaml
//! - name: Check label approvals
//!   run: >-
//!     label-approval-gate
//!     --repo-token "$REPO_TOKEN"
//!     --configuration-path .github/approvers.yml
//!   env:
//!     REPO_TOKEN: ${{ secrets.GITHUB_TOKEN }}
//! ```

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use secrecy::SecretString;

use crate::errors::Error;

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Label approval gate CLI: require reviewer sign-off for labelled pull requests
#[derive(Parser)]
#[command(name = "label-approval-gate", version)]
#[command(about = "Fail a pull request check until every review-gated label is approved", long_about = None)]
pub struct Cli {
    /// Token used to call the GitHub API
    #[arg(long, env = "INPUT_REPO-TOKEN", hide_env_values = true, default_value = "")]
    pub repo_token: String,

    /// Path of the label configuration file within the repository
    #[arg(long, env = "INPUT_CONFIGURATION-PATH", default_value = "")]
    pub configuration_path: String,

    /// Repository slug, `owner/repo`
    #[arg(long, env = "GITHUB_REPOSITORY", default_value = "")]
    pub repository: String,

    /// Path of the JSON payload of the triggering event
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    pub event_path: Option<PathBuf>,

    /// Git ref to read the label configuration at
    #[arg(long = "ref", env = "GITHUB_SHA")]
    pub git_ref: Option<String>,

    /// Base URL of the GitHub REST API
    #[arg(long, env = "GITHUB_API_URL")]
    pub api_url: Option<String>,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

/// Validated inputs for one check run.
pub struct ActionInputs {
    pub repo_token: SecretString,
    pub configuration_path: String,
    pub repository: String,
    pub event_path: Option<PathBuf>,
    pub git_ref: Option<String>,
    pub api_url: Option<String>,
}

impl ActionInputs {
    /// Validates the parsed command line.
    ///
    /// # Errors
    /// Returns `Error::MissingInput` naming the first required input that is
    /// blank. Blank optional inputs are treated as absent.
    pub fn from_cli(cli: Cli) -> Result<Self, Error> {
        let repo_token = required(cli.repo_token, "repo-token")?;
        let configuration_path = required(cli.configuration_path, "configuration-path")?;

        Ok(Self {
            repo_token: SecretString::from(repo_token),
            configuration_path,
            repository: cli.repository.trim().to_string(),
            event_path: cli.event_path.filter(|p| !p.as_os_str().is_empty()),
            git_ref: optional(cli.git_ref),
            api_url: optional(cli.api_url),
        })
    }
}

fn required(value: String, name: &str) -> Result<String, Error> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::MissingInput(name.to_string()));
    }
    Ok(value.to_string())
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
