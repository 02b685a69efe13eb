// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Configuration for the gitviz front end
//!
//! This module provides the command-line and environment configuration:
//! where the log comes from, which command to run and how chatty to be.

use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};

use crate::command::CommandId;
use crate::retriever::LogQuery;

/// Path that selects standard input for `--input`
pub const STDIN_PATH: &str = "-";

/// gitviz - read a repository's history as a commit graph
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "gitviz")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Command to run (defaults to `list`)
    #[command(subcommand)]
    pub command: Option<CommandId>,

    /// Repository to read history from
    ///
    /// Any path inside the working tree works; the repository is discovered
    /// by walking up. Defaults to the current working directory.
    #[arg(short, long, env = "GITVIZ_REPO")]
    pub repo: Option<PathBuf>,

    /// Read captured `git log` output from a file instead of running git
    ///
    /// Use `-` for standard input. The capture must use the format
    /// `%ct %H %P %d %s`.
    #[arg(short, long, env = "GITVIZ_INPUT")]
    pub input: Option<PathBuf>,

    /// Only read the N most recent commits
    #[arg(short = 'n', long)]
    pub max_count: Option<usize>,

    /// Read commits reachable from any ref, not just HEAD
    #[arg(long, default_value = "false")]
    pub all: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Enable verbose logging (debug level)
    ///
    /// Logs are written to stderr so they never mix with command output.
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    ///
    /// Only errors and warnings will be logged.
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

/// How command output is written
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// One JSON document per line
    Json,
}

impl Config {
    /// The command to run, `list` if none was given
    #[must_use]
    pub fn command_id(&self) -> CommandId {
        self.command.unwrap_or_default()
    }

    /// Get the repository path, using the current directory as default
    ///
    /// Returns `None` if no repository is specified and the current
    /// directory cannot be determined.
    #[must_use]
    pub fn repo_path(&self) -> Option<PathBuf> {
        self.repo.clone().or_else(|| std::env::current_dir().ok())
    }

    /// Whether the log is read from standard input
    #[must_use]
    pub fn reads_stdin(&self) -> bool {
        self.input.as_deref() == Some(Path::new(STDIN_PATH))
    }

    /// Build the `git log` query from the command-line options
    #[must_use]
    pub fn query(&self) -> LogQuery {
        let mut query = LogQuery::default();
        if let Some(n) = self.max_count {
            query = query.latest(n);
        }
        if self.all {
            query = query.all_refs();
        }
        query
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The repository path is specified but doesn't exist or isn't a directory
    /// - The input file is specified but doesn't exist
    /// - Options that only affect `git log` are combined with `--input`
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref repo) = self.repo {
            if !repo.exists() {
                return Err(ConfigError::RepoNotFound(repo.clone()));
            }
            if !repo.is_dir() {
                return Err(ConfigError::RepoNotDirectory(repo.clone()));
            }
        }

        if let Some(ref input) = self.input {
            if !self.reads_stdin() && !input.is_file() {
                return Err(ConfigError::InputNotFound(input.clone()));
            }
            if self.max_count.is_some() || self.all {
                return Err(ConfigError::GitOptionsWithInput);
            }
        }

        Ok(())
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Repository path not found
    #[error("Repository path not found: {0}")]
    RepoNotFound(PathBuf),

    /// Repository path is not a directory
    #[error("Repository path is not a directory: {0}")]
    RepoNotDirectory(PathBuf),

    /// Input file not found
    #[error("Input file not found: {0}")]
    InputNotFound(PathBuf),

    /// `--max-count` or `--all` given together with `--input`
    #[error("--max-count and --all only apply when running git, not with --input")]
    GitOptionsWithInput,
}
