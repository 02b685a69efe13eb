// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Running `git log` and feeding its output to the commit parser
//!
//! The repository is located with `git2`, then `git log` is spawned in its
//! working tree with the format the parser expects. Commits are read from the
//! child's stdout as they are produced.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdout, Command, Stdio};

use git2::Repository;
use gitviz_log::{Commit, CommitStream, EXPECTED_OUTPUT_FORMAT, LogError, parse_commits};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::STDIN_PATH;

/// Errors that can occur while retrieving a log
#[derive(Debug, Error)]
pub enum RetrieveError {
    /// No repository at or above the given path
    #[error("Repository not found: {path}")]
    RepositoryNotFound {
        /// The path that was searched for a repository
        path: String,
    },

    /// The repository has no working tree to run git in
    #[error("Bare repositories are not supported: {path}")]
    BareRepository {
        /// Path of the bare repository
        path: String,
    },

    /// `git` could not be started
    #[error("Failed to run git: {0}")]
    Spawn(#[source] io::Error),

    /// `git log` exited unsuccessfully
    #[error("git log failed ({status}): {stderr}")]
    GitFailed {
        /// Exit status description
        status: String,
        /// What git wrote to stderr
        stderr: String,
    },

    /// Error waiting on git or reading input
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Options passed through to `git log`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogQuery {
    /// Maximum number of commits to read
    pub max_count: Option<usize>,
    /// Walk every ref instead of HEAD only
    pub all: bool,
}

impl LogQuery {
    /// Limit the query to the N most recent commits
    #[must_use]
    pub fn latest(mut self, n: usize) -> Self {
        self.max_count = Some(n);
        self
    }

    /// Walk all refs
    #[must_use]
    pub fn all_refs(mut self) -> Self {
        self.all = true;
        self
    }

    /// Arguments for `git`, starting with the `log` subcommand
    #[must_use]
    pub fn git_args(&self) -> Vec<String> {
        let mut args = vec![
            "log".to_string(),
            format!("--format={EXPECTED_OUTPUT_FORMAT}"),
            "--decorate=short".to_string(),
            "--date-order".to_string(),
        ];
        if self.all {
            args.push("--all".to_string());
        }
        if let Some(n) = self.max_count {
            args.push(format!("--max-count={n}"));
        }
        args
    }
}

/// Runs `git log` inside a discovered repository
#[derive(Debug, Clone)]
pub struct LogRetriever {
    workdir: PathBuf,
}

impl LogRetriever {
    /// Discover the repository containing `path`
    ///
    /// This walks up the directory tree to find a `.git` directory.
    ///
    /// # Errors
    ///
    /// Returns `RetrieveError::RepositoryNotFound` if no repository is found,
    /// or `RetrieveError::BareRepository` if it has no working tree.
    pub fn discover(path: impl AsRef<Path>) -> Result<Self, RetrieveError> {
        let path = path.as_ref();
        let repo = Repository::discover(path).map_err(|_| RetrieveError::RepositoryNotFound {
            path: path.display().to_string(),
        })?;
        let workdir = repo
            .workdir()
            .ok_or_else(|| RetrieveError::BareRepository {
                path: repo.path().display().to_string(),
            })?
            .to_path_buf();
        debug!(workdir = %workdir.display(), "discovered repository");
        Ok(Self { workdir })
    }

    /// The working tree git runs in
    #[must_use]
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Start `git log` and return a lazy commit stream over its output
    ///
    /// # Errors
    ///
    /// Returns `RetrieveError::Spawn` if git cannot be started.
    pub fn retrieve(&self, query: &LogQuery) -> Result<GitLog, RetrieveError> {
        let args = query.git_args();
        info!(workdir = %self.workdir.display(), ?args, "running git");

        let mut child = Command::new("git")
            .args(&args)
            .current_dir(&self.workdir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(RetrieveError::Spawn)?;

        let stdout = child.stdout.take().ok_or_else(|| {
            RetrieveError::Spawn(io::Error::other("git stdout was not captured"))
        })?;

        Ok(GitLog {
            child,
            commits: parse_commits(BufReader::new(stdout)),
        })
    }
}

/// A running `git log` whose output is parsed on demand
#[derive(Debug)]
pub struct GitLog {
    child: Child,
    commits: CommitStream<BufReader<ChildStdout>>,
}

impl GitLog {
    /// Wait for git to exit and check its status
    ///
    /// Call this after the commits have been drained.
    ///
    /// # Errors
    ///
    /// Returns `RetrieveError::GitFailed` if git exited unsuccessfully.
    pub fn finish(self) -> Result<(), RetrieveError> {
        let Self { child, commits } = self;
        drop(commits);

        let output = child.wait_with_output()?;
        if output.status.success() {
            debug!("git log finished");
            Ok(())
        } else {
            Err(RetrieveError::GitFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}

impl Iterator for GitLog {
    type Item = Result<Commit, LogError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.commits.next()
    }
}

/// Open captured log output, `-` meaning standard input
///
/// # Errors
///
/// Returns `RetrieveError::Io` if the file cannot be opened.
pub fn open_input(path: &Path) -> Result<Box<dyn BufRead>, RetrieveError> {
    if path == Path::new(STDIN_PATH) {
        debug!("reading log from stdin");
        return Ok(Box::new(io::stdin().lock()));
    }
    debug!(path = %path.display(), "reading log from file");
    Ok(Box::new(BufReader::new(File::open(path)?)))
}
