// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for gitviz-log

use thiserror::Error;

/// Reasons a single log line cannot become a [`Commit`](crate::Commit)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The line does not start with a commit date
    #[error("missing commit date")]
    MissingCommitDate,

    /// The commit date is not a non-negative integer that fits in an `i64`
    #[error("invalid commit date: {value}")]
    InvalidCommitDate {
        /// The text found in the commit date position
        value: String,
    },

    /// No hash follows the commit date
    #[error("missing commit hash")]
    MissingHash,

    /// A hash is not 7-40 lowercase hexadecimal characters
    #[error("invalid hash: {value}")]
    InvalidHash {
        /// The rejected hash text
        value: String,
    },
}

/// Errors surfaced while draining a log stream
#[derive(Debug, Error)]
pub enum LogError {
    /// A non-blank line could not be parsed
    #[error("line {line}: {source}: {text:?}")]
    Format {
        /// 1-based line number in the source
        line: usize,
        /// The offending line, as read
        text: String,
        /// What was wrong with it
        #[source]
        source: FormatError,
    },

    /// Reading from the source failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LogError {
    /// The underlying format error, if this is a parse failure
    #[must_use]
    pub fn format_error(&self) -> Option<&FormatError> {
        match self {
            Self::Format { source, .. } => Some(source),
            Self::Io(_) => None,
        }
    }
}
