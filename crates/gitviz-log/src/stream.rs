// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Lazy commit iteration over a line-oriented source
//!
//! [`CommitStream`] pulls one line at a time from any [`BufRead`], skips
//! blank lines and hands the rest to [`parse_commit`]. It owns the source for
//! the duration of iteration and drops it as soon as the source is exhausted
//! or a line fails, after which the stream stays empty.

use std::io::BufRead;
use std::iter::FusedIterator;

use tracing::{debug, trace};

use crate::commit::Commit;
use crate::error::LogError;
use crate::parser::parse_commit;

/// Single-pass iterator of commits read from `R`
#[derive(Debug)]
pub struct CommitStream<R> {
    source: Option<R>,
    line: usize,
    buf: String,
}

impl<R: BufRead> CommitStream<R> {
    /// Wrap an already-open source
    pub fn new(source: R) -> Self {
        Self {
            source: Some(source),
            line: 0,
            buf: String::new(),
        }
    }

    /// Whether the source has been dropped
    #[must_use]
    pub fn is_released(&self) -> bool {
        self.source.is_none()
    }

    /// Number of lines consumed so far, blank ones included
    #[must_use]
    pub fn lines_read(&self) -> usize {
        self.line
    }

    /// Stop iterating and take the source back, if it is still held
    pub fn into_inner(mut self) -> Option<R> {
        self.source.take()
    }

    fn release(&mut self) {
        if self.source.take().is_some() {
            debug!(lines = self.line, "log source released");
        }
    }
}

impl<R: BufRead> Iterator for CommitStream<R> {
    type Item = Result<Commit, LogError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let source = self.source.as_mut()?;
            self.buf.clear();
            match source.read_line(&mut self.buf) {
                Ok(0) => {
                    self.release();
                    return None;
                }
                Ok(_) => {
                    self.line += 1;
                    let text = self.buf.trim();
                    if text.is_empty() {
                        trace!(line = self.line, "skipping blank line");
                        continue;
                    }
                    let result = parse_commit(text).map_err(|source| LogError::Format {
                        line: self.line,
                        text: text.to_string(),
                        source,
                    });
                    if result.is_err() {
                        self.release();
                    }
                    return Some(result);
                }
                Err(e) => {
                    self.release();
                    return Some(Err(e.into()));
                }
            }
        }
    }
}

impl<R: BufRead> FusedIterator for CommitStream<R> {}

/// Iterate the commits in `source` lazily
pub fn parse_commits<R: BufRead>(source: R) -> CommitStream<R> {
    CommitStream::new(source)
}

/// Parse a complete log held in memory
///
/// # Errors
///
/// Returns the first [`LogError`] encountered.
pub fn parse_log(output: &str) -> Result<Vec<Commit>, LogError> {
    parse_commits(output.as_bytes()).collect()
}
