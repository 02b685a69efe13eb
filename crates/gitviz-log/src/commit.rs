//! Commit records produced by the log parser

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::FormatError;
use crate::grammar::{self, MIN_HASH_LEN};

/// One node of the commit graph, as read from a log line
///
/// A `Commit` is a plain value: fields are only readable, and the optional
/// groups keep the difference between "not present on the line" (`None`) and
/// "present but empty" (`Some` of an empty slice).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Commit {
    hash: String,
    commit_date: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent_hashes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    refs: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    subject: Option<String>,
}

impl Commit {
    /// Start a commit from its two mandatory fields
    ///
    /// # Errors
    ///
    /// Returns `FormatError::InvalidHash` if `hash` is not 7-40 lowercase hex
    /// characters, or `FormatError::InvalidCommitDate` for a negative date.
    pub fn new(hash: impl Into<String>, commit_date: i64) -> Result<Self, FormatError> {
        let hash = hash.into();
        if !Self::is_valid_hash(&hash) {
            return Err(FormatError::InvalidHash { value: hash });
        }
        if commit_date < 0 {
            return Err(FormatError::InvalidCommitDate {
                value: commit_date.to_string(),
            });
        }
        Ok(Self {
            hash,
            commit_date,
            parent_hashes: None,
            refs: None,
            subject: None,
        })
    }

    /// Attach the parent list, first parent first
    ///
    /// # Errors
    ///
    /// Returns `FormatError::InvalidHash` for the first parent that is not a
    /// valid hash.
    pub fn with_parent_hashes<I, S>(mut self, parents: I) -> Result<Self, FormatError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let parents = parents
            .into_iter()
            .map(Into::into)
            .map(|parent: String| {
                if Self::is_valid_hash(&parent) {
                    Ok(parent)
                } else {
                    Err(FormatError::InvalidHash { value: parent })
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.parent_hashes = Some(parents);
        Ok(self)
    }

    /// Attach decoration labels; each is trimmed and blank labels are dropped
    #[must_use]
    pub fn with_refs<I, S>(mut self, refs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let refs = refs
            .into_iter()
            .filter_map(|r| {
                let r = r.as_ref().trim();
                (!r.is_empty()).then(|| r.to_string())
            })
            .collect();
        self.refs = Some(refs);
        self
    }

    /// Attach the subject line
    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Check that `hash` is 7-40 lowercase hexadecimal characters
    #[must_use]
    pub fn is_valid_hash(hash: &str) -> bool {
        grammar::is_hash(hash)
    }

    /// The commit hash
    #[must_use]
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Committer time in seconds since the Unix epoch
    #[must_use]
    pub fn commit_date(&self) -> i64 {
        self.commit_date
    }

    /// Committer time as a UTC timestamp
    ///
    /// Returns `None` if the date lies outside the range chrono can represent.
    #[must_use]
    pub fn committed_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.commit_date, 0)
    }

    /// Parent hashes in declaration order, if the line listed any
    #[must_use]
    pub fn parent_hashes(&self) -> Option<&[String]> {
        self.parent_hashes.as_deref()
    }

    /// Decoration labels, if the line carried a decoration group
    #[must_use]
    pub fn refs(&self) -> Option<&[String]> {
        self.refs.as_deref()
    }

    /// Subject line, if the line had trailing text
    #[must_use]
    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    /// Get the short hash (first 7 characters)
    #[must_use]
    pub fn short_hash(&self) -> &str {
        &self.hash[..MIN_HASH_LEN.min(self.hash.len())]
    }

    /// The first parent, conventionally the branch the commit was made on
    #[must_use]
    pub fn first_parent(&self) -> Option<&str> {
        self.parent_hashes()?.first().map(String::as_str)
    }

    /// Check if this is a merge commit (has multiple parents)
    #[must_use]
    pub fn is_merge(&self) -> bool {
        self.parent_hashes().is_some_and(|p| p.len() > 1)
    }

    /// Check if this is a root commit (has no parents)
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent_hashes().is_none_or(<[String]>::is_empty)
    }
}
