// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Turning single log lines into [`Commit`]s

use crate::commit::Commit;
use crate::error::FormatError;
use crate::grammar::match_line;

/// Parse one line of `git log --format="%ct %H %P %d %s"` output
///
/// Optional groups that are missing from the line stay unset on the
/// returned commit; a `()` decoration group yields an empty ref list.
///
/// # Errors
///
/// Returns a [`FormatError`] if the commit date or hash is missing or
/// malformed, or if a parent hash fails validation.
pub fn parse_commit(line: &str) -> Result<Commit, FormatError> {
    let fields = match_line(line);

    let date = fields.commit_date.ok_or(FormatError::MissingCommitDate)?;
    let commit_date = parse_commit_date(date)?;
    let hash = fields.hash.ok_or(FormatError::MissingHash)?;

    let mut commit = Commit::new(hash, commit_date)?;
    if let Some(parents) = &fields.parent_hashes {
        commit = commit.with_parent_hashes(parents.iter().copied())?;
    }
    if fields.decorations.is_some() {
        commit = commit.with_refs(fields.ref_labels());
    }
    if let Some(subject) = fields.subject {
        commit = commit.with_subject(subject);
    }
    Ok(commit)
}

fn parse_commit_date(text: &str) -> Result<i64, FormatError> {
    let invalid = || FormatError::InvalidCommitDate {
        value: text.to_string(),
    };
    // `i64::from_str` would also accept a sign
    if !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    text.parse().map_err(|_| invalid())
}
