// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Line grammar for one-commit-per-line log output
//!
//! The producer is expected to run
//!
//! ```text
//! git log --format="%ct %H %P %d %s"
//! ```
//!
//! which yields lines shaped like
//!
//! ```text
//! <commit-date> <hash>( <parent-hash>)* ( (<ref>(, <ref>)*))? <subject>?
//! ```
//!
//! [`match_line`] splits a line into those groups without validating the
//! mandatory ones; that is the job of [`parse_commit`](crate::parse_commit).
//! The scan is a single left-to-right pass. A decoration group is only
//! recognised directly after the last parent hash, so parentheses inside a
//! subject are never mistaken for decorations.

/// The `--format` string the grammar is written against
pub const EXPECTED_OUTPUT_FORMAT: &str = "%ct %H %P %d %s";

/// Shortest abbreviated hash git will print
pub const MIN_HASH_LEN: usize = 7;
/// Length of a full SHA-1 hash
pub const MAX_HASH_LEN: usize = 40;

const DELIMITER: char = ' ';

/// The groups found on one log line
///
/// A group is `None` when it did not take part in the match. For the
/// decoration group, `Some("")` means the line carried an empty `()`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineMatch<'a> {
    /// First token of the line
    pub commit_date: Option<&'a str>,
    /// Second token of the line
    pub hash: Option<&'a str>,
    /// Hash tokens following the primary hash
    pub parent_hashes: Option<Vec<&'a str>>,
    /// Text between the decoration parentheses, not yet split
    pub decorations: Option<&'a str>,
    /// Everything after the decorations, without the leading delimiter
    pub subject: Option<&'a str>,
}

impl<'a> LineMatch<'a> {
    /// Split the decoration group on commas, trimming each label and dropping
    /// blank ones
    pub fn ref_labels(&self) -> impl Iterator<Item = &'a str> + use<'a> {
        self.decorations
            .into_iter()
            .flat_map(|d| d.split(','))
            .map(str::trim)
            .filter(|r| !r.is_empty())
    }
}

/// Check that `token` is 7-40 lowercase hexadecimal characters
#[must_use]
pub fn is_hash(token: &str) -> bool {
    (MIN_HASH_LEN..=MAX_HASH_LEN).contains(&token.len())
        && token.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

/// Match one line against the log grammar
///
/// Never fails: missing mandatory groups are reported as `None`.
#[must_use]
pub fn match_line(line: &str) -> LineMatch<'_> {
    let mut fields = LineMatch::default();
    let rest = line.trim();

    let (commit_date, rest) = next_token(rest);
    fields.commit_date = commit_date;
    let (hash, mut rest) = next_token(rest);
    fields.hash = hash;
    if hash.is_none() {
        return fields;
    }

    let mut parents = Vec::new();
    loop {
        let (token, after) = next_token(rest);
        match token {
            Some(token) if is_hash(token) => {
                parents.push(token);
                rest = after;
            }
            _ => break,
        }
    }
    if !parents.is_empty() {
        fields.parent_hashes = Some(parents);
    }

    rest = rest.trim_start_matches(DELIMITER);
    if let Some(inner) = rest.strip_prefix('(') {
        if let Some(close) = inner.find(')') {
            fields.decorations = Some(&inner[..close]);
            rest = &inner[close + 1..];
        }
    }

    let subject = rest.trim_start_matches(DELIMITER);
    if !subject.is_empty() {
        fields.subject = Some(subject);
    }
    fields
}

/// Take the next space-delimited token, skipping any run of delimiters first
fn next_token(input: &str) -> (Option<&str>, &str) {
    let input = input.trim_start_matches(DELIMITER);
    if input.is_empty() {
        return (None, input);
    }
    match input.find(DELIMITER) {
        Some(end) => (Some(&input[..end]), &input[end..]),
        None => (Some(input), ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    #[test]
    fn test_date_and_hash_only() {
        let m = match_line("1610000000 abc1234");
        assert_eq!(
            m,
            LineMatch {
                commit_date: Some("1610000000"),
                hash: Some("abc1234"),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_full_line() {
        let m = match_line("1610000003 aaa1111 bbb2222 ccc3333 (HEAD -> main, tag: v1) Merge it");
        assert_eq!(m.commit_date, Some("1610000003"));
        assert_eq!(m.hash, Some("aaa1111"));
        assert_eq!(m.parent_hashes, Some(vec!["bbb2222", "ccc3333"]));
        assert_eq!(m.decorations, Some("HEAD -> main, tag: v1"));
        assert_eq!(m.subject, Some("Merge it"));
    }

    #[test]
    fn test_git_spacing_for_root_commit_with_decorations() {
        // Empty %P and the leading space of %d produce a double space
        let m = match_line("1610000002 aaa1111  (HEAD -> main) Fix bug");
        assert_eq!(m.parent_hashes, None);
        assert_eq!(m.decorations, Some("HEAD -> main"));
        assert_eq!(m.subject, Some("Fix bug"));
    }

    #[test]
    fn test_git_spacing_without_decorations() {
        let m = match_line("1610000002 aaa1111 bbb2222  Fix bug");
        assert_eq!(m.parent_hashes, Some(vec!["bbb2222"]));
        assert_eq!(m.decorations, None);
        assert_eq!(m.subject, Some("Fix bug"));
    }

    #[test]
    fn test_empty_decorations() {
        let m = match_line("1 abc1234 () subject");
        assert_eq!(m.decorations, Some(""));
        assert_eq!(m.ref_labels().count(), 0);
        assert_eq!(m.subject, Some("subject"));
    }

    #[test]
    fn test_ref_labels_trimmed() {
        let m = match_line("1 abc1234 ( HEAD -> main ,  origin/main,, ) x");
        assert_eq!(
            m.ref_labels().collect::<Vec<_>>(),
            vec!["HEAD -> main", "origin/main"]
        );
    }

    #[test]
    fn test_parentheses_in_subject_after_decorations() {
        let m = match_line("1 abc1234 (main) fix(parser): handle (a, b)");
        assert_eq!(m.decorations, Some("main"));
        assert_eq!(m.subject, Some("fix(parser): handle (a, b)"));
    }

    #[test]
    fn test_parentheses_in_subject_without_decorations() {
        let m = match_line("1 abc1234 def5678 Revert \"feat(x): y, z\"");
        assert_eq!(m.decorations, None);
        assert_eq!(m.subject, Some("Revert \"feat(x): y, z\""));
    }

    #[test]
    fn test_unclosed_parenthesis_is_subject() {
        let m = match_line("1 abc1234 (wip");
        assert_eq!(m.decorations, None);
        assert_eq!(m.subject, Some("(wip"));
    }

    #[test]
    fn test_missing_hash() {
        let m = match_line("1610000000");
        assert_eq!(m.commit_date, Some("1610000000"));
        assert_eq!(m.hash, None);
        assert_eq!(m.subject, None);
    }

    #[test]
    fn test_blank_line() {
        assert_eq!(match_line("   "), LineMatch::default());
    }

    #[test]
    fn test_non_hex_word_ends_parents() {
        let m = match_line("1 abc1234 def5678 Initial import of abc1234");
        assert_eq!(m.parent_hashes, Some(vec!["def5678"]));
        assert_eq!(m.subject, Some("Initial import of abc1234"));
    }

    #[test]
    fn test_is_hash() {
        assert!(is_hash("abc1234"));
        assert!(is_hash(&"f".repeat(40)));
        assert!(!is_hash("abc123"));
        assert!(!is_hash(&"f".repeat(41)));
        assert!(!is_hash("ABC1234"));
        assert!(!is_hash("HEAD"));
    }
}
