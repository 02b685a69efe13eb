// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Commands over a loaded log
//!
//! Every command implements [`LogCommand`]. [`lookup`] maps a [`CommandId`]
//! to its implementation with an exhaustive `match`, so adding an id without
//! a command does not compile.

use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::io::{self, Write};
use std::rc::Rc;

use clap::Subcommand;
use gitviz_log::Commit;
use serde::Serialize;
use thiserror::Error;

use crate::config::OutputFormat;
use crate::session::{LogSession, SessionState, Subscription};

/// Errors that can occur while executing a command
#[derive(Debug, Error)]
pub enum CommandError {
    /// The command cannot run against the current session
    #[error("Command `{0}` is not available")]
    Unavailable(CommandId),

    /// Writing output failed
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Serializing output failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Identity of every command
#[derive(Subcommand, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CommandId {
    /// Print one line per commit, newest first
    #[default]
    List,
    /// Print commit, root, merge and ref counts
    Summary,
    /// Print each decorated commit with its ref labels
    Refs,
}

impl CommandId {
    /// Every command, in help order
    pub const ALL: [CommandId; 3] = [CommandId::List, CommandId::Summary, CommandId::Refs];

    /// Name used on the command line
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Summary => "summary",
            Self::Refs => "refs",
        }
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Contract shared by all commands
pub trait LogCommand {
    /// Which command this is
    fn id(&self) -> CommandId;

    /// Whether the command can run against a session in `state`
    fn can_execute(&self, state: &SessionState) -> bool {
        state.loaded
    }

    /// Write the command's output for `session`
    ///
    /// # Errors
    ///
    /// Returns an error if writing or serializing fails.
    fn execute(
        &self,
        session: &LogSession,
        format: OutputFormat,
        out: &mut dyn Write,
    ) -> Result<(), CommandError>;
}

/// The implementation behind `id`
#[must_use]
pub fn lookup(id: CommandId) -> &'static dyn LogCommand {
    match id {
        CommandId::List => &ListCommand,
        CommandId::Summary => &SummaryCommand,
        CommandId::Refs => &RefsCommand,
    }
}

/// Check availability, then execute
///
/// # Errors
///
/// Returns `CommandError::Unavailable` if the command cannot run against
/// the session, or any error from the command itself.
pub fn run(
    id: CommandId,
    session: &LogSession,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<(), CommandError> {
    let command = lookup(id);
    if !command.can_execute(&session.state()) {
        return Err(CommandError::Unavailable(id));
    }
    command.execute(session, format, out)
}

// ============================================================================
// Availability tracking
// ============================================================================

/// Keeps the set of runnable commands current by watching a session
#[derive(Debug)]
pub struct Availability {
    available: Rc<RefCell<HashSet<CommandId>>>,
    _subscription: Subscription,
}

impl Availability {
    /// Start tracking `session`
    #[must_use]
    pub fn watch(session: &LogSession) -> Self {
        let available = Rc::new(RefCell::new(available_in(&session.state())));
        let sink = Rc::clone(&available);
        let subscription = session.subscribe(move |event| {
            *sink.borrow_mut() = available_in(&event.state());
        });
        Self {
            available,
            _subscription: subscription,
        }
    }

    /// Whether `id` can currently run
    #[must_use]
    pub fn is_available(&self, id: CommandId) -> bool {
        self.available.borrow().contains(&id)
    }
}

fn available_in(state: &SessionState) -> HashSet<CommandId> {
    CommandId::ALL
        .into_iter()
        .filter(|id| lookup(*id).can_execute(state))
        .collect()
}

// ============================================================================
// Commands
// ============================================================================

struct ListCommand;

impl LogCommand for ListCommand {
    fn id(&self) -> CommandId {
        CommandId::List
    }

    fn execute(
        &self,
        session: &LogSession,
        format: OutputFormat,
        out: &mut dyn Write,
    ) -> Result<(), CommandError> {
        for commit in session.commits() {
            match format {
                OutputFormat::Json => {
                    serde_json::to_writer(&mut *out, commit)?;
                    writeln!(out)?;
                }
                OutputFormat::Text => writeln!(out, "{}", list_line(commit))?,
            }
        }
        Ok(())
    }
}

fn list_line(commit: &Commit) -> String {
    let date = commit
        .committed_at()
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| commit.commit_date().to_string());
    let marker = if commit.is_merge() { 'M' } else { '*' };

    let mut line = format!("{marker} {} {date}", commit.short_hash());
    if let Some(refs) = commit.refs().filter(|r| !r.is_empty()) {
        line.push_str(&format!(" ({})", refs.join(", ")));
    }
    if let Some(subject) = commit.subject() {
        line.push(' ');
        line.push_str(subject);
    }
    line
}

struct SummaryCommand;

impl LogCommand for SummaryCommand {
    fn id(&self) -> CommandId {
        CommandId::Summary
    }

    fn execute(
        &self,
        session: &LogSession,
        format: OutputFormat,
        out: &mut dyn Write,
    ) -> Result<(), CommandError> {
        let summary = session.summary();
        match format {
            OutputFormat::Json => {
                serde_json::to_writer(&mut *out, &summary)?;
                writeln!(out)?;
            }
            OutputFormat::Text => {
                writeln!(out, "commits:          {}", summary.commits)?;
                writeln!(out, "roots:            {}", summary.roots)?;
                writeln!(out, "merges:           {}", summary.merges)?;
                writeln!(out, "decorated:        {}", summary.decorated)?;
                writeln!(out, "dangling parents: {}", summary.dangling_parents)?;
            }
        }
        Ok(())
    }
}

struct RefsCommand;

#[derive(Serialize)]
struct RefsEntry<'a> {
    hash: &'a str,
    refs: &'a [String],
}

impl LogCommand for RefsCommand {
    fn id(&self) -> CommandId {
        CommandId::Refs
    }

    fn can_execute(&self, state: &SessionState) -> bool {
        state.loaded && state.decorated > 0
    }

    fn execute(
        &self,
        session: &LogSession,
        format: OutputFormat,
        out: &mut dyn Write,
    ) -> Result<(), CommandError> {
        for commit in session.decorated() {
            let refs = commit.refs().unwrap_or_default();
            match format {
                OutputFormat::Json => {
                    let entry = RefsEntry {
                        hash: commit.hash(),
                        refs,
                    };
                    serde_json::to_writer(&mut *out, &entry)?;
                    writeln!(out)?;
                }
                OutputFormat::Text => {
                    writeln!(out, "{} {}", commit.short_hash(), refs.join(", "))?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gitviz_log::parse_commits;
    use similar_asserts::assert_eq;

    const LOG: &str = "\
1610000002 aaa1111 def5678 abc1234  (HEAD -> main, origin/main) Merge branch 'x'
1610000001 def5678 abc1234  Fix (a, b)
1610000000 abc1234   Initial commit
";

    fn loaded_session(log: &str) -> LogSession {
        let mut session = LogSession::new();
        session
            .load("fixture", parse_commits(log.as_bytes()))
            .expect("fixture should load");
        session
    }

    fn output(id: CommandId, session: &LogSession, format: OutputFormat) -> String {
        let mut out = Vec::new();
        run(id, session, format, &mut out).expect("command should run");
        String::from_utf8(out).expect("utf-8 output")
    }

    #[test]
    fn test_lookup_matches_id() {
        for id in CommandId::ALL {
            assert_eq!(lookup(id).id(), id);
        }
    }

    #[test]
    fn test_names() {
        let names: Vec<_> = CommandId::ALL.into_iter().map(CommandId::name).collect();
        assert_eq!(names, vec!["list", "summary", "refs"]);
    }

    #[test]
    fn test_nothing_available_before_load() {
        let session = LogSession::new();
        let availability = Availability::watch(&session);
        for id in CommandId::ALL {
            assert!(!availability.is_available(id));
        }
        let mut out = Vec::new();
        assert!(matches!(
            run(CommandId::List, &session, OutputFormat::Text, &mut out),
            Err(CommandError::Unavailable(CommandId::List))
        ));
    }

    #[test]
    fn test_availability_follows_session() {
        let mut session = LogSession::new();
        let availability = Availability::watch(&session);

        session
            .load("plain", parse_commits("1 abc1234 one\n".as_bytes()))
            .expect("should load");
        assert!(availability.is_available(CommandId::List));
        assert!(availability.is_available(CommandId::Summary));
        assert!(!availability.is_available(CommandId::Refs));

        session
            .load("decorated", parse_commits(LOG.as_bytes()))
            .expect("should load");
        assert!(availability.is_available(CommandId::Refs));

        session.clear();
        assert!(!availability.is_available(CommandId::List));
    }

    #[test]
    fn test_list_text() {
        let session = loaded_session(LOG);
        assert_eq!(
            output(CommandId::List, &session, OutputFormat::Text),
            "\
M aaa1111 2021-01-07 06:13 (HEAD -> main, origin/main) Merge branch 'x'
* def5678 2021-01-07 06:13 Fix (a, b)
* abc1234 2021-01-07 06:13 Initial commit
"
        );
    }

    #[test]
    fn test_list_json_lines() {
        let session = loaded_session(LOG);
        let text = output(CommandId::List, &session, OutputFormat::Json);
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).expect("valid JSON line"))
            .collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["parent_hashes"], serde_json::json!(["def5678", "abc1234"]));
        assert!(lines[2].get("parent_hashes").is_none());
    }

    #[test]
    fn test_summary_json() {
        let session = loaded_session(LOG);
        let text = output(CommandId::Summary, &session, OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(text.trim()).expect("valid JSON");
        assert_eq!(
            value,
            serde_json::json!({
                "commits": 3,
                "roots": 1,
                "merges": 1,
                "decorated": 1,
                "dangling_parents": 0
            })
        );
    }

    #[test]
    fn test_summary_text() {
        let session = loaded_session(LOG);
        let text = output(CommandId::Summary, &session, OutputFormat::Text);
        assert!(text.contains("commits:          3"));
        assert!(text.contains("merges:           1"));
    }

    #[test]
    fn test_refs_text_and_json() {
        let session = loaded_session(LOG);
        assert_eq!(
            output(CommandId::Refs, &session, OutputFormat::Text),
            "aaa1111 HEAD -> main, origin/main\n"
        );
        assert_eq!(
            output(CommandId::Refs, &session, OutputFormat::Json),
            "{\"hash\":\"aaa1111\",\"refs\":[\"HEAD -> main\",\"origin/main\"]}\n"
        );
    }
}
