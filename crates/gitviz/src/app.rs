// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Wiring configuration, log source, session and commands together

use std::io::Write;

use anyhow::Context;
use gitviz_log::parse_commits;
use tracing::{debug, info, warn};

use crate::command::{self, Availability};
use crate::config::Config;
use crate::retriever::{LogRetriever, open_input};
use crate::session::{LogSession, SessionEvent};

/// Load the configured log and run the configured command, writing to `out`
///
/// # Errors
///
/// Returns an error if the log cannot be read or parsed, if git fails, or
/// if writing the output fails.
pub fn run(config: &Config, out: &mut dyn Write) -> anyhow::Result<()> {
    let mut session = LogSession::new();
    let availability = Availability::watch(&session);
    let _progress = session.subscribe(|event| match event {
        SessionEvent::Loaded { source, state } => {
            info!(%source, commits = state.commits, decorated = state.decorated, "log loaded");
        }
        SessionEvent::Cleared => debug!("session cleared"),
    });

    match &config.input {
        Some(path) => {
            let reader = open_input(path)?;
            session
                .load(path.display().to_string(), parse_commits(reader))
                .with_context(|| format!("Failed to parse {}", path.display()))?;
        }
        None => {
            let repo = config
                .repo_path()
                .context("No repository given and the current directory is unavailable")?;
            let retriever = LogRetriever::discover(&repo)?;
            let mut log = retriever.retrieve(&config.query())?;
            session
                .load(retriever.workdir().display().to_string(), &mut log)
                .context("Failed to parse git log output")?;
            log.finish()?;
        }
    }

    let id = config.command_id();
    if !availability.is_available(id) {
        warn!(command = %id, "nothing to show for this log");
        return Ok(());
    }
    command::run(id, &session, config.format, out)?;
    out.flush()?;
    Ok(())
}
