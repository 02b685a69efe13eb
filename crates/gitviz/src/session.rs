// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Loaded commit history and change notification
//!
//! A [`LogSession`] owns the commits read from one log source. Anything that
//! depends on the session (command availability, progress logging) subscribes
//! through [`LogSession::subscribe`] and stops receiving events when the
//! returned [`Subscription`] is dropped.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;

use gitviz_log::{Commit, LogError};
use serde::Serialize;
use tracing::debug;

// ============================================================================
// Change notification
// ============================================================================

type Callback<E> = Rc<dyn Fn(&E)>;
type Subscribers<E> = RefCell<Vec<(u64, Callback<E>)>>;

/// Publisher side of a change notification
pub struct Notifier<E> {
    subscribers: Rc<Subscribers<E>>,
    next_id: Cell<u64>,
}

impl<E: 'static> Notifier<E> {
    /// Create a notifier with no subscribers
    #[must_use]
    pub fn new() -> Self {
        Self {
            subscribers: Rc::new(RefCell::new(Vec::new())),
            next_id: Cell::new(0),
        }
    }

    /// Register `callback`; it is called for every event until the returned
    /// subscription is dropped
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, callback: impl Fn(&E) + 'static) -> Subscription {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.subscribers.borrow_mut().push((id, Rc::new(callback)));

        let subscribers = Rc::downgrade(&self.subscribers);
        Subscription {
            unsubscribe: Some(Box::new(move || {
                if let Some(subscribers) = subscribers.upgrade() {
                    subscribers.borrow_mut().retain(|(sid, _)| *sid != id);
                }
            })),
        }
    }

    /// Deliver `event` to every current subscriber, in subscription order
    pub fn notify(&self, event: &E) {
        // Snapshot so callbacks may subscribe or unsubscribe while running
        let callbacks: Vec<Callback<E>> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(_, cb)| Rc::clone(cb))
            .collect();
        for callback in callbacks {
            callback(event);
        }
    }

    /// Number of live subscriptions
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }
}

impl<E: 'static> Default for Notifier<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> std::fmt::Debug for Notifier<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("subscribers", &self.subscribers.borrow().len())
            .finish()
    }
}

/// Handle for a registered callback; unsubscribes on drop
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Unsubscribe now rather than at end of scope
    pub fn cancel(mut self) {
        self.run_unsubscribe();
    }

    fn run_unsubscribe(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run_unsubscribe();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.unsubscribe.is_some())
            .finish()
    }
}

// ============================================================================
// Session
// ============================================================================

/// Snapshot of what a session currently holds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionState {
    /// A log has been loaded successfully
    pub loaded: bool,
    /// Number of commits held
    pub commits: usize,
    /// Number of commits carrying at least one ref label
    pub decorated: usize,
}

/// Change events published by a [`LogSession`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A log finished loading
    Loaded {
        /// Where the log came from
        source: String,
        /// State after loading
        state: SessionState,
    },
    /// The session was emptied
    Cleared,
}

impl SessionEvent {
    /// Session state right after this event
    #[must_use]
    pub fn state(&self) -> SessionState {
        match self {
            Self::Loaded { state, .. } => *state,
            Self::Cleared => SessionState::default(),
        }
    }
}

/// Aggregate numbers over the loaded commits
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LogSummary {
    /// Number of commits
    pub commits: usize,
    /// Commits without parents
    pub roots: usize,
    /// Commits with more than one parent
    pub merges: usize,
    /// Commits with at least one ref label
    pub decorated: usize,
    /// Parent edges whose target is not in the log
    pub dangling_parents: usize,
}

/// Commits read from one log source
#[derive(Debug, Default)]
pub struct LogSession {
    commits: Vec<Commit>,
    source: Option<String>,
    changed: Notifier<SessionEvent>,
}

impl LogSession {
    /// Create an empty session
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to session changes
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, callback: impl Fn(&SessionEvent) + 'static) -> Subscription {
        self.changed.subscribe(callback)
    }

    /// Replace the session contents with the commits from `commits`
    ///
    /// The sequence is drained in order. If any element is an error the
    /// session is left empty and the error is returned.
    ///
    /// # Errors
    ///
    /// Returns the first [`LogError`] produced by `commits`.
    pub fn load<I>(&mut self, source: impl Into<String>, commits: I) -> Result<usize, LogError>
    where
        I: IntoIterator<Item = Result<Commit, LogError>>,
    {
        let source = source.into();
        self.reset();

        let loaded = match commits.into_iter().collect::<Result<Vec<_>, _>>() {
            Ok(loaded) => loaded,
            Err(e) => {
                self.changed.notify(&SessionEvent::Cleared);
                return Err(e);
            }
        };

        debug!(%source, commits = loaded.len(), "session loaded");
        self.commits = loaded;
        self.source = Some(source.clone());
        self.changed.notify(&SessionEvent::Loaded {
            source,
            state: self.state(),
        });
        Ok(self.commits.len())
    }

    /// Drop all commits
    pub fn clear(&mut self) {
        self.reset();
        self.changed.notify(&SessionEvent::Cleared);
    }

    fn reset(&mut self) {
        self.commits.clear();
        self.source = None;
    }

    /// Commits in source order
    #[must_use]
    pub fn commits(&self) -> &[Commit] {
        &self.commits
    }

    /// Where the current log came from
    #[must_use]
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Current state snapshot
    #[must_use]
    pub fn state(&self) -> SessionState {
        SessionState {
            loaded: self.source.is_some(),
            commits: self.commits.len(),
            decorated: self.decorated().count(),
        }
    }

    /// Commits carrying at least one ref label
    pub fn decorated(&self) -> impl Iterator<Item = &Commit> {
        self.commits
            .iter()
            .filter(|c| c.refs().is_some_and(|r| !r.is_empty()))
    }

    /// Count roots, merges and edges that leave the loaded log
    #[must_use]
    pub fn summary(&self) -> LogSummary {
        let known: HashSet<&str> = self.commits.iter().map(Commit::hash).collect();
        let dangling_parents = self
            .commits
            .iter()
            .flat_map(|c| c.parent_hashes().unwrap_or_default())
            .filter(|p| !known.contains(p.as_str()))
            .count();

        LogSummary {
            commits: self.commits.len(),
            roots: self.commits.iter().filter(|c| c.is_root()).count(),
            merges: self.commits.iter().filter(|c| c.is_merge()).count(),
            decorated: self.decorated().count(),
            dangling_parents,
        }
    }
}
