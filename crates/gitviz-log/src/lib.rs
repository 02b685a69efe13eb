// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! gitviz-log: git log parsing for the gitviz commit graph
//!
//! This library crate turns the line-oriented output of
//! `git log --format="%ct %H %P %d %s"` into [`Commit`] records that a graph
//! builder can link by hash.

#![warn(missing_docs)]

//! # Example
//!
//! ```
//! use gitviz_log::parse_commits;
//!
//! let output = "1610000002 aaa1111 abc1234 (HEAD -> main) Fix bug\n\
//!               1610000000 abc1234 Initial commit\n";
//!
//! for commit in parse_commits(output.as_bytes()) {
//!     let commit = commit.expect("well-formed line");
//!     println!("{} {}", commit.short_hash(), commit.subject().unwrap_or(""));
//! }
//! ```

pub mod commit;
pub mod error;
pub mod grammar;
pub mod parser;
pub mod stream;

pub use commit::Commit;
pub use error::{FormatError, LogError};
pub use grammar::EXPECTED_OUTPUT_FORMAT;
pub use parser::parse_commit;
pub use stream::{CommitStream, parse_commits, parse_log};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::commit::Commit;
    pub use crate::error::{FormatError, LogError};
    pub use crate::stream::{CommitStream, parse_commits};
}
