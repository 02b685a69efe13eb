//! gitviz library
//!
//! This module exports the front end of gitviz for use in integration tests
//! and as a library.

pub mod app;
pub mod command;
pub mod config;
pub mod retriever;
pub mod session;
