//! # repocount
//!
//! List the repositories a GitHub account owns, each with its commit count, sorted by name.
//!
//! The main entry point is [`report::run()`]. Tests and embedders that need to swap out
//! the network can call [`report::generate()`] with their own [`transport::Transport`].

pub mod classify;
pub mod cli;
pub mod error;
pub mod github;
pub mod report;
pub mod transport;
pub mod types;
