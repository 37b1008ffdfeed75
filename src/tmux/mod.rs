// ABOUTME: Tmux session provisioning
// Translates the declarative config tree into ordered tmux control commands

pub mod builder;
pub mod error;
pub mod runner;

pub use builder::{BuildOutcome, SessionBuilder};
pub use error::TmuxError;
pub use runner::TmuxRunner;
