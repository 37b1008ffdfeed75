// ABOUTME: Error types for tmux session provisioning
// Defines error conditions that can occur while driving the tmux binary

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TmuxError {
    #[error("tmux not installed on host")]
    TmuxNotInstalled,

    #[error("{step} failed: {detail}")]
    CommandFailed { step: &'static str, detail: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
