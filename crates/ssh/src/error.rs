use std::io;
use thiserror::Error;

/// Error type for SSH target handling and remote execution.
#[derive(Error, Debug)]
pub enum SshError {
    /// The deployment target string cannot be handed to `ssh`.
    #[error("invalid deployment target {target:?}: {reason}")]
    InvalidTarget {
        target: String,
        reason: &'static str,
    },

    /// No `ssh` client binary on `PATH`.
    #[error("ssh client not found: {0}")]
    NotFound(#[from] which::Error),

    /// SSH config parse error (user should fix their SSH config).
    #[error("failed to parse SSH config: {0}")]
    ConfigParse(String),

    /// Spawning or talking to the `ssh` process failed.
    #[error("failed to run ssh: {0}")]
    Io(#[from] io::Error),
}
