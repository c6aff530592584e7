use crate::schema::ValidationError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Error type for keyring loading operations.
#[derive(Error, Debug)]
pub enum KeyringError {
    /// Home directory not found while expanding `~`.
    #[error("could not determine home directory")]
    NoHomeDir,

    /// Keyring file I/O error.
    #[error("failed to read keyring {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Keyring is not valid JSON at all.
    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Keyring schema validation error.
    #[error("keyring validation failed: {}", format_validation_errors(.0))]
    Validation(Vec<ValidationError>),

    /// `deploy_location` cannot be used as an SSH destination.
    #[error(transparent)]
    Target(#[from] ssh::SshError),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
