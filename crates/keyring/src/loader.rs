use crate::error::KeyringError;
use crate::schema::{ValidationResult, validate};
use crate::types::Keyring;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Keyring path used when none is given, relative to the working directory.
pub const DEFAULT_PATH: &str = "keyring.json";

/// Expands a leading `~` to the home directory.
///
/// # Errors
///
/// Returns `KeyringError::NoHomeDir` if the path starts with `~` and the
/// home directory cannot be determined.
pub fn resolve_path(path: &Path) -> Result<PathBuf, KeyringError> {
    let Ok(rest) = path.strip_prefix("~") else {
        return Ok(path.to_path_buf());
    };

    let home = dirs::home_dir().ok_or(KeyringError::NoHomeDir)?;
    Ok(home.join(rest))
}

/// Loads a keyring from a string.
///
/// Validates against the schema first, then deserializes.
///
/// # Errors
///
/// Returns an error if the JSON is invalid or fails schema validation.
pub fn load_from_str(s: &str) -> Result<Keyring, KeyringError> {
    s.parse()
}

/// Loads a keyring from a specific path, expanding `~`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the keyring is invalid.
pub fn load_from_path(path: &Path) -> Result<Keyring, KeyringError> {
    let path = resolve_path(path)?;
    let contents = fs::read_to_string(&path).map_err(|source| KeyringError::Io {
        path: path.clone(),
        source,
    })?;
    load_from_str(&contents)
}

impl FromStr for Keyring {
    type Err = KeyringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: Value = serde_json::from_str(s)?;

        if let ValidationResult::Invalid(errors) = validate(&value) {
            return Err(KeyringError::Validation(errors));
        }

        Ok(serde_json::from_value(value)?)
    }
}
