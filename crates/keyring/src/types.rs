use crate::error::KeyringError;
use serde::Deserialize;
use ssh::Target;

/// The keyring file shared with the bot.
///
/// Only the deploy tool's own key is read; the bot's secrets stay untouched
/// and are never held in memory.
#[derive(Debug, Clone, Deserialize)]
pub struct Keyring {
    pub deploy_location: String,
}

impl Keyring {
    /// Parses `deploy_location` as an SSH destination.
    ///
    /// # Errors
    ///
    /// Returns `KeyringError::Target` if the location is not a usable target.
    pub fn target(&self) -> Result<Target, KeyringError> {
        Ok(self.deploy_location.parse::<Target>()?)
    }
}
