mod error;
mod loader;
mod schema;
mod types;

pub use error::KeyringError;
pub use loader::{DEFAULT_PATH, load_from_path};
pub use schema::ValidationError;
pub use types::Keyring;
