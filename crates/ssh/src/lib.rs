mod client;
mod config;
mod error;
mod target;

pub use client::{RemoteShell, RemoteStatus, SshClient};
pub use config::{Endpoint, lookup};
pub use error::SshError;
pub use target::Target;
