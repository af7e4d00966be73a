//! Backends generated secrets can be pushed to.

pub mod aws;
pub mod keychain;
pub mod vault;

pub use aws::AwsStore;
pub use keychain::KeychainStore;
pub use vault::VaultStore;

use crate::error::Result;

/// A destination for generated secrets. Each adapter is constructed
/// with its target (secret name, service, or path) already bound.
pub trait SecretStore {
    /// Store a single value at the configured destination.
    fn save(&self, value: &str) -> Result<()>;

    /// Store a named batch. Returns how many entries were written; an
    /// `Err` means the batch as a whole could not be attempted.
    fn save_many(&self, entries: &[(String, String)]) -> Result<usize>;
}
