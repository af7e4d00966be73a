//! OS keychain adapter backed by the platform credential store.

use crate::error::Result;
use crate::store::SecretStore;

/// Writes secrets under one keychain service name.
pub struct KeychainStore {
    service: String,
    account: String,
}

impl KeychainStore {
    pub fn new(service: &str, account: &str) -> Self {
        Self {
            service: service.to_string(),
            account: account.to_string(),
        }
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    fn set(&self, account: &str, value: &str) -> Result<()> {
        keyring::Entry::new(&self.service, account)?.set_password(value)?;
        Ok(())
    }
}

impl SecretStore for KeychainStore {
    fn save(&self, value: &str) -> Result<()> {
        self.set(&self.account, value)
    }

    /// Each entry becomes its own keychain item, its name as the
    /// account. Failures are skipped so the rest of the batch still
    /// lands; the count tells the caller whether everything made it.
    fn save_many(&self, entries: &[(String, String)]) -> Result<usize> {
        let mut written = 0;
        for (name, value) in entries {
            match self.set(name, value) {
                Ok(()) => written += 1,
                Err(err) => log::debug!("keychain write failed for {name}: {err}"),
            }
        }
        Ok(written)
    }
}
