//! HashiCorp Vault adapter speaking the KV version 2 HTTP API.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::store::SecretStore;

/// Writes secrets to one KV v2 path on a Vault server.
#[derive(Debug)]
pub struct VaultStore {
    client: reqwest::blocking::Client,
    endpoint: String,
    token: String,
    path: String,
}

impl VaultStore {
    /// The path must start with a mount segment (`secret/myapp/db`); the
    /// KV v2 endpoint inserts `data/` after the mount.
    pub fn new(url: &str, token: &str, path: &str) -> Result<Self> {
        let (mount, rest) = path
            .split_once('/')
            .ok_or_else(|| Error::Vault(format!("Vault path needs a mount prefix: {path}")))?;

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| Error::Vault(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: format!("{}/v1/{}/data/{}", url.trim_end_matches('/'), mount, rest),
            token: token.to_string(),
            path: path.to_string(),
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    fn write(&self, data: &BTreeMap<&str, &str>) -> Result<()> {
        let payload = serde_json::json!({ "data": data });

        let response = self
            .client
            .post(&self.endpoint)
            .header("X-Vault-Token", &self.token)
            .json(&payload)
            .send()
            .map_err(|e| Error::Vault(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            log::debug!("vault write to {} ok ({status})", self.path);
            Ok(())
        } else {
            Err(Error::Vault(format!(
                "server returned {status} for {}",
                self.path
            )))
        }
    }
}

impl SecretStore for VaultStore {
    fn save(&self, value: &str) -> Result<()> {
        let mut data = BTreeMap::new();
        data.insert("value", value);
        self.write(&data)
    }

    /// One KV write holding the whole batch, all entries as fields of
    /// the same version.
    fn save_many(&self, entries: &[(String, String)]) -> Result<usize> {
        let data: BTreeMap<&str, &str> = entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .collect();
        self.write(&data)?;
        Ok(entries.len())
    }
}
