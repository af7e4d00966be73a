//! AWS Secrets Manager adapter.
//!
//! The SDK is async; a private current-thread runtime keeps the rest of
//! the program synchronous.

use aws_config::Region;
use aws_config::profile::ProfileFileCredentialsProvider;
use aws_sdk_secretsmanager::Client;
use aws_sdk_secretsmanager::operation::create_secret::CreateSecretError;

use crate::error::{Error, Result};
use crate::store::SecretStore;

/// Writes to one named secret in AWS Secrets Manager.
pub struct AwsStore {
    runtime: tokio::runtime::Runtime,
    client: Client,
    secret_name: String,
}

impl AwsStore {
    pub fn new(secret_name: &str, region: &str, profile: Option<&str>) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        let config = runtime.block_on(async {
            let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
                .region(Region::new(region.to_string()));
            if let Some(profile) = profile {
                let credentials = ProfileFileCredentialsProvider::builder()
                    .profile_name(profile)
                    .build();
                loader = loader.credentials_provider(credentials);
            }
            loader.load().await
        });

        Ok(Self {
            runtime,
            client: Client::new(&config),
            secret_name: secret_name.to_string(),
        })
    }

    pub fn secret_name(&self) -> &str {
        &self.secret_name
    }

    /// Create the secret, or add a new version when it already exists.
    fn put(&self, value: &str) -> Result<()> {
        self.runtime.block_on(async {
            let created = self
                .client
                .create_secret()
                .name(&self.secret_name)
                .secret_string(value)
                .send()
                .await;

            match created {
                Ok(_) => Ok(()),
                Err(err)
                    if err
                        .as_service_error()
                        .is_some_and(CreateSecretError::is_resource_exists_exception) =>
                {
                    self.client
                        .put_secret_value()
                        .secret_id(&self.secret_name)
                        .secret_string(value)
                        .send()
                        .await
                        .map(|_| ())
                        .map_err(|e| Error::Aws(e.to_string()))
                }
                Err(err) => Err(Error::Aws(err.to_string())),
            }
        })
    }
}

impl SecretStore for AwsStore {
    fn save(&self, value: &str) -> Result<()> {
        self.put(value)
    }

    /// The whole batch lands in one secret as a JSON object of
    /// name/value pairs.
    fn save_many(&self, entries: &[(String, String)]) -> Result<usize> {
        let mut data = serde_json::Map::new();
        for (name, value) in entries {
            data.insert(name.clone(), serde_json::Value::String(value.clone()));
        }
        self.put(&serde_json::to_string(&data)?)?;
        Ok(entries.len())
    }
}
