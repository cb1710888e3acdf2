mod keystore;
mod secrets;

use std::{fmt, sync::Arc};

use anyhow::{Context, Result};
use seed_config::{SecretsConfig, SeedConfig};
use seed_types::{AccountId, PublicKey, SecretKey};

pub use keystore::KeyStore;
pub use secrets::{
    parse_secret_payload, secret_name, secret_resource_id, DirSecretStore, GcpSecretManager,
    SecretStore,
};

/// An account together with the key that signs for it.
#[derive(Clone)]
pub struct Identity {
    account_id: AccountId,
    secret_key: Arc<SecretKey>,
}

impl Identity {
    pub fn new(account_id: AccountId, secret_key: SecretKey) -> Self {
        Identity {
            account_id,
            secret_key: Arc::new(secret_key),
        }
    }

    pub fn account_id(&self) -> &AccountId {
        &self.account_id
    }

    pub fn public_key(&self) -> PublicKey {
        self.secret_key.public_key()
    }

    pub fn secret_key(&self) -> &SecretKey {
        &self.secret_key
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("account_id", &self.account_id)
            .field("public_key", &self.public_key())
            .finish()
    }
}

/// Resolves account names into signing identities.
pub struct AccountProvider {
    network_id: String,
    keystore: KeyStore,
    secrets: Box<dyn SecretStore>,
}

impl AccountProvider {
    pub fn new(network_id: String, keystore: KeyStore, secrets: Box<dyn SecretStore>) -> Self {
        AccountProvider {
            network_id,
            keystore,
            secrets,
        }
    }

    pub fn from_config(config: &SeedConfig) -> Self {
        let keystore = match &config.keystore.keys_dir {
            Some(dir) => KeyStore::with_dir(dir.clone()),
            None => KeyStore::in_memory(),
        };
        let secrets: Box<dyn SecretStore> = match &config.secrets {
            SecretsConfig::Gcp { repo_path } => Box::new(GcpSecretManager::new(repo_path.clone())),
            SecretsConfig::Dir { path } => Box::new(DirSecretStore::new(path.clone())),
        };
        Self::new(config.network.network_id.clone(), keystore, secrets)
    }

    pub fn keystore(&self) -> &KeyStore {
        &self.keystore
    }

    pub async fn load(&self, account_id: &AccountId) -> Result<Identity> {
        if let Some(secret_key) = self.keystore.get(&self.network_id, account_id)? {
            return Ok(Identity::new(account_id.clone(), secret_key));
        }

        let private_key = self
            .secrets
            .private_key(account_id)
            .await
            .with_context(|| format!("Unable to load account {}", account_id))?;
        let secret_key: SecretKey = private_key
            .trim()
            .parse()
            .with_context(|| format!("parse private key of {}", account_id))?;
        self.keystore
            .insert(&self.network_id, account_id, secret_key.clone())?;
        tracing::info!(
            "Loaded account {} with public key {}",
            account_id,
            secret_key.public_key()
        );
        Ok(Identity::new(account_id.clone(), secret_key))
    }
}
