use std::{
    collections::HashMap,
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use parking_lot::RwLock;
use seed_types::{AccountId, PublicKey, SecretKey};
use serde::{Deserialize, Serialize};

/// near-cli compatible credential file.
#[derive(Serialize, Deserialize)]
struct KeyFile {
    account_id: AccountId,
    public_key: PublicKey,
    private_key: SecretKey,
}

/// Keys of loaded accounts, keyed by network and account.
pub struct KeyStore {
    keys: RwLock<HashMap<(String, AccountId), SecretKey>>,
    dir: Option<PathBuf>,
}

impl KeyStore {
    pub fn in_memory() -> Self {
        KeyStore {
            keys: RwLock::new(HashMap::new()),
            dir: None,
        }
    }

    /// Keys are mirrored to `<dir>/<network_id>/<account>.json`.
    pub fn with_dir(dir: PathBuf) -> Self {
        KeyStore {
            keys: RwLock::new(HashMap::new()),
            dir: Some(dir),
        }
    }

    fn key_path(&self, network_id: &str, account_id: &AccountId) -> Option<PathBuf> {
        self.dir
            .as_ref()
            .map(|dir| dir.join(network_id).join(format!("{}.json", account_id)))
    }

    pub fn get(&self, network_id: &str, account_id: &AccountId) -> Result<Option<SecretKey>> {
        let map_key = (network_id.to_owned(), account_id.clone());
        if let Some(secret_key) = self.keys.read().get(&map_key) {
            return Ok(Some(secret_key.clone()));
        }

        let path = match self.key_path(network_id, account_id) {
            Some(path) if path.exists() => path,
            _ => return Ok(None),
        };
        let secret_key = read_key_file(&path)?;
        tracing::info!(
            "Using key {} of {} from {}, delete the file to fetch it again",
            secret_key.public_key(),
            account_id,
            path.display()
        );
        self.keys.write().insert(map_key, secret_key.clone());
        Ok(Some(secret_key))
    }

    pub fn insert(
        &self,
        network_id: &str,
        account_id: &AccountId,
        secret_key: SecretKey,
    ) -> Result<()> {
        if let Some(path) = self.key_path(network_id, account_id) {
            write_key_file(&path, account_id, &secret_key)?;
        }
        self.keys
            .write()
            .insert((network_id.to_owned(), account_id.clone()), secret_key);
        Ok(())
    }
}

fn read_key_file(path: &Path) -> Result<SecretKey> {
    let content =
        fs::read_to_string(path).with_context(|| format!("read key file {}", path.display()))?;
    let key_file: KeyFile = serde_json::from_str(&content)
        .with_context(|| format!("parse key file {}", path.display()))?;
    anyhow::ensure!(
        key_file.private_key.public_key() == key_file.public_key,
        "key file {} public key mismatch",
        path.display()
    );
    Ok(key_file.private_key)
}

fn write_key_file(path: &Path, account_id: &AccountId, secret_key: &SecretKey) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create key dir {}", parent.display()))?;
    }
    let key_file = KeyFile {
        account_id: account_id.clone(),
        public_key: secret_key.public_key(),
        private_key: secret_key.clone(),
    };
    let content = serde_json::to_string(&key_file)?;

    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options
        .open(path)
        .with_context(|| format!("create key file {}", path.display()))?;
    file.write_all(content.as_bytes())
        .with_context(|| format!("write key file {}", path.display()))?;
    Ok(())
}
