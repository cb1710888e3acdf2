use std::{path::PathBuf, sync::Arc};

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use seed_types::AccountId;
use serde::Deserialize;
use tokio::sync::OnceCell;

const SECRET_MANAGER_API: &str = "https://secretmanager.googleapis.com/v1";
const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";

/// Source of account private keys.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Private key of `account_id` in `ed25519:<base58>` form.
    async fn private_key(&self, account_id: &AccountId) -> Result<String>;
}

/// Secret name of an account: dots become underscores.
pub fn secret_name(account_id: &AccountId) -> String {
    account_id.as_str().replace('.', "_")
}

pub fn secret_resource_id(repo_path: &str, account_id: &AccountId) -> String {
    format!("{}{}/versions/1", repo_path, secret_name(account_id))
}

#[derive(Deserialize)]
struct SecretPayload {
    private_key: String,
}

/// Extract `private_key` from a credential JSON document.
pub fn parse_secret_payload(bytes: &[u8]) -> Result<String> {
    let payload: SecretPayload =
        serde_json::from_slice(bytes).context("parse credential payload")?;
    Ok(payload.private_key)
}

#[derive(Deserialize)]
struct AccessSecretVersionResponse {
    payload: Option<SecretVersionPayload>,
}

#[derive(Deserialize)]
struct SecretVersionPayload {
    /// Base64 encoded secret
    data: Option<String>,
}

/// GCP Secret Manager, authenticated with application default credentials.
pub struct GcpSecretManager {
    repo_path: String,
    client: reqwest::Client,
    auth: OnceCell<Arc<dyn gcp_auth::TokenProvider>>,
}

impl GcpSecretManager {
    pub fn new(repo_path: String) -> Self {
        GcpSecretManager {
            repo_path,
            client: reqwest::Client::new(),
            auth: OnceCell::new(),
        }
    }

    async fn bearer_token(&self) -> Result<String> {
        let auth = self
            .auth
            .get_or_try_init(|| async {
                gcp_auth::provider()
                    .await
                    .map_err(|err| anyhow!("GCP auth init: {}", err))
            })
            .await?;
        let token = auth
            .token(&[CLOUD_PLATFORM_SCOPE])
            .await
            .map_err(|err| anyhow!("GCP token: {}", err))?;
        Ok(token.as_str().to_string())
    }
}

#[async_trait]
impl SecretStore for GcpSecretManager {
    async fn private_key(&self, account_id: &AccountId) -> Result<String> {
        let resource = secret_resource_id(&self.repo_path, account_id);
        let token = self.bearer_token().await?;
        let resp = self
            .client
            .get(format!("{}/{}:access", SECRET_MANAGER_API, resource))
            .bearer_auth(&token)
            .send()
            .await
            .with_context(|| format!("access secret {}", resource))?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            bail!("access secret {}: {} {}", resource, status, body);
        }

        let version: AccessSecretVersionResponse = resp.json().await?;
        let data = version
            .payload
            .and_then(|payload| payload.data)
            .ok_or_else(|| anyhow!("Unable to load account {} from GCP", account_id))?;
        let decoded = BASE64
            .decode(data)
            .with_context(|| format!("decode secret {}", resource))?;
        parse_secret_payload(&decoded)
    }
}

/// Directory of credential files named after the secret name.
pub struct DirSecretStore {
    dir: PathBuf,
}

impl DirSecretStore {
    pub fn new(dir: PathBuf) -> Self {
        DirSecretStore { dir }
    }

    fn secret_path(&self, account_id: &AccountId) -> PathBuf {
        self.dir.join(format!("{}.json", secret_name(account_id)))
    }
}

#[async_trait]
impl SecretStore for DirSecretStore {
    async fn private_key(&self, account_id: &AccountId) -> Result<String> {
        let path = self.secret_path(account_id);
        let content = tokio::fs::read(&path)
            .await
            .with_context(|| format!("read credential file {}", path.display()))?;
        parse_secret_payload(&content)
    }
}
