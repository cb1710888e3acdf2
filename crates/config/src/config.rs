use std::path::PathBuf;

use seed_types::AccountId;
use serde::{Deserialize, Serialize};

use crate::constants::*;

#[derive(Clone, Default, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SeedConfig {
    pub network: NetworkConfig,
    pub contracts: ContractsConfig,
    pub accounts: AccountsConfig,
    pub secrets: SecretsConfig,
    pub keystore: KeyStoreConfig,
    pub run: RunConfig,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NetworkConfig {
    pub network_id: String,
    pub rpc_url: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        NetworkConfig {
            network_id: TESTNET_NETWORK_ID.to_owned(),
            rpc_url: TESTNET_RPC_URL.to_owned(),
        }
    }
}

/// Contracts the workflows talk to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContractsConfig {
    /// NFT store the seed tokens are minted on
    pub store: AccountId,
    /// Fixed price market
    pub market: AccountId,
    /// Offer based market
    pub auction_market: AccountId,
    /// Factory that deploys new stores
    pub store_factory: AccountId,
    pub paras_token: AccountId,
    pub paras_series_id: String,
}

impl Default for ContractsConfig {
    fn default() -> Self {
        ContractsConfig {
            store: STORE_CONTRACT.to_owned(),
            market: MARKET_CONTRACT.to_owned(),
            auction_market: AUCTION_MARKET_CONTRACT.to_owned(),
            store_factory: STORE_FACTORY_CONTRACT.to_owned(),
            paras_token: PARAS_TOKEN_CONTRACT.to_owned(),
            paras_series_id: PARAS_TEST_SERIES_ID.to_owned(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AccountsConfig {
    pub alice: AccountId,
    pub bob: AccountId,
    pub carol: AccountId,
}

impl Default for AccountsConfig {
    fn default() -> Self {
        AccountsConfig {
            alice: ALICE_ACCOUNT.to_owned(),
            bob: BOB_ACCOUNT.to_owned(),
            carol: CAROL_ACCOUNT.to_owned(),
        }
    }
}

/// Where account private keys are fetched from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum SecretsConfig {
    /// GCP Secret Manager, one secret per account under `repo_path`.
    Gcp { repo_path: String },
    /// Local directory of `<account_with_underscores>.json` files.
    Dir { path: PathBuf },
}

impl Default for SecretsConfig {
    fn default() -> Self {
        SecretsConfig::Gcp {
            repo_path: SECRETS_REPO_PATH.to_owned(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeyStoreConfig {
    /// Loaded keys are mirrored to `<keys_dir>/<network_id>/<account>.json`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keys_dir: Option<PathBuf>,
}

impl Default for KeyStoreConfig {
    fn default() -> Self {
        KeyStoreConfig {
            keys_dir: Some(PathBuf::from(DEFAULT_KEYS_DIR)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Env file receiving START_BLOCK_HEIGHT and STOP_BLOCK_HEIGHT
    pub env_path: PathBuf,
    pub stop_height_margin: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            env_path: PathBuf::from(DEFAULT_ENV_PATH),
            stop_height_margin: DEFAULT_STOP_HEIGHT_MARGIN,
        }
    }
}
