use std::{path::Path, sync::Arc};

use anyhow::{Context, Result};
use seed_config::SeedConfig;
use seed_rpc_client::NearRpcClient;

use crate::{account::AccountProvider, calls::NearCaller};

pub fn read_config<P: AsRef<Path>>(path: P) -> Result<SeedConfig> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("read config file from {}", path.display()))?;
    let config = toml::from_str(&content)
        .with_context(|| format!("parse config file {}", path.display()))?;
    Ok(config)
}

/// Everything a command needs to talk to the network.
pub struct SeedContext {
    pub config: SeedConfig,
    pub rpc: Arc<NearRpcClient>,
    pub caller: NearCaller,
    pub accounts: AccountProvider,
}

impl SeedContext {
    pub fn build(config: SeedConfig) -> Result<Self> {
        let rpc = Arc::new(NearRpcClient::with_url(&config.network.rpc_url)?);
        let caller = NearCaller::new(Arc::clone(&rpc));
        let accounts = AccountProvider::from_config(&config);
        Ok(SeedContext {
            config,
            rpc,
            caller,
            accounts,
        })
    }
}
