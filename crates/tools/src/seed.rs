//! Full seeding run: mint, trade and burn on testnet, then record the block
//! range the activity falls into.

use std::path::Path;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use seed_config::SeedConfig;
use seed_rpc_client::NearRpcClient;
use seed_utils::env_file::EnvFile;
use serde::Serialize;

use crate::{
    account::AccountProvider,
    calls::{ContractCallResult, ContractCaller},
    nft::{mint_tokens, DEFAULT_MINT_METHOD},
    paras::{create_series, mint_from_series},
    workflows::{
        paras_list_and_sale, simple_burn, simple_list_and_sale, simple_transfer, WorkflowResult,
        DEFAULT_BURN_METHOD,
    },
};

pub const START_BLOCK_HEIGHT_KEY: &str = "START_BLOCK_HEIGHT";
pub const STOP_BLOCK_HEIGHT_KEY: &str = "STOP_BLOCK_HEIGHT";
const SEED_TOKEN_COUNT: u64 = 3;

#[async_trait]
pub trait BlockHeightSource: Send + Sync {
    async fn final_block_height(&self) -> Result<u64>;
}

#[async_trait]
impl BlockHeightSource for NearRpcClient {
    async fn final_block_height(&self) -> Result<u64> {
        NearRpcClient::final_block_height(self).await
    }
}

/// Block range covering the seeded activity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RunWindow {
    pub start_block_height: u64,
    pub observed_stop_block_height: u64,
    /// Observed stop height plus the configured margin
    pub stop_block_height: u64,
}

impl RunWindow {
    pub fn new(start_block_height: u64, observed_stop_block_height: u64, margin: u64) -> Self {
        RunWindow {
            start_block_height,
            observed_stop_block_height,
            stop_block_height: observed_stop_block_height.saturating_add(margin),
        }
    }

    pub fn persist(&self, env_path: &Path) -> Result<()> {
        EnvFile::new(env_path).set_values([
            (START_BLOCK_HEIGHT_KEY, self.start_block_height),
            (STOP_BLOCK_HEIGHT_KEY, self.stop_block_height),
        ])
    }
}

#[derive(Debug, Serialize)]
pub struct SeedReport {
    pub minted_token_ids: Vec<String>,
    pub transfer_result: WorkflowResult,
    pub sale_result: WorkflowResult,
    pub burn_result: WorkflowResult,
    pub paras_series_result: ContractCallResult,
    pub paras_token_ids: Vec<String>,
    pub paras_sale_result: WorkflowResult,
    pub run_window: RunWindow,
}

pub struct Seeder<'a, C: ?Sized, H: ?Sized> {
    pub config: &'a SeedConfig,
    pub caller: &'a C,
    pub heights: &'a H,
    pub accounts: &'a AccountProvider,
}

impl<'a, C, H> Seeder<'a, C, H>
where
    C: ContractCaller + ?Sized,
    H: BlockHeightSource + ?Sized,
{
    /// Seed the network and persist the run window to `env_path`.
    pub async fn run(&self, env_path: &Path) -> Result<SeedReport> {
        let contracts = &self.config.contracts;
        let start_block_height = self
            .heights
            .final_block_height()
            .await
            .context("get start block height")?;
        tracing::info!("Seeding from block {}", start_block_height);

        let alice = self.accounts.load(&self.config.accounts.alice).await?;
        let bob = self.accounts.load(&self.config.accounts.bob).await?;
        let carol = self.accounts.load(&self.config.accounts.carol).await?;

        let minted_token_ids = mint_tokens(
            self.caller,
            &alice,
            SEED_TOKEN_COUNT,
            &contracts.store,
            DEFAULT_MINT_METHOD,
        )
        .await?;
        let (to_transfer, for_sale, to_burn) = match minted_token_ids.as_slice() {
            [a, b, c, ..] => (a.clone(), b.clone(), c.clone()),
            tokens => bail!(
                "expected {} minted tokens, got {:?}",
                SEED_TOKEN_COUNT,
                tokens
            ),
        };

        let transfer_result = simple_transfer(contracts, &alice, carol.account_id(), &to_transfer)?
            .run(self.caller)
            .await?;
        let sale_result = simple_list_and_sale(contracts, &alice, &bob, &for_sale)?
            .run(self.caller)
            .await?;
        let burn_result = simple_burn(contracts, &alice, &[to_burn], DEFAULT_BURN_METHOD)?
            .run(self.caller)
            .await?;

        let paras_series_result = create_series(
            self.caller,
            &alice,
            &contracts.paras_token,
            &[alice.account_id(), bob.account_id()],
        )
        .await?;
        let paras_token_ids = mint_from_series(
            self.caller,
            &alice,
            bob.account_id(),
            &contracts.paras_token,
            &contracts.paras_series_id,
        )
        .await?;
        let paras_token = paras_token_ids
            .first()
            .context("no paras token minted")?;
        let paras_sale_result = paras_list_and_sale(contracts, &bob, &carol, paras_token)?
            .run(self.caller)
            .await?;

        let observed_stop = self
            .heights
            .final_block_height()
            .await
            .context("get stop block height")?;
        let run_window = RunWindow::new(
            start_block_height,
            observed_stop,
            self.config.run.stop_height_margin,
        );
        run_window
            .persist(env_path)
            .with_context(|| format!("persist run window to {}", env_path.display()))?;
        tracing::info!(
            "Seeded blocks {}..{} (observed stop {})",
            run_window.start_block_height,
            run_window.stop_block_height,
            run_window.observed_stop_block_height
        );

        Ok(SeedReport {
            minted_token_ids,
            transfer_result,
            sale_result,
            burn_result,
            paras_series_result,
            paras_token_ids,
            paras_sale_result,
            run_window,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        account::KeyStore,
        testing::{mint_event_log, FixedHeights, MemorySecretStore, RecordingCaller},
    };
    use seed_types::{AccountId, KeyType, SecretKey};

    fn accounts(config: &SeedConfig) -> AccountProvider {
        let key =
            |account_id: &AccountId| SecretKey::from_seed(KeyType::ED25519, account_id.as_str());
        let secrets = MemorySecretStore::default()
            .with_key(&config.accounts.alice, &key(&config.accounts.alice))
            .with_key(&config.accounts.bob, &key(&config.accounts.bob))
            .with_key(&config.accounts.carol, &key(&config.accounts.carol));
        AccountProvider::new(
            config.network.network_id.clone(),
            KeyStore::in_memory(),
            Box::new(secrets),
        )
    }

    #[test]
    fn test_run_window_margin() {
        let window = RunWindow::new(100, 140, 5);
        assert_eq!(window.stop_block_height, 145);
        assert_eq!(window.observed_stop_block_height, 140);
        assert_eq!(RunWindow::new(1, u64::MAX, 5).stop_block_height, u64::MAX);
    }

    #[tokio::test]
    async fn test_seed_run() {
        let dir = tempfile::tempdir().unwrap();
        let env_path = dir.path().join(".env");
        std::fs::write(&env_path, "NETWORK='testnet'\nSTART_BLOCK_HEIGHT='1'\n").unwrap();

        let config = SeedConfig::default();
        let accounts = accounts(&config);
        let caller = RecordingCaller::default()
            .respond("nft_batch_mint", vec![mint_event_log(&["1", "2", "3"])])
            .respond("nft_mint", vec![mint_event_log(&["2192:7"])]);
        let heights = FixedHeights::new(vec![1000, 1040]);

        let seeder = Seeder {
            config: &config,
            caller: &caller,
            heights: &heights,
            accounts: &accounts,
        };
        let report = seeder.run(&env_path).await.unwrap();

        assert_eq!(
            caller.methods(),
            vec![
                "nft_batch_mint",
                "nft_transfer",
                "deposit_storage",
                "nft_approve",
                "buy",
                "nft_batch_burn",
                "nft_create_series",
                "nft_mint",
                "deposit_storage",
                "nft_approve",
                "buy",
            ]
        );
        let calls = caller.calls();
        assert_eq!(calls[1].args["token_id"], "1");
        assert_eq!(calls[3].args["token_id"], "2");
        assert_eq!(calls[5].args["token_ids"][0], "3");
        assert_eq!(calls[7].args["token_series_id"], "2192");
        assert_eq!(calls[9].args["token_id"], "2192:7");
        assert_eq!(calls[9].signer, config.accounts.bob);
        assert_eq!(calls[10].signer, config.accounts.carol);

        assert_eq!(report.run_window, RunWindow::new(1000, 1040, 5));
        assert_eq!(
            std::fs::read_to_string(&env_path).unwrap(),
            "NETWORK='testnet'\nSTART_BLOCK_HEIGHT='1000'\nSTOP_BLOCK_HEIGHT='1045'\n"
        );

        let json = serde_json::to_value(&report).unwrap();
        assert!(json["transfer_result"]["transfer"].is_object());
        assert!(json["sale_result"]["purchase"].is_object());
        assert_eq!(json["run_window"]["stop_block_height"], 1045);
    }

    #[tokio::test]
    async fn test_seed_run_aborts_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let env_path = dir.path().join(".env");

        let config = SeedConfig::default();
        let accounts = accounts(&config);
        let caller = RecordingCaller::default()
            .respond("nft_batch_mint", vec![mint_event_log(&["1", "2", "3"])])
            .fail_on("buy");
        let heights = FixedHeights::new(vec![10]);

        let seeder = Seeder {
            config: &config,
            caller: &caller,
            heights: &heights,
            accounts: &accounts,
        };
        assert!(seeder.run(&env_path).await.is_err());
        assert_eq!(caller.methods().last().map(String::as_str), Some("buy"));
        assert!(!env_path.exists());
    }

    #[tokio::test]
    async fn test_seed_run_needs_three_tokens() {
        let dir = tempfile::tempdir().unwrap();
        let config = SeedConfig::default();
        let accounts = accounts(&config);
        let caller =
            RecordingCaller::default().respond("nft_batch_mint", vec![mint_event_log(&["1"])]);
        let heights = FixedHeights::new(vec![10]);

        let seeder = Seeder {
            config: &config,
            caller: &caller,
            heights: &heights,
            accounts: &accounts,
        };
        assert!(seeder.run(&dir.path().join(".env")).await.is_err());
        assert_eq!(caller.methods(), vec!["nft_batch_mint"]);
    }
}
