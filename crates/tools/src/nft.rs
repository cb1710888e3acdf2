use anyhow::{anyhow, ensure, Context, Result};
use seed_jsonrpc_types::events::EventLog;
use seed_types::{AccountId, NearToken, DEFAULT_GAS};

use crate::{
    account::Identity,
    calls::{
        ContractCall, ContractCallRequest, ContractCallResult, ContractCaller, CreateStoreArgs,
        NftBatchMintArgs, StoreMetadata, TokenMetadata,
    },
};

pub const DEFAULT_MINT_METHOD: &str = "nft_batch_mint";
pub const TEST_MINT_TITLE: &str = "Test NFT Mint";
pub const TEST_MINT_REFERENCE: &str = "4XKmOs3BhcqRGAFX3aZ2z44g9s6DySudzAOA4pVvRYY";

pub const STORE_SPEC: &str = "nft-1.0.0";
pub const TEST_STORE_SYMBOL: &str = "TEST";
/// Storage staked by the factory for a new store contract.
pub const STORE_DEPLOY_DEPOSIT: NearToken = NearToken::from_near(7);

/// Token ids of the first data entry of the first event.
pub fn first_token_ids(logs: &[EventLog]) -> Result<Vec<String>> {
    let event = logs.first().ok_or_else(|| anyhow!("no event logs"))?;
    let data = event
        .data
        .first()
        .ok_or_else(|| anyhow!("event {} has no data", event.event))?;
    ensure!(
        !data.token_ids.is_empty(),
        "event {} has no token ids",
        event.event
    );
    Ok(data.token_ids.clone())
}

/// Mint `count` test tokens owned by `owner`, returning their ids.
pub async fn mint_tokens<C: ContractCaller + ?Sized>(
    caller: &C,
    owner: &Identity,
    count: u64,
    contract: &AccountId,
    method: &str,
) -> Result<Vec<String>> {
    let call = ContractCall::NftBatchMint(NftBatchMintArgs {
        owner_id: owner.account_id().clone(),
        metadata: TokenMetadata {
            title: Some(TEST_MINT_TITLE.to_owned()),
            reference: Some(TEST_MINT_REFERENCE.to_owned()),
            ..Default::default()
        },
        num_to_mint: count,
    });
    let request = ContractCallRequest::new(contract.clone(), call).with_method_name(method);
    let result = caller.call(owner, &request).await?;
    let token_ids = first_token_ids(&result.logs)
        .with_context(|| format!("mint {} tokens on {}", count, contract))?;
    tracing::info!("Minted tokens {:?} for {}", token_ids, owner.account_id());
    Ok(token_ids)
}

/// Deploy a new store owned by `owner` through the store factory.
pub async fn deploy_store<C: ContractCaller + ?Sized>(
    caller: &C,
    owner: &Identity,
    factory: &AccountId,
    name: &str,
) -> Result<ContractCallResult> {
    let call = ContractCall::CreateStore(CreateStoreArgs {
        owner_id: owner.account_id().clone(),
        metadata: StoreMetadata {
            spec: STORE_SPEC.to_owned(),
            name: name.to_owned(),
            symbol: TEST_STORE_SYMBOL.to_owned(),
        },
    });
    let request = ContractCallRequest::new(factory.clone(), call)
        .with_gas(DEFAULT_GAS)
        .with_deposit(STORE_DEPLOY_DEPOSIT);
    caller.call(owner, &request).await
}
