use anyhow::{Context, Result};
use seed_types::{AccountId, NearToken};

use crate::{
    account::Identity,
    calls::{
        ContractCall, ContractCallRequest, ContractCallResult, ContractCaller,
        NftCreateSeriesArgs, NftMintArgs, TokenMetadata,
    },
    nft::first_token_ids,
};

pub const TEST_SERIES_TITLE: &str = "ParasInteropTestSeries";
pub const TEST_SERIES_MEDIA: &str = "bafkreiadpfvtdi6lzw3nvmlyeyfb6gupharljjkbqtzef3wei6n4rp4o3u";
pub const TEST_SERIES_REFERENCE: &str =
    "bafkreictzt62nt4ba3awdpl4ypyozoqrmspjnmuoindlzpocvnw2ibgugi";
pub const TEST_SERIES_COPIES: u64 = 100;
/// Royalty of each receiver, in basis points.
pub const TEST_SERIES_ROYALTY: u32 = 1000;

pub const CREATE_SERIES_DEPOSIT: NearToken = NearToken::from_near(5);
pub const MINT_FROM_SERIES_DEPOSIT: NearToken = NearToken::from_milli(90);

pub async fn create_series<C: ContractCaller + ?Sized>(
    caller: &C,
    creator: &Identity,
    paras_token: &AccountId,
    royalty_receivers: &[&AccountId],
) -> Result<ContractCallResult> {
    let call = ContractCall::NftCreateSeries(NftCreateSeriesArgs {
        creator_id: creator.account_id().clone(),
        token_metadata: TokenMetadata {
            title: Some(TEST_SERIES_TITLE.to_owned()),
            media: Some(TEST_SERIES_MEDIA.to_owned()),
            reference: Some(TEST_SERIES_REFERENCE.to_owned()),
            copies: Some(TEST_SERIES_COPIES),
        },
        price: None,
        royalty: royalty_receivers
            .iter()
            .map(|receiver| ((*receiver).clone(), TEST_SERIES_ROYALTY))
            .collect(),
    });
    let request =
        ContractCallRequest::new(paras_token.clone(), call).with_deposit(CREATE_SERIES_DEPOSIT);
    caller.call(creator, &request).await
}

/// Mint a token of `series_id` to `owner`, returning the minted ids.
pub async fn mint_from_series<C: ContractCaller + ?Sized>(
    caller: &C,
    minter: &Identity,
    owner: &AccountId,
    paras_token: &AccountId,
    series_id: &str,
) -> Result<Vec<String>> {
    let call = ContractCall::NftMint(NftMintArgs {
        token_series_id: series_id.to_owned(),
        receiver_id: owner.clone(),
    });
    let request =
        ContractCallRequest::new(paras_token.clone(), call).with_deposit(MINT_FROM_SERIES_DEPOSIT);
    let result = caller.call(minter, &request).await?;
    let token_ids = first_token_ids(&result.logs)
        .with_context(|| format!("mint from series {} on {}", series_id, paras_token))?;
    tracing::info!("Minted paras tokens {:?} for {}", token_ids, owner);
    Ok(token_ids)
}
