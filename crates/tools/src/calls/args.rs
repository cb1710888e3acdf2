use std::collections::BTreeMap;

use seed_types::{AccountId, NearToken};
use serde::Serialize;

/// A contract method call with its typed arguments.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ContractCall {
    NftBatchMint(NftBatchMintArgs),
    NftTransfer(NftTransferArgs),
    NftBatchBurn(NftBatchBurnArgs),
    NftApprove(NftApproveArgs),
    DepositStorage(DepositStorageArgs),
    Buy(BuyArgs),
    MakeOffer(MakeOfferArgs),
    AcceptAndTransfer(AcceptAndTransferArgs),
    NftCreateSeries(NftCreateSeriesArgs),
    NftMint(NftMintArgs),
    CreateStore(CreateStoreArgs),
}

impl ContractCall {
    pub fn method_name(&self) -> &'static str {
        match self {
            ContractCall::NftBatchMint(_) => "nft_batch_mint",
            ContractCall::NftTransfer(_) => "nft_transfer",
            ContractCall::NftBatchBurn(_) => "nft_batch_burn",
            ContractCall::NftApprove(_) => "nft_approve",
            ContractCall::DepositStorage(_) => "deposit_storage",
            ContractCall::Buy(_) => "buy",
            ContractCall::MakeOffer(_) => "make_offer",
            ContractCall::AcceptAndTransfer(_) => "accept_and_transfer",
            ContractCall::NftCreateSeries(_) => "nft_create_series",
            ContractCall::NftMint(_) => "nft_mint",
            ContractCall::CreateStore(_) => "create_store",
        }
    }

    /// JSON encoded arguments.
    pub fn to_json_bytes(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TokenMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copies: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NftBatchMintArgs {
    pub owner_id: AccountId,
    pub metadata: TokenMetadata,
    pub num_to_mint: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NftTransferArgs {
    pub token_id: String,
    pub receiver_id: AccountId,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NftBatchBurnArgs {
    pub token_ids: Vec<String>,
}

/// Sale terms handed to a market through `nft_approve`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ListingTerms {
    pub price: NearToken,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autotransfer: Option<bool>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NftApproveArgs {
    pub account_id: AccountId,
    pub token_id: String,
    /// JSON encoded `ListingTerms`
    pub msg: String,
}

impl NftApproveArgs {
    pub fn listing(
        market: AccountId,
        token_id: String,
        terms: &ListingTerms,
    ) -> serde_json::Result<Self> {
        Ok(NftApproveArgs {
            account_id: market,
            token_id,
            msg: serde_json::to_string(terms)?,
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DepositStorageArgs {}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BuyArgs {
    pub nft_contract_id: AccountId,
    pub token_id: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum OfferTimeout {
    Hours(u64),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MakeOfferArgs {
    pub nft_contract_id: AccountId,
    pub token_key: Vec<String>,
    pub price: Vec<NearToken>,
    pub timeout: Vec<OfferTimeout>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AcceptAndTransferArgs {
    pub token_key: String,
}

/// `<token_id>:<nft contract>`, how the auction market names a token.
pub fn token_key(token_id: &str, nft_contract: &AccountId) -> String {
    format!("{}:{}", token_id, nft_contract)
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NftCreateSeriesArgs {
    pub creator_id: AccountId,
    pub token_metadata: TokenMetadata,
    pub price: Option<NearToken>,
    /// Basis points per receiver
    pub royalty: BTreeMap<AccountId, u32>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NftMintArgs {
    pub token_series_id: String,
    pub receiver_id: AccountId,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StoreMetadata {
    pub spec: String,
    pub name: String,
    pub symbol: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CreateStoreArgs {
    pub owner_id: AccountId,
    pub metadata: StoreMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args_json(call: &ContractCall) -> serde_json::Value {
        serde_json::from_slice(&call.to_json_bytes().unwrap()).unwrap()
    }

    #[test]
    fn test_listing_msg() {
        let args = NftApproveArgs::listing(
            "market.mintspace2.testnet".parse().unwrap(),
            "7".to_owned(),
            &ListingTerms {
                price: NearToken::from_milli(100),
                autotransfer: Some(false),
            },
        )
        .unwrap();
        assert_eq!(
            args.msg,
            r#"{"price":"100000000000000000000000","autotransfer":false}"#
        );

        let plain = serde_json::to_string(&ListingTerms {
            price: NearToken::from_milli(500),
            autotransfer: None,
        })
        .unwrap();
        assert_eq!(plain, r#"{"price":"500000000000000000000000"}"#);
    }

    #[test]
    fn test_args_shape() {
        let store: AccountId = "mb_store.mintspace2.testnet".parse().unwrap();
        let offer = ContractCall::MakeOffer(MakeOfferArgs {
            nft_contract_id: store.clone(),
            token_key: vec![token_key("7", &store)],
            price: vec![NearToken::from_milli(110)],
            timeout: vec![OfferTimeout::Hours(24)],
        });
        assert_eq!(offer.method_name(), "make_offer");
        assert_eq!(
            args_json(&offer),
            json!({
                "nft_contract_id": "mb_store.mintspace2.testnet",
                "token_key": ["7:mb_store.mintspace2.testnet"],
                "price": ["110000000000000000000000"],
                "timeout": [{"Hours": 24}]
            })
        );

        let deposit = ContractCall::DepositStorage(DepositStorageArgs {});
        assert_eq!(args_json(&deposit), json!({}));

        let alice: AccountId = "mb_alice.testnet".parse().unwrap();
        let bob: AccountId = "mb_bob.testnet".parse().unwrap();
        let series = ContractCall::NftCreateSeries(NftCreateSeriesArgs {
            creator_id: alice.clone(),
            token_metadata: TokenMetadata {
                title: Some("series".to_owned()),
                copies: Some(100),
                ..Default::default()
            },
            price: None,
            royalty: [(alice, 1000), (bob, 1000)].into_iter().collect(),
        });
        assert_eq!(
            args_json(&series),
            json!({
                "creator_id": "mb_alice.testnet",
                "token_metadata": {"title": "series", "copies": 100},
                "price": null,
                "royalty": {"mb_alice.testnet": 1000, "mb_bob.testnet": 1000}
            })
        );
    }
}
