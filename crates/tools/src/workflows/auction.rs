use anyhow::Result;
use seed_config::ContractsConfig;
use seed_types::NearToken;

use super::{
    Workflow, APPROVE_DEPOSIT, AUCTION_LIST_PRICE, FIRST_OFFER_PRICE, OFFER_PRICE,
    OFFER_TIMEOUT_HOURS, SECURITY_DEPOSIT,
};
use crate::{
    account::Identity,
    calls::{
        token_key, AcceptAndTransferArgs, ContractCall, ContractCallRequest, ListingTerms,
        MakeOfferArgs, NftApproveArgs, OfferTimeout,
    },
};

fn offer_request(contracts: &ContractsConfig, token_id: &str, price: NearToken) -> ContractCallRequest {
    let call = ContractCall::MakeOffer(MakeOfferArgs {
        nft_contract_id: contracts.store.clone(),
        token_key: vec![token_key(token_id, &contracts.store)],
        price: vec![price],
        timeout: vec![OfferTimeout::Hours(OFFER_TIMEOUT_HOURS)],
    });
    ContractCallRequest::new(contracts.auction_market.clone(), call).with_deposit(price)
}

/// List on the auction market, receive two offers, accept the best one.
pub fn auction_list_offer_take(
    contracts: &ContractsConfig,
    lister: &Identity,
    buyer: &Identity,
    first_bidder: &Identity,
    token_id: &str,
) -> Result<Workflow> {
    let terms = ListingTerms {
        price: AUCTION_LIST_PRICE,
        autotransfer: Some(false),
    };
    let approve = ContractCallRequest::new(
        contracts.store.clone(),
        ContractCall::NftApprove(NftApproveArgs::listing(
            contracts.auction_market.clone(),
            token_id.to_owned(),
            &terms,
        )?),
    )
    .with_deposit(APPROVE_DEPOSIT);

    let take = ContractCallRequest::new(
        contracts.auction_market.clone(),
        ContractCall::AcceptAndTransfer(AcceptAndTransferArgs {
            token_key: token_key(token_id, &contracts.store),
        }),
    )
    .with_deposit(SECURITY_DEPOSIT);

    Workflow::new("auction_list_offer_take")
        .step("approve", lister, approve)?
        .step(
            "first_offer",
            first_bidder,
            offer_request(contracts, token_id, FIRST_OFFER_PRICE),
        )?
        .step("offer", buyer, offer_request(contracts, token_id, OFFER_PRICE))?
        .step("take", lister, take)
}
