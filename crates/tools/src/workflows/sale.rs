use anyhow::Result;
use seed_config::ContractsConfig;
use seed_types::AccountId;

use super::{
    transfer::transfer_request, Workflow, APPROVE_DEPOSIT, BUY_DEPOSIT, LIST_PRICE,
    STORAGE_DEPOSIT,
};
use crate::{
    account::Identity,
    calls::{
        BuyArgs, ContractCall, ContractCallRequest, DepositStorageArgs, ListingTerms,
        NftApproveArgs,
    },
};

/// `deposit` then `approve`: list `token_id` of `nft_contract` on the market.
fn list_on_market(
    name: &'static str,
    market: &AccountId,
    nft_contract: &AccountId,
    lister: &Identity,
    token_id: &str,
) -> Result<Workflow> {
    let deposit = ContractCallRequest::new(
        market.clone(),
        ContractCall::DepositStorage(DepositStorageArgs {}),
    )
    .with_deposit(STORAGE_DEPOSIT);

    let terms = ListingTerms {
        price: LIST_PRICE,
        autotransfer: None,
    };
    let approve = ContractCallRequest::new(
        nft_contract.clone(),
        ContractCall::NftApprove(NftApproveArgs::listing(
            market.clone(),
            token_id.to_owned(),
            &terms,
        )?),
    )
    .with_deposit(APPROVE_DEPOSIT);

    Workflow::new(name)
        .step("deposit", lister, deposit)?
        .step("approve", lister, approve)
}

fn buy_request(market: &AccountId, nft_contract: &AccountId, token_id: &str) -> ContractCallRequest {
    let call = ContractCall::Buy(BuyArgs {
        nft_contract_id: nft_contract.clone(),
        token_id: token_id.to_owned(),
    });
    ContractCallRequest::new(market.clone(), call).with_deposit(BUY_DEPOSIT)
}

pub fn simple_list_and_sale(
    contracts: &ContractsConfig,
    lister: &Identity,
    buyer: &Identity,
    token_id: &str,
) -> Result<Workflow> {
    list_on_market(
        "simple_list_and_sale",
        &contracts.market,
        &contracts.store,
        lister,
        token_id,
    )?
    .step(
        "purchase",
        buyer,
        buy_request(&contracts.market, &contracts.store, token_id),
    )
}

/// Same as `simple_list_and_sale` with a Paras token.
pub fn paras_list_and_sale(
    contracts: &ContractsConfig,
    lister: &Identity,
    buyer: &Identity,
    token_id: &str,
) -> Result<Workflow> {
    list_on_market(
        "paras_list_and_sale",
        &contracts.market,
        &contracts.paras_token,
        lister,
        token_id,
    )?
    .step(
        "purchase",
        buyer,
        buy_request(&contracts.market, &contracts.paras_token, token_id),
    )
}

/// List a token, then transfer it away so the listing goes stale.
pub fn list_then_transfer_to_invalidate(
    contracts: &ContractsConfig,
    lister: &Identity,
    receiver: &AccountId,
    token_id: &str,
) -> Result<Workflow> {
    list_on_market(
        "list_then_transfer_to_invalidate",
        &contracts.market,
        &contracts.store,
        lister,
        token_id,
    )?
    .step(
        "transfer",
        lister,
        transfer_request(&contracts.store, token_id, receiver),
    )
}
