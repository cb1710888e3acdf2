use anyhow::Result;
use seed_config::ContractsConfig;

use super::{Workflow, SECURITY_DEPOSIT};
use crate::{
    account::Identity,
    calls::{ContractCall, ContractCallRequest, NftBatchBurnArgs},
};

pub const DEFAULT_BURN_METHOD: &str = "nft_batch_burn";

pub fn simple_burn(
    contracts: &ContractsConfig,
    owner: &Identity,
    token_ids: &[String],
    method: &str,
) -> Result<Workflow> {
    let call = ContractCall::NftBatchBurn(NftBatchBurnArgs {
        token_ids: token_ids.to_vec(),
    });
    Workflow::new("simple_burn").step(
        "burn",
        owner,
        ContractCallRequest::new(contracts.store.clone(), call)
            .with_method_name(method)
            .with_deposit(SECURITY_DEPOSIT),
    )
}
