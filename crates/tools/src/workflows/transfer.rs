use anyhow::Result;
use seed_config::ContractsConfig;
use seed_types::AccountId;

use super::{Workflow, SECURITY_DEPOSIT};
use crate::{
    account::Identity,
    calls::{ContractCall, ContractCallRequest, NftTransferArgs},
};

pub(super) fn transfer_request(
    store: &AccountId,
    token_id: &str,
    receiver: &AccountId,
) -> ContractCallRequest {
    let call = ContractCall::NftTransfer(NftTransferArgs {
        token_id: token_id.to_owned(),
        receiver_id: receiver.clone(),
    });
    ContractCallRequest::new(store.clone(), call).with_deposit(SECURITY_DEPOSIT)
}

pub fn simple_transfer(
    contracts: &ContractsConfig,
    from: &Identity,
    to: &AccountId,
    token_id: &str,
) -> Result<Workflow> {
    Workflow::new("simple_transfer").step(
        "transfer",
        from,
        transfer_request(&contracts.store, token_id, to),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{identity, RecordingCaller};
    use seed_types::NearToken;
    use serde_json::json;

    #[tokio::test]
    async fn test_simple_transfer() {
        let contracts = ContractsConfig::default();
        let alice = identity("mb_alice.testnet");
        let carol = identity("mb_carol.testnet");

        let caller = RecordingCaller::default();
        let result = simple_transfer(&contracts, &alice, carol.account_id(), "tokenA")
            .unwrap()
            .run(&caller)
            .await
            .unwrap();
        assert_eq!(result.step_names(), vec!["transfer"]);

        let calls = caller.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].signer, *alice.account_id());
        assert_eq!(calls[0].receiver, contracts.store);
        assert_eq!(calls[0].method, "nft_transfer");
        assert_eq!(calls[0].deposit, NearToken::from_yocto(1));
        assert_eq!(
            calls[0].args,
            json!({"token_id": "tokenA", "receiver_id": "mb_carol.testnet"})
        );
    }
}
