use near_primitives::{
    types::{BlockHeight, Finality},
    views::AccessKeyView,
};
use seed_types::{AccountId, CryptoHash, PublicKey};
use serde::{Deserialize, Serialize};

/// Params of `query` with `request_type: view_access_key`.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct ViewAccessKeyRequest {
    pub request_type: String,
    pub finality: Finality,
    pub account_id: AccountId,
    pub public_key: PublicKey,
}

impl ViewAccessKeyRequest {
    pub fn new(account_id: AccountId, public_key: PublicKey, finality: Finality) -> Self {
        ViewAccessKeyRequest {
            request_type: "view_access_key".to_owned(),
            finality,
            account_id,
            public_key,
        }
    }
}

/// `view_access_key` result: the key plus the block it was read at.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct AccessKeyQueryResponse {
    #[serde(flatten)]
    pub access_key: AccessKeyView,
    pub block_height: BlockHeight,
    pub block_hash: CryptoHash,
}

#[cfg(test)]
mod tests {
    use super::*;
    use near_primitives::views::AccessKeyPermissionView;

    #[test]
    fn test_view_access_key_request() {
        let public_key: PublicKey = "ed25519:11111111111111111111111111111111".parse().unwrap();
        let request = ViewAccessKeyRequest::new(
            "mb_alice.testnet".parse().unwrap(),
            public_key,
            Finality::None,
        );
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({
                "request_type": "view_access_key",
                "finality": "optimistic",
                "account_id": "mb_alice.testnet",
                "public_key": "ed25519:11111111111111111111111111111111"
            })
        );
    }

    #[test]
    fn test_access_key_response() {
        let response: AccessKeyQueryResponse = serde_json::from_value(serde_json::json!({
            "nonce": 85,
            "permission": "FullAccess",
            "block_height": 19884918,
            "block_hash": "11111111111111111111111111111111"
        }))
        .unwrap();
        assert_eq!(response.access_key.nonce, 85);
        assert_eq!(
            response.access_key.permission,
            AccessKeyPermissionView::FullAccess
        );
        assert_eq!(response.block_hash, CryptoHash::default());
    }
}
