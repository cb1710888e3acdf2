use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use jsonrpc_core::response::Output;
use seed_jsonrpc_types::{
    blocks::BlockView,
    query::{AccessKeyQueryResponse, ViewAccessKeyRequest},
    BlockReference, FinalExecutionOutcomeView, Finality,
};
use seed_types::{AccountId, PublicKey, SignedTransaction};
use serde::de::DeserializeOwned;
use tracing::{field, instrument, Span};

use crate::error::RPCRequestError;

const CLIENT_NAME: &str = "near client";

/// Async JSON-RPC client of a NEAR node.
///
/// Requests carry no local timeout: `broadcast_tx_commit` blocks until the
/// node reports a final outcome.
pub struct NearRpcClient {
    url: reqwest::Url,
    client: reqwest::Client,
    id: AtomicU64,
}

impl NearRpcClient {
    pub fn with_url(url: &str) -> Result<Self> {
        let url = reqwest::Url::parse(url).with_context(|| {
            format!(
                "near rpc url, e.g. \"https://rpc.testnet.near.org\", got {:?}",
                url
            )
        })?;
        Ok(NearRpcClient {
            url,
            client: reqwest::Client::new(),
            id: AtomicU64::new(0),
        })
    }

    pub fn url(&self) -> &reqwest::Url {
        &self.url
    }

    pub async fn block(&self, finality: Finality) -> Result<BlockView> {
        let params = serde_json::to_value(BlockReference::Finality(finality))?;
        self.request("block", params).await
    }

    pub async fn final_block_height(&self) -> Result<u64> {
        let block = self.block(Finality::Final).await?;
        Ok(block.header.height)
    }

    pub async fn view_access_key(
        &self,
        account_id: &AccountId,
        public_key: &PublicKey,
        finality: Finality,
    ) -> Result<AccessKeyQueryResponse> {
        let params = serde_json::to_value(ViewAccessKeyRequest::new(
            account_id.clone(),
            public_key.clone(),
            finality,
        ))?;
        self.request("query", params).await
    }

    /// Submit a signed transaction and wait for its final outcome.
    pub async fn broadcast_tx_commit(
        &self,
        tx: &SignedTransaction,
    ) -> Result<FinalExecutionOutcomeView> {
        let bytes = borsh::to_vec(tx)?;
        let params = serde_json::json!([BASE64.encode(bytes)]);
        self.request("broadcast_tx_commit", params).await
    }

    #[instrument(target = "seed-rpc-client", skip_all, err, fields(method = field::Empty))]
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<T> {
        Span::current().record("method", method);

        let id = self.id.fetch_add(1, Ordering::Relaxed) + 1;
        let mut req_json = serde_json::Map::new();
        req_json.insert("id".to_owned(), id.into());
        req_json.insert("jsonrpc".to_owned(), "2.0".into());
        req_json.insert("method".to_owned(), method.into());
        req_json.insert("params".to_owned(), params);

        let output = self
            .send(&req_json)
            .await
            .map_err(|err| RPCRequestError::new(CLIENT_NAME, method, err))?;
        match output {
            Output::Success(success) => {
                let result_str = success.result.to_string();
                serde_json::from_value(success.result).map_err(|err| {
                    tracing::error!(
                        "[near-client] Failed to parse response, method: {}, response: {}",
                        method,
                        result_str
                    );
                    RPCRequestError::new(CLIENT_NAME, method, err).into()
                })
            }
            Output::Failure(failure) => {
                Err(RPCRequestError::new(CLIENT_NAME, method, failure.error).into())
            }
        }
    }

    async fn send(&self, req_json: &serde_json::Map<String, serde_json::Value>) -> Result<Output> {
        let resp = self
            .client
            .post(self.url.clone())
            .json(req_json)
            .send()
            .await?;
        Ok(resp.json::<Output>().await?)
    }
}
