mod args;
mod logs;

use std::{collections::HashMap, sync::Arc};

use anyhow::{Context, Result};
use async_trait::async_trait;
use near_primitives::errors::TxExecutionError;
use parking_lot::Mutex;
use seed_jsonrpc_types::{
    events::EventLog, FinalExecutionOutcomeView, FinalExecutionStatus, Finality,
};
use seed_rpc_client::NearRpcClient;
use seed_types::{
    sign_function_call, AccountId, CryptoHash, FunctionCall, Gas, NearToken, Nonce, PublicKey,
    MAX_GAS, ONE_NEAR,
};
use serde::Serialize;

use crate::account::Identity;

pub use args::*;
pub use logs::{extract_event_logs, LogParseError};

/// A signed call to one contract method.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContractCallRequest {
    pub receiver_id: AccountId,
    pub method_name: String,
    pub call: ContractCall,
    pub gas: Gas,
    pub deposit: Option<NearToken>,
}

impl ContractCallRequest {
    /// Defaults to the maximum gas and a 1 NEAR deposit.
    pub fn new(receiver_id: AccountId, call: ContractCall) -> Self {
        ContractCallRequest {
            receiver_id,
            method_name: call.method_name().to_owned(),
            call,
            gas: MAX_GAS,
            deposit: Some(NearToken::from_yocto(ONE_NEAR)),
        }
    }

    /// Call a method with the same arguments under another name.
    pub fn with_method_name<S: Into<String>>(mut self, method_name: S) -> Self {
        self.method_name = method_name.into();
        self
    }

    pub fn with_gas(mut self, gas: Gas) -> Self {
        self.gas = gas;
        self
    }

    pub fn with_deposit(mut self, deposit: NearToken) -> Self {
        self.deposit = Some(deposit);
        self
    }

    pub fn without_deposit(mut self) -> Self {
        self.deposit = None;
        self
    }

    pub fn attached_deposit(&self) -> NearToken {
        self.deposit.unwrap_or_default()
    }
}

#[derive(Debug, thiserror::Error)]
#[error("transaction {tx_hash} calling {contract}.{method} failed: {failure}")]
pub struct CallExecutionError {
    pub tx_hash: CryptoHash,
    pub contract: AccountId,
    pub method: String,
    pub failure: TxExecutionError,
}

/// Outcome of a successful call.
#[derive(Clone, Debug, Serialize)]
pub struct ContractCallResult {
    pub transaction_hash: CryptoHash,
    pub status: FinalExecutionStatus,
    pub logs: Vec<EventLog>,
    #[serde(skip)]
    pub outcome: FinalExecutionOutcomeView,
}

impl ContractCallResult {
    pub fn from_outcome(contract: &AccountId, method: &str, outcome: FinalExecutionOutcomeView) -> Self {
        // unparsable event logs are tolerated here and nowhere else
        let logs = match extract_event_logs(&outcome) {
            Ok(logs) => logs,
            Err(err) => {
                tracing::info!(
                    "Contract call {}.{} result produced no logs: {}",
                    contract,
                    method,
                    err
                );
                Vec::new()
            }
        };
        ContractCallResult {
            transaction_hash: outcome.transaction.hash,
            status: outcome.status.clone(),
            logs,
            outcome,
        }
    }
}

#[async_trait]
pub trait ContractCaller: Send + Sync {
    async fn call(
        &self,
        signer: &Identity,
        request: &ContractCallRequest,
    ) -> Result<ContractCallResult>;
}

/// Signs function call transactions and submits them to a NEAR node.
///
/// Nonces are tracked locally per access key: the first call of a key reads
/// its nonce from the node, later calls increment the cached value.
pub struct NearCaller {
    rpc: Arc<NearRpcClient>,
    nonces: Mutex<HashMap<(AccountId, PublicKey), Nonce>>,
}

impl NearCaller {
    pub fn new(rpc: Arc<NearRpcClient>) -> Self {
        NearCaller {
            rpc,
            nonces: Mutex::new(HashMap::new()),
        }
    }

    async fn next_nonce(&self, signer: &Identity) -> Result<Nonce> {
        let key = (signer.account_id().clone(), signer.public_key());
        let cached = self.nonces.lock().get_mut(&key).map(|nonce| {
            *nonce += 1;
            *nonce
        });
        if let Some(nonce) = cached {
            return Ok(nonce);
        }

        let access_key = self
            .rpc
            .view_access_key(&key.0, &key.1, Finality::None)
            .await
            .with_context(|| format!("view access key of {}", signer.account_id()))?;
        tracing::debug!(
            "access key {} of {} at nonce {}, block {}",
            key.1,
            key.0,
            access_key.access_key.nonce,
            access_key.block_height
        );
        // a concurrent call may have seeded the entry meanwhile
        let mut nonces = self.nonces.lock();
        let nonce = nonces.entry(key).or_insert(access_key.access_key.nonce);
        *nonce += 1;
        Ok(*nonce)
    }

    fn forget_nonce(&self, signer: &Identity) {
        self.nonces
            .lock()
            .remove(&(signer.account_id().clone(), signer.public_key()));
    }
}

#[async_trait]
impl ContractCaller for NearCaller {
    async fn call(
        &self,
        signer: &Identity,
        request: &ContractCallRequest,
    ) -> Result<ContractCallResult> {
        let args = request.call.to_json_bytes()?;
        tracing::info!(
            "{} calls {}.{}, deposit: {} NEAR",
            signer.account_id(),
            request.receiver_id,
            request.method_name,
            request.attached_deposit()
        );

        let nonce = self.next_nonce(signer).await?;
        let block_hash = self.rpc.block(Finality::Final).await?.header.hash;
        let signed = sign_function_call(
            signer.account_id().clone(),
            signer.secret_key(),
            request.receiver_id.clone(),
            nonce,
            block_hash,
            FunctionCall {
                method_name: request.method_name.clone(),
                args,
                gas: request.gas,
                deposit: request.attached_deposit(),
            },
        );
        let tx_hash = signed.get_hash();
        tracing::info!("tx hash: {}, nonce: {}", tx_hash, nonce);

        let outcome = match self.rpc.broadcast_tx_commit(&signed).await {
            Ok(outcome) => outcome,
            Err(err) => {
                // the node may not have seen this nonce, read it again next time
                self.forget_nonce(signer);
                return Err(err);
            }
        };
        if let FinalExecutionStatus::Failure(failure) = &outcome.status {
            return Err(CallExecutionError {
                tx_hash,
                contract: request.receiver_id.clone(),
                method: request.method_name.clone(),
                failure: failure.clone(),
            }
            .into());
        }
        Ok(ContractCallResult::from_outcome(
            &request.receiver_id,
            &request.method_name,
            outcome,
        ))
    }
}
