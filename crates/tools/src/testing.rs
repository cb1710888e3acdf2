use std::{
    collections::{HashMap, VecDeque},
    io,
    sync::{
        atomic::{AtomicU64, AtomicUsize, Ordering},
        Arc,
    },
};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use seed_jsonrpc_types::FinalExecutionOutcomeView;
use seed_types::{AccountId, Gas, KeyType, NearToken, SecretKey};
use serde_json::{json, Value};

use crate::{
    account::{Identity, SecretStore},
    calls::{ContractCallRequest, ContractCallResult, ContractCaller},
    seed::BlockHeightSource,
};

pub const ZERO_HASH: &str = "11111111111111111111111111111111";

/// A final outcome as returned by `broadcast_tx_commit`.
pub fn outcome_json(status: Value, receipts: Vec<Value>) -> Value {
    json!({
        "status": status,
        "transaction": {
            "signer_id": "mb_alice.testnet",
            "public_key": format!("ed25519:{}", ZERO_HASH),
            "nonce": 1,
            "receiver_id": "mb_store.mintspace2.testnet",
            "actions": [],
            "priority_fee": 0,
            "signature": format!("ed25519:{}", "1".repeat(64)),
            "hash": ZERO_HASH
        },
        "transaction_outcome": execution_json(
            "mb_alice.testnet",
            &[],
            json!({"SuccessReceiptId": ZERO_HASH})
        ),
        "receipts_outcome": receipts
    })
}

fn execution_json(executor_id: &str, logs: &[String], status: Value) -> Value {
    json!({
        "proof": [],
        "block_hash": ZERO_HASH,
        "id": ZERO_HASH,
        "outcome": {
            "logs": logs,
            "receipt_ids": [],
            "gas_burnt": 1,
            "tokens_burnt": "0",
            "executor_id": executor_id,
            "status": status,
            "metadata": {"version": 1, "gas_profile": null}
        }
    })
}

pub fn receipt_json(logs: &[String]) -> Value {
    execution_json(
        "mb_store.mintspace2.testnet",
        logs,
        json!({"SuccessValue": ""}),
    )
}

pub fn outcome_with_logs(logs: &[String]) -> FinalExecutionOutcomeView {
    let outcome = outcome_json(json!({"SuccessValue": ""}), vec![receipt_json(logs)]);
    serde_json::from_value(outcome).unwrap()
}

pub fn outcome_without_receipts() -> FinalExecutionOutcomeView {
    serde_json::from_value(outcome_json(json!({"SuccessValue": ""}), vec![])).unwrap()
}

pub fn mint_event_log(token_ids: &[&str]) -> String {
    format!(
        "EVENT_JSON:{}",
        json!({
            "standard": "nep171",
            "version": "1.0.0",
            "event": "nft_mint",
            "data": [{"owner_id": "mb_alice.testnet", "token_ids": token_ids}]
        })
    )
}

/// An identity whose key is derived from the account name.
pub fn identity(account_id: &str) -> Identity {
    Identity::new(
        account_id.parse().unwrap(),
        SecretKey::from_seed(KeyType::ED25519, account_id),
    )
}

/// Collects formatted log lines emitted inside `capture`.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn capture<T>(&self, f: impl FnOnce() -> T) -> T {
        let buffer = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || buffer.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, f)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A call seen by `RecordingCaller`.
#[derive(Clone, Debug)]
pub struct RecordedCall {
    pub signer: AccountId,
    pub receiver: AccountId,
    pub method: String,
    pub args: serde_json::Value,
    pub gas: Gas,
    pub deposit: NearToken,
}

/// Records calls and answers them with canned logs.
#[derive(Default)]
pub struct RecordingCaller {
    calls: Mutex<Vec<RecordedCall>>,
    logs: Mutex<HashMap<String, VecDeque<Vec<String>>>>,
    fail_on: Option<String>,
}

impl RecordingCaller {
    /// Answer the next call of `method` with `logs`.
    pub fn respond(self, method: &str, logs: Vec<String>) -> Self {
        self.logs
            .lock()
            .entry(method.to_owned())
            .or_default()
            .push_back(logs);
        self
    }

    pub fn fail_on(mut self, method: &str) -> Self {
        self.fail_on = Some(method.to_owned());
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    pub fn methods(&self) -> Vec<String> {
        self.calls.lock().iter().map(|c| c.method.clone()).collect()
    }
}

#[async_trait]
impl ContractCaller for RecordingCaller {
    async fn call(
        &self,
        signer: &Identity,
        request: &ContractCallRequest,
    ) -> Result<ContractCallResult> {
        self.calls.lock().push(RecordedCall {
            signer: signer.account_id().clone(),
            receiver: request.receiver_id.clone(),
            method: request.method_name.clone(),
            args: serde_json::from_slice(&request.call.to_json_bytes()?)?,
            gas: request.gas,
            deposit: request.attached_deposit(),
        });
        if self.fail_on.as_deref() == Some(request.method_name.as_str()) {
            return Err(anyhow!("{} execution failed", request.method_name));
        }
        let logs = self
            .logs
            .lock()
            .get_mut(&request.method_name)
            .and_then(VecDeque::pop_front)
            .unwrap_or_default();
        Ok(ContractCallResult::from_outcome(
            &request.receiver_id,
            &request.method_name,
            outcome_with_logs(&logs),
        ))
    }
}

#[derive(Default)]
pub struct MemorySecretStore {
    keys: HashMap<AccountId, String>,
    fetches: Arc<AtomicUsize>,
}

impl MemorySecretStore {
    pub fn with_key(self, account_id: &AccountId, secret_key: &SecretKey) -> Self {
        self.with_raw(account_id, &secret_key.to_string())
    }

    pub fn with_raw(mut self, account_id: &AccountId, private_key: &str) -> Self {
        self.keys.insert(account_id.clone(), private_key.to_owned());
        self
    }

    pub fn fetches(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.fetches)
    }
}

#[async_trait]
impl SecretStore for MemorySecretStore {
    async fn private_key(&self, account_id: &AccountId) -> Result<String> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.keys
            .get(account_id)
            .cloned()
            .ok_or_else(|| anyhow!("no secret for {}", account_id))
    }
}

/// Heights returned in order, the last one repeating.
pub struct FixedHeights {
    heights: Vec<u64>,
    next: AtomicU64,
}

impl FixedHeights {
    pub fn new(heights: Vec<u64>) -> Self {
        FixedHeights {
            heights,
            next: AtomicU64::new(0),
        }
    }
}

#[async_trait]
impl BlockHeightSource for FixedHeights {
    async fn final_block_height(&self) -> Result<u64> {
        let index = self.next.fetch_add(1, Ordering::SeqCst) as usize;
        self.heights
            .get(index)
            .or_else(|| self.heights.last())
            .copied()
            .ok_or_else(|| anyhow!("no height"))
    }
}
