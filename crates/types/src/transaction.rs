use near_crypto::SecretKey;
use near_primitives::{
    hash::CryptoHash,
    transaction::{Action, FunctionCallAction, SignedTransaction, Transaction, TransactionV0},
    types::{AccountId, Gas, Nonce},
};

use crate::NearToken;

/// A single contract method invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionCall {
    pub method_name: String,
    /// JSON encoded arguments
    pub args: Vec<u8>,
    pub gas: Gas,
    pub deposit: NearToken,
}

/// Build a one action transaction calling `call` on `receiver_id` and sign it
/// with `secret_key`.
///
/// `block_hash` must be a recent block, and `nonce` must be greater than the
/// access key's current nonce.
pub fn sign_function_call(
    signer_id: AccountId,
    secret_key: &SecretKey,
    receiver_id: AccountId,
    nonce: Nonce,
    block_hash: CryptoHash,
    call: FunctionCall,
) -> SignedTransaction {
    let transaction = Transaction::V0(TransactionV0 {
        signer_id,
        public_key: secret_key.public_key(),
        nonce,
        receiver_id,
        block_hash,
        actions: vec![Action::FunctionCall(Box::new(FunctionCallAction {
            method_name: call.method_name,
            args: call.args,
            gas: call.gas,
            deposit: call.deposit.as_yocto(),
        }))],
    });
    let (hash, _size) = transaction.get_hash_and_size();
    let signature = secret_key.sign(hash.as_ref());
    SignedTransaction::new(signature, transaction)
}
