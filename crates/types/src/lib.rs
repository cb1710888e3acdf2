pub mod token;
pub mod transaction;

pub use near_account_id::{AccountId, AccountIdRef, ParseAccountError};
pub use near_crypto::{KeyType, PublicKey, SecretKey, Signature};
pub use near_primitives::{hash::CryptoHash, transaction::SignedTransaction, types::Nonce};
pub use token::{Gas, NearToken, ParseTokenError, DEFAULT_GAS, MAX_GAS, ONE_NEAR, ONE_YOCTO, TGAS};
pub use transaction::{sign_function_call, FunctionCall};
