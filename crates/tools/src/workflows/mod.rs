//! Marketplace scenarios run against the store, markets and Paras.

mod auction;
mod burn;
mod pipeline;
mod sale;
mod transfer;

use seed_types::{NearToken, ONE_YOCTO};

pub use auction::auction_list_offer_take;
pub use burn::{simple_burn, DEFAULT_BURN_METHOD};
pub use pipeline::{Step, Workflow, WorkflowResult};
pub use sale::{list_then_transfer_to_invalidate, paras_list_and_sale, simple_list_and_sale};
pub use transfer::simple_transfer;

pub const LIST_PRICE: NearToken = NearToken::from_milli(500);
pub const BUY_DEPOSIT: NearToken = NearToken::from_milli(600);
pub const STORAGE_DEPOSIT: NearToken = NearToken::from_milli(10);
pub const APPROVE_DEPOSIT: NearToken = NearToken::from_milli(8);
/// Attached to calls that require proof of a full access key.
pub const SECURITY_DEPOSIT: NearToken = NearToken::from_yocto(ONE_YOCTO);

pub const AUCTION_LIST_PRICE: NearToken = NearToken::from_milli(100);
pub const FIRST_OFFER_PRICE: NearToken = NearToken::from_milli(110);
pub const OFFER_PRICE: NearToken = NearToken::from_milli(123);
pub const OFFER_TIMEOUT_HOURS: u64 = 24;
