use near_primitives::types::BlockHeight;
use seed_types::CryptoHash;
use serde::{Deserialize, Serialize};

/// Header fields of a `block` result read by the seeder.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct BlockHeaderView {
    pub height: BlockHeight,
    pub hash: CryptoHash,
    pub prev_hash: CryptoHash,
    #[serde(default)]
    pub timestamp: u64,
}

#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct BlockView {
    pub header: BlockHeaderView,
}
