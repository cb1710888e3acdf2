pub mod error;
pub mod near_client;

pub use near_client::NearRpcClient;
