pub mod blocks;
pub mod events;
pub mod query;

pub use near_primitives::types::{BlockReference, Finality};
pub use near_primitives::views::{FinalExecutionOutcomeView, FinalExecutionStatus};
