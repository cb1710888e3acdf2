pub mod account;
pub mod calls;
pub mod context;
pub mod nft;
pub mod paras;
pub mod seed;
pub mod subcommand;
pub mod trace;
pub mod workflows;

#[cfg(test)]
mod testing;
