use seed_types::AccountIdRef;

pub const TESTNET_NETWORK_ID: &str = "testnet";
pub const TESTNET_RPC_URL: &str = "https://rpc.testnet.near.org";

pub const STORE_CONTRACT: &AccountIdRef = AccountIdRef::new_or_panic("mb_store.mintspace2.testnet");
pub const MARKET_CONTRACT: &AccountIdRef =
    AccountIdRef::new_or_panic("market-v2-beta.mintspace2.testnet");
pub const AUCTION_MARKET_CONTRACT: &AccountIdRef =
    AccountIdRef::new_or_panic("market.mintspace2.testnet");
pub const STORE_FACTORY_CONTRACT: &AccountIdRef = AccountIdRef::new_or_panic("mintspace2.testnet");
pub const PARAS_TOKEN_CONTRACT: &AccountIdRef =
    AccountIdRef::new_or_panic("paras-token-v2.testnet");
/// Pre-existing Paras series the seed run mints from.
pub const PARAS_TEST_SERIES_ID: &str = "2192";

pub const ALICE_ACCOUNT: &AccountIdRef = AccountIdRef::new_or_panic("mb_alice.testnet");
pub const BOB_ACCOUNT: &AccountIdRef = AccountIdRef::new_or_panic("mb_bob.testnet");
pub const CAROL_ACCOUNT: &AccountIdRef = AccountIdRef::new_or_panic("mb_carol.testnet");

/// GCP Secret Manager project prefix of the cast's credentials.
pub const SECRETS_REPO_PATH: &str = "projects/185858989453/secrets/";

pub const DEFAULT_ENV_PATH: &str = "../.env";
pub const DEFAULT_KEYS_DIR: &str = "./keys";
/// Blocks added to the observed stop height before it is persisted.
pub const DEFAULT_STOP_HEIGHT_MARGIN: u64 = 5;
