//! Constants used in the deployment scripts

use std::time::Duration;

// -------------
// | MANIFESTS |
// -------------

/// The default root directory under which per-network manifests are kept
pub const DEFAULT_DEPLOYMENTS_DIR: &str = "deployments";

/// The name of the declarations manifest file
pub const DECLARATIONS_FILE_NAME: &str = "declarations.json";

/// The name of the deployments manifest file
pub const DEPLOYMENTS_FILE_NAME: &str = "deployments.json";

/// The extension given to a manifest while it is being written, before being
/// renamed over the target
pub const TMP_FILE_EXTENSION: &str = "tmp";

// -------------
// | ARTIFACTS |
// -------------

/// The default directory in which Scarb places compiled artifacts
pub const DEFAULT_BUILD_DIR: &str = "target/dev";

/// The file extension of a Sierra artifact
pub const SIERRA_FILE_EXTENSION: &str = "sierra.json";

/// The file extension of a CASM artifact
pub const CASM_FILE_EXTENSION: &str = "casm.json";

// -------------
// | CONTRACTS |
// -------------

/// The oracle contract name
pub const ORACLE_CONTRACT_NAME: &str = "pragma_Oracle";

/// The ownable contract name
pub const OWNABLE_CONTRACT_NAME: &str = "pragma_Ownable";

/// The publisher registry contract name
pub const PUBLISHER_REGISTRY_CONTRACT_NAME: &str = "pragma_PublisherRegistry";

/// The summary stats contract name
pub const SUMMARY_STATS_CONTRACT_NAME: &str = "pragma_SummaryStats";

/// The randomness contract name
pub const RANDOMNESS_CONTRACT_NAME: &str = "pragma_Randomness";

/// The example randomness consumer contract name
pub const EXAMPLE_RANDOMNESS_CONTRACT_NAME: &str = "pragma_ExampleRandomness";

/// The yield curve contract name
pub const YIELD_CURVE_CONTRACT_NAME: &str = "pragma_YieldCurve";

/// The pool contract name, only deployed as a mock on test networks
pub const POOL_CONTRACT_NAME: &str = "pragma_Pool";

/// The deployment key of the mock pool, deployed from the pool class
pub const MOCK_POOL_DEPLOYMENT_KEY: &str = "pragma_MockPool";

/// All contracts produced by the build, in declaration order
pub const COMPILED_CONTRACTS: [&str; 7] = [
    ORACLE_CONTRACT_NAME,
    OWNABLE_CONTRACT_NAME,
    PUBLISHER_REGISTRY_CONTRACT_NAME,
    SUMMARY_STATS_CONTRACT_NAME,
    RANDOMNESS_CONTRACT_NAME,
    EXAMPLE_RANDOMNESS_CONTRACT_NAME,
    YIELD_CURVE_CONTRACT_NAME,
];

// ------------------
// | FUNCTION NAMES |
// ------------------

/// Upgrades the oracle implementation
pub const UPGRADE_FN_NAME: &str = "upgrade";
/// Registers a currency in the oracle
pub const ADD_CURRENCY_FN_NAME: &str = "add_currency";
/// Registers a pair in the oracle
pub const ADD_PAIR_FN_NAME: &str = "add_pair";
/// Updates an existing pair in the oracle
pub const UPDATE_PAIR_FN_NAME: &str = "update_pair";
/// Removes a source for a pair in the oracle
pub const REMOVE_SOURCE_FN_NAME: &str = "remove_source";
/// Looks up the address of a publisher in the registry
pub const GET_PUBLISHER_ADDRESS_FN_NAME: &str = "get_publisher_address";
/// Lists the sources of a publisher in the registry
pub const GET_PUBLISHER_SOURCES_FN_NAME: &str = "get_publisher_sources";
/// Registers a publisher in the registry
pub const ADD_PUBLISHER_FN_NAME: &str = "add_publisher";
/// Registers sources for a publisher in the registry
pub const ADD_SOURCES_FOR_PUBLISHER_FN_NAME: &str = "add_sources_for_publisher";
/// Removes a publisher from the registry
pub const REMOVE_PUBLISHER_FN_NAME: &str = "remove_publisher";
/// Registers a tokenized vault in the oracle
pub const REGISTER_TOKENIZED_VAULT_FN_NAME: &str = "register_tokenized_vault";

// ------------
// | NETWORKS |
// ------------

/// The environment variable selecting the network
pub const NETWORK_ENV_VAR: &str = "STARKNET_NETWORK";

/// The environment variable overriding the RPC endpoint
pub const RPC_URL_ENV_VAR: &str = "STARKNET_RPC_URL";

/// The fallback environment variable holding the account address
pub const ACCOUNT_ADDRESS_ENV_VAR: &str = "ACCOUNT_ADDRESS";

/// The fallback environment variable holding the private key
pub const PRIVATE_KEY_ENV_VAR: &str = "PRIVATE_KEY";

/// The mainnet RPC endpoint
pub const MAINNET_RPC_URL: &str = "https://starknet-mainnet.public.blastapi.io/rpc/v0_7";

/// The sepolia RPC endpoint
pub const SEPOLIA_RPC_URL: &str = "https://starknet-sepolia.public.blastapi.io/rpc/v0_7";

/// The host at which local networks (devnet, katana) are running
pub const LOCAL_HOST: &str = "http://127.0.0.1";

/// The port local networks listen on when none is given
pub const DEFAULT_LOCAL_PORT: u16 = 5050;

/// The path of the JSON-RPC endpoint on a local node
pub const LOCAL_RPC_PATH: &str = "rpc";

/// The ETH fee token address, shared by all networks
pub const ETH_TOKEN_ADDRESS: &str =
    "0x049d36570d4e46f48e99674bd3fcc84644ddd6b96f7c741b1562b82f9e004dc7";

/// The BTC token address the mock pool is deployed with
pub const BTC_TOKEN_ADDRESS: &str =
    "0x03fe2b97c1fd336e750087d68b9b867997fd64a2661ff3ca5a7c771641e8e7ac";

/// The default public key of the randomness provider, in decimal
pub const RANDOMNESS_PUBLIC_KEY: &str =
    "2061139992776959994838533810929826594222370735645675137341826408353556487187";

// ----------------
// | TRANSACTIONS |
// ----------------

/// The interval at which transaction receipts are polled
pub const RECEIPT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// How long to wait for a transaction to be accepted before giving up
pub const RECEIPT_TIMEOUT: Duration = Duration::from_secs(300);

/// The maximum length, in bytes, of a Cairo short string
pub const MAX_SHORT_STRING_LEN: usize = 31;
