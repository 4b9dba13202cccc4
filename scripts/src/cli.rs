//! Definitions of CLI arguments and commands for the deployment scripts

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use starknet::core::types::Felt;

use crate::{
    client::ChainClient,
    commands::{
        deploy::{
            declare, deploy_example_randomness, deploy_mock_pool, deploy_oracle,
            deploy_randomness, deploy_summary_stats,
        },
        oracle::{add_pairs, register_tokenized_vaults, remove_source},
        publishers::{register_publishers, remove_publishers},
        upgrade::upgrade_oracle,
        ScriptContext,
    },
    config::Network,
    constants::{
        BTC_TOKEN_ADDRESS, DEFAULT_BUILD_DIR, DEFAULT_DEPLOYMENTS_DIR, ETH_TOKEN_ADDRESS,
        NETWORK_ENV_VAR, RANDOMNESS_PUBLIC_KEY, RPC_URL_ENV_VAR,
    },
    errors::ScriptError,
    types::parse_felt,
};

/// Deploy & administer the Pragma oracle contracts on Starknet
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Which network to run against
    #[arg(short, long, env = NETWORK_ENV_VAR, default_value = "devnet")]
    pub network: Network,

    /// The port of the local node, required for katana
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override the network's RPC endpoint
    #[arg(long, env = RPC_URL_ENV_VAR)]
    pub rpc_url: Option<String>,

    /// The directory under which per-network manifests are kept
    #[arg(long, default_value = DEFAULT_DEPLOYMENTS_DIR)]
    pub deployments_dir: PathBuf,

    /// The directory containing the compiled Sierra & CASM artifacts
    #[arg(long, default_value = DEFAULT_BUILD_DIR)]
    pub build_dir: PathBuf,

    /// The script to run
    #[command(subcommand)]
    pub command: Command,
}

/// The available scripts
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Declares contract classes that are not yet declared
    Declare(DeclareArgs),
    /// Declares all contracts, then deploys the publisher registry & oracle
    Deploy(DeployArgs),
    /// Deploys the summary stats contract against the deployed oracle
    DeploySummaryStats,
    /// Deploys the randomness contract against the deployed oracle
    DeployRandomness(DeployRandomnessArgs),
    /// Deploys the example randomness consumer against the deployed randomness contract
    DeployExampleRandomness,
    /// Deploys a mock pool from the pool class, for test networks
    DeployMockPool(DeployMockPoolArgs),
    /// Declares the current oracle class & upgrades the deployed oracle to it
    Upgrade,
    /// Registers currencies & pairs in the oracle
    AddPairs(AddPairsArgs),
    /// Registers tokenized vaults in the oracle
    RegisterTokenizedVaults(RegisterTokenizedVaultsArgs),
    /// Registers publishers & their sources in the publisher registry
    RegisterPublishers(RegisterPublishersArgs),
    /// Removes publishers from the publisher registry
    RemovePublishers(RemovePublishersArgs),
    /// Removes a source from the given pairs in the oracle
    RemoveSource(RemoveSourceArgs),
}

impl Command {
    /// Run the script against the given context
    pub async fn run<C: ChainClient>(self, ctx: &ScriptContext<C>) -> Result<(), ScriptError> {
        match self {
            Command::Declare(args) => declare(args, ctx).await,
            Command::Deploy(args) => deploy_oracle(args, ctx).await,
            Command::DeploySummaryStats => deploy_summary_stats(ctx).await,
            Command::DeployRandomness(args) => deploy_randomness(args, ctx).await,
            Command::DeployExampleRandomness => deploy_example_randomness(ctx).await,
            Command::DeployMockPool(args) => deploy_mock_pool(args, ctx).await,
            Command::Upgrade => upgrade_oracle(ctx).await,
            Command::AddPairs(args) => add_pairs(args, ctx).await,
            Command::RegisterTokenizedVaults(args) => register_tokenized_vaults(args, ctx).await,
            Command::RegisterPublishers(args) => register_publishers(args, ctx).await,
            Command::RemovePublishers(args) => remove_publishers(args, ctx).await,
            Command::RemoveSource(args) => remove_source(args, ctx).await,
        }
    }
}

/// Arguments of the `declare` script
#[derive(Args, Debug)]
pub struct DeclareArgs {
    #[arg(short, long, long_help)]
    /// The contracts to declare, by artifact name (e.g. `pragma_Oracle`).
    /// Declares every compiled contract when omitted.
    pub contract: Vec<String>,
}

/// Arguments of the `deploy` script
#[derive(Args, Debug)]
pub struct DeployArgs {
    #[arg(short, long, long_help)]
    /// Path to a JSON file listing the currencies & pairs the oracle is
    /// constructed with
    pub config: PathBuf,
}

/// Arguments of the `deploy-randomness` script
#[derive(Args, Debug)]
pub struct DeployRandomnessArgs {
    #[arg(long, value_parser = parse_felt)]
    /// The admin of the randomness contract, defaults to the deployer account
    pub admin: Option<Felt>,

    #[arg(long, value_parser = parse_felt, default_value = RANDOMNESS_PUBLIC_KEY)]
    /// The public key of the randomness provider
    pub public_key: Felt,

    #[arg(long, value_parser = parse_felt, default_value = ETH_TOKEN_ADDRESS)]
    /// The token callback fees are paid in
    pub fee_token: Felt,
}

/// Arguments of the `deploy-mock-pool` script
#[derive(Args, Debug)]
pub struct DeployMockPoolArgs {
    #[arg(long, value_parser = parse_felt, default_value = ETH_TOKEN_ADDRESS)]
    /// The first token of the pool
    pub token0: Felt,

    #[arg(long, value_parser = parse_felt, default_value = BTC_TOKEN_ADDRESS)]
    /// The second token of the pool
    pub token1: Felt,
}

/// Arguments of the `add-pairs` script
#[derive(Args, Debug)]
pub struct AddPairsArgs {
    #[arg(short, long, long_help)]
    /// Path to a JSON file listing currencies to add, pairs to add, and
    /// pairs to update
    pub config: PathBuf,
}

/// Arguments of the `register-tokenized-vaults` script
#[derive(Args, Debug)]
pub struct RegisterTokenizedVaultsArgs {
    #[arg(short, long, long_help)]
    /// Path to a JSON file listing vaults, their underlying tokens, and their
    /// addresses
    pub config: PathBuf,
}

/// Arguments of the `register-publishers` script
#[derive(Args, Debug)]
pub struct RegisterPublishersArgs {
    #[arg(short, long, long_help)]
    /// Path to a JSON file listing publishers, their addresses, and their sources
    pub config: PathBuf,
}

/// Arguments of the `remove-publishers` script
#[derive(Args, Debug)]
pub struct RemovePublishersArgs {
    #[arg(long = "publisher", required = true)]
    /// The publishers to remove
    pub publishers: Vec<String>,
}

/// Arguments of the `remove-source` script
#[derive(Args, Debug)]
pub struct RemoveSourceArgs {
    #[arg(short, long)]
    /// The source to remove, e.g. `AVNU`
    pub source: String,

    #[arg(long = "pair", required = true)]
    /// The pairs to remove the source from, e.g. `BTC/USD`
    pub pairs: Vec<String>,
}
