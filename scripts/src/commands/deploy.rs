//! Scripts declaring classes & deploying contract instances

use starknet::core::types::Felt;
use tracing::info;

use crate::{
    calldata::{Calldata, Currency, Pair},
    cli::{DeclareArgs, DeployArgs, DeployMockPoolArgs, DeployRandomnessArgs},
    client::ChainClient,
    config::{read_json_config, OracleConfig},
    constants::{
        COMPILED_CONTRACTS, EXAMPLE_RANDOMNESS_CONTRACT_NAME, MOCK_POOL_DEPLOYMENT_KEY,
        ORACLE_CONTRACT_NAME, POOL_CONTRACT_NAME, PUBLISHER_REGISTRY_CONTRACT_NAME,
        RANDOMNESS_CONTRACT_NAME, SUMMARY_STATS_CONTRACT_NAME,
    },
    errors::ScriptError,
};

use super::ScriptContext;

/// Declare the requested contracts, or every compiled contract
pub async fn declare<C: ChainClient>(
    args: DeclareArgs,
    ctx: &ScriptContext<C>,
) -> Result<(), ScriptError> {
    let names: Vec<&str> = if args.contract.is_empty() {
        COMPILED_CONTRACTS.to_vec()
    } else {
        args.contract.iter().map(String::as_str).collect()
    };

    let declarations = ctx.declarer().declare_all(&names).await?;
    for (name, class_hash) in declarations.iter() {
        info!("{name}: {}", class_hash.to_hex_string());
    }
    info!(
        "Declarations on {} recorded in {}",
        ctx.network,
        ctx.manifests.declarations_path().display()
    );

    Ok(())
}

/// Declare everything, then deploy the publisher registry & the oracle on top
/// of it
pub async fn deploy_oracle<C: ChainClient>(
    args: DeployArgs,
    ctx: &ScriptContext<C>,
) -> Result<(), ScriptError> {
    let config: OracleConfig = read_json_config(&args.config)?;
    let currencies = config
        .currencies
        .iter()
        .map(Currency::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    let pairs = config
        .pairs
        .iter()
        .map(Pair::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    ctx.declarer().declare_all(&COMPILED_CONTRACTS).await?;

    let owner = ctx.client.account_address();
    let deployer = ctx.deployer();

    let registry = deployer
        .deploy(PUBLISHER_REGISTRY_CONTRACT_NAME, vec![owner])
        .await?;

    let oracle_calldata = Calldata::new()
        .arg(&owner)
        .arg(&registry.address)
        .arg(&currencies)
        .arg(&pairs)
        .into_inner();
    let oracle = deployer.deploy(ORACLE_CONTRACT_NAME, oracle_calldata).await?;

    info!(
        "Oracle deployed at {} with {} currencies & {} pairs",
        oracle.address.to_hex_string(),
        currencies.len(),
        pairs.len()
    );
    Ok(())
}

/// Deploy the summary stats contract, reading from the deployed oracle
pub async fn deploy_summary_stats<C: ChainClient>(
    ctx: &ScriptContext<C>,
) -> Result<(), ScriptError> {
    let oracle = ctx.manifests.deployment_address(ORACLE_CONTRACT_NAME)?;
    ctx.deployer()
        .deploy(SUMMARY_STATS_CONTRACT_NAME, vec![oracle])
        .await?;

    Ok(())
}

/// Deploy the randomness contract, reading from the deployed oracle
pub async fn deploy_randomness<C: ChainClient>(
    args: DeployRandomnessArgs,
    ctx: &ScriptContext<C>,
) -> Result<(), ScriptError> {
    // Local nodes start empty, so nothing has been declared yet
    if ctx.network.is_local() {
        ctx.declarer().declare_all(&COMPILED_CONTRACTS).await?;
    }

    let oracle = ctx.manifests.deployment_address(ORACLE_CONTRACT_NAME)?;
    let admin: Felt = args.admin.unwrap_or_else(|| ctx.client.account_address());

    let calldata = vec![admin, args.public_key, args.fee_token, oracle];
    ctx.deployer()
        .deploy(RANDOMNESS_CONTRACT_NAME, calldata)
        .await?;

    Ok(())
}

/// Deploy the example randomness consumer, requesting from the deployed
/// randomness contract
pub async fn deploy_example_randomness<C: ChainClient>(
    ctx: &ScriptContext<C>,
) -> Result<(), ScriptError> {
    ctx.declarer().declare_all(&COMPILED_CONTRACTS).await?;

    let randomness = ctx.manifests.deployment_address(RANDOMNESS_CONTRACT_NAME)?;
    ctx.deployer()
        .deploy(EXAMPLE_RANDOMNESS_CONTRACT_NAME, vec![randomness])
        .await?;

    Ok(())
}

/// Deploy a pool over two tokens, recorded as the mock pool
pub async fn deploy_mock_pool<C: ChainClient>(
    args: DeployMockPoolArgs,
    ctx: &ScriptContext<C>,
) -> Result<(), ScriptError> {
    let declarer = ctx.declarer();
    declarer.declare_all(&COMPILED_CONTRACTS).await?;
    declarer.declare(POOL_CONTRACT_NAME).await?;

    ctx.deployer()
        .deploy_as(
            MOCK_POOL_DEPLOYMENT_KEY,
            POOL_CONTRACT_NAME,
            vec![args.token0, args.token1],
        )
        .await?;

    Ok(())
}
