//! Administration of the publisher registry

use starknet::core::types::Felt;
use tracing::{info, warn};

use crate::{
    calldata::{short_string, Calldata},
    cli::{RegisterPublishersArgs, RemovePublishersArgs},
    client::ChainClient,
    config::{read_json_config, PublisherConfig, PublishersConfig},
    constants::{
        ADD_PUBLISHER_FN_NAME, ADD_SOURCES_FOR_PUBLISHER_FN_NAME, GET_PUBLISHER_ADDRESS_FN_NAME,
        GET_PUBLISHER_SOURCES_FN_NAME, PUBLISHER_REGISTRY_CONTRACT_NAME, REMOVE_PUBLISHER_FN_NAME,
    },
    errors::ScriptError,
};

use super::{felt_array, single_felt, ScriptContext};

/// Register each configured publisher & whichever of its sources the registry
/// does not know yet.
///
/// Stops at the first publisher registered under a different address.
pub async fn register_publishers<C: ChainClient>(
    args: RegisterPublishersArgs,
    ctx: &ScriptContext<C>,
) -> Result<(), ScriptError> {
    let config: PublishersConfig = read_json_config(&args.config)?;
    if config.publishers.is_empty() {
        warn!("No publishers in {}", args.config.display());
    }

    for publisher in &config.publishers {
        register_publisher(publisher, ctx).await?;
    }

    Ok(())
}

/// Register a single publisher & its missing sources
async fn register_publisher<C: ChainClient>(
    publisher: &PublisherConfig,
    ctx: &ScriptContext<C>,
) -> Result<(), ScriptError> {
    let name = short_string(&publisher.name)?;
    let querier = ctx.querier();
    let invoker = ctx.invoker();

    let registered = single_felt(
        GET_PUBLISHER_ADDRESS_FN_NAME,
        querier
            .call(PUBLISHER_REGISTRY_CONTRACT_NAME, GET_PUBLISHER_ADDRESS_FN_NAME, vec![name])
            .await?,
    )?;

    if registered == Felt::ZERO {
        invoker
            .invoke(
                PUBLISHER_REGISTRY_CONTRACT_NAME,
                ADD_PUBLISHER_FN_NAME,
                vec![name, publisher.address],
            )
            .await?;
        info!("Registered publisher {}", publisher.name);
    } else if registered != publisher.address {
        return Err(ScriptError::PublisherConflict(format!(
            "{} is registered at {}, configured at {}",
            publisher.name,
            registered.to_hex_string(),
            publisher.address.to_hex_string()
        )));
    } else {
        info!("Publisher {} already registered", publisher.name);
    }

    let existing = felt_array(
        GET_PUBLISHER_SOURCES_FN_NAME,
        querier
            .call(PUBLISHER_REGISTRY_CONTRACT_NAME, GET_PUBLISHER_SOURCES_FN_NAME, vec![name])
            .await?,
    )?;

    let mut missing = Vec::new();
    for source in &publisher.sources {
        let encoded = short_string(source)?;
        if !existing.contains(&encoded) && !missing.contains(&encoded) {
            missing.push(encoded);
        }
    }

    if missing.is_empty() {
        info!("Publisher {} has all its sources", publisher.name);
        return Ok(());
    }

    invoker
        .invoke(
            PUBLISHER_REGISTRY_CONTRACT_NAME,
            ADD_SOURCES_FOR_PUBLISHER_FN_NAME,
            Calldata::new().arg(&name).arg(&missing).into_inner(),
        )
        .await?;
    info!("Added {} sources for {}", missing.len(), publisher.name);

    Ok(())
}

/// Remove each publisher from the registry
pub async fn remove_publishers<C: ChainClient>(
    args: RemovePublishersArgs,
    ctx: &ScriptContext<C>,
) -> Result<(), ScriptError> {
    let invoker = ctx.invoker();
    for publisher in &args.publishers {
        invoker
            .invoke(
                PUBLISHER_REGISTRY_CONTRACT_NAME,
                REMOVE_PUBLISHER_FN_NAME,
                vec![short_string(publisher)?],
            )
            .await?;
        info!("Removed publisher {publisher}");
    }

    Ok(())
}
