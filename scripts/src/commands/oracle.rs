//! Administration of the currencies, pairs & sources known to the oracle

use starknet::core::types::Felt;
use tracing::info;

use crate::{
    calldata::{short_string, Calldata, Currency, Pair},
    cli::{AddPairsArgs, RegisterTokenizedVaultsArgs, RemoveSourceArgs},
    client::ChainClient,
    config::{read_json_config, OracleConfig, TokenizedVaultsConfig},
    constants::{
        ADD_CURRENCY_FN_NAME, ADD_PAIR_FN_NAME, ORACLE_CONTRACT_NAME,
        REGISTER_TOKENIZED_VAULT_FN_NAME, REMOVE_SOURCE_FN_NAME, UPDATE_PAIR_FN_NAME,
    },
    errors::ScriptError,
};

use super::ScriptContext;

/// Register the configured currencies, update the configured pairs, then
/// register the new pairs
pub async fn add_pairs<C: ChainClient>(
    args: AddPairsArgs,
    ctx: &ScriptContext<C>,
) -> Result<(), ScriptError> {
    let config: OracleConfig = read_json_config(&args.config)?;
    let invoker = ctx.invoker();

    for currency_config in &config.currencies {
        let currency = Currency::try_from(currency_config)?;
        info!("Adding currency {}", currency_config.id);
        invoker
            .invoke(
                ORACLE_CONTRACT_NAME,
                ADD_CURRENCY_FN_NAME,
                Calldata::new().arg(&currency).into_inner(),
            )
            .await?;
    }

    for pair_config in &config.pairs_to_update {
        let pair = Pair::try_from(pair_config)?;
        info!("Updating pair {}", pair_config.id);
        invoker
            .invoke(
                ORACLE_CONTRACT_NAME,
                UPDATE_PAIR_FN_NAME,
                Calldata::new().arg(&pair.id).arg(&pair).into_inner(),
            )
            .await?;
    }

    for pair_config in &config.pairs {
        let pair = Pair::try_from(pair_config)?;
        info!("Adding pair {}", pair_config.id);
        invoker
            .invoke(
                ORACLE_CONTRACT_NAME,
                ADD_PAIR_FN_NAME,
                Calldata::new().arg(&pair).into_inner(),
            )
            .await?;
    }

    Ok(())
}

/// Register each configured tokenized vault, in order
pub async fn register_tokenized_vaults<C: ChainClient>(
    args: RegisterTokenizedVaultsArgs,
    ctx: &ScriptContext<C>,
) -> Result<(), ScriptError> {
    let config: TokenizedVaultsConfig = read_json_config(&args.config)?;
    let invoker = ctx.invoker();

    for vault in &config.vaults {
        let calldata = vec![
            short_string(&vault.name)?,
            short_string(&vault.underlying_token)?,
            vault.address,
        ];
        invoker
            .invoke(ORACLE_CONTRACT_NAME, REGISTER_TOKENIZED_VAULT_FN_NAME, calldata)
            .await?;
        info!("Registered tokenized vault {}", vault.name);
    }

    Ok(())
}

/// Remove a source from each of the given pairs
pub async fn remove_source<C: ChainClient>(
    args: RemoveSourceArgs,
    ctx: &ScriptContext<C>,
) -> Result<(), ScriptError> {
    let source = short_string(&args.source)?;
    let invoker = ctx.invoker();

    for pair in &args.pairs {
        // The zero is the data type: spot entries
        let calldata = vec![source, Felt::ZERO, short_string(pair)?];
        invoker
            .invoke(ORACLE_CONTRACT_NAME, REMOVE_SOURCE_FN_NAME, calldata)
            .await?;
        info!("Removed source {} for pair {pair}", args.source);
    }

    Ok(())
}
