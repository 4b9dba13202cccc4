//! Upgrading the deployed oracle to a newly built class

use tracing::info;

use crate::{
    client::ChainClient,
    constants::{ORACLE_CONTRACT_NAME, UPGRADE_FN_NAME},
    errors::ScriptError,
};

use super::ScriptContext;

/// Declare the oracle class found in the build directory & point the deployed
/// oracle at it.
///
/// The manifest only learns the new class once the upgrade is accepted, so a
/// failed upgrade can be retried by running the script again.
pub async fn upgrade_oracle<C: ChainClient>(ctx: &ScriptContext<C>) -> Result<(), ScriptError> {
    // Fail before declaring anything if there is no oracle to upgrade
    ctx.manifests.deployment_address(ORACLE_CONTRACT_NAME)?;

    let new_hash = ctx
        .declarer()
        .declare_unrecorded(ORACLE_CONTRACT_NAME)
        .await?;

    ctx.invoker()
        .invoke(ORACLE_CONTRACT_NAME, UPGRADE_FN_NAME, vec![new_hash])
        .await?;
    ctx.manifests
        .record_declaration(ORACLE_CONTRACT_NAME, new_hash)?;

    info!("Oracle upgraded to class {}", new_hash.to_hex_string());
    Ok(())
}
