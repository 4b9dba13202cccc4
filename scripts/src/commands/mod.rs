//! Implementations of the various deployment & administration scripts

pub mod deploy;
pub mod oracle;
pub mod publishers;
pub mod upgrade;

use starknet::core::types::Felt;

use crate::{
    artifacts::ArtifactStore,
    client::ChainClient,
    config::Network,
    drivers::{Declarer, Deployer, Invoker, Querier},
    errors::ScriptError,
    manifest::ManifestStore,
};

/// Everything a script needs to talk to one network
pub struct ScriptContext<C> {
    /// The network being targeted
    pub network: Network,
    /// The chain client
    pub client: C,
    /// The compiled contract artifacts
    pub artifacts: ArtifactStore,
    /// The network's manifests
    pub manifests: ManifestStore,
}

impl<C: ChainClient> ScriptContext<C> {
    /// Bundle a client with the stores it operates on
    pub fn new(
        network: Network,
        client: C,
        artifacts: ArtifactStore,
        manifests: ManifestStore,
    ) -> Self {
        ScriptContext {
            network,
            client,
            artifacts,
            manifests,
        }
    }

    /// A declaration driver
    pub fn declarer(&self) -> Declarer<'_, C> {
        Declarer::new(&self.client, &self.artifacts, &self.manifests)
    }

    /// A deployment driver
    pub fn deployer(&self) -> Deployer<'_, C> {
        Deployer::new(&self.client, &self.manifests)
    }

    /// An invocation driver
    pub fn invoker(&self) -> Invoker<'_, C> {
        Invoker::new(&self.client, &self.manifests)
    }

    /// A query driver
    pub fn querier(&self) -> Querier<'_, C> {
        Querier::new(&self.client, &self.manifests)
    }
}

/// Take the single felt a view function returns
pub(crate) fn single_felt(function_name: &str, res: Vec<Felt>) -> Result<Felt, ScriptError> {
    res.first().copied().ok_or_else(|| {
        ScriptError::ContractInteraction(format!("{function_name} returned no value"))
    })
}

/// Decode a length-prefixed felt array returned by a view function
pub(crate) fn felt_array(function_name: &str, res: Vec<Felt>) -> Result<Vec<Felt>, ScriptError> {
    let (len, items) = res.split_first().ok_or_else(|| {
        ScriptError::ContractInteraction(format!("{function_name} returned no value"))
    })?;

    if Felt::from(items.len()) != *len {
        return Err(ScriptError::ContractInteraction(format!(
            "{function_name} returned a malformed array"
        )));
    }

    Ok(items.to_vec())
}
