//! Deployment of declared classes

use starknet::core::types::Felt;
use tracing::info;

use crate::{
    client::ChainClient, errors::ScriptError, manifest::ManifestStore, types::DeploymentRecord,
};

/// Deploys instances of declared classes
pub struct Deployer<'a, C> {
    /// The client submitting deployments
    client: &'a C,
    /// Where class hashes are read from & deployments recorded
    manifests: &'a ManifestStore,
}

impl<'a, C: ChainClient> Deployer<'a, C> {
    /// Create a deployer
    pub fn new(client: &'a C, manifests: &'a ManifestStore) -> Self {
        Deployer { client, manifests }
    }

    /// Deploy the class declared under `contract_name`, recording the
    /// deployment under the same name
    pub async fn deploy(
        &self,
        contract_name: &str,
        constructor_calldata: Vec<Felt>,
    ) -> Result<DeploymentRecord, ScriptError> {
        self.deploy_as(contract_name, contract_name, constructor_calldata)
            .await
    }

    /// Deploy the class declared under `contract_name`, recording the
    /// deployment under `key`.
    ///
    /// Returns once the deploy transaction is accepted, so the address can be
    /// called immediately.
    pub async fn deploy_as(
        &self,
        key: &str,
        contract_name: &str,
        constructor_calldata: Vec<Felt>,
    ) -> Result<DeploymentRecord, ScriptError> {
        info!("Deploying {key}");
        let class_hash = self.manifests.class_hash(contract_name)?;

        let record = self.client.deploy(class_hash, constructor_calldata).await?;
        info!("Transaction hash: {}", record.tx.to_hex_string());

        self.client.wait_for_acceptance(record.tx).await?;
        info!("{key} deployed at: {}", record.address.to_hex_string());

        self.manifests.record_deployment(key, record.clone())?;
        Ok(record)
    }
}
