//! State-changing & read-only calls to deployed contracts

use starknet::core::{types::Felt, utils::get_selector_from_name};
use tracing::{debug, info};

use crate::{client::ChainClient, errors::ScriptError, manifest::ManifestStore};

/// Compute the entry point selector of a function
fn selector(function_name: &str) -> Result<Felt, ScriptError> {
    get_selector_from_name(function_name)
        .map_err(|e| ScriptError::CalldataConstruction(format!("{function_name}: {e}")))
}

/// Sends transactions to deployed contracts
pub struct Invoker<'a, C> {
    /// The client submitting transactions
    client: &'a C,
    /// Where contract addresses are resolved from
    manifests: &'a ManifestStore,
}

impl<'a, C: ChainClient> Invoker<'a, C> {
    /// Create an invoker
    pub fn new(client: &'a C, manifests: &'a ManifestStore) -> Self {
        Invoker { client, manifests }
    }

    /// Invoke `function_name` on the contract deployed under `key`, returning
    /// the transaction hash once it is accepted
    pub async fn invoke(
        &self,
        key: &str,
        function_name: &str,
        calldata: Vec<Felt>,
    ) -> Result<Felt, ScriptError> {
        let address = self.manifests.deployment_address(key)?;
        self.invoke_at(key, address, function_name, calldata).await
    }

    /// Invoke `function_name` on the contract at `address`; `label` only
    /// names it in logs
    pub async fn invoke_at(
        &self,
        label: &str,
        address: Felt,
        function_name: &str,
        calldata: Vec<Felt>,
    ) -> Result<Felt, ScriptError> {
        let selector = selector(function_name)?;

        info!("Invoking {label}.{function_name}");
        let transaction_hash = self.client.invoke(address, selector, calldata).await?;
        self.client.wait_for_acceptance(transaction_hash).await?;
        info!(
            "{label}.{function_name} invoked at tx: {}",
            transaction_hash.to_hex_string()
        );

        Ok(transaction_hash)
    }
}

/// Reads state from deployed contracts
pub struct Querier<'a, C> {
    /// The client executing calls
    client: &'a C,
    /// Where contract addresses are resolved from
    manifests: &'a ManifestStore,
}

impl<'a, C: ChainClient> Querier<'a, C> {
    /// Create a querier
    pub fn new(client: &'a C, manifests: &'a ManifestStore) -> Self {
        Querier { client, manifests }
    }

    /// Call the view function `function_name` on the contract deployed under `key`
    pub async fn call(
        &self,
        key: &str,
        function_name: &str,
        calldata: Vec<Felt>,
    ) -> Result<Vec<Felt>, ScriptError> {
        let address = self.manifests.deployment_address(key)?;
        self.call_at(key, address, function_name, calldata).await
    }

    /// Call the view function `function_name` on the contract at `address`
    pub async fn call_at(
        &self,
        label: &str,
        address: Felt,
        function_name: &str,
        calldata: Vec<Felt>,
    ) -> Result<Vec<Felt>, ScriptError> {
        let selector = selector(function_name)?;

        debug!("Calling {label}.{function_name}");
        self.client.call(address, selector, calldata).await
    }
}
