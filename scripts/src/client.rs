//! The chain client the drivers submit transactions through

use std::{sync::Arc, time::Instant};

use async_trait::async_trait;
use rand::Rng;
use starknet::{
    accounts::{Account, ConnectedAccount, ExecutionEncoding, SingleOwnerAccount},
    contract::ContractFactory,
    core::types::{
        BlockId, BlockTag, Call, DeclareTransactionResult, ExecutionResult, Felt, FunctionCall,
        InvokeTransactionResult, StarknetError,
    },
    providers::{jsonrpc::HttpTransport, JsonRpcClient, Provider, ProviderError},
    signers::{LocalWallet, SigningKey},
};
use tokio::time::sleep;
use tracing::{debug, trace};

use crate::{
    artifacts::ContractArtifact,
    config::NetworkProfile,
    constants::{RECEIPT_POLL_INTERVAL, RECEIPT_TIMEOUT},
    errors::ScriptError,
    types::{ClassHash, DeploymentRecord},
};

/// The account type used to sign & send transactions
pub type ScriptAccount = SingleOwnerAccount<JsonRpcClient<HttpTransport>, LocalWallet>;

/// The result of a submitted declare transaction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeclareOutcome {
    /// The class hash that was declared
    pub class_hash: ClassHash,
    /// The hash of the declare transaction
    pub transaction_hash: Felt,
}

/// The primitives the drivers need from a Starknet node
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// The address of the account sending transactions
    fn account_address(&self) -> Felt;

    /// Whether a class with the given hash is declared on the chain.
    ///
    /// Only a definite "class not found" answer from the node may yield
    /// `Ok(false)`; any other failure is an error.
    async fn is_declared(&self, class_hash: ClassHash) -> Result<bool, ScriptError>;

    /// Sign & submit a declare transaction for the artifact
    async fn declare(
        &self,
        artifact: &ContractArtifact,
        compiled_class_hash: ClassHash,
    ) -> Result<DeclareOutcome, ScriptError>;

    /// Sign & submit a deploy transaction, returning the address the contract
    /// will live at and the transaction hash
    async fn deploy(
        &self,
        class_hash: ClassHash,
        constructor_calldata: Vec<Felt>,
    ) -> Result<DeploymentRecord, ScriptError>;

    /// Sign & submit a single call, returning the transaction hash
    async fn invoke(
        &self,
        to: Felt,
        selector: Felt,
        calldata: Vec<Felt>,
    ) -> Result<Felt, ScriptError>;

    /// Execute a read-only call at the latest block
    async fn call(
        &self,
        to: Felt,
        selector: Felt,
        calldata: Vec<Felt>,
    ) -> Result<Vec<Felt>, ScriptError>;

    /// Wait until the transaction is included and succeeded
    async fn wait_for_acceptance(&self, transaction_hash: Felt) -> Result<(), ScriptError>;
}

/// A [`ChainClient`] over a Starknet JSON-RPC node
pub struct StarknetClient {
    /// The account signing transactions, connected to the node
    account: ScriptAccount,
}

impl StarknetClient {
    /// Connect to the node & set up the signing account described by the profile
    pub fn new(profile: &NetworkProfile) -> Self {
        let provider = JsonRpcClient::new(HttpTransport::new(profile.rpc_url.clone()));
        let signer = LocalWallet::from(SigningKey::from_secret_scalar(profile.private_key));

        let mut account = SingleOwnerAccount::new(
            provider,
            signer,
            profile.account_address,
            profile.chain_id,
            ExecutionEncoding::New,
        );
        // Fetch nonces from the pending block so consecutive transactions
        // do not reuse a nonce
        account.set_block_id(BlockId::Tag(BlockTag::Pending));

        StarknetClient { account }
    }
}

#[async_trait]
impl ChainClient for StarknetClient {
    fn account_address(&self) -> Felt {
        self.account.address()
    }

    async fn is_declared(&self, class_hash: ClassHash) -> Result<bool, ScriptError> {
        let res = self
            .account
            .provider()
            .get_class(BlockId::Tag(BlockTag::Latest), class_hash)
            .await;

        class_lookup_result(res)
    }

    async fn declare(
        &self,
        artifact: &ContractArtifact,
        compiled_class_hash: ClassHash,
    ) -> Result<DeclareOutcome, ScriptError> {
        let flattened_class = artifact.flattened()?;

        let DeclareTransactionResult {
            transaction_hash,
            class_hash,
        } = self
            .account
            .declare_v3(Arc::new(flattened_class), compiled_class_hash)
            .send()
            .await
            .map_err(|e| ScriptError::ContractDeclaration(format!("{}: {}", artifact.name, e)))?;

        trace!("Declare tx: {}", transaction_hash.to_hex_string());

        Ok(DeclareOutcome {
            class_hash,
            transaction_hash,
        })
    }

    async fn deploy(
        &self,
        class_hash: ClassHash,
        constructor_calldata: Vec<Felt>,
    ) -> Result<DeploymentRecord, ScriptError> {
        let contract_factory = ContractFactory::new(class_hash, &self.account);
        let deployment = contract_factory.deploy_v3(
            constructor_calldata,
            random_salt(),
            true, /* unique */
        );
        let address = deployment.deployed_address();

        let InvokeTransactionResult { transaction_hash } = deployment
            .send()
            .await
            .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;

        Ok(DeploymentRecord::new(address, transaction_hash))
    }

    async fn invoke(
        &self,
        to: Felt,
        selector: Felt,
        calldata: Vec<Felt>,
    ) -> Result<Felt, ScriptError> {
        let InvokeTransactionResult { transaction_hash } = self
            .account
            .execute_v3(vec![Call {
                to,
                selector,
                calldata,
            }])
            .send()
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;

        Ok(transaction_hash)
    }

    async fn call(
        &self,
        to: Felt,
        selector: Felt,
        calldata: Vec<Felt>,
    ) -> Result<Vec<Felt>, ScriptError> {
        self.account
            .provider()
            .call(
                FunctionCall {
                    contract_address: to,
                    entry_point_selector: selector,
                    calldata,
                },
                BlockId::Tag(BlockTag::Latest),
            )
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))
    }

    async fn wait_for_acceptance(&self, transaction_hash: Felt) -> Result<(), ScriptError> {
        let start = Instant::now();
        loop {
            match self
                .account
                .provider()
                .get_transaction_receipt(transaction_hash)
                .await
            {
                Ok(receipt) => {
                    return match receipt.receipt.execution_result() {
                        ExecutionResult::Succeeded => Ok(()),
                        ExecutionResult::Reverted { reason } => {
                            Err(ScriptError::TransactionReverted(format!(
                                "{}: {}",
                                transaction_hash.to_hex_string(),
                                reason
                            )))
                        }
                    };
                }
                // Not yet seen by the node
                Err(ProviderError::StarknetError(StarknetError::TransactionHashNotFound)) => {}
                Err(e) => return Err(ScriptError::ChainQuery(e.to_string())),
            }

            if start.elapsed() >= RECEIPT_TIMEOUT {
                return Err(ScriptError::TransactionTimeout(
                    transaction_hash.to_hex_string(),
                ));
            }

            debug!("Waiting for tx {}...", transaction_hash.to_hex_string());
            sleep(RECEIPT_POLL_INTERVAL).await;
        }
    }
}

/// Interpret the node's answer to a class lookup
fn class_lookup_result<T>(res: Result<T, ProviderError>) -> Result<bool, ScriptError> {
    match res {
        Ok(_) => Ok(true),
        Err(ProviderError::StarknetError(StarknetError::ClassHashNotFound)) => Ok(false),
        Err(e) => Err(ScriptError::ChainQuery(e.to_string())),
    }
}

/// A random deployment salt
fn random_salt() -> Felt {
    let bytes: [u8; 31] = rand::thread_rng().gen();
    Felt::from_bytes_be_slice(&bytes)
}
