//! Idempotent declaration of contract classes

use tracing::{debug, info};

use crate::{
    artifacts::ArtifactStore,
    client::{ChainClient, DeclareOutcome},
    errors::ScriptError,
    manifest::ManifestStore,
    types::{ClassHash, Declarations},
};

/// Declares contract classes that are not yet on-chain
pub struct Declarer<'a, C> {
    /// The client submitting declarations
    client: &'a C,
    /// Where the compiled artifacts are read from
    artifacts: &'a ArtifactStore,
    /// Where declared class hashes are recorded
    manifests: &'a ManifestStore,
}

impl<'a, C: ChainClient> Declarer<'a, C> {
    /// Create a declarer
    pub fn new(client: &'a C, artifacts: &'a ArtifactStore, manifests: &'a ManifestStore) -> Self {
        Declarer {
            client,
            artifacts,
            manifests,
        }
    }

    /// Ensure the contract's class is declared, returning its class hash.
    ///
    /// No transaction is sent if the node already knows the class. In both
    /// cases the hash is recorded in the declarations manifest.
    pub async fn declare(&self, contract_name: &str) -> Result<ClassHash, ScriptError> {
        let class_hash = self.declare_unrecorded(contract_name).await?;
        self.manifests.record_declaration(contract_name, class_hash)?;
        Ok(class_hash)
    }

    /// Ensure the contract's class is declared without recording it.
    ///
    /// For callers that must only record the class once a follow-up
    /// transaction using it is accepted.
    pub async fn declare_unrecorded(&self, contract_name: &str) -> Result<ClassHash, ScriptError> {
        info!("Declaring {contract_name}");

        let artifact = self.artifacts.load(contract_name)?;
        let compiled_class_hash = artifact.compiled_class_hash()?;
        let class_hash = artifact.class_hash()?;
        debug!(
            "{contract_name}: class hash {}, compiled class hash {}",
            class_hash.to_hex_string(),
            compiled_class_hash.to_hex_string()
        );

        if self.client.is_declared(class_hash).await? {
            info!("Class {} already declared, skipping", class_hash.to_hex_string());
        } else {
            let DeclareOutcome {
                class_hash: declared_hash,
                transaction_hash,
            } = self.client.declare(&artifact, compiled_class_hash).await?;

            if declared_hash != class_hash {
                return Err(ScriptError::ContractDeclaration(format!(
                    "{contract_name}: node declared {} but artifact hashes to {}",
                    declared_hash.to_hex_string(),
                    class_hash.to_hex_string()
                )));
            }

            self.client.wait_for_acceptance(transaction_hash).await?;
            info!(
                "{contract_name} class hash {} at tx {}",
                class_hash.to_hex_string(),
                transaction_hash.to_hex_string()
            );
        }

        Ok(class_hash)
    }

    /// Declare each contract in turn, stopping at the first failure
    pub async fn declare_all(&self, contract_names: &[&str]) -> Result<Declarations, ScriptError> {
        let mut declarations = Declarations::default();
        for contract_name in contract_names {
            let class_hash = self.declare(contract_name).await?;
            declarations.insert(*contract_name, class_hash);
        }

        Ok(declarations)
    }
}
