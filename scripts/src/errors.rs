//! Definitions of errors that can occur during the execution of the deployment scripts

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// Errors that can occur during the execution of the deployment scripts
#[derive(Debug)]
pub enum ScriptError {
    /// A required configuration value is missing or malformed
    Config(String),
    /// A manifest file that must exist was not found
    ManifestMissing(String),
    /// Error reading a manifest file
    ReadManifest(String),
    /// Error writing a manifest file
    WriteManifest(String),
    /// A manifest file is not valid JSON of the expected shape
    ManifestParse(String),
    /// The contract has no entry in the declarations manifest
    MissingDeclaration(String),
    /// The contract has no entry in the deployments manifest
    NotDeployed(String),
    /// Error reading a compiled contract artifact
    ReadArtifact(String),
    /// Error parsing a compiled contract artifact
    ArtifactParsing(String),
    /// Error computing a class hash from an artifact
    ClassHash(String),
    /// Error querying the node
    ChainQuery(String),
    /// Error declaring a contract class
    ContractDeclaration(String),
    /// Error deploying a contract
    ContractDeployment(String),
    /// Error calling a contract method
    ContractInteraction(String),
    /// A transaction was included but reverted
    TransactionReverted(String),
    /// A transaction was not accepted within the wait timeout
    TransactionTimeout(String),
    /// Error constructing calldata for a contract method
    CalldataConstruction(String),
    /// A publisher is registered on-chain under an address different from the configured one
    PublisherConflict(String),
}

impl Display for ScriptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::Config(s) => write!(f, "configuration error: {}", s),
            ScriptError::ManifestMissing(s) => write!(f, "manifest not found: {}", s),
            ScriptError::ReadManifest(s) => write!(f, "error reading manifest: {}", s),
            ScriptError::WriteManifest(s) => write!(f, "error writing manifest: {}", s),
            ScriptError::ManifestParse(s) => write!(f, "error parsing manifest: {}", s),
            ScriptError::MissingDeclaration(s) => write!(f, "contract not declared: {}", s),
            ScriptError::NotDeployed(s) => write!(f, "contract not deployed: {}", s),
            ScriptError::ReadArtifact(s) => write!(f, "error reading artifact: {}", s),
            ScriptError::ArtifactParsing(s) => write!(f, "error parsing artifact: {}", s),
            ScriptError::ClassHash(s) => write!(f, "error computing class hash: {}", s),
            ScriptError::ChainQuery(s) => write!(f, "error querying node: {}", s),
            ScriptError::ContractDeclaration(s) => write!(f, "error declaring contract: {}", s),
            ScriptError::ContractDeployment(s) => write!(f, "error deploying contract: {}", s),
            ScriptError::ContractInteraction(s) => {
                write!(f, "error interacting with contract: {}", s)
            }
            ScriptError::TransactionReverted(s) => write!(f, "transaction reverted: {}", s),
            ScriptError::TransactionTimeout(s) => {
                write!(f, "timed out waiting for transaction: {}", s)
            }
            ScriptError::CalldataConstruction(s) => write!(f, "error constructing calldata: {}", s),
            ScriptError::PublisherConflict(s) => write!(f, "publisher conflict: {}", s),
        }
    }
}

impl Error for ScriptError {}
