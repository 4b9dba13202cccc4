//! Loading of compiled contract artifacts from the build directory

use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use serde::de::DeserializeOwned;
use starknet::core::types::{
    contract::{CompiledClass, SierraClass},
    FlattenedSierraClass,
};
use tracing::trace;

use crate::{
    constants::{CASM_FILE_EXTENSION, SIERRA_FILE_EXTENSION},
    errors::ScriptError,
    types::ClassHash,
};

/// Locates contract artifacts produced by the Cairo build
#[derive(Clone, Debug)]
pub struct ArtifactStore {
    /// The directory containing the artifacts
    build_dir: PathBuf,
}

impl ArtifactStore {
    /// Create a store reading from the given build directory
    pub fn new(build_dir: impl Into<PathBuf>) -> Self {
        ArtifactStore {
            build_dir: build_dir.into(),
        }
    }

    /// The path of a contract's Sierra artifact
    pub fn sierra_path(&self, contract_name: &str) -> PathBuf {
        self.build_dir
            .join(format!("{}.{}", contract_name, SIERRA_FILE_EXTENSION))
    }

    /// The path of a contract's CASM artifact
    pub fn casm_path(&self, contract_name: &str) -> PathBuf {
        self.build_dir
            .join(format!("{}.{}", contract_name, CASM_FILE_EXTENSION))
    }

    /// Read & parse both artifacts of a contract
    pub fn load(&self, contract_name: &str) -> Result<ContractArtifact, ScriptError> {
        let sierra = read_artifact(&self.sierra_path(contract_name))?;
        let casm = read_artifact(&self.casm_path(contract_name))?;

        Ok(ContractArtifact {
            name: contract_name.to_string(),
            sierra,
            casm,
        })
    }
}

/// The paired Sierra & CASM representations of a compiled contract
#[derive(Debug)]
pub struct ContractArtifact {
    /// The name of the contract
    pub name: String,
    /// The intermediate (Sierra) representation
    pub sierra: SierraClass,
    /// The compiled-execution (CASM) representation
    pub casm: CompiledClass,
}

impl ContractArtifact {
    /// The class hash, computed from the Sierra representation
    pub fn class_hash(&self) -> Result<ClassHash, ScriptError> {
        self.sierra
            .class_hash()
            .map_err(|e| ScriptError::ClassHash(format!("{} (sierra): {}", self.name, e)))
    }

    /// The compiled class hash, computed from the CASM representation
    pub fn compiled_class_hash(&self) -> Result<ClassHash, ScriptError> {
        self.casm
            .class_hash()
            .map_err(|e| ScriptError::ClassHash(format!("{} (casm): {}", self.name, e)))
    }

    /// The flattened Sierra class, as submitted in a declare transaction
    pub fn flattened(&self) -> Result<FlattenedSierraClass, ScriptError> {
        self.sierra
            .clone()
            .flatten()
            .map_err(|e| ScriptError::ArtifactParsing(format!("{}: {}", self.name, e)))
    }
}

/// Parse a JSON artifact file
fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T, ScriptError> {
    trace!("Reading artifact {}", path.display());
    let file = File::open(path)
        .map_err(|e| ScriptError::ReadArtifact(format!("{}: {}", path.display(), e)))?;

    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| ScriptError::ArtifactParsing(format!("{}: {}", path.display(), e)))
}
