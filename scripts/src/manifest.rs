//! Persistence of the per-network declarations & deployments manifests.
//!
//! Manifests live under `<root>/<network>/` as pretty-printed JSON. Every
//! read goes to disk, so a manifest written by an earlier step (or another
//! invocation of the scripts) is always visible to the next one.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};
use starknet::core::types::Felt;
use tracing::{debug, trace};

use crate::{
    constants::{DECLARATIONS_FILE_NAME, DEPLOYMENTS_FILE_NAME, TMP_FILE_EXTENSION},
    errors::ScriptError,
    types::{ClassHash, Declarations, DeploymentRecord, Deployments},
};

/// Reads & writes the manifests of a single network
#[derive(Clone, Debug)]
pub struct ManifestStore {
    /// The directory holding this network's manifests
    dir: PathBuf,
}

impl ManifestStore {
    /// Create a store for the given network under the given root directory.
    ///
    /// Nothing is touched on disk until the first write.
    pub fn new(root: impl AsRef<Path>, network: &str) -> Self {
        ManifestStore {
            dir: root.as_ref().join(network),
        }
    }

    /// The directory holding this network's manifests
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The path of the declarations manifest
    pub fn declarations_path(&self) -> PathBuf {
        self.dir.join(DECLARATIONS_FILE_NAME)
    }

    /// The path of the deployments manifest
    pub fn deployments_path(&self) -> PathBuf {
        self.dir.join(DEPLOYMENTS_FILE_NAME)
    }

    // ----------------
    // | DECLARATIONS |
    // ----------------

    /// Load the declarations manifest, failing if it has never been written
    pub fn load_declarations(&self) -> Result<Declarations, ScriptError> {
        read_manifest(&self.declarations_path())
    }

    /// Overwrite the declarations manifest
    pub fn save_declarations(&self, declarations: &Declarations) -> Result<(), ScriptError> {
        write_manifest(&self.dir, &self.declarations_path(), declarations)
    }

    /// Record the class hash of a single contract, creating the manifest if needed
    pub fn record_declaration(
        &self,
        contract_name: &str,
        class_hash: ClassHash,
    ) -> Result<(), ScriptError> {
        let mut declarations: Declarations = read_manifest_or_default(&self.declarations_path())?;
        if let Some(previous) = declarations.insert(contract_name, class_hash) {
            if previous != class_hash {
                debug!(
                    "Replacing class hash of {contract_name}: {} -> {}",
                    previous.to_hex_string(),
                    class_hash.to_hex_string()
                );
            }
        }
        self.save_declarations(&declarations)
    }

    /// Look up the class hash declared for a contract
    pub fn class_hash(&self, contract_name: &str) -> Result<ClassHash, ScriptError> {
        self.load_declarations()?
            .get(contract_name)
            .ok_or_else(|| ScriptError::MissingDeclaration(contract_name.to_string()))
    }

    // ---------------
    // | DEPLOYMENTS |
    // ---------------

    /// Load the deployments manifest, failing if it has never been written
    pub fn load_deployments(&self) -> Result<Deployments, ScriptError> {
        read_manifest(&self.deployments_path())
    }

    /// Overwrite the deployments manifest
    pub fn save_deployments(&self, deployments: &Deployments) -> Result<(), ScriptError> {
        write_manifest(&self.dir, &self.deployments_path(), deployments)
    }

    /// Record a single deployment, creating the manifest if needed
    pub fn record_deployment(
        &self,
        key: &str,
        record: DeploymentRecord,
    ) -> Result<(), ScriptError> {
        let mut deployments: Deployments = read_manifest_or_default(&self.deployments_path())?;
        deployments.insert(key, record);
        self.save_deployments(&deployments)
    }

    /// Look up the address of the contract deployed under the given key
    pub fn deployment_address(&self, key: &str) -> Result<Felt, ScriptError> {
        let deployments = match self.load_deployments() {
            Ok(deployments) => deployments,
            // Nothing has been deployed on this network yet
            Err(ScriptError::ManifestMissing(_)) => {
                return Err(ScriptError::NotDeployed(key.to_string()))
            }
            Err(e) => return Err(e),
        };

        deployments
            .get(key)
            .map(|record| record.address)
            .ok_or_else(|| ScriptError::NotDeployed(key.to_string()))
    }
}

/// Read and parse a manifest file
fn read_manifest<T: DeserializeOwned>(path: &Path) -> Result<T, ScriptError> {
    let contents = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ScriptError::ManifestMissing(path.display().to_string()),
        _ => ScriptError::ReadManifest(format!("{}: {}", path.display(), e)),
    })?;

    serde_json::from_str(&contents)
        .map_err(|e| ScriptError::ManifestParse(format!("{}: {}", path.display(), e)))
}

/// Read a manifest, treating a missing file as an empty manifest.
///
/// Only used on write paths: reading a manifest for its contents must go
/// through [`read_manifest`].
fn read_manifest_or_default<T: DeserializeOwned + Default>(path: &Path) -> Result<T, ScriptError> {
    match read_manifest(path) {
        Err(ScriptError::ManifestMissing(_)) => {
            debug!("Creating new manifest at {}", path.display());
            Ok(T::default())
        }
        res => res,
    }
}

/// Serialize a manifest to a temporary sibling file, then move it over the target
fn write_manifest<T: Serialize>(dir: &Path, path: &Path, manifest: &T) -> Result<(), ScriptError> {
    fs::create_dir_all(dir)
        .map_err(|e| ScriptError::WriteManifest(format!("{}: {}", dir.display(), e)))?;

    let mut contents = serde_json::to_string_pretty(manifest)
        .map_err(|e| ScriptError::WriteManifest(e.to_string()))?;
    contents.push('\n');

    let tmp_path = path.with_extension(TMP_FILE_EXTENSION);
    fs::write(&tmp_path, contents)
        .map_err(|e| ScriptError::WriteManifest(format!("{}: {}", tmp_path.display(), e)))?;
    fs::rename(&tmp_path, path)
        .map_err(|e| ScriptError::WriteManifest(format!("{}: {}", path.display(), e)))?;

    trace!("Wrote manifest {}", path.display());
    Ok(())
}
