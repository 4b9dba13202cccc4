//! Shared fixtures for the integration tests

#![allow(dead_code)]

use std::{
    fs,
    path::Path,
    sync::{Mutex, MutexGuard},
};

use async_trait::async_trait;
use pragma_scripts::{
    artifacts::{ArtifactStore, ContractArtifact},
    client::{ChainClient, DeclareOutcome},
    commands::ScriptContext,
    config::Network,
    errors::ScriptError,
    manifest::ManifestStore,
    types::{ClassHash, DeploymentRecord},
};
use serde_json::json;
use starknet::core::{types::Felt, utils::get_selector_from_name};
use tempfile::TempDir;

/// The account the mock chain sends from
pub const ACCOUNT: u64 = 0xacc;

/// The address the mock chain gives its first deployment
const FIRST_DEPLOYED_ADDRESS: u64 = 0x1000;

/// An invoke as seen by the mock chain
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SentInvoke {
    pub to: Felt,
    pub selector: Felt,
    pub calldata: Vec<Felt>,
}

/// How the mock chain settles the transactions it is sent
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Settlement {
    /// Transactions are accepted
    #[default]
    Accept,
    /// Transactions are included but revert
    Revert,
    /// Transactions are never included
    Timeout,
}

/// Everything the mock chain has seen
#[derive(Default)]
pub struct MockState {
    /// Classes known to the chain
    pub declared: Vec<ClassHash>,
    /// Declare transactions sent
    pub declares: Vec<ClassHash>,
    /// Deployments sent, by class hash & constructor calldata
    pub deploys: Vec<(ClassHash, Vec<Felt>)>,
    /// Invokes sent
    pub invokes: Vec<SentInvoke>,
    /// Calls made
    pub calls: Vec<SentInvoke>,
    /// Canned call results, by selector
    pub call_responses: Vec<(Felt, Vec<Felt>)>,
    /// How sent transactions settle
    pub settlement: Settlement,
}

/// An in-memory chain recording every request it gets
#[derive(Default)]
pub struct MockChain {
    state: Mutex<MockState>,
    /// Fail class lookups with something other than "not found"
    lookups_fail: bool,
}

impl MockChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// A chain whose class lookups fail with a transient error
    pub fn with_failing_lookups() -> Self {
        MockChain {
            lookups_fail: true,
            ..Default::default()
        }
    }

    pub fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap()
    }

    /// Settle every transaction sent from now on as `settlement`
    pub fn settle(&self, settlement: Settlement) {
        self.state().settlement = settlement;
    }

    /// Mark a class as already declared
    pub fn add_declared(&self, class_hash: ClassHash) {
        self.state().declared.push(class_hash);
    }

    /// Answer calls to `function_name` with `result`
    pub fn respond(&self, function_name: &str, result: Vec<Felt>) {
        let selector = get_selector_from_name(function_name).unwrap();
        let mut state = self.state();
        state.call_responses.retain(|(s, _)| *s != selector);
        state.call_responses.push((selector, result));
    }

    pub fn declare_count(&self) -> usize {
        self.state().declares.len()
    }

    pub fn invokes(&self) -> Vec<SentInvoke> {
        self.state().invokes.clone()
    }

    /// The invokes of `function_name`, in order
    pub fn invokes_of(&self, function_name: &str) -> Vec<SentInvoke> {
        let selector = get_selector_from_name(function_name).unwrap();
        self.invokes()
            .into_iter()
            .filter(|invoke| invoke.selector == selector)
            .collect()
    }

    pub fn deploys(&self) -> Vec<(ClassHash, Vec<Felt>)> {
        self.state().deploys.clone()
    }

    pub fn call_count(&self) -> usize {
        self.state().calls.len()
    }
}

#[async_trait]
impl ChainClient for MockChain {
    fn account_address(&self) -> Felt {
        Felt::from(ACCOUNT)
    }

    async fn is_declared(&self, class_hash: ClassHash) -> Result<bool, ScriptError> {
        if self.lookups_fail {
            return Err(ScriptError::ChainQuery("rate limited".to_string()));
        }

        Ok(self.state().declared.contains(&class_hash))
    }

    async fn declare(
        &self,
        artifact: &ContractArtifact,
        _compiled_class_hash: ClassHash,
    ) -> Result<DeclareOutcome, ScriptError> {
        let class_hash = artifact.class_hash()?;
        let mut state = self.state();
        // A reverted declaration leaves the class unknown to the chain
        if state.settlement == Settlement::Accept {
            state.declared.push(class_hash);
        }
        state.declares.push(class_hash);

        Ok(DeclareOutcome {
            class_hash,
            transaction_hash: Felt::from(state.declares.len() as u64),
        })
    }

    async fn deploy(
        &self,
        class_hash: ClassHash,
        constructor_calldata: Vec<Felt>,
    ) -> Result<DeploymentRecord, ScriptError> {
        let mut state = self.state();
        if !state.declared.contains(&class_hash) {
            return Err(ScriptError::ContractDeployment(format!(
                "class {} not declared",
                class_hash.to_hex_string()
            )));
        }

        state.deploys.push((class_hash, constructor_calldata));
        let n = state.deploys.len() as u64;
        Ok(DeploymentRecord::new(
            Felt::from(FIRST_DEPLOYED_ADDRESS + n - 1),
            Felt::from(0xd000 + n),
        ))
    }

    async fn invoke(
        &self,
        to: Felt,
        selector: Felt,
        calldata: Vec<Felt>,
    ) -> Result<Felt, ScriptError> {
        let mut state = self.state();
        state.invokes.push(SentInvoke {
            to,
            selector,
            calldata,
        });
        Ok(Felt::from(0xe000 + state.invokes.len() as u64))
    }

    async fn call(
        &self,
        to: Felt,
        selector: Felt,
        calldata: Vec<Felt>,
    ) -> Result<Vec<Felt>, ScriptError> {
        let mut state = self.state();
        state.calls.push(SentInvoke {
            to,
            selector,
            calldata,
        });

        state
            .call_responses
            .iter()
            .find(|(s, _)| *s == selector)
            .map(|(_, result)| result.clone())
            .ok_or_else(|| ScriptError::ContractInteraction("entry point not found".to_string()))
    }

    async fn wait_for_acceptance(&self, transaction_hash: Felt) -> Result<(), ScriptError> {
        let tx = transaction_hash.to_hex_string();
        match self.state().settlement {
            Settlement::Accept => Ok(()),
            Settlement::Revert => Err(ScriptError::TransactionReverted(format!(
                "{tx}: execution failed"
            ))),
            Settlement::Timeout => Err(ScriptError::TransactionTimeout(tx)),
        }
    }
}

/// Write a minimal Sierra & CASM pair for `name`; `seed` makes its class hash
/// unique
pub fn write_artifact(build_dir: &Path, name: &str, seed: u64) {
    fs::create_dir_all(build_dir).unwrap();

    let sierra = json!({
        "sierra_program": ["0x1", "0x3", format!("{seed:#x}")],
        "sierra_program_debug_info": {
            "type_names": [],
            "libfunc_names": [],
            "user_func_names": []
        },
        "contract_class_version": "0.1.0",
        "entry_points_by_type": {
            "CONSTRUCTOR": [],
            "EXTERNAL": [],
            "L1_HANDLER": []
        },
        "abi": []
    });
    let casm = json!({
        "prime": "0x800000000000011000000000000000000000000000000000000000000000001",
        "compiler_version": "2.6.3",
        "bytecode": ["0x1", format!("{seed:#x}")],
        "hints": [],
        "entry_points_by_type": {
            "EXTERNAL": [],
            "L1_HANDLER": [],
            "CONSTRUCTOR": []
        }
    });

    let store = ArtifactStore::new(build_dir);
    fs::write(
        store.sierra_path(name),
        serde_json::to_string_pretty(&sierra).unwrap(),
    )
    .unwrap();
    fs::write(
        store.casm_path(name),
        serde_json::to_string_pretty(&casm).unwrap(),
    )
    .unwrap();
}

/// A script context over a mock chain, with its stores in a temporary
/// directory
pub struct Harness {
    pub dir: TempDir,
    pub ctx: ScriptContext<MockChain>,
}

impl Harness {
    pub fn new(chain: MockChain) -> Self {
        Self::on(Network::Devnet, chain)
    }

    /// A harness running against `network`
    pub fn on(network: Network, chain: MockChain) -> Self {
        let dir = TempDir::new().unwrap();
        let ctx = ScriptContext::new(
            network,
            chain,
            ArtifactStore::new(dir.path().join("build")),
            ManifestStore::new(dir.path().join("deployments"), network.name()),
        );

        Harness { dir, ctx }
    }

    pub fn build_dir(&self) -> std::path::PathBuf {
        self.dir.path().join("build")
    }

    /// Write an artifact for each of `names`
    pub fn with_artifacts(self, names: &[&str]) -> Self {
        for (i, name) in names.iter().enumerate() {
            write_artifact(&self.build_dir(), name, i as u64 + 1);
        }
        self
    }

    pub fn chain(&self) -> &MockChain {
        &self.ctx.client
    }

    pub fn manifests(&self) -> &ManifestStore {
        &self.ctx.manifests
    }

    /// Write a JSON file into the temporary directory
    pub fn write_json(&self, file_name: &str, value: serde_json::Value) -> std::path::PathBuf {
        let path = self.dir.path().join(file_name);
        fs::write(&path, serde_json::to_string_pretty(&value).unwrap()).unwrap();
        path
    }
}
