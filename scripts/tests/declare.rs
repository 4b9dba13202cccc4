mod common;

use std::fs;

use common::{write_artifact, Harness, MockChain, Settlement};
use eyre::Result;
use pragma_scripts::{artifacts::ArtifactStore, errors::ScriptError};
use serde_json::{json, Value};
use tempfile::TempDir;

#[test]
fn class_hashes_are_deterministic() -> Result<()> {
    let first = TempDir::new()?;
    let second = TempDir::new()?;
    write_artifact(first.path(), "Oracle", 7);
    write_artifact(second.path(), "Oracle", 7);
    write_artifact(second.path(), "SummaryStats", 8);

    let a = ArtifactStore::new(first.path()).load("Oracle")?;
    let b = ArtifactStore::new(second.path()).load("Oracle")?;
    let other = ArtifactStore::new(second.path()).load("SummaryStats")?;

    assert_eq!(a.class_hash()?, b.class_hash()?);
    assert_eq!(a.compiled_class_hash()?, b.compiled_class_hash()?);
    assert_ne!(a.class_hash()?, other.class_hash()?);
    Ok(())
}

#[tokio::test]
async fn undeclared_class_is_declared_and_recorded() -> Result<()> {
    let harness = Harness::new(MockChain::new()).with_artifacts(&["Oracle"]);
    let expected = harness.ctx.artifacts.load("Oracle")?.class_hash()?;

    let class_hash = harness.ctx.declarer().declare("Oracle").await?;

    assert_eq!(class_hash, expected);
    assert_eq!(harness.chain().declare_count(), 1);

    let on_disk: Value =
        serde_json::from_str(&fs::read_to_string(harness.manifests().declarations_path())?)?;
    assert_eq!(on_disk, json!({ "Oracle": expected.to_hex_string() }));
    Ok(())
}

#[tokio::test]
async fn declared_class_is_not_redeclared() -> Result<()> {
    let harness = Harness::new(MockChain::new()).with_artifacts(&["Oracle"]);
    let class_hash = harness.ctx.artifacts.load("Oracle")?.class_hash()?;
    harness.chain().add_declared(class_hash);
    harness.manifests().record_declaration("Oracle", class_hash)?;

    let returned = harness.ctx.declarer().declare("Oracle").await?;

    assert_eq!(returned, class_hash);
    assert_eq!(harness.chain().declare_count(), 0);
    assert_eq!(harness.manifests().class_hash("Oracle")?, class_hash);
    Ok(())
}

#[tokio::test]
async fn declaring_twice_sends_one_transaction() -> Result<()> {
    let harness = Harness::new(MockChain::new()).with_artifacts(&["Oracle"]);
    let declarer = harness.ctx.declarer();

    let first = declarer.declare("Oracle").await?;
    let second = declarer.declare("Oracle").await?;

    assert_eq!(first, second);
    assert_eq!(harness.chain().declare_count(), 1);
    Ok(())
}

#[tokio::test]
async fn failed_lookup_propagates_without_declaring() -> Result<()> {
    let harness = Harness::new(MockChain::with_failing_lookups()).with_artifacts(&["Oracle"]);

    let res = harness.ctx.declarer().declare("Oracle").await;

    assert!(matches!(res, Err(ScriptError::ChainQuery(_))));
    assert_eq!(harness.chain().declare_count(), 0);
    assert!(!harness.manifests().declarations_path().exists());
    Ok(())
}

#[tokio::test]
async fn missing_artifact_fails_before_touching_the_chain() -> Result<()> {
    let harness = Harness::new(MockChain::new()).with_artifacts(&["Oracle"]);

    let res = harness.ctx.declarer().declare("YieldCurve").await;

    assert!(matches!(res, Err(ScriptError::ReadArtifact(_))));
    assert_eq!(harness.chain().declare_count(), 0);
    Ok(())
}

#[tokio::test]
async fn declare_all_records_every_class() -> Result<()> {
    let names = ["Oracle", "PublisherRegistry", "SummaryStats"];
    let harness = Harness::new(MockChain::new()).with_artifacts(&names);
    // One class is already on-chain
    let registry_hash = harness.ctx.artifacts.load("PublisherRegistry")?.class_hash()?;
    harness.chain().add_declared(registry_hash);

    let declarations = harness.ctx.declarer().declare_all(&names).await?;

    assert_eq!(declarations.iter().count(), 3);
    assert_eq!(harness.chain().declare_count(), 2);
    assert_eq!(harness.manifests().load_declarations()?, declarations);
    assert_eq!(declarations.get("PublisherRegistry"), Some(registry_hash));
    Ok(())
}

#[tokio::test]
async fn reverted_declaration_is_not_recorded() -> Result<()> {
    let harness = Harness::new(MockChain::new()).with_artifacts(&["Oracle", "SummaryStats"]);
    let declarer = harness.ctx.declarer();
    declarer.declare("SummaryStats").await?;
    let before = fs::read_to_string(harness.manifests().declarations_path())?;

    harness.chain().settle(Settlement::Revert);
    let res = declarer.declare("Oracle").await;

    assert!(matches!(res, Err(ScriptError::TransactionReverted(_))));
    assert_eq!(harness.chain().declare_count(), 2);
    assert_eq!(fs::read_to_string(harness.manifests().declarations_path())?, before);
    assert!(harness.manifests().class_hash("Oracle").is_err());
    Ok(())
}

#[tokio::test]
async fn timed_out_declaration_leaves_no_manifest() -> Result<()> {
    let harness = Harness::new(MockChain::new()).with_artifacts(&["Oracle"]);
    harness.chain().settle(Settlement::Timeout);

    let res = harness.ctx.declarer().declare("Oracle").await;

    assert!(matches!(res, Err(ScriptError::TransactionTimeout(_))));
    assert!(!harness.manifests().declarations_path().exists());
    Ok(())
}
