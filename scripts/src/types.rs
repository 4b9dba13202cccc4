//! Type definitions used throughout the scripts

use std::{
    collections::{btree_map, BTreeMap},
    fmt,
};

use serde::{
    de::{Error as DeError, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};
use serde_json::{Map, Value};
use starknet::core::types::Felt;

/// A contract's class hash
pub type ClassHash = Felt;

/// The declarations manifest: contract name -> class hash
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Declarations(BTreeMap<String, ClassHash>);

impl Declarations {
    /// Get the class hash declared for the given contract
    pub fn get(&self, contract_name: &str) -> Option<ClassHash> {
        self.0.get(contract_name).copied()
    }

    /// Set the class hash of a contract, returning the previous one
    pub fn insert(
        &mut self,
        contract_name: impl Into<String>,
        class_hash: ClassHash,
    ) -> Option<ClassHash> {
        self.0.insert(contract_name.into(), class_hash)
    }

    /// Iterate over the declarations in name order
    pub fn iter(&self) -> btree_map::Iter<'_, String, ClassHash> {
        self.0.iter()
    }
}

impl FromIterator<(String, ClassHash)> for Declarations {
    fn from_iter<I: IntoIterator<Item = (String, ClassHash)>>(iter: I) -> Self {
        Declarations(iter.into_iter().collect())
    }
}

impl Serialize for Declarations {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, class_hash) in &self.0 {
            map.serialize_entry(name, &class_hash.to_hex_string())?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Declarations {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hashes = BTreeMap::<String, FeltValue>::deserialize(deserializer)?;
        Ok(hashes
            .into_iter()
            .map(|(name, FeltValue(class_hash))| (name, class_hash))
            .collect())
    }
}

/// The on-chain location of a deployed contract
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentRecord {
    /// The address of the contract instance
    #[serde(with = "felt_hex")]
    pub address: Felt,
    /// The hash of the transaction which deployed it
    #[serde(with = "felt_hex")]
    pub tx: Felt,
    /// Any other fields found in the manifest entry, kept as-is
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DeploymentRecord {
    /// Create a record with no extra fields
    pub fn new(address: Felt, tx: Felt) -> Self {
        DeploymentRecord {
            address,
            tx,
            extra: Map::new(),
        }
    }
}

/// The deployments manifest: role key -> deployment record
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Deployments(BTreeMap<String, DeploymentRecord>);

impl Deployments {
    /// Get the deployment recorded under the given key
    pub fn get(&self, key: &str) -> Option<&DeploymentRecord> {
        self.0.get(key)
    }

    /// Record a deployment under the given key, returning the previous one
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        record: DeploymentRecord,
    ) -> Option<DeploymentRecord> {
        self.0.insert(key.into(), record)
    }
}

impl FromIterator<(String, DeploymentRecord)> for Deployments {
    fn from_iter<I: IntoIterator<Item = (String, DeploymentRecord)>>(iter: I) -> Self {
        Deployments(iter.into_iter().collect())
    }
}

/// A felt read from a manifest.
///
/// Manifests written by hand or by older tooling may hold felts as hex
/// strings, decimal strings, or bare JSON integers. All of them are accepted
/// and written back as lowercase hex, so a manifest is normalized the first
/// time a script rewrites it. JSON integers above `u64::MAX` cannot be read
/// exactly and are rejected.
struct FeltValue(Felt);

impl<'de> Deserialize<'de> for FeltValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(FeltVisitor).map(FeltValue)
    }
}

/// Visits the accepted felt encodings
struct FeltVisitor;

impl<'de> Visitor<'de> for FeltVisitor {
    type Value = Felt;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a hex string, a decimal string, or a non-negative integer")
    }

    fn visit_str<E: DeError>(self, v: &str) -> Result<Felt, E> {
        parse_felt(v).map_err(E::custom)
    }

    fn visit_u64<E: DeError>(self, v: u64) -> Result<Felt, E> {
        Ok(Felt::from(v))
    }

    fn visit_u128<E: DeError>(self, v: u128) -> Result<Felt, E> {
        Ok(Felt::from(v))
    }

    fn visit_i64<E: DeError>(self, v: i64) -> Result<Felt, E> {
        u64::try_from(v)
            .map(Felt::from)
            .map_err(|_| E::custom(format!("negative felt {v}")))
    }

    fn visit_f64<E: DeError>(self, v: f64) -> Result<Felt, E> {
        Err(E::custom(format!(
            "number {v} is too large to read exactly, write it as a hex string"
        )))
    }
}

/// Parse a felt from a `0x`-prefixed hex string or a decimal string
pub fn parse_felt(s: &str) -> Result<Felt, String> {
    let s = s.trim();
    if let Some(digits) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Felt::from_hex(&format!("0x{digits}")).map_err(|e| format!("invalid hex felt `{s}`: {e}"))
    } else {
        Felt::from_dec_str(s).map_err(|e| format!("invalid decimal felt `{s}`: {e}"))
    }
}

/// Serde codec writing a felt as a lowercase `0x` hex string
pub mod felt_hex {
    use serde::{Deserializer, Serializer};
    use starknet::core::types::Felt;

    use super::FeltVisitor;

    /// Serialize the felt as a hex string
    pub fn serialize<S: Serializer>(felt: &Felt, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&felt.to_hex_string())
    }

    /// Deserialize a felt from a hex string, decimal string, or integer
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Felt, D::Error> {
        deserializer.deserialize_any(FeltVisitor)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn declarations_encode_as_lowercase_hex() {
        let declarations: Declarations =
            [("pragma_Oracle".to_string(), Felt::from(0xABCDu64))].into_iter().collect();

        let encoded = serde_json::to_value(&declarations).unwrap();
        assert_eq!(encoded, json!({ "pragma_Oracle": "0xabcd" }));
    }

    #[test]
    fn declarations_accept_uppercase_and_integers() {
        let decoded: Declarations =
            serde_json::from_value(json!({ "a": "0XFF", "b": "0x00ff", "c": 255 })).unwrap();

        assert_eq!(decoded.get("a"), Some(Felt::from(255u64)));
        assert_eq!(decoded.get("b"), Some(Felt::from(255u64)));
        assert_eq!(decoded.get("c"), Some(Felt::from(255u64)));
    }

    #[test]
    fn deployment_record_normalizes_integer_fields() {
        let decoded: Deployments = serde_json::from_value(json!({
            "pragma_Oracle": { "address": 2730, "tx": "0xBBB" }
        }))
        .unwrap();

        let encoded = serde_json::to_value(&decoded).unwrap();
        assert_eq!(
            encoded,
            json!({ "pragma_Oracle": { "address": "0xaaa", "tx": "0xbbb" } })
        );
    }

    #[test]
    fn deployment_record_keeps_extra_fields() {
        let raw = json!({
            "pragma_Pool": { "address": "0x1", "tx": "0x2", "note": "mock" }
        });
        let decoded: Deployments = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(decoded.get("pragma_Pool").unwrap().extra["note"], json!("mock"));
        assert_eq!(serde_json::to_value(&decoded).unwrap(), raw);
    }

    #[test]
    fn integers_beyond_u64_are_rejected() {
        let raw = r#"{ "pragma_Oracle": { "address": 18446744073709551616, "tx": "0x1" } }"#;
        assert!(serde_json::from_str::<Deployments>(raw).is_err());

        let err = FeltVisitor.visit_f64::<serde_json::Error>(1.8e19).unwrap_err();
        assert!(err.to_string().contains("write it as a hex string"), "{err}");
    }

    #[test]
    fn negative_integers_are_rejected() {
        let decoded = serde_json::from_value::<Declarations>(json!({ "a": -1 }));
        assert!(decoded.is_err());
    }

    #[test]
    fn malformed_hash_is_rejected() {
        let decoded = serde_json::from_value::<Declarations>(json!({ "a": "0xnothex" }));
        assert!(decoded.is_err());
    }
}
