//! Hashing - SHA-256 for rendered images and export manifests
//!
//! Same value and render config always hash the same.

use serde::Serialize;
use serde_json::{to_string, Value};
use sha2::{Digest, Sha256};

/// Compute SHA-256 hash of bytes, return hex string
pub fn sha256_hex(data: &[u8]) -> String {
    let digest = Sha256::digest(data);
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Convert to canonical JSON (sorted keys, no whitespace)
pub fn canonical_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let v: Value = serde_json::to_value(value)?;
    to_string(&sort_keys(v))
}

fn sort_keys(v: Value) -> Value {
    match v {
        Value::Object(map) => {
            let mut entries: Vec<_> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(entries.into_iter().map(|(k, v)| (k, sort_keys(v))).collect())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

/// Hash of a manifest, taken over its canonical JSON form.
pub fn compute_manifest_hash<T: Serialize>(manifest: &T) -> Result<String, serde_json::Error> {
    Ok(sha256_hex(canonical_json(manifest)?.as_bytes()))
}

/// Identity of a render request: value, full render config and engine version.
/// request_hash = sha256(value + canonical_config + engine_version)
pub fn compute_request_hash(
    value: i64,
    config: &impl Serialize,
    engine_version: &str,
) -> Result<String, serde_json::Error> {
    let canonical_config = canonical_json(config)?;
    let combined = format!("{}:{}:{}", value, canonical_config, engine_version);
    Ok(sha256_hex(combined.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_canonical_json_sorts_nested_keys() {
        let obj = json!({"z": 1, "a": {"y": 2, "b": 3}});
        assert_eq!(canonical_json(&obj).unwrap(), r#"{"a":{"b":3,"y":2},"z":1}"#);
    }

    #[test]
    fn test_sha256_known_vector() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_request_hash_depends_on_value_and_config() {
        let config = json!({"size": 200, "format": "png"});
        let a = compute_request_hash(-45, &config, "1.0.0").unwrap();
        assert_ne!(a, compute_request_hash(45, &config, "1.0.0").unwrap());
        assert_eq!(a, compute_request_hash(-45, &config, "1.0.0").unwrap());

        let reordered = json!({"format": "png", "size": 200});
        assert_eq!(a, compute_request_hash(-45, &reordered, "1.0.0").unwrap());

        let bigger = json!({"size": 400, "format": "png"});
        assert_ne!(a, compute_request_hash(-45, &bigger, "1.0.0").unwrap());
    }
}
