//! Checksums for input provenance and dataset verification

use crate::domain::Result;
use serde_json::Value;
use sha2::{Digest, Sha256};

/// Calculate SHA-256 checksum of JSON data
///
/// Uses canonical JSON serialization to ensure consistent checksums
/// regardless of key ordering or whitespace differences.
///
/// # Arguments
///
/// * `data` - The JSON value to calculate checksum for
///
/// # Returns
///
/// Returns a hex-encoded SHA-256 checksum string (64 characters).
///
/// # Examples
///
/// ```
/// use labelfuse::core::verification::checksum::calculate_checksum;
/// use serde_json::json;
///
/// let data = json!({"key": "value"});
/// let checksum = calculate_checksum(&data).unwrap();
/// assert_eq!(checksum.len(), 64); // SHA-256 produces 64 hex characters
/// ```
pub fn calculate_checksum(data: &Value) -> Result<String> {
    let normalized = normalize_json(data);

    // Compact, sorted keys
    let data_str = serde_json::to_string(&normalized)
        .map_err(|e| crate::domain::LabelFuseError::Serialization(e.to_string()))?;

    let mut hasher = Sha256::new();
    hasher.update(data_str.as_bytes());
    let result = hasher.finalize();

    Ok(format!("{result:x}"))
}

/// Normalize JSON value to ensure consistent key ordering
///
/// This recursively sorts all object keys to ensure that semantically
/// identical JSON produces the same checksum.
fn normalize_json(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut sorted: std::collections::BTreeMap<String, Value> =
                std::collections::BTreeMap::new();
            for (k, v) in map {
                sorted.insert(k.clone(), normalize_json(v));
            }
            Value::Object(sorted.into_iter().collect())
        }
        Value::Array(arr) => {
            Value::Array(arr.iter().map(normalize_json).collect())
        }
        _ => value.clone(),
    }
}

/// Hex SHA-256 of raw bytes, used for input files
pub fn calculate_checksum_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    format!("{result:x}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_calculate_checksum_deterministic() {
        let data = json!({"category": "ZONE_CODE", "zone_code": "R-1"});

        let checksum1 = calculate_checksum(&data).unwrap();
        let checksum2 = calculate_checksum(&data).unwrap();

        assert_eq!(checksum1, checksum2);
        assert_eq!(checksum1.len(), 64);
    }

    #[test]
    fn test_calculate_checksum_different_content() {
        let data1 = json!({"category": "MIN_LOT_AREA", "normalized_value": 5000.0});
        let data2 = json!({"category": "MIN_LOT_AREA", "normalized_value": 6000.0});

        assert_ne!(
            calculate_checksum(&data1).unwrap(),
            calculate_checksum(&data2).unwrap()
        );
    }

    #[test]
    fn test_calculate_checksum_bytes_known_value() {
        assert_eq!(
            calculate_checksum_bytes(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_calculate_checksum_key_order_independence() {
        let data1 = json!({"a": 1, "b": 2, "c": 3});
        let data2 = json!({"c": 3, "a": 1, "b": 2});

        assert_eq!(
            calculate_checksum(&data1).unwrap(),
            calculate_checksum(&data2).unwrap()
        );
    }

    #[test]
    fn test_array_order_matters() {
        let data1 = json!([{"id": 1}, {"id": 2}]);
        let data2 = json!([{"id": 2}, {"id": 1}]);

        assert_ne!(
            calculate_checksum(&data1).unwrap(),
            calculate_checksum(&data2).unwrap()
        );
    }

    #[test]
    fn test_normalize_json_nested() {
        let data = json!({
            "outer": {"z": 1, "a": 2},
            "array": [{"b": 1, "a": 2}]
        });

        let normalized = normalize_json(&data);
        let keys: Vec<&String> = normalized["outer"].as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["a", "z"]);
        assert!(normalized["array"].is_array());
    }
}
