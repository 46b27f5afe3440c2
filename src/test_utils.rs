use crate::{HashAlgorithm, HashableRecord, Result};
use serde_json::{Value, json};

/// A payload mixing every JSON shape, including nested objects whose keys
/// are deliberately out of order.
pub fn sample_fields() -> Vec<(String, Value)> {
    vec![
        ("data".to_string(), json!("hello")),
        ("height".to_string(), json!(42)),
        ("ratio".to_string(), json!(0.25)),
        ("final".to_string(), json!(false)),
        ("parent".to_string(), Value::Null),
        (
            "meta".to_string(),
            json!({ "z": [3, 2, 1], "a": { "y": "why", "x": "ex" } }),
        ),
        ("tags".to_string(), json!(["b", "a"])),
    ]
}

/// Builds a record from `fields`, inserted in the order given.
pub fn record_from(
    fields: &[(String, Value)],
    algorithm: HashAlgorithm,
) -> Result<HashableRecord> {
    let mut record = HashableRecord::with_algorithm(algorithm);
    for (key, value) in fields {
        record.add_field(key.clone(), value)?;
    }
    Ok(record)
}

/// `record_from` followed by `compute_digest`, returning the hex digest.
pub fn digest_of(fields: &[(String, Value)], algorithm: HashAlgorithm) -> Result<String> {
    let mut record = record_from(fields, algorithm)?;
    Ok(record.finalize()?.to_string())
}
