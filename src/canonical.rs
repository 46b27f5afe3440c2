//! Canonical JSON used as the digest input.
//!
//! The encoding is compact (no whitespace, `,` and `:` separators) and sorts
//! object keys byte-wise at every nesting level, so two field sets holding the
//! same keys and values always serialize to the same bytes no matter the
//! order they were built in.
use crate::error::Result;
use serde_json::Value;
use std::collections::BTreeMap;

/// Serializes a JSON value into its canonical text form.
///
/// # Example
/// ```
/// use hashnode::canonical::to_canonical_json;
/// use serde_json::json;
///
/// let text = to_canonical_json(&json!({ "b": 2, "a": [true, null] })).unwrap();
/// assert_eq!(text, r#"{"a":[true,null],"b":2}"#);
/// ```
pub fn to_canonical_json(value: &Value) -> Result<String> {
    let mut out = String::new();
    write_value(&mut out, value)?;
    Ok(out)
}

/// Serializes a record's top-level field mapping as a canonical object.
pub fn canonical_fields(fields: &BTreeMap<String, Value>) -> Result<String> {
    let mut out = String::new();
    write_object(&mut out, fields.iter())?;
    Ok(out)
}

fn write_value(out: &mut String, value: &Value) -> Result<()> {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => out.push_str(&serde_json::to_string(s)?),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(out, item)?;
            }
            out.push(']');
        }
        Value::Object(map) => write_object(out, map.iter())?,
    }
    Ok(())
}

fn write_object<'a, I>(out: &mut String, entries: I) -> Result<()>
where
    I: Iterator<Item = (&'a String, &'a Value)>,
{
    // serde_json's map may preserve insertion order depending on features
    let sorted: BTreeMap<&str, &Value> = entries.map(|(k, v)| (k.as_str(), v)).collect();

    out.push('{');
    for (i, (key, value)) in sorted.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&serde_json::to_string(key)?);
        out.push(':');
        write_value(out, value)?;
    }
    out.push('}');
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_primitives() {
        assert_eq!(to_canonical_json(&json!(null)).unwrap(), "null");
        assert_eq!(to_canonical_json(&json!(false)).unwrap(), "false");
        assert_eq!(to_canonical_json(&json!(-42)).unwrap(), "-42");
        assert_eq!(to_canonical_json(&json!(1.5)).unwrap(), "1.5");
        assert_eq!(to_canonical_json(&json!("hola")).unwrap(), "\"hola\"");
    }

    #[test]
    fn test_string_escaping() {
        let text = to_canonical_json(&json!("line\n\"quoted\"")).unwrap();
        assert_eq!(text, r#""line\n\"quoted\"""#);
    }

    #[test]
    fn test_array_keeps_order() {
        assert_eq!(
            to_canonical_json(&json!([3, "a", false])).unwrap(),
            "[3,\"a\",false]"
        );
    }

    #[test]
    fn test_nested_keys_sorted() {
        let val = json!({ "z": [ { "y": "yes", "b": 0 }, null ], "a": { "x": 10 } });
        assert_eq!(
            to_canonical_json(&val).unwrap(),
            r#"{"a":{"x":10},"z":[{"b":0,"y":"yes"},null]}"#
        );
    }

    #[test]
    fn test_keys_sorted_bytewise() {
        // uppercase sorts before lowercase, shorter prefix first
        let val = json!({ "b": 1, "B": 2, "ab": 3, "a": 4 });
        assert_eq!(
            to_canonical_json(&val).unwrap(),
            r#"{"B":2,"a":4,"ab":3,"b":1}"#
        );
    }

    #[test]
    fn test_empty_fields() {
        assert_eq!(canonical_fields(&BTreeMap::new()).unwrap(), "{}");
    }

    #[test]
    fn test_fields_match_value_form() {
        let mut fields = BTreeMap::new();
        fields.insert("data".to_string(), json!("hello"));
        fields.insert("meta".to_string(), json!({ "k": [1, 2] }));
        let as_value = Value::Object(fields.clone().into_iter().collect());
        assert_eq!(
            canonical_fields(&fields).unwrap(),
            to_canonical_json(&as_value).unwrap()
        );
    }
}
