//! JSON record lists, as written by the parsing collaborator or exported by hand.
//!
//! Accepted shapes:
//!   [ {...}, {...} ]
//!   { "transactions": [ {...}, {...} ] }

use anyhow::{Context, Result, bail};
use financeflow_core::RawTransaction;
use serde_json::Value;
use tracing::warn;

/// Turn a JSON array (or an object wrapping one under `transactions`) into raw records.
/// Elements that are not objects are skipped.
pub fn records_from_value(value: Value) -> Result<Vec<RawTransaction>> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("transactions") {
            Some(Value::Array(items)) => items,
            _ => bail!("expected a \"transactions\" array in JSON object"),
        },
        other => bail!("expected a JSON array of transactions, got {}", kind_name(&other)),
    };

    let mut out = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        match item {
            Value::Object(map) => out.push(RawTransaction::from(map)),
            other => warn!(index, kind = kind_name(&other), "skipping non-object transaction entry"),
        }
    }
    Ok(out)
}

pub fn parse_json_records(text: &str) -> Result<Vec<RawTransaction>> {
    let value: Value = serde_json::from_str(text).context("parse transaction JSON")?;
    records_from_value(value)
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_array() {
        let records = parse_json_records(
            r#"[{"date":"2024-03-15","description":"Zomato","amount":450}]"#,
        )
        .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].description, Some(json!("Zomato")));
    }

    #[test]
    fn test_parse_wrapped_object() {
        let records =
            parse_json_records(r#"{"transactions":[{"amount":"12"},{"amount":3}]}"#).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_skips_non_objects() {
        let records = parse_json_records(r#"[1, "x", {"amount": 5}, null]"#).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].amount, Some(json!(5)));
    }

    #[test]
    fn test_conflicting_type_keys_keep_the_batch() {
        let records = parse_json_records(
            r#"[{"description":"Zomato","amount":450,"type":"debit"},{"type":"debit","kind":"expense"}]"#,
        )
        .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].description, Some(json!("Zomato")));
        assert_eq!(records[1].kind, Some(json!("debit")));
    }

    #[test]
    fn test_rejects_scalars() {
        assert!(parse_json_records("42").is_err());
        assert!(parse_json_records(r#"{"rows": []}"#).is_err());
        assert!(parse_json_records("not json").is_err());
    }
}
