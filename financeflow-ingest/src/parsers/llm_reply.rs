//! Extract transaction records from a chat-model reply.
//!
//! Replies usually carry the JSON inside a fenced block, sometimes with prose
//! around it:
//!   Here are the transactions:
//!   ```json
//!   [{"date": "2024-03-15", "description": "...", ...}]
//!   ```

use std::sync::LazyLock;

use anyhow::{Context, Result};
use financeflow_core::RawTransaction;
use regex::Regex;
use serde_json::Value;

use super::json_records::records_from_value;

static FENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```(?:json|JSON)?\s*(.*?)```").expect("code fence pattern")
});

fn fenced_body(reply: &str) -> Option<&str> {
    let body = FENCE_RE.captures(reply)?.get(1)?.as_str().trim();
    (!body.is_empty()).then_some(body)
}

/// An array holding objects (or nothing), or an object wrapping `transactions`
fn looks_like_records(value: &Value) -> bool {
    match value {
        Value::Array(items) => items.is_empty() || items.iter().any(Value::is_object),
        Value::Object(map) => map.contains_key("transactions"),
        _ => false,
    }
}

/// First JSON value embedded in prose that looks like a record list.
/// Each `[` or `{` is tried in turn, so bracketed prose such as "[page 1]" is skipped.
fn embedded_records(reply: &str) -> Option<Value> {
    reply.match_indices(['[', '{']).find_map(|(start, _)| {
        let mut stream = serde_json::Deserializer::from_str(&reply[start..]).into_iter::<Value>();
        match stream.next() {
            Some(Ok(value)) if looks_like_records(&value) => Some(value),
            _ => None,
        }
    })
}

pub fn parse_llm_reply(reply: &str) -> Result<Vec<RawTransaction>> {
    let value = match fenced_body(reply) {
        Some(body) => serde_json::from_str(body).context("parse JSON in model reply")?,
        None => embedded_records(reply).context("no JSON transaction list found in model reply")?,
    };
    records_from_value(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fenced_block_with_prose() {
        let reply = r#"Sure! Here are the transactions I found:

```json
[
  {"date": "2024-03-15", "description": "UPI Payment to Zomato", "amount": 450.0, "type": "debit", "confidence": 0.9},
  {"date": "2024-03-16", "description": "Salary ACME", "amount": 50000, "type": "credit", "confidence": 0.95}
]
```

Let me know if you need anything else."#;
        let records = parse_llm_reply(reply).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].kind, Some(json!("credit")));
    }

    #[test]
    fn test_bare_array_in_prose() {
        let reply = r#"Result: [{"description": "Uber", "amount": 220}] done"#;
        let records = parse_llm_reply(reply).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_wrapped_object_without_fence() {
        let reply = r#"{"transactions": [{"description": "Netflix", "amount": 649}]}"#;
        assert_eq!(parse_llm_reply(reply).unwrap().len(), 1);
    }

    #[test]
    fn test_brackets_in_surrounding_prose() {
        let reply = r#"Found 1 transaction [page 1]: [{"description":"Uber","amount":220}] (see {notes})"#;
        let records = parse_llm_reply(reply).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].description, Some(json!("Uber")));
    }

    #[test]
    fn test_number_list_before_records_is_skipped() {
        let reply = r#"Pages [1, 2]: {"transactions": [{"description": "Netflix", "amount": 649}]}"#;
        let records = parse_llm_reply(reply).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].amount, Some(json!(649)));
    }

    #[test]
    fn test_no_json() {
        assert!(parse_llm_reply("I could not read this statement.").is_err());
    }
}
