//! Loosely typed records emitted by the statement-parsing collaborator,
//! and their total coercion into [`ParsedTransaction`].
//!
//! Nothing here fails: missing or malformed fields fall back to safe defaults
//! (amount 0, description "Unknown Transaction", confidence clamped to [0, 1]).

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::transaction::{
    Category, EntryDirection, ParsedTransaction, TransactionType, UNKNOWN_DESCRIPTION,
};

/// One parsed-statement row as received. Every field may be absent or of the wrong type.
///
/// Deserializes from any JSON object: unknown keys are ignored and `type`
/// wins over its `kind` alias when both are present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct RawTransaction {
    pub date: Option<Value>,
    pub description: Option<Value>,
    pub amount: Option<Value>,
    #[serde(rename = "type")]
    pub kind: Option<Value>,
    pub payee: Option<Value>,
    pub category: Option<Value>,
    pub confidence: Option<Value>,
}

impl From<Map<String, Value>> for RawTransaction {
    fn from(mut map: Map<String, Value>) -> Self {
        let mut take = |key: &str| map.remove(key).filter(|v| !v.is_null());
        let kind = take("type");
        let kind = kind.or_else(|| take("kind"));
        Self {
            date: take("date"),
            description: take("description"),
            amount: take("amount"),
            kind,
            payee: take("payee"),
            category: take("category"),
            confidence: take("confidence"),
        }
    }
}

impl RawTransaction {
    pub fn coerce(&self) -> ParsedTransaction {
        ParsedTransaction {
            date: coerce_date(self.date.as_ref()),
            description: text(self.description.as_ref())
                .unwrap_or_else(|| UNKNOWN_DESCRIPTION.to_string()),
            amount: coerce_amount(self.amount.as_ref()),
            kind: coerce_kind(self.kind.as_ref(), self.amount.as_ref()),
            category: text(self.category.as_ref()).map(|label| Category::from_label(&label)),
            payee: text(self.payee.as_ref()),
            confidence: coerce_confidence(self.confidence.as_ref()),
        }
    }
}

/// Trimmed, non-empty text from a string or number value
fn text(value: Option<&Value>) -> Option<String> {
    let s = match value? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    if s.is_empty() { None } else { Some(s) }
}

fn number(value: Option<&Value>) -> Option<f64> {
    let n = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => parse_amount_text(s)?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

static DIRECTION_SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(debit|credit|dr|cr)\.?$").expect("amount direction pattern")
});

/// Split a trailing Dr/Cr marker off an amount: "450.00 Dr" is ("450.00", Debit).
fn split_direction(raw: &str) -> (&str, Option<EntryDirection>) {
    let trimmed = raw.trim();
    let Some(caps) = DIRECTION_SUFFIX_RE.captures(trimmed) else {
        return (trimmed, None);
    };
    let (Some(whole), Some(marker)) = (caps.get(0), caps.get(1)) else {
        return (trimmed, None);
    };
    let head = &trimmed[..whole.start()];
    // "incr", "micro" and the like are words, not markers
    if head.ends_with(|c: char| c.is_alphabetic()) {
        return (trimmed, None);
    }
    (head.trim_end(), EntryDirection::parse(marker.as_str()))
}

/// Parse "Rs. 1,234.50", "INR 99", "₹450", "$12", "(45.00)", "450.00 Dr" and plain numbers.
/// Parenthesized values are negative. A trailing Dr/Cr marker is dropped.
pub fn parse_amount_text(raw: &str) -> Option<f64> {
    let (amount, _) = split_direction(raw);
    let lowered = amount.to_lowercase();
    let mut s = lowered
        .replace("inr", "")
        .replace("rs.", "")
        .replace("rs", "");
    s.retain(|c| !matches!(c, ',' | '₹' | '$' | '\u{a0}') && !c.is_whitespace());
    if let Some(inner) = s.strip_prefix('(').and_then(|v| v.strip_suffix(')')) {
        return inner.parse::<f64>().ok().map(|v| -v);
    }
    s.parse().ok()
}

fn coerce_amount(value: Option<&Value>) -> f64 {
    number(value).map(f64::abs).unwrap_or(0.0)
}

/// Dr/Cr marker carried on a textual amount
fn amount_direction(value: Option<&Value>) -> Option<EntryDirection> {
    match value? {
        Value::String(s) => split_direction(s).1,
        _ => None,
    }
}

/// Explicit type first, then the amount's Dr/Cr marker, then expense.
fn coerce_kind(value: Option<&Value>, amount: Option<&Value>) -> TransactionType {
    text(value)
        .and_then(|raw| TransactionType::from_loose(&raw))
        .or_else(|| amount_direction(amount).map(Into::into))
        .unwrap_or_default()
}

fn coerce_confidence(value: Option<&Value>) -> f64 {
    number(value).map(|c| c.clamp(0.0, 1.0)).unwrap_or(0.0)
}

/// Reduce a date string to its calendar day (YYYY-MM-DD).
/// Unrecognized formats are returned trimmed, unchanged.
pub fn normalize_day(raw: &str) -> String {
    let s = raw.trim();
    if let Ok(day) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return day.format("%Y-%m-%d").to_string();
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return ts.date_naive().format("%Y-%m-%d").to_string();
    }
    // "2024-03-15T10:00:00" or "2024-03-15 10:00"
    if let Some(prefix) = s.get(..10) {
        if s[10..].starts_with(['T', ' ']) {
            if let Ok(day) = NaiveDate::parse_from_str(prefix, "%Y-%m-%d") {
                return day.format("%Y-%m-%d").to_string();
            }
        }
    }
    for fmt in ["%d/%m/%Y", "%d-%m-%Y"] {
        if let Ok(day) = NaiveDate::parse_from_str(s, fmt) {
            return day.format("%Y-%m-%d").to_string();
        }
    }
    s.to_string()
}

fn coerce_date(value: Option<&Value>) -> String {
    text(value).map(|s| normalize_day(&s)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawTransaction {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_well_formed_record() {
        let parsed = raw(json!({
            "date": "2024-03-15",
            "description": "  UPI Payment to Zomato  ",
            "amount": 450.0,
            "type": "debit",
            "payee": "Zomato",
            "category": "Food & Dining",
            "confidence": 0.92
        }))
        .coerce();
        assert_eq!(parsed.date, "2024-03-15");
        assert_eq!(parsed.description, "UPI Payment to Zomato");
        assert_eq!(parsed.amount, 450.0);
        assert_eq!(parsed.kind, TransactionType::Expense);
        assert_eq!(parsed.category, Some(Category::FoodAndDining));
        assert_eq!(parsed.payee.as_deref(), Some("Zomato"));
        assert_eq!(parsed.confidence, 0.92);
    }

    #[test]
    fn test_missing_fields_fall_back() {
        let parsed = RawTransaction::default().coerce();
        assert_eq!(parsed.amount, 0.0);
        assert_eq!(parsed.description, UNKNOWN_DESCRIPTION);
        assert_eq!(parsed.kind, TransactionType::Expense);
        assert_eq!(parsed.confidence, 0.0);
        assert_eq!(parsed.date, "");
        assert!(parsed.category.is_none());
        assert!(parsed.payee.is_none());
    }

    #[test]
    fn test_amount_coercion() {
        let amount = |v: Value| raw(json!({ "amount": v })).coerce().amount;
        assert_eq!(amount(json!(-1250.5)), 1250.5);
        assert_eq!(amount(json!("Rs. 1,234.50")), 1234.5);
        assert_eq!(amount(json!("₹ 99")), 99.0);
        assert_eq!(amount(json!("(45.00)")), 45.0);
        assert_eq!(amount(json!("INR 2,000")), 2000.0);
        assert_eq!(amount(json!("four hundred")), 0.0);
        assert_eq!(amount(json!(true)), 0.0);
        assert_eq!(amount(json!("NaN")), 0.0);
    }

    #[test]
    fn test_confidence_is_clamped() {
        let confidence = |v: Value| raw(json!({ "confidence": v })).coerce().confidence;
        assert_eq!(confidence(json!(1.7)), 1.0);
        assert_eq!(confidence(json!(-0.2)), 0.0);
        assert_eq!(confidence(json!("0.5")), 0.5);
        assert_eq!(confidence(json!("high")), 0.0);
    }

    #[test]
    fn test_type_reconciliation() {
        let kind = |v: Value| raw(json!({ "type": v })).coerce().kind;
        assert_eq!(kind(json!("credit")), TransactionType::Income);
        assert_eq!(kind(json!("DEBIT")), TransactionType::Expense);
        assert_eq!(kind(json!("subscription")), TransactionType::Subscription);
        assert_eq!(kind(json!("refund")), TransactionType::Expense);
        assert_eq!(kind(json!(null)), TransactionType::Expense);
    }

    #[test]
    fn test_blank_description_and_numeric_payee() {
        let parsed = raw(json!({ "description": "   ", "payee": 7 })).coerce();
        assert_eq!(parsed.description, UNKNOWN_DESCRIPTION);
        assert_eq!(parsed.payee.as_deref(), Some("7"));
    }

    #[test]
    fn test_normalize_day() {
        assert_eq!(normalize_day("2024-03-15"), "2024-03-15");
        assert_eq!(normalize_day("2024-03-15T10:30:00Z"), "2024-03-15");
        assert_eq!(normalize_day("2024-03-15T10:30:00"), "2024-03-15");
        assert_eq!(normalize_day("2024-03-15 10:30"), "2024-03-15");
        assert_eq!(normalize_day("15/03/2024"), "2024-03-15");
        assert_eq!(normalize_day("15-03-2024"), "2024-03-15");
        assert_eq!(normalize_day(" yesterday "), "yesterday");
    }

    #[test]
    fn test_kind_alias_accepted() {
        let parsed = raw(json!({ "kind": "income" })).coerce();
        assert_eq!(parsed.kind, TransactionType::Income);
    }

    #[test]
    fn test_type_and_kind_together() {
        let parsed = raw(json!({ "type": "credit", "kind": "expense", "amount": 10 })).coerce();
        assert_eq!(parsed.kind, TransactionType::Income);
        let parsed = raw(json!({ "type": null, "kind": "subscription" })).coerce();
        assert_eq!(parsed.kind, TransactionType::Subscription);
        let parsed = raw(json!({ "amount": 5, "memo": "ignored" })).coerce();
        assert_eq!(parsed.amount, 5.0);
    }

    #[test]
    fn test_amount_with_direction_marker() {
        assert_eq!(parse_amount_text("450.00 Dr"), Some(450.0));
        assert_eq!(parse_amount_text("Rs 1,200.00 DR"), Some(1200.0));
        assert_eq!(parse_amount_text("450.00 CR"), Some(450.0));
        assert_eq!(parse_amount_text("99.5Cr."), Some(99.5));
        assert_eq!(parse_amount_text("2,000 debit"), Some(2000.0));
        assert_eq!(parse_amount_text("75 credit"), Some(75.0));

        let parsed = raw(json!({ "amount": "Rs 1,200.00 DR" })).coerce();
        assert_eq!(parsed.amount, 1200.0);
        assert_eq!(parsed.kind, TransactionType::Expense);
        let parsed = raw(json!({ "amount": "450.00 CR" })).coerce();
        assert_eq!(parsed.amount, 450.0);
        assert_eq!(parsed.kind, TransactionType::Income);
    }

    #[test]
    fn test_type_and_amount_marker_precedence() {
        let parsed = raw(json!({ "amount": "450.00 Cr", "type": "subscription" })).coerce();
        assert_eq!(parsed.kind, TransactionType::Subscription);
        let parsed = raw(json!({ "amount": "450.00 Cr", "type": "refund" })).coerce();
        assert_eq!(parsed.kind, TransactionType::Income);
    }
}
