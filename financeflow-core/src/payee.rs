//! Best-effort payee extraction from raw statement descriptions.
//!
//! Statement lines look like:
//!   UPI Payment to Zomato Rs. 450.00 AXIS BANK
//!   NEFT-ACME PAYROLL SERVICES 000123456789 Cr
//!   ECOM Purchase AMAZON SELLER SERVICES INR 1,299.00
//!
//! The result is a short label (at most two tokens), never empty.

use std::sync::LazyLock;

use regex::Regex;

/// Returned when nothing usable is left after stripping
pub const UNKNOWN_PAYEE: &str = "Unknown";

const MAX_PAYEE_TOKENS: usize = 2;

static PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)^(?:upi\s+payment\s+to\s+|ecom\s+purchase\s+|pos\s+",
        r"|upi-|neft-|rtgs-|imps-|atm-|card-)"
    ))
    .expect("payee prefix pattern")
});

static BANK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)\b(?:axis\s+bank|hdfc\s+bank|icici\s+bank|state\s+bank\s+of\s+india|sbi",
        r"|kotak\s+mahindra\s+bank|kotak\s+bank|yes\s+bank|idfc\s+first\s+bank",
        r"|indusind\s+bank|bank\s+of\s+baroda|punjab\s+national\s+bank|pnb",
        r"|canara\s+bank|union\s+bank\s+of\s+india)\b"
    ))
    .expect("bank name pattern")
});

static DIRECTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:dr|cr|debit|credit)\b\.?").expect("direction pattern"));

static AMOUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)(?:\b(?:rs\.?|inr)|₹|\$)\s*\d[\d,]*(?:\.\d+)?",
        r"|\b\d[\d,]*\.\d{1,2}\b",
        r"|\brs\.|\binr\b|₹"
    ))
    .expect("amount pattern")
});

static REFERENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{6,}\b").expect("reference number pattern"));

fn strip_prefixes(description: &str) -> &str {
    let mut rest = description.trim_start();
    while let Some(found) = PREFIX_RE.find(rest) {
        rest = rest[found.end()..].trim_start();
    }
    rest
}

fn is_separator(c: char) -> bool {
    matches!(c, '-' | '/' | '|' | '*' | ':' | ',' | ';' | '.' | '#' | '_')
}

/// One round of noise removal. Removing a bank name or amount can expose
/// a channel prefix, so callers repeat until nothing changes.
fn strip_noise_once(description: &str) -> String {
    let rest = strip_prefixes(description);
    let rest = BANK_RE.replace_all(rest, " ");
    let rest = AMOUNT_RE.replace_all(&rest, " ");
    let rest = DIRECTION_RE.replace_all(&rest, " ");
    let rest = REFERENCE_RE.replace_all(&rest, " ");
    rest.trim_start_matches(|c: char| c.is_whitespace() || is_separator(c))
        .trim_end()
        .to_string()
}

// Every pattern match is longer than its single-space replacement, so this terminates.
fn strip_noise(description: &str) -> String {
    let mut current = description.trim().to_string();
    loop {
        let next = strip_noise_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Extract a short payee name from a raw description.
pub fn extract_payee(description: &str) -> String {
    let rest = strip_noise(description);

    let tokens: Vec<&str> = rest
        .split_whitespace()
        .map(|t| t.trim_matches(is_separator))
        .filter(|t| !t.is_empty())
        .take(MAX_PAYEE_TOKENS)
        .collect();

    if tokens.is_empty() {
        return UNKNOWN_PAYEE.to_string();
    }
    tokens.join(" ")
}
