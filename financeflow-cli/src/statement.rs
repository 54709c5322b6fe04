//! Bank statement text → raw records, via the configured chat model.

use anyhow::{Context, Result};
use financeflow_core::RawTransaction;
use financeflow_ingest::parse_llm_reply;
use std::path::Path;
use tracing::{info, warn};

use crate::llm::LlmClient;

/// Statements longer than this are cut before sending
const MAX_STATEMENT_CHARS: usize = 60_000;

const STATEMENT_SYSTEM_PROMPT: &str = "\
You extract transactions from bank statement text. Reply with a JSON array only. \
Each element has: date (YYYY-MM-DD), description (as printed), amount (positive number), \
type (\"debit\" or \"credit\"), payee (optional), category (optional), \
confidence (0 to 1).";

fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

pub async fn parse_statement_file(client: &LlmClient, path: &Path) -> Result<Vec<RawTransaction>> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let sent = truncate_chars(&text, MAX_STATEMENT_CHARS);
    if sent.len() < text.len() {
        warn!(
            path = %path.display(),
            limit = MAX_STATEMENT_CHARS,
            "statement truncated before parsing"
        );
    }

    let reply = client
        .complete(STATEMENT_SYSTEM_PROMPT, sent)
        .await
        .with_context(|| format!("parsing statement {}", path.display()))?;
    let records = parse_llm_reply(&reply)?;
    info!(path = %path.display(), records = records.len(), "statement parsed");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("abcdef", 3), "abc");
        assert_eq!(truncate_chars("₹₹₹₹", 2), "₹₹");
    }
}
