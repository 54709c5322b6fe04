//! financeflow-ingest: reads parsed-statement output (JSON, CSV, chat-model
//! replies) into loose records for the normalizer.

pub mod parsers;
pub mod types;

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use financeflow_core::RawTransaction;

pub use parsers::{parse_csv_records, parse_json_records, parse_llm_reply};
pub use types::RecordFormat;

/// Read raw records from a file in the given format
pub fn read_records(path: impl AsRef<Path>, format: RecordFormat) -> Result<Vec<RawTransaction>> {
    let path = path.as_ref();
    let records = match format {
        RecordFormat::Csv => {
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            parse_csv_records(file)
        }
        RecordFormat::Json => parse_json_records(&read_text(path)?),
        RecordFormat::LlmReply => parse_llm_reply(&read_text(path)?),
    };
    records.with_context(|| format!("parsing {}", path.display()))
}

fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}
