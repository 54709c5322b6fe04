use std::path::Path;

use serde::{Deserialize, Serialize};

/// Shape of a record file handed to the normalizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecordFormat {
    /// JSON array, or object with a `transactions` array
    Json,
    /// CSV with a header row
    Csv,
    /// Free-form chat-model reply containing JSON
    LlmReply,
}

impl RecordFormat {
    /// Guess from the file extension; anything unrecognized is treated as an LLM reply.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("json") => RecordFormat::Json,
            Some("csv") => RecordFormat::Csv,
            _ => RecordFormat::LlmReply,
        }
    }
}
