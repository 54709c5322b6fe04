//! Post-processing of a parsed statement batch:
//! coerce → back-fill category → back-fill payee → dedupe.

use tracing::debug;

use crate::categorizer::Categorizer;
use crate::dedupe::{DuplicateRecord, dedupe_batch};
use crate::payee::extract_payee;
use crate::record::RawTransaction;
use crate::transaction::{ParsedTransaction, Transaction};

/// Output of [`normalize_batch`]
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedBatch {
    pub transactions: Vec<ParsedTransaction>,
    pub duplicates: Vec<DuplicateRecord<ParsedTransaction>>,
}

impl NormalizedBatch {
    pub fn duplicate_count(&self) -> usize {
        self.duplicates.len()
    }

    /// Drop parsing-stage fields (confidence) for persistence
    pub fn into_transactions(self) -> Vec<Transaction> {
        self.transactions
            .into_iter()
            .map(ParsedTransaction::into_transaction)
            .collect()
    }
}

/// Coerce one record and fill in category and payee where missing.
pub fn normalize_record(raw: &RawTransaction, categorizer: &Categorizer) -> ParsedTransaction {
    let mut parsed = raw.coerce();
    if parsed.category.is_none() {
        parsed.category = Some(categorizer.categorize(&parsed.description));
    }
    if parsed.payee.is_none() {
        parsed.payee = Some(extract_payee(&parsed.description));
    }
    parsed
}

/// Normalize a whole batch. Order is preserved; later duplicates are dropped.
pub fn normalize_batch<I>(records: I, categorizer: &Categorizer) -> NormalizedBatch
where
    I: IntoIterator<Item = RawTransaction>,
{
    let parsed: Vec<ParsedTransaction> = records
        .into_iter()
        .map(|raw| normalize_record(&raw, categorizer))
        .collect();
    let received = parsed.len();

    let result = dedupe_batch(parsed);
    debug!(
        received,
        kept = result.kept.len(),
        duplicates = result.duplicates.len(),
        "normalized transaction batch"
    );

    NormalizedBatch {
        transactions: result.kept,
        duplicates: result.duplicates,
    }
}
