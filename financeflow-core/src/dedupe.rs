//! In-batch deduplication of parsed transactions.
//!
//! Two rows collide when date and description are equal and the amounts
//! differ by less than [`AMOUNT_EPSILON`]. The first occurrence is kept and
//! the surviving rows keep their input order.

use std::collections::HashMap;

use crate::transaction::{ParsedTransaction, Transaction};

pub const AMOUNT_EPSILON: f64 = 0.01;

/// Fields the deduplicator compares
pub trait DedupeFields {
    fn dedupe_date(&self) -> &str;
    fn dedupe_description(&self) -> &str;
    fn dedupe_amount(&self) -> f64;
}

impl DedupeFields for Transaction {
    fn dedupe_date(&self) -> &str {
        &self.date
    }

    fn dedupe_description(&self) -> &str {
        &self.description
    }

    fn dedupe_amount(&self) -> f64 {
        self.amount
    }
}

impl DedupeFields for ParsedTransaction {
    fn dedupe_date(&self) -> &str {
        &self.date
    }

    fn dedupe_description(&self) -> &str {
        &self.description
    }

    fn dedupe_amount(&self) -> f64 {
        self.amount
    }
}

/// A dropped row and the kept row it matched (both 0-based input positions)
#[derive(Debug, Clone, PartialEq)]
pub struct DuplicateRecord<T> {
    pub row: T,
    pub source_index: usize,
    pub matched_index: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchDedupeResult<T> {
    pub kept: Vec<T>,
    pub duplicates: Vec<DuplicateRecord<T>>,
}

/// Split a batch into kept rows and duplicates.
/// Candidates are compared only against rows already kept.
pub fn dedupe_batch<T: DedupeFields>(rows: Vec<T>) -> BatchDedupeResult<T> {
    let mut seen: HashMap<(String, String), Vec<(f64, usize)>> = HashMap::new();
    let mut kept = Vec::with_capacity(rows.len());
    let mut duplicates = Vec::new();

    for (source_index, row) in rows.into_iter().enumerate() {
        let key = (
            row.dedupe_date().to_string(),
            row.dedupe_description().to_string(),
        );
        let amount = row.dedupe_amount();
        let entries = seen.entry(key).or_default();

        let matched = entries
            .iter()
            .find(|(kept_amount, _)| (kept_amount - amount).abs() < AMOUNT_EPSILON)
            .map(|(_, index)| *index);

        match matched {
            Some(matched_index) => duplicates.push(DuplicateRecord {
                row,
                source_index,
                matched_index,
            }),
            None => {
                entries.push((amount, source_index));
                kept.push(row);
            }
        }
    }

    BatchDedupeResult { kept, duplicates }
}

/// Remove duplicates, keeping first occurrences in order
pub fn dedupe<T: DedupeFields>(rows: Vec<T>) -> Vec<T> {
    dedupe_batch(rows).kept
}
