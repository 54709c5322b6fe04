//! financeflow-core: transaction model and the pure post-processing steps
//! applied to parsed statements (categorize, extract payee, dedupe).

pub mod categorizer;
pub mod dedupe;
pub mod payee;
pub mod pipeline;
pub mod record;
pub mod transaction;

pub use categorizer::{Categorizer, CategoryRule, CategoryRules, categorize};
pub use dedupe::{AMOUNT_EPSILON, BatchDedupeResult, DedupeFields, DuplicateRecord, dedupe, dedupe_batch};
pub use payee::{UNKNOWN_PAYEE, extract_payee};
pub use pipeline::{NormalizedBatch, normalize_batch, normalize_record};
pub use record::{RawTransaction, normalize_day, parse_amount_text};
pub use transaction::{
    Category, EntryDirection, ParsedTransaction, Transaction, TransactionType, UNKNOWN_DESCRIPTION,
};
