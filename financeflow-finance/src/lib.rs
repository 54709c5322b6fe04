//! financeflow-finance: configurable category rules, spending summaries and
//! categorization adjustments over normalized transactions

pub mod adjustments;
pub mod category_rules;
pub mod summary;

pub use adjustments::{CategoryAdjustment, apply_all, suggest_adjustments};
pub use category_rules::{CategoryRulesConfig, RuleConfig};
pub use summary::SpendingSummary;
