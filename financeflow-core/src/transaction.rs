//! Transaction types shared by the parsing and persistence stages

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Fallback description for records that arrive without one
pub const UNKNOWN_DESCRIPTION: &str = "Unknown Transaction";

/// Persisted transaction type. Direction lives here, never in the amount.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    #[default]
    Expense,
    Income,
    Subscription,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Expense => "expense",
            TransactionType::Income => "income",
            TransactionType::Subscription => "subscription",
        }
    }

    /// Money leaving the account (expenses and subscriptions)
    pub fn is_outflow(&self) -> bool {
        !matches!(self, TransactionType::Income)
    }

    /// Parse either enumeration, case-insensitively.
    /// `debit`/`credit` are reconciled through [`EntryDirection`].
    pub fn from_loose(raw: &str) -> Option<Self> {
        let lowered = raw.trim().to_lowercase();
        match lowered.as_str() {
            "expense" => Some(TransactionType::Expense),
            "income" => Some(TransactionType::Income),
            "subscription" => Some(TransactionType::Subscription),
            _ => EntryDirection::parse(&lowered).map(Into::into),
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction as emitted by statement parsers, before persistence
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EntryDirection {
    Credit,
    Debit,
}

impl EntryDirection {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "credit" | "cr" => Some(EntryDirection::Credit),
            "debit" | "dr" => Some(EntryDirection::Debit),
            _ => None,
        }
    }
}

impl From<EntryDirection> for TransactionType {
    fn from(direction: EntryDirection) -> Self {
        match direction {
            EntryDirection::Debit => TransactionType::Expense,
            EntryDirection::Credit => TransactionType::Income,
        }
    }
}

/// Category labels. Built-in variants form the default vocabulary;
/// anything else a user defines is carried as `Custom`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    FoodAndDining,
    Transportation,
    Shopping,
    Utilities,
    Entertainment,
    Banking,
    Transfers,
    #[default]
    Other,
    Custom(String),
}

impl Category {
    /// Built-in vocabulary in categorizer priority order, `Other` last
    pub const BUILT_IN: [Category; 8] = [
        Category::FoodAndDining,
        Category::Transportation,
        Category::Shopping,
        Category::Utilities,
        Category::Entertainment,
        Category::Banking,
        Category::Transfers,
        Category::Other,
    ];

    pub fn label(&self) -> &str {
        match self {
            Category::FoodAndDining => "Food & Dining",
            Category::Transportation => "Transportation",
            Category::Shopping => "Shopping",
            Category::Utilities => "Utilities",
            Category::Entertainment => "Entertainment",
            Category::Banking => "Banking",
            Category::Transfers => "Transfers",
            Category::Other => "Other",
            Category::Custom(label) => label,
        }
    }

    /// Map a label to a built-in category (case-insensitive), or keep it as custom.
    /// Blank labels map to `Other`.
    pub fn from_label(label: &str) -> Self {
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return Category::Other;
        }
        if trimmed.eq_ignore_ascii_case("Food and Dining") {
            return Category::FoodAndDining;
        }
        Self::BUILT_IN
            .iter()
            .find(|c| c.label().eq_ignore_ascii_case(trimmed))
            .cloned()
            .unwrap_or_else(|| Category::Custom(trimmed.to_string()))
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Category::Custom(_))
    }
}

impl From<String> for Category {
    fn from(label: String) -> Self {
        Category::from_label(&label)
    }
}

impl From<&str> for Category {
    fn from(label: &str) -> Self {
        Category::from_label(label)
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Custom(label) => label,
            other => other.label().to_string(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A normalized transaction, ready for the persistence layer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    /// Calendar day (YYYY-MM-DD)
    pub date: String,
    pub description: String,
    /// Always non-negative, including when loaded from a stored file
    #[serde(deserialize_with = "absolute_amount")]
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payee: Option<String>,
}

fn absolute_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    f64::deserialize(deserializer).map(f64::abs)
}

impl Transaction {
    pub fn new(
        date: impl Into<String>,
        description: impl Into<String>,
        amount: f64,
        kind: TransactionType,
        category: Category,
    ) -> Self {
        Self {
            date: date.into(),
            description: description.into(),
            amount: amount.abs(),
            kind,
            category,
            payee: None,
        }
    }

    pub fn with_payee(mut self, payee: impl Into<String>) -> Self {
        self.payee = Some(payee.into());
        self
    }

    pub fn day(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }

    /// Amount with direction applied: income positive, outflows negative
    pub fn signed_amount(&self) -> f64 {
        if self.kind.is_outflow() {
            -self.amount
        } else {
            self.amount
        }
    }
}

/// A transaction at the AI-assisted parsing stage.
/// Category and payee may still be missing; `confidence` is dropped on persistence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParsedTransaction {
    pub date: String,
    pub description: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payee: Option<String>,
    /// Parser confidence in [0, 1]
    pub confidence: f64,
}

impl ParsedTransaction {
    pub fn into_transaction(self) -> Transaction {
        Transaction {
            date: self.date,
            description: self.description,
            amount: self.amount.abs(),
            kind: self.kind,
            category: self.category.unwrap_or_default(),
            payee: self.payee,
        }
    }
}
