//! Spending summary over normalized transactions: totals, per-category and
//! per-payee spend, and a month-by-month breakdown. This is the deterministic
//! input behind the insights view.

use financeflow_core::{Category, Transaction, TransactionType};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// How many payees `top_payees` keeps
pub const TOP_PAYEES: usize = 5;

const UNKNOWN_MONTH: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySpend {
    pub category: Category,
    pub total: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayeeSpend {
    pub payee: String,
    pub total: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthSpend {
    /// YYYY-MM, or "unknown" for undated rows
    pub month: String,
    pub spend: f64,
    pub income: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpendingSummary {
    pub transaction_count: usize,
    pub total_income: f64,
    pub total_expense: f64,
    pub total_subscription: f64,
    /// Income minus expenses and subscriptions
    pub net: f64,
    /// Outflows per category, largest first
    pub by_category: Vec<CategorySpend>,
    pub top_payees: Vec<PayeeSpend>,
    /// Oldest month first
    pub by_month: Vec<MonthSpend>,
}

impl SpendingSummary {
    pub fn from_transactions(txns: &[Transaction]) -> Self {
        let mut total_income = 0.0;
        let mut total_expense = 0.0;
        let mut total_subscription = 0.0;
        let mut categories: HashMap<Category, (f64, usize)> = HashMap::new();
        let mut payees: HashMap<String, (f64, usize)> = HashMap::new();
        let mut months: BTreeMap<String, (f64, f64)> = BTreeMap::new();

        for txn in txns {
            let month = txn
                .day()
                .map(|d| d.format("%Y-%m").to_string())
                .unwrap_or_else(|| UNKNOWN_MONTH.to_string());
            let month_entry = months.entry(month).or_default();

            match txn.kind {
                TransactionType::Income => {
                    total_income += txn.amount;
                    month_entry.1 += txn.amount;
                    continue;
                }
                TransactionType::Expense => total_expense += txn.amount,
                TransactionType::Subscription => total_subscription += txn.amount,
            }
            month_entry.0 += txn.amount;

            let cat = categories.entry(txn.category.clone()).or_default();
            cat.0 += txn.amount;
            cat.1 += 1;

            if let Some(payee) = txn.payee.as_deref() {
                let entry = payees.entry(payee.to_string()).or_default();
                entry.0 += txn.amount;
                entry.1 += 1;
            }
        }

        let mut by_category: Vec<CategorySpend> = categories
            .into_iter()
            .map(|(category, (total, count))| CategorySpend { category, total, count })
            .collect();
        by_category.sort_by(|a, b| {
            b.total
                .total_cmp(&a.total)
                .then_with(|| a.category.label().cmp(b.category.label()))
        });

        let mut top_payees: Vec<PayeeSpend> = payees
            .into_iter()
            .map(|(payee, (total, count))| PayeeSpend { payee, total, count })
            .collect();
        top_payees.sort_by(|a, b| b.total.total_cmp(&a.total).then_with(|| a.payee.cmp(&b.payee)));
        top_payees.truncate(TOP_PAYEES);

        let by_month = months
            .into_iter()
            .map(|(month, (spend, income))| MonthSpend { month, spend, income })
            .collect();

        Self {
            transaction_count: txns.len(),
            total_income,
            total_expense,
            total_subscription,
            net: total_income - total_expense - total_subscription,
            by_category,
            top_payees,
            by_month,
        }
    }

    pub fn total_spend(&self) -> f64 {
        self.total_expense + self.total_subscription
    }

    /// Share of total spend for a category, 0 when nothing was spent
    pub fn category_share(&self, category: &Category) -> f64 {
        let spend = self.total_spend();
        if spend <= 0.0 {
            return 0.0;
        }
        self.by_category
            .iter()
            .find(|c| &c.category == category)
            .map(|c| c.total / spend)
            .unwrap_or(0.0)
    }
}
