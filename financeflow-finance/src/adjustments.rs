//! Categorization adjustments: proposed category changes for stored
//! transactions whose category disagrees with the current rule table.
//! Nothing changes until the user accepts an adjustment.

use anyhow::{Result, bail};
use financeflow_core::{Categorizer, Category, Transaction};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAdjustment {
    /// Position in the transaction list the suggestion was computed from
    pub index: usize,
    pub description: String,
    pub current: Category,
    pub suggested: Category,
}

impl CategoryAdjustment {
    /// Accept the adjustment. Fails if the transaction moved or was re-categorized since.
    pub fn apply(&self, txns: &mut [Transaction]) -> Result<()> {
        let Some(txn) = txns.get_mut(self.index) else {
            bail!("no transaction at index {}", self.index);
        };
        if txn.description != self.description || txn.category != self.current {
            bail!(
                "transaction {} changed since the adjustment was suggested ({} / {})",
                self.index,
                txn.description,
                txn.category
            );
        }
        txn.category = self.suggested.clone();
        Ok(())
    }
}

/// Suggest rule-based categories for built-in-categorized transactions.
/// Custom categories are user decisions and are left alone, and `Other` is never suggested.
pub fn suggest_adjustments(txns: &[Transaction], categorizer: &Categorizer) -> Vec<CategoryAdjustment> {
    txns.iter()
        .enumerate()
        .filter(|(_, txn)| !txn.category.is_custom())
        .filter_map(|(index, txn)| {
            let suggested = categorizer.categorize(&txn.description);
            if suggested == Category::Other || suggested == txn.category {
                return None;
            }
            Some(CategoryAdjustment {
                index,
                description: txn.description.clone(),
                current: txn.category.clone(),
                suggested,
            })
        })
        .collect()
}

/// Accept every adjustment; returns how many were applied.
/// All or nothing: if any adjustment is stale, `txns` is left untouched.
pub fn apply_all(adjustments: &[CategoryAdjustment], txns: &mut [Transaction]) -> Result<usize> {
    let mut staged = txns.to_vec();
    for adjustment in adjustments {
        adjustment.apply(&mut staged)?;
    }
    txns.clone_from_slice(&staged);
    info!(applied = adjustments.len(), "accepted category adjustments");
    Ok(adjustments.len())
}
