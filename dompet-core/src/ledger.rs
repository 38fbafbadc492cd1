//! Storage seam consumed by [`crate::assistant::Assistant`].

use std::collections::BTreeMap;

use anyhow::Result;

use crate::finance::{BalanceSummary, CategoryTotals, Transaction, TransactionKind};

/// Per-user transaction storage.
///
/// Implementations lower-case categories on write and return recent
/// transactions newest first.
pub trait Ledger {
    fn add_transaction(
        &self,
        user_id: &str,
        username: &str,
        kind: TransactionKind,
        amount: f64,
        category: &str,
        description: &str,
    ) -> Result<i64>;

    fn balance(&self, user_id: &str) -> Result<BalanceSummary>;

    fn recent_transactions(&self, user_id: &str, limit: usize) -> Result<Vec<Transaction>>;

    fn category_report(&self, user_id: &str) -> Result<BTreeMap<String, CategoryTotals>>;

    /// `false` when the id does not exist or belongs to someone else
    fn delete_transaction(&self, user_id: &str, id: i64) -> Result<bool>;

    /// Category names, optionally restricted to those usable for `kind`
    fn available_categories(&self, kind: Option<TransactionKind>) -> Result<Vec<String>>;

    fn transaction_count(&self, user_id: &str) -> Result<usize>;
}

impl<L: Ledger + ?Sized> Ledger for &L {
    fn add_transaction(
        &self,
        user_id: &str,
        username: &str,
        kind: TransactionKind,
        amount: f64,
        category: &str,
        description: &str,
    ) -> Result<i64> {
        (**self).add_transaction(user_id, username, kind, amount, category, description)
    }

    fn balance(&self, user_id: &str) -> Result<BalanceSummary> {
        (**self).balance(user_id)
    }

    fn recent_transactions(&self, user_id: &str, limit: usize) -> Result<Vec<Transaction>> {
        (**self).recent_transactions(user_id, limit)
    }

    fn category_report(&self, user_id: &str) -> Result<BTreeMap<String, CategoryTotals>> {
        (**self).category_report(user_id)
    }

    fn delete_transaction(&self, user_id: &str, id: i64) -> Result<bool> {
        (**self).delete_transaction(user_id, id)
    }

    fn available_categories(&self, kind: Option<TransactionKind>) -> Result<Vec<String>> {
        (**self).available_categories(kind)
    }

    fn transaction_count(&self, user_id: &str) -> Result<usize> {
        (**self).transaction_count(user_id)
    }
}
