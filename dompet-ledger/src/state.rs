//! Plain ledger data and the queries over it. Both ledger backends keep one
//! of these behind a lock.

use std::collections::BTreeMap;

use anyhow::{Result, bail};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dompet_core::{BalanceSummary, CategoryTotals, Transaction, TransactionKind};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredTransaction {
    pub user_id: String,
    #[serde(flatten)]
    pub transaction: Transaction,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LedgerState {
    /// Last id handed out; ids start at 1
    #[serde(default)]
    pub last_id: i64,
    /// user id -> most recent display name
    #[serde(default)]
    pub users: BTreeMap<String, String>,
    #[serde(default)]
    pub transactions: Vec<StoredTransaction>,
}

impl LedgerState {
    #[allow(clippy::too_many_arguments)]
    pub fn insert(
        &mut self,
        user_id: &str,
        username: &str,
        kind: TransactionKind,
        amount: f64,
        category: &str,
        description: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<i64> {
        if !amount.is_finite() || amount <= 0.0 {
            bail!("amount must be a positive number, got {amount}");
        }
        if user_id.is_empty() {
            bail!("user id must not be empty");
        }

        self.users.insert(user_id.to_string(), username.to_string());
        self.last_id += 1;
        let id = self.last_id;
        self.transactions.push(StoredTransaction {
            user_id: user_id.to_string(),
            transaction: Transaction::new(
                id,
                kind,
                amount,
                category.trim().to_lowercase(),
                description.trim(),
                timestamp,
            ),
        });
        Ok(id)
    }

    fn owned_by<'a>(&'a self, user_id: &'a str) -> impl Iterator<Item = &'a Transaction> + 'a {
        self.transactions
            .iter()
            .filter(move |row| row.user_id == user_id)
            .map(|row| &row.transaction)
    }

    pub fn balance(&self, user_id: &str) -> BalanceSummary {
        let (income, expense) = self
            .owned_by(user_id)
            .fold((0.0, 0.0), |(inc, exp), tx| match tx.kind {
                TransactionKind::Income => (inc + tx.amount, exp),
                TransactionKind::Expense => (inc, exp + tx.amount),
            });
        BalanceSummary::new(income, expense)
    }

    /// Newest first; equal timestamps fall back to the higher id.
    pub fn recent(&self, user_id: &str, limit: usize) -> Vec<Transaction> {
        let mut rows: Vec<Transaction> = self.owned_by(user_id).cloned().collect();
        rows.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        rows.truncate(limit);
        rows
    }

    pub fn category_report(&self, user_id: &str) -> BTreeMap<String, CategoryTotals> {
        let mut report: BTreeMap<String, CategoryTotals> = BTreeMap::new();
        for tx in self.owned_by(user_id) {
            let totals = report.entry(tx.category.clone()).or_default();
            match tx.kind {
                TransactionKind::Income => totals.income += tx.amount,
                TransactionKind::Expense => totals.expense += tx.amount,
            }
        }
        report
    }

    /// Removes the row only when it belongs to `user_id`.
    pub fn delete(&mut self, user_id: &str, id: i64) -> bool {
        let before = self.transactions.len();
        self.transactions
            .retain(|row| !(row.user_id == user_id && row.transaction.id == id));
        self.transactions.len() < before
    }

    pub fn count(&self, user_id: &str) -> usize {
        self.owned_by(user_id).count()
    }

    pub fn username(&self, user_id: &str) -> Option<&str> {
        self.users.get(user_id).map(String::as_str)
    }
}
