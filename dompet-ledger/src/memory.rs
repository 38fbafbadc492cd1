use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use anyhow::{Result, anyhow};
use chrono::Utc;
use tracing::debug;

use dompet_core::{
    BalanceSummary, CategoryTotals, Ledger, Transaction, TransactionKind, category_names,
};

use crate::state::LedgerState;

/// In-process ledger. Everything is lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    state: Mutex<LedgerState>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_state(state: LedgerState) -> Self {
        Self {
            state: Mutex::new(state),
        }
    }

    pub(crate) fn lock(&self) -> Result<MutexGuard<'_, LedgerState>> {
        self.state
            .lock()
            .map_err(|_| anyhow!("ledger lock poisoned"))
    }

    /// Copy of the current contents
    pub fn snapshot_state(&self) -> Result<LedgerState> {
        Ok(self.lock()?.clone())
    }

    pub fn username(&self, user_id: &str) -> Result<Option<String>> {
        Ok(self.lock()?.username(user_id).map(str::to_string))
    }
}

pub(crate) fn category_list(kind: Option<TransactionKind>) -> Vec<String> {
    category_names(kind).into_iter().map(String::from).collect()
}

impl Ledger for MemoryLedger {
    fn add_transaction(
        &self,
        user_id: &str,
        username: &str,
        kind: TransactionKind,
        amount: f64,
        category: &str,
        description: &str,
    ) -> Result<i64> {
        let id = self.lock()?.insert(
            user_id,
            username,
            kind,
            amount,
            category,
            description,
            Utc::now(),
        )?;
        debug!(user_id, id, "transaction stored in memory");
        Ok(id)
    }

    fn balance(&self, user_id: &str) -> Result<BalanceSummary> {
        Ok(self.lock()?.balance(user_id))
    }

    fn recent_transactions(&self, user_id: &str, limit: usize) -> Result<Vec<Transaction>> {
        Ok(self.lock()?.recent(user_id, limit))
    }

    fn category_report(&self, user_id: &str) -> Result<BTreeMap<String, CategoryTotals>> {
        Ok(self.lock()?.category_report(user_id))
    }

    fn delete_transaction(&self, user_id: &str, id: i64) -> Result<bool> {
        Ok(self.lock()?.delete(user_id, id))
    }

    fn available_categories(&self, kind: Option<TransactionKind>) -> Result<Vec<String>> {
        Ok(category_list(kind))
    }

    fn transaction_count(&self, user_id: &str) -> Result<usize> {
        Ok(self.lock()?.count(user_id))
    }
}
