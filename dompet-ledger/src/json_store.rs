//! Ledger persisted as one pretty-printed JSON file.
//!
//! The whole state is rewritten after every mutation, while the lock is
//! still held, so the file always matches what readers see.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{debug, info};

use dompet_core::{BalanceSummary, CategoryTotals, Ledger, Transaction, TransactionKind};

use crate::memory::{MemoryLedger, category_list};
use crate::state::LedgerState;

#[derive(Debug)]
pub struct JsonLedger {
    path: PathBuf,
    inner: MemoryLedger,
}

impl JsonLedger {
    /// Open `path`, starting empty when the file does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let state = load_state(&path)?;
        info!(
            path = %path.display(),
            transactions = state.transactions.len(),
            "ledger opened"
        );
        Ok(Self {
            path,
            inner: MemoryLedger::from_state(state),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn mutate<T>(&self, f: impl FnOnce(&mut LedgerState) -> Result<T>) -> Result<T> {
        let mut state = self.inner.lock()?;
        let mut next = state.clone();
        let out = f(&mut next)?;
        save_state(&self.path, &next)?;
        *state = next;
        Ok(out)
    }
}

pub fn load_state(path: &Path) -> Result<LedgerState> {
    if !path.exists() {
        return Ok(LedgerState::default());
    }
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    if s.trim().is_empty() {
        return Ok(LedgerState::default());
    }
    serde_json::from_str(&s).with_context(|| format!("parse {}", path.display()))
}

pub fn save_state(path: &Path, state: &LedgerState) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    let json = serde_json::to_string_pretty(state).context("serialize ledger")?;
    fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    debug!(path = %path.display(), "ledger saved");
    Ok(())
}

impl Ledger for JsonLedger {
    fn add_transaction(
        &self,
        user_id: &str,
        username: &str,
        kind: TransactionKind,
        amount: f64,
        category: &str,
        description: &str,
    ) -> Result<i64> {
        self.mutate(|state| {
            state.insert(
                user_id,
                username,
                kind,
                amount,
                category,
                description,
                Utc::now(),
            )
        })
    }

    fn balance(&self, user_id: &str) -> Result<BalanceSummary> {
        self.inner.balance(user_id)
    }

    fn recent_transactions(&self, user_id: &str, limit: usize) -> Result<Vec<Transaction>> {
        self.inner.recent_transactions(user_id, limit)
    }

    fn category_report(&self, user_id: &str) -> Result<BTreeMap<String, CategoryTotals>> {
        self.inner.category_report(user_id)
    }

    fn delete_transaction(&self, user_id: &str, id: i64) -> Result<bool> {
        // nothing to write when no owned row matched
        let owned = self
            .inner
            .lock()?
            .transactions
            .iter()
            .any(|r| r.user_id == user_id && r.transaction.id == id);
        if !owned {
            return Ok(false);
        }
        self.mutate(|state| Ok(state.delete(user_id, id)))
    }

    fn available_categories(&self, kind: Option<TransactionKind>) -> Result<Vec<String>> {
        Ok(category_list(kind))
    }

    fn transaction_count(&self, user_id: &str) -> Result<usize> {
        self.inner.transaction_count(user_id)
    }
}
