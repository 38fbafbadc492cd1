//! Ledger-facing record types: transactions, balances and the per-request
//! financial snapshot handed to the renderer.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Direction of a recorded transaction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    #[serde(rename = "income")]
    Income,
    #[serde(rename = "expense")]
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }

    /// Indonesian noun used in replies
    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::Income => "pemasukan",
            TransactionKind::Expense => "pengeluaran",
        }
    }
}

/// A stored transaction as returned by a ledger
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: i64,
    pub kind: TransactionKind,
    /// Always positive; the direction lives in `kind`
    pub amount: f64,
    /// Lower-cased on write
    pub category: String,
    pub description: String,
    pub timestamp: DateTime<Utc>,
}

impl Transaction {
    pub fn new(
        id: i64,
        kind: TransactionKind,
        amount: f64,
        category: impl Into<String>,
        description: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            kind,
            amount,
            category: category.into(),
            description: description.into(),
            timestamp,
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }
}

/// Totals for one user
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct BalanceSummary {
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
}

impl BalanceSummary {
    pub fn new(income: f64, expense: f64) -> Self {
        Self {
            income,
            expense,
            balance: income - expense,
        }
    }
}

/// Income and expense sums for a single category
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct CategoryTotals {
    pub income: f64,
    pub expense: f64,
}

/// Everything the renderer may need about a user at request time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FinancialSnapshot {
    pub total_income: f64,
    pub total_expense: f64,
    pub balance: f64,
    /// Newest first
    pub recent: Vec<Transaction>,
    /// Per-category sums; empty when the caller did not load them
    pub categories: BTreeMap<String, CategoryTotals>,
    /// Total number of transactions on record, if known
    pub transaction_count: usize,
    /// Sum of debt-like expenses (installments, bills); 0 when unknown
    pub debt_total: f64,
}

impl FinancialSnapshot {
    /// Snapshot from bare totals; `balance` is derived.
    pub fn from_totals(income: f64, expense: f64) -> Self {
        Self {
            total_income: income,
            total_expense: expense,
            balance: income - expense,
            ..Self::default()
        }
    }

    pub fn from_summary(summary: BalanceSummary) -> Self {
        Self {
            total_income: summary.income,
            total_expense: summary.expense,
            balance: summary.balance,
            ..Self::default()
        }
    }

    pub fn with_recent(mut self, recent: Vec<Transaction>) -> Self {
        self.recent = recent;
        self
    }

    pub fn with_categories(mut self, categories: BTreeMap<String, CategoryTotals>) -> Self {
        self.categories = categories;
        self
    }

    pub fn with_transaction_count(mut self, count: usize) -> Self {
        self.transaction_count = count;
        self
    }

    pub fn has_income(&self) -> bool {
        self.total_income > 0.0
    }

    pub fn summary(&self) -> BalanceSummary {
        BalanceSummary {
            income: self.total_income,
            expense: self.total_expense,
            balance: self.balance,
        }
    }
}
