//! The assistant applies commands to a [`Ledger`] and renders replies.
//!
//! This is where side effects live: amount validation, writes, delete
//! lookups and snapshot assembly. Ledger errors never reach the user; they
//! are logged and replaced with a generic failure reply.

use anyhow::Result;
use tracing::{debug, error, info};

use crate::amount::rupiah;
use crate::command::{Command, Entry};
use crate::extract::interpret;
use crate::finance::{FinancialSnapshot, Transaction, TransactionKind};
use crate::ledger::Ledger;
use crate::responder::{self, BALANCE_RECENT_LIMIT, STATS_RECENT_LIMIT, render};

/// Transactions searched before a delete is attempted
pub const DELETE_LOOKUP_LIMIT: usize = 100;
/// Transactions that make up the monthly view for planning replies
pub const MONTHLY_VIEW_LIMIT: usize = 50;
/// Above this many transactions the monthly view switches from sums to
/// per-transaction averages
pub const AVERAGE_THRESHOLD: usize = 5;

/// Words marking an expense as a debt payment
pub const DEBT_KEYWORDS: [&str; 6] = ["tagihan", "cicilan", "hutang", "debt", "loan", "credit"];

pub struct Assistant<L: Ledger> {
    ledger: L,
}

impl<L: Ledger> Assistant<L> {
    pub fn new(ledger: L) -> Self {
        Self { ledger }
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Answer one message from `user_id`.
    pub fn handle(&self, user_id: &str, username: &str, text: &str) -> String {
        info!(user_id, username, "processing message: {text}");

        let command = interpret(text);
        debug!(user_id, intent = command.tag().as_str(), "classified");

        match self.dispatch(user_id, username, &command) {
            Ok(reply) => reply,
            Err(e) => {
                error!(user_id, intent = command.tag().as_str(), error = %format!("{e:#}"), "failed to process message");
                responder::storage_failure()
            }
        }
    }

    fn dispatch(&self, user_id: &str, username: &str, command: &Command) -> Result<String> {
        if let Some((kind, entry)) = command.entry() {
            return self.record(user_id, username, kind, entry, command);
        }

        match command {
            Command::Balance => {
                let snapshot = FinancialSnapshot::from_summary(self.ledger.balance(user_id)?)
                    .with_recent(self.ledger.recent_transactions(user_id, BALANCE_RECENT_LIMIT)?);
                Ok(render(command, Some(&snapshot)))
            }
            Command::Report => {
                let snapshot = FinancialSnapshot::from_summary(self.ledger.balance(user_id)?)
                    .with_categories(self.ledger.category_report(user_id)?);
                Ok(render(command, Some(&snapshot)))
            }
            Command::Stats => {
                let snapshot = FinancialSnapshot::from_summary(self.ledger.balance(user_id)?)
                    .with_recent(self.ledger.recent_transactions(user_id, STATS_RECENT_LIMIT)?)
                    .with_transaction_count(self.ledger.transaction_count(user_id)?);
                Ok(render(command, Some(&snapshot)))
            }
            Command::Delete { transaction_id } => self.delete(user_id, *transaction_id),
            Command::BudgetAdvice => {
                info!(user_id, "budget advice requested");
                let snapshot = self.monthly_view(user_id)?;
                Ok(render(command, Some(&snapshot)))
            }
            Command::PurchasePlanning { item, price } => {
                info!(user_id, item = item.as_str(), "purchase planning for {}", rupiah(*price));
                let snapshot = self.monthly_view(user_id)?;
                Ok(render(command, Some(&snapshot)))
            }
            _ => Ok(render(command, None)),
        }
    }

    fn record(
        &self,
        user_id: &str,
        username: &str,
        kind: TransactionKind,
        entry: &Entry,
        command: &Command,
    ) -> Result<String> {
        if entry.amount <= 0.0 {
            debug!(user_id, amount = entry.amount, "rejected non-positive amount");
            return Ok(responder::invalid_amount(kind));
        }

        let id = self.ledger.add_transaction(
            user_id,
            username,
            kind,
            entry.amount,
            &entry.category,
            &entry.description,
        )?;
        info!(
            user_id,
            id,
            kind = kind.as_str(),
            category = entry.category.as_str(),
            "recorded {}",
            rupiah(entry.amount)
        );

        let snapshot = FinancialSnapshot::from_summary(self.ledger.balance(user_id)?);
        Ok(render(command, Some(&snapshot)))
    }

    fn delete(&self, user_id: &str, transaction_id: i64) -> Result<String> {
        let owned = self
            .ledger
            .recent_transactions(user_id, DELETE_LOOKUP_LIMIT)?
            .iter()
            .any(|tx| tx.id == transaction_id);
        if !owned {
            return Ok(responder::delete_not_found(transaction_id));
        }

        if self.ledger.delete_transaction(user_id, transaction_id)? {
            info!(user_id, transaction_id, "transaction deleted");
            Ok(responder::delete_done(transaction_id))
        } else {
            Ok(responder::delete_failed(transaction_id))
        }
    }

    /// Snapshot used by budget and purchase replies.
    pub fn monthly_view(&self, user_id: &str) -> Result<FinancialSnapshot> {
        let summary = self.ledger.balance(user_id)?;
        let recent = self.ledger.recent_transactions(user_id, MONTHLY_VIEW_LIMIT)?;
        let categories = self.ledger.category_report(user_id)?;
        Ok(monthly_view(summary.income, summary.expense, summary.balance, recent).with_categories(categories))
    }
}

/// Estimate monthly income and expense from recent transactions.
///
/// With more than [`AVERAGE_THRESHOLD`] transactions the estimate is the
/// average amount per transaction of each kind, otherwise the plain sums. A
/// zero estimate falls back to the ledger total. The balance is always the
/// ledger balance.
pub fn monthly_view(
    ledger_income: f64,
    ledger_expense: f64,
    ledger_balance: f64,
    recent: Vec<Transaction>,
) -> FinancialSnapshot {
    let estimate = |kind: TransactionKind| {
        let amounts: Vec<f64> = recent.iter().filter(|t| t.kind == kind).map(|t| t.amount).collect();
        let sum: f64 = amounts.iter().sum();
        if recent.len() > AVERAGE_THRESHOLD && sum > 0.0 {
            sum / amounts.len().max(1) as f64
        } else {
            sum
        }
    };

    let income = estimate(TransactionKind::Income);
    let expense = estimate(TransactionKind::Expense);
    let debt_total: f64 = recent
        .iter()
        .filter(|t| t.is_expense() && is_debt(t))
        .map(|t| t.amount)
        .sum();
    let transaction_count = recent.len();

    FinancialSnapshot {
        total_income: if income != 0.0 { income } else { ledger_income },
        total_expense: if expense != 0.0 { expense } else { ledger_expense },
        balance: ledger_balance,
        debt_total,
        transaction_count,
        recent,
        ..FinancialSnapshot::default()
    }
}

fn is_debt(tx: &Transaction) -> bool {
    let category = tx.category.to_lowercase();
    let description = tx.description.to_lowercase();
    DEBT_KEYWORDS
        .iter()
        .any(|k| category.contains(k) || description.contains(k))
}
