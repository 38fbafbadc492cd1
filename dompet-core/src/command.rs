//! Structured commands produced by extraction, one variant per intent.

use serde::{Deserialize, Serialize};

use crate::finance::TransactionKind;
use crate::intent::IntentTag;

/// Fields of an income or expense entry.
///
/// `amount` is whatever the user typed, normalized; it is not validated
/// here and may be `0.0`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Entry {
    pub amount: f64,
    pub category: String,
    pub description: String,
}

impl Entry {
    pub fn new(amount: f64, category: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            amount,
            category: category.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Command {
    About,
    Capability,
    Thanks,
    Goodbye,
    Stats,
    Report,
    Help,
    BudgetAdvice,
    Delete { transaction_id: i64 },
    PurchasePlanning { item: String, price: f64 },
    Income(Entry),
    Expense(Entry),
    Balance,
    Unknown { original_text: String },
}

impl Command {
    pub fn tag(&self) -> IntentTag {
        match self {
            Command::About => IntentTag::About,
            Command::Capability => IntentTag::Capability,
            Command::Thanks => IntentTag::Thanks,
            Command::Goodbye => IntentTag::Goodbye,
            Command::Stats => IntentTag::Stats,
            Command::Report => IntentTag::Report,
            Command::Help => IntentTag::Help,
            Command::BudgetAdvice => IntentTag::BudgetAdvice,
            Command::Delete { .. } => IntentTag::Delete,
            Command::PurchasePlanning { .. } => IntentTag::PurchasePlanning,
            Command::Income(_) => IntentTag::Income,
            Command::Expense(_) => IntentTag::Expense,
            Command::Balance => IntentTag::Balance,
            Command::Unknown { .. } => IntentTag::Unknown,
        }
    }

    /// The transaction this command records, if any
    pub fn entry(&self) -> Option<(TransactionKind, &Entry)> {
        match self {
            Command::Income(e) => Some((TransactionKind::Income, e)),
            Command::Expense(e) => Some((TransactionKind::Expense, e)),
            _ => None,
        }
    }

    pub fn needs_snapshot(&self) -> bool {
        self.tag().needs_snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_accessor() {
        let cmd = Command::Expense(Entry::new(50_000.0, "makanan", "lunch"));
        let (kind, entry) = cmd.entry().unwrap();
        assert_eq!(kind, TransactionKind::Expense);
        assert_eq!(entry.category, "makanan");
        assert!(Command::Balance.entry().is_none());
    }

    #[test]
    fn test_serialized_shape() {
        let cmd = Command::Delete { transaction_id: 7 };
        let json = serde_json::to_value(&cmd).unwrap();
        assert_eq!(json["type"], "delete");
        assert_eq!(json["transaction_id"], 7);
    }
}
