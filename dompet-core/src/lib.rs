//! dompet-core: intent classification, extraction and replies for a
//! bilingual (Indonesian/English) personal finance assistant

pub mod amount;
pub mod assistant;
pub mod calculators;
pub mod categorizer;
pub mod command;
pub mod engine;
pub mod extract;
pub mod finance;
pub mod intent;
pub mod ledger;
pub mod reflection;
pub mod responder;
pub mod taxonomy;

pub use amount::{format_amount, parse_amount, rupiah, try_parse_amount};
pub use assistant::Assistant;
pub use calculators::{
    BudgetAllocation, PurchaseAnalysis, Recommendation, SpendingTier, budget_allocation,
    purchase_analysis,
};
pub use categorizer::categorize;
pub use command::{Command, Entry};
pub use engine::{NoSnapshot, SnapshotProvider, process};
pub use extract::{extract, interpret};
pub use finance::{BalanceSummary, CategoryTotals, FinancialSnapshot, Transaction, TransactionKind};
pub use intent::{Classification, Classifier, FieldOrder, IntentTag, Slot, classify};
pub use ledger::Ledger;
pub use reflection::reflect;
pub use responder::render;
pub use taxonomy::{Category, CategoryKind, DEFAULT_CATEGORIES, category_names};
