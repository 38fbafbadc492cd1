//! The fixed category taxonomy.
//!
//! Names keep their display casing; lookups ignore case.

use serde::{Deserialize, Serialize};

use crate::finance::TransactionKind;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CategoryKind {
    #[serde(rename = "income")]
    Income,
    #[serde(rename = "expense")]
    Expense,
    #[serde(rename = "both")]
    Both,
}

impl CategoryKind {
    /// Whether a category of this kind may hold transactions of `kind`
    pub fn accepts(&self, kind: TransactionKind) -> bool {
        match self {
            CategoryKind::Both => true,
            CategoryKind::Income => kind == TransactionKind::Income,
            CategoryKind::Expense => kind == TransactionKind::Expense,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub name: &'static str,
    pub kind: CategoryKind,
}

const fn category(name: &'static str, kind: CategoryKind) -> Category {
    Category { name, kind }
}

pub const DEFAULT_CATEGORIES: [Category; 12] = [
    category("Gaji", CategoryKind::Income),
    category("Freelance", CategoryKind::Income),
    category("Investasi", CategoryKind::Income),
    category("Hadiah", CategoryKind::Income),
    category("Makanan", CategoryKind::Expense),
    category("Transport", CategoryKind::Expense),
    category("Hiburan", CategoryKind::Expense),
    category("Belanja", CategoryKind::Expense),
    category("Tagihan", CategoryKind::Expense),
    category("Kesehatan", CategoryKind::Expense),
    category("Pendidikan", CategoryKind::Expense),
    category("Lainnya", CategoryKind::Both),
];

/// Case-insensitive lookup in the default taxonomy
pub fn lookup(name: &str) -> Option<&'static Category> {
    let name = name.trim();
    DEFAULT_CATEGORIES
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(name))
}

/// Category names sorted alphabetically.
///
/// With a kind filter, `both` categories are included as well.
pub fn category_names(kind: Option<TransactionKind>) -> Vec<&'static str> {
    let mut names: Vec<&'static str> = DEFAULT_CATEGORIES
        .iter()
        .filter(|c| kind.is_none_or(|k| c.kind.accepts(k)))
        .map(|c| c.name)
        .collect();
    names.sort_unstable();
    names
}
