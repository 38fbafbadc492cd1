//! Budget split and purchase affordability, computed from a snapshot.
//!
//! Pure arithmetic; nothing here touches a ledger or formats text.

use serde::{Deserialize, Serialize};

use crate::finance::FinancialSnapshot;

/// Share of income set aside as an emergency fund
pub const EMERGENCY_FUND_RATE: f64 = 0.15;
/// Share of a positive balance suggested for savings
pub const SAVINGS_RATE: f64 = 0.30;

/// Cheaper-alternative price band, as fractions of the asked price
pub const ALTERNATIVE_LOW: f64 = 0.60;
pub const ALTERNATIVE_HIGH: f64 = 0.70;

/// Prices above this many months of income are worth reconsidering
pub const RECONSIDER_INCOME_MONTHS: f64 = 12.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SpendingTier {
    /// Expenses above 80% of income
    #[serde(rename = "warning")]
    Warning,
    /// Above 60%
    #[serde(rename = "moderate")]
    Moderate,
    #[serde(rename = "healthy")]
    Healthy,
}

impl SpendingTier {
    /// Cut points are exclusive: exactly 80% is still Moderate.
    pub fn from_ratio(expense_ratio: f64) -> Self {
        if expense_ratio > 80.0 {
            SpendingTier::Warning
        } else if expense_ratio > 60.0 {
            SpendingTier::Moderate
        } else {
            SpendingTier::Healthy
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BudgetAllocation {
    pub emergency_fund: f64,
    pub savings: f64,
    pub discretionary: f64,
    /// expense / income × 100, 0 without income
    pub expense_ratio: f64,
    pub tier: SpendingTier,
}

pub fn budget_allocation(snapshot: &FinancialSnapshot) -> BudgetAllocation {
    let income = snapshot.total_income;
    let balance = snapshot.balance;

    let emergency_fund = income * EMERGENCY_FUND_RATE;
    let savings = balance.max(0.0) * SAVINGS_RATE;
    let discretionary = (balance - emergency_fund - savings).max(0.0);

    let expense_ratio = if income > 0.0 {
        snapshot.total_expense / income * 100.0
    } else {
        0.0
    };

    BudgetAllocation {
        emergency_fund,
        savings,
        discretionary,
        expense_ratio,
        tier: SpendingTier::from_ratio(expense_ratio),
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Recommendation {
    /// Affordable and the emergency fund stays intact
    BuyNow,
    /// Affordable, but it eats into the emergency fund
    BuyCarefully,
    /// More than a year of income
    Reconsider { alternative_low: f64, alternative_high: f64 },
    /// More than a month of income
    CheaperAlternative { alternative_low: f64, alternative_high: f64 },
    SaveFirst,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PurchaseAnalysis {
    pub price: f64,
    pub can_afford_now: bool,
    /// `price − balance`, 0 when affordable
    pub shortfall: f64,
    pub monthly_saving_capacity: f64,
    /// Exact months; `None` when affordable now
    pub months_to_save: Option<f64>,
    pub recommendation: Recommendation,
}

impl PurchaseAnalysis {
    /// Whole months for display, rounded up
    pub fn months_display(&self) -> Option<u64> {
        self.months_to_save.map(|m| m.ceil().max(0.0) as u64)
    }

    pub fn alternative_range(&self) -> Option<(f64, f64)> {
        match self.recommendation {
            Recommendation::Reconsider {
                alternative_low,
                alternative_high,
            }
            | Recommendation::CheaperAlternative {
                alternative_low,
                alternative_high,
            } => Some((alternative_low, alternative_high)),
            _ => None,
        }
    }
}

pub fn purchase_analysis(price: f64, snapshot: &FinancialSnapshot) -> PurchaseAnalysis {
    let income = snapshot.total_income;
    let balance = snapshot.balance;
    let monthly_saving_capacity = (income - snapshot.total_expense).max(0.0);

    let can_afford_now = balance >= price;
    let (shortfall, months_to_save) = if can_afford_now {
        (0.0, None)
    } else {
        let shortfall = price - balance;
        (shortfall, Some(shortfall / monthly_saving_capacity.max(1.0)))
    };

    let recommendation = recommend(price, income, balance, can_afford_now);

    PurchaseAnalysis {
        price,
        can_afford_now,
        shortfall,
        monthly_saving_capacity,
        months_to_save,
        recommendation,
    }
}

// Affordability wins over the price-to-income checks.
fn recommend(price: f64, income: f64, balance: f64, can_afford_now: bool) -> Recommendation {
    if can_afford_now {
        return if balance - price >= income * EMERGENCY_FUND_RATE {
            Recommendation::BuyNow
        } else {
            Recommendation::BuyCarefully
        };
    }

    let alternative_low = price * ALTERNATIVE_LOW;
    let alternative_high = price * ALTERNATIVE_HIGH;

    if price > income * RECONSIDER_INCOME_MONTHS {
        Recommendation::Reconsider {
            alternative_low,
            alternative_high,
        }
    } else if price > income {
        Recommendation::CheaperAlternative {
            alternative_low,
            alternative_high,
        }
    } else {
        Recommendation::SaveFirst
    }
}
