//! Calculator input and output models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::rates::{ByCategory, Category, RateSet, RoundMode};
use crate::utils::decimal_input::deserialize_amount;

/// How revenue is declared: one category, or one amount per category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CalculationMode {
    #[default]
    #[serde(rename = "simple")]
    Simple,
    #[serde(rename = "mixte")]
    Mixed,
}

/// Declared revenue. Amounts may be sent as numbers or as typed text; text
/// that is not a number counts as zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode")]
pub enum RevenueInput {
    #[serde(rename = "simple")]
    Simple {
        category: Category,
        #[serde(default, deserialize_with = "deserialize_amount")]
        amount: Decimal,
    },
    #[serde(rename = "mixte")]
    Mixed {
        #[serde(default, deserialize_with = "deserialize_amount")]
        ventes: Decimal,
        #[serde(default, deserialize_with = "deserialize_amount")]
        bic: Decimal,
        #[serde(default, deserialize_with = "deserialize_amount")]
        bnc: Decimal,
    },
}

impl RevenueInput {
    pub fn simple(category: Category, amount: Decimal) -> Self {
        RevenueInput::Simple { category, amount }
    }

    pub fn mixed(ventes: Decimal, bic: Decimal, bnc: Decimal) -> Self {
        RevenueInput::Mixed { ventes, bic, bnc }
    }

    pub fn mode(&self) -> CalculationMode {
        match self {
            RevenueInput::Simple { .. } => CalculationMode::Simple,
            RevenueInput::Mixed { .. } => CalculationMode::Mixed,
        }
    }

    /// Revenue per category. In simple mode the two inactive categories are zero.
    pub fn amounts(&self) -> ByCategory<Decimal> {
        match self {
            RevenueInput::Simple { category, amount } => ByCategory::from_fn(|c| {
                if c == *category {
                    *amount
                } else {
                    Decimal::ZERO
                }
            }),
            RevenueInput::Mixed { ventes, bic, bnc } => ByCategory::new(*ventes, *bic, *bnc),
        }
    }
}

/// Charges computed for the revenue of one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResult {
    pub amount: Decimal,
    pub social: Decimal,
    pub vl: Decimal,
    pub cfp: Decimal,
    pub cci: Decimal,
    /// social + vl + cfp + cci
    pub total: Decimal,
}

/// Aggregates across the three categories, unrounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationTotals {
    pub ca_total: Decimal,
    pub social_total: Decimal,
    pub vl_total: Decimal,
    pub cfp_total: Decimal,
    pub cci_total: Decimal,
    pub charges_total: Decimal,
    pub net: Decimal,
}

/// Immutable result of one calculation: everything a report needs, with the
/// true (unrounded) values. Use [`CalculationSnapshot::display`] for the
/// rounded figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationSnapshot {
    pub mode: CalculationMode,
    pub inputs: ByCategory<Decimal>,
    /// Effective rates, in percent (BNC CCI already forced to zero).
    pub rates: ByCategory<RateSet>,
    pub results: ByCategory<CategoryResult>,
    pub totals: CalculationTotals,
    pub round_mode: RoundMode,
    #[serde(rename = "includeVL")]
    pub include_vl: bool,
    pub timestamp: DateTime<Utc>,
}

impl CalculationSnapshot {
    /// True when both snapshots carry the same figures, ignoring when they
    /// were produced.
    pub fn same_figures(&self, other: &CalculationSnapshot) -> bool {
        self.mode == other.mode
            && self.inputs == other.inputs
            && self.rates == other.rates
            && self.results == other.results
            && self.totals == other.totals
            && self.round_mode == other.round_mode
            && self.include_vl == other.include_vl
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_simple_input_zeroes_inactive_categories() {
        let input = RevenueInput::simple(Category::Bic, dec!(1500));
        assert_eq!(input.mode(), CalculationMode::Simple);
        assert_eq!(input.amounts(), ByCategory::new(dec!(0), dec!(1500), dec!(0)));
    }

    #[test]
    fn test_revenue_input_wire_format() {
        let simple: RevenueInput =
            serde_json::from_str(r#"{"mode": "simple", "category": "BNC", "amount": "1000,50"}"#)
                .unwrap();
        assert_eq!(simple, RevenueInput::simple(Category::Bnc, dec!(1000.50)));

        let mixed: RevenueInput =
            serde_json::from_str(r#"{"mode": "mixte", "ventes": 500, "bic": "abc"}"#).unwrap();
        assert_eq!(mixed, RevenueInput::mixed(dec!(500), dec!(0), dec!(0)));
        assert_eq!(mixed.mode(), CalculationMode::Mixed);
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        let parsed = serde_json::from_str::<RevenueInput>(r#"{"mode": "triple"}"#);
        assert!(parsed.is_err());
    }
}
