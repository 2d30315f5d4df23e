//! Rounded presentation of a snapshot.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::calculator_model::{CalculationMode, CalculationSnapshot};
use crate::rates::{ByCategory, RoundMode};

/// Figures as shown to the user and written to exports.
///
/// Every line is rounded on its own from the true value held by the
/// snapshot, so a displayed total is `round(sum)` and not the sum of the
/// displayed lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayedFigures {
    pub round_mode: RoundMode,
    pub round_mode_label: String,
    pub ca_total: Decimal,
    pub social_total: Decimal,
    pub vl_total: Decimal,
    pub cfp_total: Decimal,
    pub cci_total: Decimal,
    pub charges_total: Decimal,
    pub net: Decimal,
    /// Social contributions per category, only listed in mixed mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_by_category: Option<ByCategory<Decimal>>,
}

impl CalculationSnapshot {
    /// Applies the snapshot's rounding mode to each displayed line.
    pub fn display(&self) -> DisplayedFigures {
        let round = |value: Decimal| self.round_mode.apply(value);
        let totals = &self.totals;

        let social_by_category = match self.mode {
            CalculationMode::Mixed => Some(self.results.map(|_, result| round(result.social))),
            CalculationMode::Simple => None,
        };

        DisplayedFigures {
            round_mode: self.round_mode,
            round_mode_label: self.round_mode.label().to_string(),
            ca_total: round(totals.ca_total),
            social_total: round(totals.social_total),
            vl_total: round(totals.vl_total),
            cfp_total: round(totals.cfp_total),
            cci_total: round(totals.cci_total),
            charges_total: round(totals.charges_total),
            net: round(totals.net),
            social_by_category,
        }
    }
}
