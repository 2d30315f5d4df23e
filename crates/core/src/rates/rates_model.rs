//! Rate configuration domain models.

use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::category::{ByCategory, Category};
use crate::errors::{Error, ValidationError};

/// The four contribution rates of one category, as whole percentages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateSet {
    /// Social security contributions.
    pub social: Decimal,
    /// Optional income-tax withholding (versement libératoire).
    pub vl: Decimal,
    /// Professional training fund contribution.
    pub cfp: Decimal,
    /// Chamber of commerce tax.
    pub cci: Decimal,
}

impl RateSet {
    pub fn new(social: Decimal, vl: Decimal, cfp: Decimal, cci: Decimal) -> Self {
        Self {
            social,
            vl,
            cfp,
            cci,
        }
    }

    /// The rates actually applied to `category`: the stored CCI rate of a
    /// BNC activity is ignored whatever its value.
    pub fn effective_for(&self, category: Category) -> Self {
        if category.is_subject_to_cci() {
            *self
        } else {
            Self {
                cci: Decimal::ZERO,
                ..*self
            }
        }
    }
}

/// Display rounding policy, applied line by line to the final figures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundMode {
    #[default]
    None,
    Floor,
    Ceil,
    Nearest,
}

impl RoundMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundMode::None => "none",
            RoundMode::Floor => "floor",
            RoundMode::Ceil => "ceil",
            RoundMode::Nearest => "nearest",
        }
    }

    /// Label shown next to the figures in reports.
    pub fn label(&self) -> &'static str {
        match self {
            RoundMode::None => "Aucun",
            RoundMode::Floor => "À l’euro inférieur",
            RoundMode::Ceil => "À l’euro supérieur",
            RoundMode::Nearest => "À l’euro le plus proche",
        }
    }

    /// Rounds a single displayed figure to whole euros. Half values round
    /// away from zero.
    pub fn apply(&self, value: Decimal) -> Decimal {
        match self {
            RoundMode::None => value,
            RoundMode::Floor => value.floor(),
            RoundMode::Ceil => value.ceil(),
            RoundMode::Nearest => {
                value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            }
        }
    }
}

impl fmt::Display for RoundMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoundMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(RoundMode::None),
            "floor" => Ok(RoundMode::Floor),
            "ceil" => Ok(RoundMode::Ceil),
            "nearest" => Ok(RoundMode::Nearest),
            other => Err(ValidationError::InvalidInput(format!(
                "Unknown rounding mode '{}'",
                other
            ))
            .into()),
        }
    }
}

/// Complete, effective rate configuration handed to the calculator.
///
/// Instances are never edited in place: the settings store builds a new
/// merged value on every update and publishes it as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateConfiguration {
    pub round_mode: RoundMode,
    #[serde(rename = "includeVL")]
    pub include_vl: bool,
    pub rates: ByCategory<RateSet>,
}

impl RateConfiguration {
    pub fn rates_for(&self, category: Category) -> &RateSet {
        self.rates.get(category)
    }
}

impl Default for RateConfiguration {
    fn default() -> Self {
        Self {
            round_mode: RoundMode::None,
            include_vl: false,
            rates: ByCategory {
                ventes: RateSet::new(dec!(12.3), dec!(1.0), dec!(0.10), dec!(0.02)),
                bic: RateSet::new(dec!(21.2), dec!(1.7), dec!(0.10), dec!(0.04)),
                bnc: RateSet::new(dec!(24.6), dec!(2.2), dec!(0.10), dec!(0)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configuration_values() {
        let config = RateConfiguration::default();
        assert_eq!(config.round_mode, RoundMode::None);
        assert!(!config.include_vl);
        assert_eq!(config.rates_for(Category::Ventes).social, dec!(12.3));
        assert_eq!(config.rates_for(Category::Bic).cci, dec!(0.04));
        assert_eq!(config.rates_for(Category::Bnc).vl, dec!(2.2));
        assert_eq!(config.rates_for(Category::Bnc).cci, Decimal::ZERO);
    }

    #[test]
    fn test_effective_rates_zero_bnc_cci() {
        let stored = RateSet::new(dec!(24.6), dec!(2.2), dec!(0.1), dec!(5));
        assert_eq!(stored.effective_for(Category::Bnc).cci, Decimal::ZERO);
        assert_eq!(stored.effective_for(Category::Bnc).social, dec!(24.6));
        assert_eq!(stored.effective_for(Category::Bic).cci, dec!(5));
    }

    #[test]
    fn test_round_mode_apply() {
        let value = dec!(167.5);
        assert_eq!(RoundMode::None.apply(value), dec!(167.5));
        assert_eq!(RoundMode::Floor.apply(value), dec!(167));
        assert_eq!(RoundMode::Ceil.apply(value), dec!(168));
        assert_eq!(RoundMode::Nearest.apply(value), dec!(168));
        assert_eq!(RoundMode::Nearest.apply(dec!(-2.5)), dec!(-3));
        assert_eq!(RoundMode::Nearest.apply(dec!(2.49)), dec!(2));
        assert_eq!(RoundMode::Floor.apply(dec!(-0.2)), dec!(-1));
    }

    #[test]
    fn test_round_mode_parsing() {
        assert_eq!("Nearest".parse::<RoundMode>().unwrap(), RoundMode::Nearest);
        assert!("banker".parse::<RoundMode>().is_err());
    }

    #[test]
    fn test_configuration_json_shape() {
        let json = serde_json::to_value(RateConfiguration::default()).unwrap();
        assert_eq!(json["roundMode"], "none");
        assert_eq!(json["includeVL"], false);
        assert_eq!(json["rates"]["VENTES"]["social"], 12.3);
        assert_eq!(json["rates"]["BNC"]["cci"], 0.0);

        let parsed: RateConfiguration = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, RateConfiguration::default());
    }
}
