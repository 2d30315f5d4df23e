//! Partial rate configuration and the typed deep merge.

use log::warn;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::category::{ByCategory, Category};
use super::rates_model::{RateConfiguration, RateSet, RoundMode};
use crate::utils::decimal_input::deserialize_option_rate;

/// Partial [`RateSet`]: only the supplied rates are changed by a merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateSetUpdate {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_option_rate"
    )]
    pub social: Option<Decimal>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_option_rate"
    )]
    pub vl: Option<Decimal>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_option_rate"
    )]
    pub cfp: Option<Decimal>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_option_rate"
    )]
    pub cci: Option<Decimal>,
}

impl RateSetUpdate {
    pub fn merged_over(&self, current: &RateSet) -> RateSet {
        RateSet {
            social: self.social.unwrap_or(current.social),
            vl: self.vl.unwrap_or(current.vl),
            cfp: self.cfp.unwrap_or(current.cfp),
            cci: self.cci.unwrap_or(current.cci),
        }
    }
}

impl From<RateSet> for RateSetUpdate {
    fn from(rates: RateSet) -> Self {
        Self {
            social: Some(rates.social),
            vl: Some(rates.vl),
            cfp: Some(rates.cfp),
            cci: Some(rates.cci),
        }
    }
}

/// Partial [`RateConfiguration`] as accepted by the settings store and as
/// read back from storage.
///
/// The schema is fixed: unknown keys are dropped during deserialization and
/// can never reach the effective configuration. A field holding a value of
/// the wrong type is treated as not supplied, so the rest of the document
/// still applies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateConfigurationUpdate {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_round_mode"
    )]
    pub round_mode: Option<RoundMode>,
    #[serde(
        rename = "includeVL",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_flag"
    )]
    pub include_vl: Option<bool>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_rates"
    )]
    pub rates: Option<ByCategory<Option<RateSetUpdate>>>,
}

impl RateConfigurationUpdate {
    /// Update touching a single rate set.
    pub fn for_category(category: Category, rates: RateSetUpdate) -> Self {
        let mut by_category = ByCategory::<Option<RateSetUpdate>>::default();
        *by_category.get_mut(category) = Some(rates);
        Self {
            rates: Some(by_category),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.round_mode.is_none() && self.include_vl.is_none() && self.rates.is_none()
    }
}

impl From<&RateConfiguration> for RateConfigurationUpdate {
    fn from(config: &RateConfiguration) -> Self {
        Self {
            round_mode: Some(config.round_mode),
            include_vl: Some(config.include_vl),
            rates: Some(config.rates.map(|_, rates| Some(RateSetUpdate::from(*rates)))),
        }
    }
}

impl RateConfiguration {
    /// Deep-merges `update` over `self`, field by field and category by
    /// category, and returns the new configuration.
    pub fn merged(&self, update: &RateConfigurationUpdate) -> RateConfiguration {
        let rates = match &update.rates {
            Some(partial) => self.rates.map(|category, current| match partial.get(category) {
                Some(category_update) => category_update.merged_over(current),
                None => *current,
            }),
            None => self.rates,
        };

        RateConfiguration {
            round_mode: update.round_mode.unwrap_or(self.round_mode),
            include_vl: update.include_vl.unwrap_or(self.include_vl),
            rates,
        }
    }
}

/// Unknown rounding modes fall back to `none` instead of invalidating the
/// whole document.
fn deserialize_round_mode<'de, D>(deserializer: D) -> Result<Option<RoundMode>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(value)) => Some(value.parse().unwrap_or_else(|_| {
            warn!("Unknown rounding mode '{}', using 'none'", value);
            RoundMode::None
        })),
        Some(other) => {
            warn!("Ignoring non-text roundMode {}", other);
            None
        }
    })
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::Bool(flag)) => Some(flag),
        Some(other) => {
            warn!("Ignoring non-boolean includeVL {}", other);
            None
        }
    })
}

/// Keeps every category whose rate set parses; anything else in `rates` is
/// dropped with a warning.
fn deserialize_rates<'de, D>(
    deserializer: D,
) -> Result<Option<ByCategory<Option<RateSetUpdate>>>, D::Error>
where
    D: Deserializer<'de>,
{
    let map = match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Object(map)) => map,
        Some(other) => {
            warn!("Ignoring non-object rates {}", other);
            return Ok(None);
        }
    };

    Ok(Some(ByCategory::from_fn(|category| {
        match map.get(category.as_str())? {
            Value::Null => None,
            raw => match RateSetUpdate::deserialize(raw) {
                Ok(rates) => Some(rates),
                Err(e) => {
                    warn!("Ignoring {} rates: {}", category, e);
                    None
                }
            },
        }
    })))
}
