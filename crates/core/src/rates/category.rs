//! Revenue categories and the per-category container used across the crate.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{Error, ValidationError};

/// Revenue classification of an auto-entrepreneur activity.
///
/// The set is closed: every rate table, input and result carries exactly one
/// entry per variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    /// Sales of goods (achat/revente, fourniture de logement).
    Ventes,
    /// Commercial and craft services.
    Bic,
    /// Liberal professions.
    Bnc,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Ventes, Category::Bic, Category::Bnc];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Ventes => "VENTES",
            Category::Bic => "BIC",
            Category::Bnc => "BNC",
        }
    }

    /// Liberal professions are not registered with a chamber of commerce and
    /// never pay the CCI levy.
    pub fn is_subject_to_cci(&self) -> bool {
        !matches!(self, Category::Bnc)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "VENTES" => Ok(Category::Ventes),
            "BIC" => Ok(Category::Bic),
            "BNC" => Ok(Category::Bnc),
            other => Err(ValidationError::InvalidInput(format!(
                "Unknown revenue category '{}'",
                other
            ))
            .into()),
        }
    }
}

/// One value per [`Category`], serialized as `{"VENTES": .., "BIC": .., "BNC": ..}`.
///
/// Missing keys deserialize to `T::default()`, which lets partial documents
/// (`Option<_>` payloads) omit categories they do not touch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ByCategory<T> {
    #[serde(rename = "VENTES")]
    pub ventes: T,
    #[serde(rename = "BIC")]
    pub bic: T,
    #[serde(rename = "BNC")]
    pub bnc: T,
}

impl<T> ByCategory<T> {
    pub fn new(ventes: T, bic: T, bnc: T) -> Self {
        Self { ventes, bic, bnc }
    }

    /// Builds a value by evaluating `f` once per category.
    pub fn from_fn(mut f: impl FnMut(Category) -> T) -> Self {
        Self {
            ventes: f(Category::Ventes),
            bic: f(Category::Bic),
            bnc: f(Category::Bnc),
        }
    }

    pub fn get(&self, category: Category) -> &T {
        match category {
            Category::Ventes => &self.ventes,
            Category::Bic => &self.bic,
            Category::Bnc => &self.bnc,
        }
    }

    pub fn get_mut(&mut self, category: Category) -> &mut T {
        match category {
            Category::Ventes => &mut self.ventes,
            Category::Bic => &mut self.bic,
            Category::Bnc => &mut self.bnc,
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(Category, &T) -> U) -> ByCategory<U> {
        ByCategory::from_fn(|category| f(category, self.get(category)))
    }

    /// Iterates in the fixed VENTES, BIC, BNC order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &T)> {
        Category::ALL
            .into_iter()
            .map(move |category| (category, self.get(category)))
    }
}
