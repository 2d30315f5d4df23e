//! The contribution transform: revenue and rates in, full breakdown out.
//!
//! Everything here is pure and total. Arithmetic saturates instead of
//! overflowing so absurd rates still produce a snapshot.

use chrono::Utc;
use rust_decimal::Decimal;

use super::calculator_model::{
    CalculationSnapshot, CalculationTotals, CategoryResult, RevenueInput,
};
use crate::constants::PERCENT_DIVISOR;
use crate::rates::{ByCategory, RateConfiguration, RateSet};

/// `amount * rate%`
fn percent_of(amount: Decimal, rate: Decimal) -> Decimal {
    amount.saturating_mul(rate / PERCENT_DIVISOR)
}

/// Computes the charges owed on `amount` with the given effective rates.
pub fn calculate_category(amount: Decimal, rates: &RateSet, include_vl: bool) -> CategoryResult {
    let social = percent_of(amount, rates.social);
    let vl = if include_vl {
        percent_of(amount, rates.vl)
    } else {
        Decimal::ZERO
    };
    let cfp = percent_of(amount, rates.cfp);
    let cci = percent_of(amount, rates.cci);
    let total = social
        .saturating_add(vl)
        .saturating_add(cfp)
        .saturating_add(cci);

    CategoryResult {
        amount,
        social,
        vl,
        cfp,
        cci,
        total,
    }
}

fn sum_component(
    results: &ByCategory<CategoryResult>,
    component: impl Fn(&CategoryResult) -> Decimal,
) -> Decimal {
    results
        .iter()
        .fold(Decimal::ZERO, |acc, (_, result)| acc.saturating_add(component(result)))
}

impl CalculationTotals {
    /// Sums every component across categories from the unrounded results.
    pub fn from_results(results: &ByCategory<CategoryResult>) -> Self {
        let ca_total = sum_component(results, |r| r.amount);
        let social_total = sum_component(results, |r| r.social);
        let vl_total = sum_component(results, |r| r.vl);
        let cfp_total = sum_component(results, |r| r.cfp);
        let cci_total = sum_component(results, |r| r.cci);
        let charges_total = social_total
            .saturating_add(vl_total)
            .saturating_add(cfp_total)
            .saturating_add(cci_total);

        Self {
            ca_total,
            social_total,
            vl_total,
            cfp_total,
            cci_total,
            charges_total,
            net: ca_total.saturating_sub(charges_total),
        }
    }
}

/// Runs a full calculation against `config`.
pub fn calculate(input: &RevenueInput, config: &RateConfiguration) -> CalculationSnapshot {
    let inputs = input.amounts();
    let rates = config
        .rates
        .map(|category, stored| stored.effective_for(category));
    let results = inputs.map(|category, amount| {
        calculate_category(*amount, rates.get(category), config.include_vl)
    });
    let totals = CalculationTotals::from_results(&results);

    CalculationSnapshot {
        mode: input.mode(),
        inputs,
        rates,
        results,
        totals,
        round_mode: config.round_mode,
        include_vl: config.include_vl,
        timestamp: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::{Category, RoundMode};
    use rust_decimal_macros::dec;

    fn config(include_vl: bool, round_mode: RoundMode) -> RateConfiguration {
        RateConfiguration {
            include_vl,
            round_mode,
            ..RateConfiguration::default()
        }
    }

    #[test]
    fn test_ventes_without_vl() {
        let snapshot = calculate(
            &RevenueInput::simple(Category::Ventes, dec!(1000)),
            &config(false, RoundMode::None),
        );
        let ventes = snapshot.results.ventes;

        assert_eq!(ventes.social, dec!(123.00));
        assert_eq!(ventes.vl, dec!(0));
        assert_eq!(ventes.cfp, dec!(1.00));
        assert_eq!(ventes.cci, dec!(0.20));
        assert_eq!(ventes.total, dec!(124.20));
        assert_eq!(snapshot.totals.charges_total, dec!(124.20));
        assert_eq!(snapshot.totals.net, dec!(875.80));
    }

    #[test]
    fn test_bnc_with_vl() {
        let snapshot = calculate(
            &RevenueInput::simple(Category::Bnc, dec!(1000)),
            &config(true, RoundMode::None),
        );
        let bnc = snapshot.results.bnc;

        assert_eq!(bnc.social, dec!(246.00));
        assert_eq!(bnc.vl, dec!(22.00));
        assert_eq!(bnc.cfp, dec!(1.00));
        assert_eq!(bnc.cci, dec!(0));
        assert_eq!(bnc.total, dec!(269.00));
        assert_eq!(snapshot.totals.net, dec!(731.00));
    }

    #[test]
    fn test_bnc_cci_ignored_even_when_stored() {
        let mut cfg = config(false, RoundMode::None);
        cfg.rates.bnc.cci = dec!(3);

        let snapshot = calculate(&RevenueInput::mixed(dec!(0), dec!(0), dec!(1000)), &cfg);

        assert_eq!(snapshot.results.bnc.cci, dec!(0));
        assert_eq!(snapshot.rates.bnc.cci, dec!(0));
        assert_eq!(snapshot.totals.cci_total, dec!(0));
    }

    #[test]
    fn test_mixed_totals_are_unrounded() {
        let snapshot = calculate(
            &RevenueInput::mixed(dec!(500), dec!(500), dec!(0)),
            &config(false, RoundMode::Nearest),
        );

        assert_eq!(snapshot.totals.ca_total, dec!(1000));
        assert_eq!(snapshot.results.ventes.social, dec!(61.5));
        assert_eq!(snapshot.results.bic.social, dec!(106));
        assert_eq!(snapshot.totals.social_total, dec!(167.5));
        assert_eq!(snapshot.round_mode, RoundMode::Nearest);
    }

    #[test]
    fn test_negative_net_when_charges_exceed_revenue() {
        let mut cfg = config(true, RoundMode::None);
        cfg.rates.bic.social = dec!(150);

        let snapshot = calculate(&RevenueInput::simple(Category::Bic, dec!(100)), &cfg);

        assert!(snapshot.totals.net < Decimal::ZERO);
        assert_eq!(snapshot.results.bic.social, dec!(150));
    }

    #[test]
    fn test_huge_rates_saturate_instead_of_panicking() {
        let mut cfg = config(true, RoundMode::Nearest);
        cfg.rates.ventes.social = Decimal::MAX;
        cfg.rates.ventes.vl = Decimal::MAX;

        let snapshot = calculate(&RevenueInput::simple(Category::Ventes, Decimal::MAX), &cfg);

        assert_eq!(snapshot.results.ventes.total, Decimal::MAX);
        assert_eq!(snapshot.totals.charges_total, Decimal::MAX);
        assert_eq!(snapshot.totals.net, Decimal::ZERO);
    }

    #[test]
    fn test_zero_revenue_yields_zero_everything() {
        let snapshot = calculate(
            &RevenueInput::mixed(dec!(0), dec!(0), dec!(0)),
            &config(true, RoundMode::Ceil),
        );
        assert_eq!(snapshot.totals, CalculationTotals::default());
    }
}
