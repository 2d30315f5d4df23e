//! Per-surface calculator state.
//!
//! A session owns the raw text typed by one user plus its own copy of the
//! latest rate configuration. Nothing here is shared between sessions.

use std::sync::Arc;

use log::debug;
use tokio::sync::watch;

use super::calculator_model::{CalculationMode, CalculationSnapshot, RevenueInput};
use super::contribution_calculator::calculate;
use crate::rates::{Category, RateConfiguration};
use crate::utils::coerce_decimal;

/// Revenue text fields of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RevenueField {
    /// `caSimple`, read in simple mode.
    Simple,
    /// `caVentes`, read in mixed mode.
    Ventes,
    /// `caBic`, read in mixed mode.
    Bic,
    /// `caBnc`, read in mixed mode.
    Bnc,
}

/// A user interaction that triggers a recalculation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputChange {
    ModeSelected(CalculationMode),
    CategorySelected(Category),
    AmountEdited { field: RevenueField, text: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct RevenueFields {
    simple: String,
    ventes: String,
    bic: String,
    bnc: String,
}

impl RevenueFields {
    fn get_mut(&mut self, field: RevenueField) -> &mut String {
        match field {
            RevenueField::Simple => &mut self.simple,
            RevenueField::Ventes => &mut self.ventes,
            RevenueField::Bic => &mut self.bic,
            RevenueField::Bnc => &mut self.bnc,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CalculatorSession {
    config: Arc<RateConfiguration>,
    mode: CalculationMode,
    simple_category: Category,
    fields: RevenueFields,
}

impl CalculatorSession {
    pub fn new(config: Arc<RateConfiguration>) -> Self {
        Self {
            config,
            mode: CalculationMode::Simple,
            simple_category: Category::Ventes,
            fields: RevenueFields::default(),
        }
    }

    pub fn mode(&self) -> CalculationMode {
        self.mode
    }

    pub fn simple_category(&self) -> Category {
        self.simple_category
    }

    pub fn configuration(&self) -> &RateConfiguration {
        &self.config
    }

    /// Records the change, then recalculates from the fields of the mode now
    /// active.
    pub fn apply(&mut self, change: InputChange) -> CalculationSnapshot {
        match change {
            InputChange::ModeSelected(mode) => self.mode = mode,
            InputChange::CategorySelected(category) => self.simple_category = category,
            InputChange::AmountEdited { field, text } => *self.fields.get_mut(field) = text,
        }
        self.recalculate()
    }

    /// Revenue read from the fields visible in the current mode. Fields of
    /// the other mode keep their text but are ignored.
    pub fn revenue_input(&self) -> RevenueInput {
        match self.mode {
            CalculationMode::Simple => RevenueInput::simple(
                self.simple_category,
                coerce_decimal(&self.fields.simple),
            ),
            CalculationMode::Mixed => RevenueInput::mixed(
                coerce_decimal(&self.fields.ventes),
                coerce_decimal(&self.fields.bic),
                coerce_decimal(&self.fields.bnc),
            ),
        }
    }

    pub fn recalculate(&self) -> CalculationSnapshot {
        calculate(&self.revenue_input(), &self.config)
    }

    pub fn on_configuration_changed(
        &mut self,
        config: Arc<RateConfiguration>,
    ) -> CalculationSnapshot {
        self.config = config;
        self.recalculate()
    }

    /// Picks up a configuration published since the last sync, if any.
    pub fn sync_configuration(
        &mut self,
        receiver: &mut watch::Receiver<Arc<RateConfiguration>>,
    ) -> Option<CalculationSnapshot> {
        if !matches!(receiver.has_changed(), Ok(true)) {
            return None;
        }
        let config = receiver.borrow_and_update().clone();
        debug!("Calculator session picked up a new rate configuration");
        Some(self.on_configuration_changed(config))
    }

    /// Waits for the next published configuration and recalculates with it.
    /// Returns `None` once the store is gone.
    pub async fn next_configuration(
        &mut self,
        receiver: &mut watch::Receiver<Arc<RateConfiguration>>,
    ) -> Option<CalculationSnapshot> {
        receiver.changed().await.ok()?;
        let config = receiver.borrow_and_update().clone();
        Some(self.on_configuration_changed(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::RoundMode;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn session() -> CalculatorSession {
        CalculatorSession::new(Arc::new(RateConfiguration::default()))
    }

    fn edit(field: RevenueField, text: &str) -> InputChange {
        InputChange::AmountEdited {
            field,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_new_session_starts_in_simple_mode_on_ventes() {
        let session = session();
        assert_eq!(session.mode(), CalculationMode::Simple);
        assert_eq!(session.simple_category(), Category::Ventes);
        assert_eq!(session.recalculate().totals.ca_total, Decimal::ZERO);
    }

    #[test]
    fn test_simple_edit_uses_selected_category() {
        let mut session = session();
        session.apply(InputChange::CategorySelected(Category::Bnc));
        let snapshot = session.apply(edit(RevenueField::Simple, "1000"));

        assert_eq!(snapshot.inputs.bnc, dec!(1000));
        assert_eq!(snapshot.results.bnc.social, dec!(246));
        assert_eq!(snapshot.inputs.ventes, Decimal::ZERO);
    }

    #[test]
    fn test_mode_switch_ignores_hidden_fields() {
        let mut session = session();
        session.apply(edit(RevenueField::Simple, "1000"));
        session.apply(edit(RevenueField::Ventes, "500"));
        session.apply(edit(RevenueField::Bic, "500"));

        // still simple: mixed fields are hidden
        assert_eq!(session.recalculate().totals.ca_total, dec!(1000));
        assert_eq!(session.recalculate().inputs.bic, Decimal::ZERO);

        // the switch is applied before the fields are read
        let snapshot = session.apply(InputChange::ModeSelected(CalculationMode::Mixed));
        assert_eq!(snapshot.mode, CalculationMode::Mixed);
        assert_eq!(snapshot.totals.ca_total, dec!(1000));
        assert_eq!(snapshot.inputs.ventes, dec!(500));
        assert_eq!(snapshot.inputs.bic, dec!(500));

        let snapshot = session.apply(InputChange::ModeSelected(CalculationMode::Simple));
        assert_eq!(snapshot.inputs.ventes, dec!(1000));
        assert_eq!(snapshot.inputs.bic, Decimal::ZERO);
    }

    #[test]
    fn test_text_is_coerced() {
        let mut session = session();
        session.apply(InputChange::ModeSelected(CalculationMode::Mixed));
        session.apply(edit(RevenueField::Ventes, "1 000"));
        session.apply(edit(RevenueField::Bic, "250,5"));
        let snapshot = session.apply(edit(RevenueField::Bnc, "abc"));

        assert_eq!(snapshot.inputs.ventes, dec!(1));
        assert_eq!(snapshot.inputs.bic, dec!(250.5));
        assert_eq!(snapshot.inputs.bnc, Decimal::ZERO);
    }

    #[test]
    fn test_configuration_change_recalculates() {
        let mut session = session();
        session.apply(edit(RevenueField::Simple, "1000"));

        let config = RateConfiguration {
            include_vl: true,
            round_mode: RoundMode::Nearest,
            ..RateConfiguration::default()
        };
        let snapshot = session.on_configuration_changed(Arc::new(config));

        assert!(snapshot.include_vl);
        assert_eq!(snapshot.results.ventes.vl, dec!(10));
        assert_eq!(session.configuration().round_mode, RoundMode::Nearest);
    }

    #[test]
    fn test_sync_configuration_only_fires_on_change() {
        let (sender, mut receiver) = watch::channel(Arc::new(RateConfiguration::default()));
        let mut session = CalculatorSession::new(receiver.borrow_and_update().clone());
        session.apply(edit(RevenueField::Simple, "1000"));

        assert!(session.sync_configuration(&mut receiver).is_none());

        let mut updated = RateConfiguration::default();
        updated.rates.ventes.social = dec!(20);
        sender.send_replace(Arc::new(updated));

        let snapshot = session.sync_configuration(&mut receiver).unwrap();
        assert_eq!(snapshot.results.ventes.social, dec!(200));
        assert!(session.sync_configuration(&mut receiver).is_none());
    }

    #[tokio::test]
    async fn test_next_configuration_ends_when_store_dropped() {
        let (sender, mut receiver) = watch::channel(Arc::new(RateConfiguration::default()));
        let mut session = CalculatorSession::new(receiver.borrow_and_update().clone());

        sender.send_replace(Arc::new(RateConfiguration {
            include_vl: true,
            ..RateConfiguration::default()
        }));
        let snapshot = session.next_configuration(&mut receiver).await.unwrap();
        assert!(snapshot.include_vl);

        drop(sender);
        assert!(session.next_configuration(&mut receiver).await.is_none());
    }
}
