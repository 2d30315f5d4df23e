use std::sync::Arc;

use log::debug;

use super::calculator_model::{CalculationSnapshot, RevenueInput};
use super::contribution_calculator::calculate;
use super::session::CalculatorSession;
use crate::settings::RateSettingsServiceTrait;

pub trait CalculatorServiceTrait: Send + Sync {
    /// Calculates against the configuration currently published by the
    /// settings store.
    fn calculate(&self, input: &RevenueInput) -> CalculationSnapshot;

    /// Opens a session bound to the current configuration.
    fn new_session(&self) -> CalculatorSession;
}

pub struct CalculatorService {
    settings_service: Arc<dyn RateSettingsServiceTrait>,
}

impl CalculatorService {
    pub fn new(settings_service: Arc<dyn RateSettingsServiceTrait>) -> Self {
        Self { settings_service }
    }
}

impl CalculatorServiceTrait for CalculatorService {
    fn calculate(&self, input: &RevenueInput) -> CalculationSnapshot {
        let config = self.settings_service.current();
        debug!("Calculating {:?} revenue", input.mode());
        calculate(input, &config)
    }

    fn new_session(&self) -> CalculatorSession {
        CalculatorSession::new(self.settings_service.current())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::NoOpDomainEventSink;
    use crate::rates::{Category, RateConfigurationUpdate, RoundMode};
    use crate::settings::{InMemoryRateConfigurationRepository, RateSettingsService};
    use rust_decimal_macros::dec;

    fn settings() -> Arc<RateSettingsService> {
        Arc::new(RateSettingsService::new(
            Arc::new(InMemoryRateConfigurationRepository::new()),
            Arc::new(NoOpDomainEventSink),
        ))
    }

    #[tokio::test]
    async fn test_calculate_uses_latest_configuration() {
        let settings = settings();
        let service = CalculatorService::new(settings.clone());
        let input = RevenueInput::simple(Category::Ventes, dec!(1000));

        assert_eq!(service.calculate(&input).results.ventes.vl, dec!(0));

        settings
            .update_configuration(&RateConfigurationUpdate {
                include_vl: Some(true),
                round_mode: Some(RoundMode::Floor),
                ..Default::default()
            })
            .await
            .unwrap();

        let snapshot = service.calculate(&input);
        assert_eq!(snapshot.results.ventes.vl, dec!(10));
        assert_eq!(snapshot.round_mode, RoundMode::Floor);
    }

    #[tokio::test]
    async fn test_new_session_starts_from_current_configuration() {
        let settings = settings();
        settings
            .update_configuration(&RateConfigurationUpdate {
                include_vl: Some(true),
                ..Default::default()
            })
            .await
            .unwrap();

        let session = CalculatorService::new(settings).new_session();
        assert!(session.configuration().include_vl);
    }
}
