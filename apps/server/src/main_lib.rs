use std::sync::Arc;

use anyhow::Context;
use calcae_core::{
    calculator::{CalculatorService, CalculatorServiceTrait},
    events::DomainEventSink,
    settings::{RateSettingsService, RateSettingsServiceTrait},
};
use calcae_storage_json::JsonRateConfigurationRepository;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::{config::Config, domain_events::WebDomainEventSink, events::EventBus};

const EVENT_BUS_CAPACITY: usize = 256;

pub struct AppState {
    pub settings_service: Arc<dyn RateSettingsServiceTrait>,
    pub calculator_service: Arc<dyn CalculatorServiceTrait>,
    pub event_bus: EventBus,
}

pub fn init_tracing() {
    let log_format = std::env::var("CALCAE_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    if let Some(parent) = config
        .settings_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
    {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Cannot create data directory {}", parent.display()))?;
    }
    tracing::info!("Settings file in use: {}", config.settings_path.display());

    let event_bus = EventBus::new(EVENT_BUS_CAPACITY);
    let domain_event_sink: Arc<dyn DomainEventSink> =
        Arc::new(WebDomainEventSink::new(event_bus.clone()));

    let repository = Arc::new(JsonRateConfigurationRepository::new(
        config.settings_path.clone(),
    ));
    let settings_service: Arc<dyn RateSettingsServiceTrait> =
        Arc::new(RateSettingsService::new(repository, domain_event_sink));
    let calculator_service: Arc<dyn CalculatorServiceTrait> =
        Arc::new(CalculatorService::new(settings_service.clone()));

    let initial = settings_service.current();
    tracing::info!(
        "Rate configuration loaded (roundMode={}, includeVL={})",
        initial.round_mode,
        initial.include_vl
    );

    Ok(Arc::new(AppState {
        settings_service,
        calculator_service,
        event_bus,
    }))
}
