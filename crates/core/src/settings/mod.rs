//! Settings store for the rate configuration.

mod memory_repository;
mod settings_service;
mod settings_traits;

pub use memory_repository::InMemoryRateConfigurationRepository;
pub use settings_service::RateSettingsService;
pub use settings_traits::{RateConfigurationRepositoryTrait, RateSettingsServiceTrait};
