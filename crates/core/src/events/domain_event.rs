//! Domain event types.

use serde::{Deserialize, Serialize};

use crate::rates::RateConfiguration;

/// Domain events emitted by core services after successful mutations.
///
/// Runtime adapters translate them into surface-specific notifications
/// (server-sent events, window messages, etc.).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    /// The rate configuration was updated and persisted. Carries the full
    /// merged configuration, never the partial update.
    RateConfigurationChanged { configuration: RateConfiguration },
}

impl DomainEvent {
    /// Creates a RateConfigurationChanged event.
    pub fn rate_configuration_changed(configuration: RateConfiguration) -> Self {
        Self::RateConfigurationChanged { configuration }
    }
}
