//! Store and repository traits for the rate configuration.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::watch;

use crate::errors::Result;
use crate::rates::{RateConfiguration, RateConfigurationUpdate};

/// Persistence of the rate configuration.
#[async_trait]
pub trait RateConfigurationRepositoryTrait: Send + Sync {
    /// Reads the stored configuration. `Ok(None)` means nothing has been
    /// stored yet. A stored document may be partial; it is merged over the
    /// defaults by the caller.
    fn load(&self) -> Result<Option<RateConfigurationUpdate>>;

    /// Replaces the stored configuration.
    async fn save(&self, config: &RateConfiguration) -> Result<()>;
}

/// The settings store: single source of truth for the effective
/// configuration.
#[async_trait]
pub trait RateSettingsServiceTrait: Send + Sync {
    /// Owned copy of the effective configuration.
    fn get_configuration(&self) -> RateConfiguration;

    /// Shared handle on the effective configuration.
    fn current(&self) -> Arc<RateConfiguration>;

    /// Merges `update` over the current configuration, persists the result
    /// and then publishes it to every subscriber.
    async fn update_configuration(
        &self,
        update: &RateConfigurationUpdate,
    ) -> Result<RateConfiguration>;

    /// Receiver that observes every configuration published after this call.
    fn subscribe(&self) -> watch::Receiver<Arc<RateConfiguration>>;
}
