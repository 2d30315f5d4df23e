use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, error, warn};
use tokio::sync::{watch, Mutex};

use super::settings_traits::{RateConfigurationRepositoryTrait, RateSettingsServiceTrait};
use crate::errors::{Error, Result, StorageError};
use crate::events::{DomainEvent, DomainEventSink};
use crate::rates::{RateConfiguration, RateConfigurationUpdate};

/// State shared with the update task.
struct StoreInner {
    repository: Arc<dyn RateConfigurationRepositoryTrait>,
    event_sink: Arc<dyn DomainEventSink>,
    sender: watch::Sender<Arc<RateConfiguration>>,
    // Held from merge to publish.
    write_lock: Mutex<()>,
}

impl StoreInner {
    async fn apply(&self, update: &RateConfigurationUpdate) -> Result<RateConfiguration> {
        let _guard = self.write_lock.lock().await;

        let merged = self.sender.borrow().merged(update);

        if let Err(e) = self.repository.save(&merged).await {
            error!("Failed to persist rate configuration: {}", e);
            return Err(e);
        }

        self.sender.send_replace(Arc::new(merged.clone()));
        self.event_sink
            .emit(DomainEvent::rate_configuration_changed(merged.clone()));
        debug!(
            "Rate configuration updated (roundMode={}, includeVL={})",
            merged.round_mode, merged.include_vl
        );

        Ok(merged)
    }
}

pub struct RateSettingsService {
    inner: Arc<StoreInner>,
}

impl RateSettingsService {
    /// Builds the store from whatever the repository holds. Missing or
    /// unreadable data yields the default configuration.
    pub fn new(
        repository: Arc<dyn RateConfigurationRepositoryTrait>,
        event_sink: Arc<dyn DomainEventSink>,
    ) -> Self {
        let initial = Self::load_initial(repository.as_ref());
        let (sender, _) = watch::channel(Arc::new(initial));
        RateSettingsService {
            inner: Arc::new(StoreInner {
                repository,
                event_sink,
                sender,
                write_lock: Mutex::new(()),
            }),
        }
    }

    fn load_initial(repository: &dyn RateConfigurationRepositoryTrait) -> RateConfiguration {
        let defaults = RateConfiguration::default();
        match repository.load() {
            Ok(Some(stored)) => defaults.merged(&stored),
            Ok(None) => {
                debug!("No stored rate configuration, using defaults");
                defaults
            }
            Err(e) => {
                warn!(
                    "Failed to load rate configuration, using defaults: {}",
                    e
                );
                defaults
            }
        }
    }
}

#[async_trait]
impl RateSettingsServiceTrait for RateSettingsService {
    fn get_configuration(&self) -> RateConfiguration {
        (**self.inner.sender.borrow()).clone()
    }

    fn current(&self) -> Arc<RateConfiguration> {
        self.inner.sender.borrow().clone()
    }

    /// The merge, save and publish run on their own task, so a caller that
    /// stops waiting cannot leave the file ahead of the published value.
    async fn update_configuration(
        &self,
        update: &RateConfigurationUpdate,
    ) -> Result<RateConfiguration> {
        let inner = Arc::clone(&self.inner);
        let update = update.clone();
        tokio::spawn(async move { inner.apply(&update).await })
            .await
            .map_err(|e| Error::Storage(StorageError::TaskFailed(e.to_string())))?
    }

    fn subscribe(&self) -> watch::Receiver<Arc<RateConfiguration>> {
        self.inner.sender.subscribe()
    }
}
