//! In-memory repository, used by tests and by embedders that do not persist.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;

use super::settings_traits::RateConfigurationRepositoryTrait;
use crate::errors::{Error, Result, StorageError};
use crate::rates::{RateConfiguration, RateConfigurationUpdate};

const MEMORY_LOCATION: &str = "<memory>";

#[derive(Default)]
pub struct InMemoryRateConfigurationRepository {
    stored: RwLock<Option<RateConfigurationUpdate>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl InMemoryRateConfigurationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stored(stored: RateConfigurationUpdate) -> Self {
        Self {
            stored: RwLock::new(Some(stored)),
            ..Self::default()
        }
    }

    /// Last saved document, if any.
    pub fn stored(&self) -> Option<RateConfigurationUpdate> {
        self.stored.read().ok().and_then(|guard| guard.clone())
    }

    /// Makes subsequent loads fail.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Makes subsequent saves fail.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl RateConfigurationRepositoryTrait for InMemoryRateConfigurationRepository {
    fn load(&self) -> Result<Option<RateConfigurationUpdate>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::ReadFailed {
                path: MEMORY_LOCATION.to_string(),
                reason: "reads disabled".to_string(),
            }
            .into());
        }
        let guard = self
            .stored
            .read()
            .map_err(|e| Error::Unexpected(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn save(&self, config: &RateConfiguration) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::WriteFailed {
                path: MEMORY_LOCATION.to_string(),
                reason: "writes disabled".to_string(),
            }
            .into());
        }
        let mut guard = self
            .stored
            .write()
            .map_err(|e| Error::Unexpected(e.to_string()))?;
        *guard = Some(RateConfigurationUpdate::from(config));
        Ok(())
    }
}
