//! Where the settings store sends its domain events.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::DomainEvent;
use crate::rates::RateConfiguration;

/// Receiver of domain events.
///
/// `emit()` runs after the configuration has been persisted and published,
/// while the store still holds its write lock. It must not block, and a
/// delivery failure never fails the update.
pub trait DomainEventSink: Send + Sync {
    fn emit(&self, event: DomainEvent);
}

/// Discards every event.
#[derive(Clone, Default)]
pub struct NoOpDomainEventSink;

impl DomainEventSink for NoOpDomainEventSink {
    fn emit(&self, _event: DomainEvent) {}
}

/// Keeps every emitted event in memory, in emission order.
#[derive(Clone, Default)]
pub struct RecordingEventSink {
    events: Arc<Mutex<Vec<DomainEvent>>>,
}

impl RecordingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn recorded(&self) -> MutexGuard<'_, Vec<DomainEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn events(&self) -> Vec<DomainEvent> {
        self.recorded().clone()
    }

    /// Configurations carried by the recorded change events.
    pub fn published_configurations(&self) -> Vec<RateConfiguration> {
        self.recorded()
            .iter()
            .map(|event| match event {
                DomainEvent::RateConfigurationChanged { configuration } => configuration.clone(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.recorded().len()
    }

    pub fn is_empty(&self) -> bool {
        self.recorded().is_empty()
    }
}

impl DomainEventSink for RecordingEventSink {
    fn emit(&self, event: DomainEvent) {
        self.recorded().push(event);
    }
}
