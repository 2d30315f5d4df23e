//! Web domain event sink implementation.

use calcae_core::events::{DomainEvent, DomainEventSink};

use crate::events::{EventBus, ServerEvent, SETTINGS_UPDATED};

/// Domain event sink for the web server runtime.
///
/// Events are translated synchronously: publishing on the broadcast bus
/// never blocks, and clients that lag behind simply miss events.
pub struct WebDomainEventSink {
    event_bus: EventBus,
}

impl WebDomainEventSink {
    pub fn new(event_bus: EventBus) -> Self {
        Self { event_bus }
    }
}

fn to_server_event(event: &DomainEvent) -> Option<ServerEvent> {
    match event {
        DomainEvent::RateConfigurationChanged { configuration } => {
            match serde_json::to_value(configuration) {
                Ok(payload) => Some(ServerEvent::new(SETTINGS_UPDATED, payload)),
                Err(err) => {
                    tracing::error!("Failed to serialize rate configuration event: {}", err);
                    None
                }
            }
        }
    }
}

impl DomainEventSink for WebDomainEventSink {
    fn emit(&self, event: DomainEvent) {
        if let Some(server_event) = to_server_event(&event) {
            tracing::debug!("Publishing {}", server_event.name);
            self.event_bus.publish(server_event);
        }
    }
}
