use serde_json::Value;
use tokio::sync::broadcast;

/// Canonical event names shared with the desktop runtime.
pub const SETTINGS_UPDATED: &str = "settings:updated";

/// Named event with its JSON payload.
#[derive(Clone, Debug)]
pub struct ServerEvent {
    pub name: &'static str,
    pub payload: Value,
}

impl ServerEvent {
    pub fn new(name: &'static str, payload: Value) -> Self {
        Self { name, payload }
    }
}

/// Lightweight broadcast bus that fans out events to any connected clients.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<ServerEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _receiver) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ServerEvent> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: ServerEvent) {
        // No receivers or lagging receivers never block the publisher.
        let _ = self.sender.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_publish_reaches_every_subscriber() {
        let bus = EventBus::new(8);
        let mut first = bus.subscribe();
        let mut second = bus.subscribe();

        bus.publish(ServerEvent::new(SETTINGS_UPDATED, Value::Bool(true)));

        assert_eq!(first.recv().await.unwrap().name, SETTINGS_UPDATED);
        assert_eq!(second.recv().await.unwrap().name, SETTINGS_UPDATED);
    }

    #[test]
    fn test_publish_without_subscribers_is_ignored() {
        let bus = EventBus::new(8);
        bus.publish(ServerEvent::new(SETTINGS_UPDATED, Value::Null));
    }
}
