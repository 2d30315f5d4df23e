//! Domain events runtime bridge for the web server.
//!
//! Receives domain events via DomainEventSink and republishes them on the
//! server's EventBus, from where they reach SSE clients.

mod sink;

pub use sink::WebDomainEventSink;
