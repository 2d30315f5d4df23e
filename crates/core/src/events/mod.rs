//! Domain events module.
//!
//! Provides domain event types and the sink trait for emitting events
//! after successful domain mutations. Runtime adapters implement the sink to
//! forward events to their own clients.

mod domain_event;
mod sink;

pub use domain_event::*;
pub use sink::*;
