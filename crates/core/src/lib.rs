//! Calc AE Core - rate configuration, contribution calculator and settings store.
//!
//! This crate contains all the domain logic of the calculator. It is
//! storage-agnostic: persistence is reached through the repository trait in
//! [`settings`], implemented by the `storage-json` crate.

pub mod calculator;
pub mod constants;
pub mod errors;
pub mod events;
pub mod rates;
pub mod settings;
pub mod utils;

// Re-export the domain types used by every consumer
pub use calculator::*;
pub use rates::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
