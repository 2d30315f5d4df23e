//! JSON file storage for Calc AE.
//!
//! Implements the repository traits of `calcae-core` on top of a single
//! pretty-printed JSON document on disk.
//!
//! ```text
//!   core (domain, settings store)
//!                │
//!                ▼
//!     storage-json (this crate)
//!                │
//!                ▼
//!          settings.json
//! ```

pub mod errors;
pub mod settings;

pub use errors::{IntoCore, JsonStorageError};
pub use settings::JsonRateConfigurationRepository;

// Re-export from calcae-core for convenience
pub use calcae_core::errors::{Error, Result};
