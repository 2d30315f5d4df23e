//! Rate configuration: categories, per-category rate sets, display flags and
//! the partial-update merge used by the settings store.

mod category;
mod rates_model;
mod rates_update;

pub use category::*;
pub use rates_model::*;
pub use rates_update::*;
