pub mod decimal_input;

pub use decimal_input::{coerce_decimal, parse_decimal};
