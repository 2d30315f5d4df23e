use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// File name of the persisted rate configuration inside the data directory.
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Rates are stored as whole percentages (12.3 means 12.3%).
pub const PERCENT_DIVISOR: Decimal = dec!(100);
