// Conversions from wire values to engine values.
use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::chart::UtcTimestamp;

/// Floors to whole seconds, so pre-epoch sub-second times round down.
pub fn to_utc_timestamp(timestamp: &DateTime<Utc>) -> UtcTimestamp {
    UtcTimestamp(timestamp.timestamp())
}

/// Nearest `f64` for plotting. Comparisons that decide colors stay on the
/// exact decimal and never go through this.
pub fn decimal_to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}
