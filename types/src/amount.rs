//! Amount normalization.
//!
//! Explorer feeds report every amount as a base-10 integer string in the
//! asset's smallest unit (wei for the native currency, token base units for
//! fungible tokens). Those integers routinely exceed the exact-integer range
//! of an `f64`, so the division by `10^decimals` is done on a [`BigDecimal`]
//! and only the final quotient is converted to floating point.

use bigdecimal::{num_bigint::BigInt, BigDecimal};
use std::str::FromStr;

use crate::TypesError;

/// Decimal exponent of the native currency (wei → ether).
pub const NATIVE_DECIMALS: u32 = 18;

/// Quantity reported for a single non-fungible transfer.
pub const NON_FUNGIBLE_UNIT: f64 = 1.0;

/// Convert a raw integer amount into a human-scale quantity.
///
/// `raw` must be an optionally signed base-10 integer. The result is
/// `raw / 10^decimals`, rounded once when converted to `f64`.
pub fn normalize(raw: &str, decimals: u32) -> Result<f64, TypesError> {
    let digits = raw.strip_prefix(|c| c == '+' || c == '-').unwrap_or(raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TypesError::MalformedAmount(raw.to_string()));
    }
    let mut units =
        BigInt::from_str(digits).map_err(|_| TypesError::MalformedAmount(raw.to_string()))?;
    if raw.starts_with('-') {
        units = -units;
    }
    // Decimal text round-trips through the correctly rounded `f64` parser.
    BigDecimal::new(units, i64::from(decimals))
        .to_string()
        .parse::<f64>()
        .map_err(|_| TypesError::MalformedAmount(raw.to_string()))
}

/// Normalize a native-currency (or internal transfer) amount given in wei.
pub fn normalize_native(raw_wei: &str) -> Result<f64, TypesError> {
    normalize(raw_wei, NATIVE_DECIMALS)
}
