//! Prices are kept as integer cents; floats only appear at the API boundary.

use crate::error::{AppError, AppResult};

/// Converts a decimal price from a request into cents.
pub fn price_to_cents(price: f64) -> AppResult<i64> {
    if !price.is_finite() || price < 0.0 {
        return Err(AppError::ValidationError(
            "Price must be a non-negative number".to_string(),
        ));
    }
    let cents = (price * 100.0).round();
    if cents > i64::MAX as f64 {
        return Err(AppError::ValidationError("Price is too large".to_string()));
    }
    Ok(cents as i64)
}

/// Formats cents as a decimal string, e.g. `2500050` -> `"25000.50"`.
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}
