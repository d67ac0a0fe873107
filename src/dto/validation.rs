//! Validation helpers for DTOs.

use validator::ValidationError;

/// Largest magnitude at which an f64 still represents every integer exactly.
const MAX_EXACT_PRICE: f64 = 9_007_199_254_740_992.0; // 2^53

/// Validates that a submitted price is a whole number an i64 can hold.
///
/// JSON numbers arrive as f64, so `1980.5` and `NaN` are representable on
/// the wire and must be rejected before the guess is stored.
pub fn validate_integral_price(price: f64) -> Result<(), ValidationError> {
    if !price.is_finite() {
        let mut err = ValidationError::new("price_not_finite");
        err.message = Some("Price must be a finite number".into());
        return Err(err);
    }

    if price.fract() != 0.0 {
        let mut err = ValidationError::new("price_not_integral");
        err.message = Some(format!("Price must be a whole number (got {price})").into());
        return Err(err);
    }

    if price.abs() > MAX_EXACT_PRICE {
        let mut err = ValidationError::new("price_out_of_range");
        err.message = Some("Price is outside the representable range".into());
        return Err(err);
    }

    Ok(())
}
