//! Precondition checks for numeric snapshot fields.
//!
//! Snapshots are assembled by callers; these guards turn caller bugs (negative
//! money, NaN, fractions outside `[0, 1]`) into `DomainError::Validation`
//! instead of letting them flow into a score.

use crate::error::{DomainError, DomainResult};

/// Require a finite value.
pub fn finite(field: &str, value: f64) -> DomainResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DomainError::validation(format!(
            "{field} must be a finite number (got {value})"
        )))
    }
}

/// Require a finite value `>= 0`.
pub fn non_negative(field: &str, value: f64) -> DomainResult<f64> {
    let value = finite(field, value)?;
    if value < 0.0 {
        return Err(DomainError::validation(format!(
            "{field} must be >= 0 (got {value})"
        )));
    }
    Ok(value)
}

/// Require a finite value within `[0, 1]`.
pub fn fraction(field: &str, value: f64) -> DomainResult<f64> {
    let value = finite(field, value)?;
    if !(0.0..=1.0).contains(&value) {
        return Err(DomainError::validation(format!(
            "{field} must be within [0, 1] (got {value})"
        )));
    }
    Ok(value)
}

/// Require a finite value within `[lo, hi]`.
pub fn within(field: &str, value: f64, lo: f64, hi: f64) -> DomainResult<f64> {
    let value = finite(field, value)?;
    if value < lo || value > hi {
        return Err(DomainError::validation(format!(
            "{field} must be within [{lo}, {hi}] (got {value})"
        )));
    }
    Ok(value)
}

/// Require a finite value `> 0`.
pub fn positive(field: &str, value: f64) -> DomainResult<f64> {
    let value = finite(field, value)?;
    if value <= 0.0 {
        return Err(DomainError::validation(format!(
            "{field} must be > 0 (got {value})"
        )));
    }
    Ok(value)
}
