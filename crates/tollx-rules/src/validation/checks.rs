//! Field-level checks shared by the entity rules.

use std::ops::RangeInclusive;
use std::str::FromStr;

use rust_decimal::Decimal;
use tollx_types::keys::SEPARATOR;

use crate::error::{RuleError, RuleResult};

/// Longest identifier accepted in a key component.
pub const MAX_IDENTIFIER_LEN: usize = 32;

/// Fractional digits allowed on a money amount.
pub const MONEY_SCALE: u32 = 2;

/// Largest magnitude of any money amount, in whole currency units.
pub const MAX_AMOUNT_UNITS: i64 = 1_000_000_000_000;

pub fn require(field: &str, value: &str) -> RuleResult<()> {
    if value.trim().is_empty() {
        return Err(RuleError::validation(field, "is required"));
    }
    Ok(())
}

pub fn require_some<T>(field: &str, value: &Option<T>) -> RuleResult<()> {
    match value {
        Some(_) => Ok(()),
        None => Err(RuleError::validation(field, "is required")),
    }
}

/// Parse a closed-set wire code, reporting the raw value on failure.
pub fn code<T: FromStr>(field: &str, value: &str) -> RuleResult<T> {
    value
        .parse::<T>()
        .map_err(|_| RuleError::invalid_enum(field, value))
}

/// An identifier that becomes a key or partition component.
///
/// The key separator and whitespace are rejected so that composed keys
/// split back into exactly the components they were built from.
pub fn identifier(field: &str, value: &str) -> RuleResult<()> {
    if value.len() > MAX_IDENTIFIER_LEN {
        return Err(RuleError::validation(
            field,
            format!("must be at most {MAX_IDENTIFIER_LEN} characters"),
        ));
    }
    if value.contains(SEPARATOR) {
        return Err(RuleError::validation(
            field,
            format!("must not contain '{SEPARATOR}'"),
        ));
    }
    if value.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(RuleError::validation(field, "must not contain whitespace"));
    }
    Ok(())
}

/// Exactly `len` ASCII uppercase letters, e.g. a state or currency code.
pub fn upper_letters(field: &str, value: &str, len: usize) -> RuleResult<()> {
    if value.len() != len || !value.bytes().all(|b| b.is_ascii_uppercase()) {
        return Err(RuleError::validation(
            field,
            format!("must be {len} uppercase letters"),
        ));
    }
    Ok(())
}

pub fn in_range<T>(field: &str, value: T, range: RangeInclusive<T>) -> RuleResult<()>
where
    T: PartialOrd + std::fmt::Display,
{
    if !range.contains(&value) {
        return Err(RuleError::validation(
            field,
            format!(
                "must be between {} and {}, got {value}",
                range.start(),
                range.end()
            ),
        ));
    }
    Ok(())
}

/// At most two fractional digits and a magnitude of at most
/// [`MAX_AMOUNT_UNITS`]; sign is not checked.
pub fn cents(field: &str, value: Decimal) -> RuleResult<()> {
    if value.abs() > Decimal::from(MAX_AMOUNT_UNITS) {
        return Err(RuleError::validation(
            field,
            format!("must not exceed {MAX_AMOUNT_UNITS} in magnitude"),
        ));
    }
    if value.normalize().scale() > MONEY_SCALE {
        return Err(RuleError::validation(
            field,
            format!("must have at most {MONEY_SCALE} decimal places"),
        ));
    }
    Ok(())
}

/// A non-negative amount with at most two fractional digits.
pub fn money(field: &str, value: Decimal) -> RuleResult<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(RuleError::validation(field, "must not be negative"));
    }
    cents(field, value)
}

/// Two party identifiers naming different agencies.
pub fn distinct_parties(field: &str, value: &str, other_field: &str, other: &str) -> RuleResult<()> {
    if value == other {
        return Err(RuleError::validation(
            field,
            format!("must differ from {other_field}"),
        ));
    }
    Ok(())
}
