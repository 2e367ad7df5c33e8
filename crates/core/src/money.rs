//! Money
//!
//! Amounts travel through the core as unsigned minor units. The remote API
//! speaks decimal major units (`"14000.00"`, `14000`), so conversion happens at
//! the edges, and display goes through [`rusty_money`].

use std::str::FromStr;

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use thiserror::Error;

/// Errors raised while converting decimal amounts into minor units.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    /// The value is not a decimal number.
    #[error("`{0}` is not a valid amount")]
    Invalid(String),

    /// Negative amounts are never valid prices or balances.
    #[error("`{0}` is negative")]
    Negative(String),

    /// The value does not fit in minor units.
    #[error("`{0}` is too large")]
    Overflow(String),
}

/// Look up an ISO currency by its alpha code (e.g. `NGN`).
pub fn currency(code: &str) -> Option<&'static Currency> {
    iso::find(&code.trim().to_ascii_uppercase())
}

/// Parse a decimal major-unit amount into minor units of `currency`.
///
/// Thousands separators are ignored; fractional digits beyond the currency
/// exponent are rounded half-to-even.
///
/// # Errors
///
/// Returns an [`AmountError`] if the value is not a non-negative decimal that
/// fits in `u64` minor units.
pub fn parse_minor(value: &str, currency: &Currency) -> Result<u64, AmountError> {
    let cleaned: String = value.trim().chars().filter(|c| *c != ',').collect();

    let decimal =
        Decimal::from_str(&cleaned).map_err(|_err| AmountError::Invalid(value.to_string()))?;

    minor_from_decimal(decimal, currency).map_err(|error| match error {
        AmountError::Negative(_) => AmountError::Negative(value.to_string()),
        AmountError::Invalid(_) => AmountError::Invalid(value.to_string()),
        AmountError::Overflow(_) => AmountError::Overflow(value.to_string()),
    })
}

/// Convert a decimal major-unit amount into minor units of `currency`.
///
/// # Errors
///
/// Returns an [`AmountError`] for negative or oversized values.
pub fn minor_from_decimal(decimal: Decimal, currency: &Currency) -> Result<u64, AmountError> {
    if decimal.is_sign_negative() && !decimal.is_zero() {
        return Err(AmountError::Negative(decimal.to_string()));
    }

    let scale = Decimal::from(10_u64.pow(currency.exponent));

    decimal
        .checked_mul(scale)
        .map(|scaled| scaled.round())
        .and_then(|scaled| scaled.to_u64())
        .ok_or_else(|| AmountError::Overflow(decimal.to_string()))
}

/// Convert minor units back into a normalised decimal major-unit amount.
pub fn decimal_from_minor(minor: u64, currency: &Currency) -> Decimal {
    Decimal::from(minor)
        .checked_div(Decimal::from(10_u64.pow(currency.exponent)))
        .unwrap_or_default()
        .normalize()
}

/// Format minor units for display, e.g. `₦14,000.00`.
pub fn format_minor(minor: u64, currency: &'static Currency) -> String {
    let minor = i64::try_from(minor).unwrap_or(i64::MAX);

    format!("{}", Money::from_minor(minor, currency))
}
