//! Common utility functions for fiscal calculations.
//!
//! Rounding, input normalization and period conversion shared by every
//! calculator and simulator.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::Period;

/// Months in a fiscal year.
pub const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Rounds a monetary amount to whole currency units using half-up rounding.
///
/// The currency has no sub-unit, so every intermediate amount that the
/// simulators report is rounded this way. Midpoints round away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use fiscal_core::calculations::common::round_currency;
///
/// assert_eq!(round_currency(dec!(48858.33)), dec!(48858));
/// assert_eq!(round_currency(dec!(49.5)), dec!(50));
/// assert_eq!(round_currency(dec!(-49.5)), dec!(-50)); // Away from zero
/// ```
pub fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a percentage to two decimal places using half-up rounding.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use fiscal_core::calculations::common::round_rate;
///
/// assert_eq!(round_rate(dec!(33.036458)), dec!(33.04));
/// assert_eq!(round_rate(dec!(12.725)), dec!(12.73));
/// ```
pub fn round_rate(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the maximum of two decimal values.
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Normalizes an optional monetary input: missing and negative values become zero.
///
/// Negative values are business input the caller should probably have
/// rejected; they are coerced rather than refused, and a warning names the
/// offending `field` so the coercion stays visible in the logs.
pub fn non_negative(
    field: &'static str,
    value: Option<Decimal>,
) -> Decimal {
    match value {
        Some(v) if v < Decimal::ZERO => {
            warn!(field, value = %v, "negative amount treated as zero");
            Decimal::ZERO
        }
        Some(v) => v,
        None => Decimal::ZERO,
    }
}

/// An income figure expressed both per month and per year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annualized {
    pub monthly: Decimal,
    pub annual: Decimal,
}

/// Converts an amount given for `period` into monthly and annual figures.
///
/// Neither figure is rounded: `annual` is exactly `monthly × 12` for monthly
/// input, and `monthly` is exactly `annual / 12` for annual input. An annual
/// figure beyond [`Decimal::MAX`] saturates there.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use fiscal_core::Period;
/// use fiscal_core::calculations::common::annualize;
///
/// let income = annualize(dec!(1000000), Period::Monthly);
/// assert_eq!(income.annual, dec!(12000000));
///
/// let income = annualize(dec!(12000000), Period::Annual);
/// assert_eq!(income.monthly, dec!(1000000));
/// ```
pub fn annualize(
    amount: Decimal,
    period: Period,
) -> Annualized {
    match period {
        Period::Monthly => Annualized {
            monthly: amount,
            annual: amount.saturating_mul(MONTHS_PER_YEAR),
        },
        Period::Annual => Annualized {
            monthly: amount / MONTHS_PER_YEAR,
            annual: amount,
        },
    }
}

/// Formats an amount with its integer part grouped by thousands using spaces.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use fiscal_core::calculations::common::format_amount;
///
/// assert_eq!(format_amount(dec!(12000000)), "12 000 000");
/// assert_eq!(format_amount(dec!(-4640.50)), "-4 640.5");
/// ```
pub fn format_amount(value: Decimal) -> String {
    let text = value.normalize().to_string();
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(digit);
    }

    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}
