//! Household composition to family quotient parts.
//!
//! | Status                        | Base | First child | Each further child |
//! |-------------------------------|------|-------------|--------------------|
//! | single, divorced              | 1    | +1          | +0.5               |
//! | widowed, no children          | 1    | -           | -                  |
//! | married                       | 2    | +0.5        | +0.5               |
//! | widowed, at least one child   | 2    | +0.5        | +0.5               |
//!
//! The total is capped at the configured maximum and never falls below one.

use rust_decimal::Decimal;

use crate::calculations::common::max;
use crate::{FamilyQuotientParameters, MaritalStatus};

const HALF_PART: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// Number of family quotient parts for a household.
///
/// `apply` set to `Some(false)` disables the quotient entirely and returns a
/// single part whatever the household. `None` and `Some(true)` both apply it.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use fiscal_core::{FamilyQuotientParameters, MaritalStatus};
/// use fiscal_core::calculations::family_quotient_parts;
///
/// let params = FamilyQuotientParameters { max_parts: dec!(6.5) };
///
/// assert_eq!(family_quotient_parts(MaritalStatus::Single, Some(2), None, &params), dec!(2.5));
/// assert_eq!(family_quotient_parts(MaritalStatus::Married, Some(2), Some(false), &params), dec!(1));
/// ```
pub fn family_quotient_parts(
    status: MaritalStatus,
    dependent_children: Option<u32>,
    apply: Option<bool>,
    params: &FamilyQuotientParameters,
) -> Decimal {
    if apply == Some(false) {
        return Decimal::ONE;
    }

    let children = dependent_children.unwrap_or(0);
    let counts_as_couple = match status {
        MaritalStatus::Married => true,
        MaritalStatus::Widowed => children > 0,
        MaritalStatus::Single | MaritalStatus::Divorced => false,
    };

    let (base, increment) = if counts_as_couple {
        (Decimal::TWO, HALF_PART * Decimal::from(children))
    } else if children == 0 {
        (Decimal::ONE, Decimal::ZERO)
    } else {
        (
            Decimal::ONE,
            Decimal::ONE + HALF_PART * Decimal::from(children - 1),
        )
    };

    max((base + increment).min(params.max_parts), Decimal::ONE)
}
