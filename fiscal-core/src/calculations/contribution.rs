//! Capped mandatory social contribution on wages.
//!
//! The contribution is assessed on monthly gross income up to a monthly
//! cap. Annual figures are twelve times the monthly ones.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use fiscal_core::ContributionParameters;
//! use fiscal_core::calculations::ContributionCalculator;
//!
//! let params = ContributionParameters {
//!     rate: dec!(0.04),
//!     monthly_cap: dec!(1200000),
//! };
//!
//! let result = ContributionCalculator::new(&params).calculate(dec!(1500000));
//!
//! assert_eq!(result.monthly_base, dec!(1200000));
//! assert_eq!(result.monthly_contribution, dec!(48000));
//! assert_eq!(result.annual_contribution, dec!(576000));
//! assert!(result.cap_applied);
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ContributionParameters;
use crate::calculations::common::{MONTHS_PER_YEAR, max, round_currency};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionResult {
    /// Monthly gross retained for the contribution, at most the cap.
    pub monthly_base: Decimal,
    pub monthly_contribution: Decimal,
    pub annual_base: Decimal,
    pub annual_contribution: Decimal,
    /// `true` when the monthly gross exceeded the cap.
    pub cap_applied: bool,
}

#[derive(Debug, Clone)]
pub struct ContributionCalculator<'a> {
    params: &'a ContributionParameters,
}

impl<'a> ContributionCalculator<'a> {
    pub fn new(params: &'a ContributionParameters) -> Self {
        Self { params }
    }

    /// Computes the contribution owed on `monthly_gross`.
    ///
    /// Negative gross is treated as zero.
    pub fn calculate(
        &self,
        monthly_gross: Decimal,
    ) -> ContributionResult {
        let gross = max(monthly_gross, Decimal::ZERO);
        let monthly_base = gross.min(self.params.monthly_cap);
        let monthly_contribution = round_currency(monthly_base * self.params.rate);

        ContributionResult {
            monthly_base,
            monthly_contribution,
            annual_base: monthly_base * MONTHS_PER_YEAR,
            annual_contribution: monthly_contribution * MONTHS_PER_YEAR,
            cap_applied: gross > self.params.monthly_cap,
        }
    }
}
