//! Progressive bracket engine.
//!
//! A single walk over a sorted, contiguous bracket table. Each bracket takes
//! the slice of the remaining income that fits in its width and charges it
//! according to its [`BracketCharge`]: a percentage of the slice, or a fixed
//! forfeit as soon as the slice is non-empty. The walk stops once the income
//! is exhausted, so brackets the income never reaches do not appear in the
//! breakdown.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use fiscal_core::{Bracket, BracketSchedule};
//!
//! let brackets = vec![
//!     Bracket::forfeit(dec!(0), Some(dec!(615000)), dec!(1200)),
//!     Bracket::percentage(dec!(615000), Some(dec!(1500000)), dec!(0.10)),
//!     Bracket::percentage(dec!(1500000), None, dec!(0.15)),
//! ];
//!
//! let outcome = BracketSchedule::new(&brackets).apply(dec!(1000000));
//!
//! assert_eq!(outcome.lines.len(), 2);
//! assert_eq!(outcome.lines[0].tax, dec!(1200));
//! assert_eq!(outcome.lines[1].taxable_base, dec!(385000));
//! assert_eq!(outcome.total_tax, dec!(39700));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Bracket, BracketCharge};

/// Tax attributed to one bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketLine {
    /// Income range of the bracket, e.g. `"464 000 - 1 000 000"`.
    pub label: String,
    pub charge: BracketCharge,
    /// `"10%"` or `"1 200 (forfeit)"`.
    pub charge_display: String,
    pub taxable_base: Decimal,
    pub tax: Decimal,
}

/// Itemized result of walking a bracket table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketOutcome {
    pub lines: Vec<BracketLine>,
    pub total_tax: Decimal,
}

impl BracketOutcome {
    /// Sum of the income slices taxed across all lines.
    pub fn taxed_income(&self) -> Decimal {
        self.lines.iter().map(|line| line.taxable_base).sum()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BracketSchedule<'a> {
    brackets: &'a [Bracket],
}

impl<'a> BracketSchedule<'a> {
    /// Wraps a bracket table sorted by `min` and contiguous.
    pub fn new(brackets: &'a [Bracket]) -> Self {
        Self { brackets }
    }

    /// Applies the schedule to `income`.
    ///
    /// Zero or negative income yields an empty breakdown. Income beyond the
    /// last finite bracket is only taxed if the table has an open-ended top
    /// bracket.
    pub fn apply(
        &self,
        income: Decimal,
    ) -> BracketOutcome {
        let mut remaining = income;
        let mut outcome = BracketOutcome::default();

        for bracket in self.brackets {
            if remaining <= Decimal::ZERO {
                break;
            }

            let taxable_base = match bracket.width() {
                Some(width) => remaining.min(width),
                None => remaining,
            };
            let tax = bracket.charge.tax_on(taxable_base);

            outcome.total_tax += tax;
            outcome.lines.push(BracketLine {
                label: bracket.label(),
                charge: bracket.charge,
                charge_display: bracket.charge.display(),
                taxable_base,
                tax,
            });

            remaining -= taxable_base;
        }

        outcome
    }
}
