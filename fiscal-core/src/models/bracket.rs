use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{format_amount, round_currency};

/// What a bracket charges on the slice of income that falls inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BracketCharge {
    /// A marginal rate applied to the taxable slice (e.g. `0.10` for 10%).
    Percentage(Decimal),
    /// A fixed amount charged in full as soon as any income reaches the
    /// bracket, whatever share of its width is used.
    Forfeit(Decimal),
}

impl BracketCharge {
    /// Tax due on `taxable_base` income falling in a bracket with this charge.
    pub fn tax_on(
        &self,
        taxable_base: Decimal,
    ) -> Decimal {
        if taxable_base <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        match *self {
            Self::Percentage(rate) => round_currency(taxable_base * rate),
            Self::Forfeit(amount) => amount,
        }
    }

    /// Short label shown next to a breakdown line: `"10%"` or `"1 200 (forfeit)"`.
    pub fn display(&self) -> String {
        match *self {
            Self::Percentage(rate) => {
                format!("{}%", (rate * Decimal::ONE_HUNDRED).normalize())
            }
            Self::Forfeit(amount) => format!("{} (forfeit)", format_amount(amount)),
        }
    }

    pub fn is_forfeit(&self) -> bool {
        matches!(self, Self::Forfeit(_))
    }
}

/// One slice of a progressive schedule.
///
/// `max` of `None` marks the open-ended top bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bracket {
    pub min: Decimal,
    pub max: Option<Decimal>,
    pub charge: BracketCharge,
}

impl Bracket {
    pub fn percentage(
        min: Decimal,
        max: Option<Decimal>,
        rate: Decimal,
    ) -> Self {
        Self {
            min,
            max,
            charge: BracketCharge::Percentage(rate),
        }
    }

    pub fn forfeit(
        min: Decimal,
        max: Option<Decimal>,
        amount: Decimal,
    ) -> Self {
        Self {
            min,
            max,
            charge: BracketCharge::Forfeit(amount),
        }
    }

    /// Width of the bracket, `None` for the open-ended top bracket.
    pub fn width(&self) -> Option<Decimal> {
        self.max.map(|max| max - self.min)
    }

    /// Human label for the income range, e.g. `"0 - 464 000"` or `"above 3 000 000"`.
    pub fn label(&self) -> String {
        match self.max {
            Some(max) => format!("{} - {}", format_amount(self.min), format_amount(max)),
            None => format!("above {}", format_amount(self.min)),
        }
    }
}
