//! Statutory constants for one tax-year configuration.
//!
//! A [`FiscalParameterSet`] is handed to every calculator by reference and is
//! never mutated by a computation. Switching tax years means building a new
//! set and swapping it in whole (see [`crate::ParameterStore`]).

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Bracket, BracketCharge};

/// Configuration errors detected by [`FiscalParameterSet::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParameterError {
    /// A rate or share must lie in `[0, 1]`.
    #[error("{field} must be between 0 and 1, got {value}")]
    RateOutOfRange { field: &'static str, value: Decimal },

    /// A cap, threshold or fixed amount must not be negative.
    #[error("{field} must be non-negative, got {value}")]
    NegativeAmount { field: &'static str, value: Decimal },

    /// The family quotient cap must allow at least one part.
    #[error("maximum family quotient parts must be at least 1, got {0}")]
    InvalidMaxParts(Decimal),

    #[error("{table} bracket table is empty")]
    EmptyBrackets { table: &'static str },

    #[error("{table} bracket table must start at 0, starts at {min}")]
    FirstBracketNotAtZero { table: &'static str, min: Decimal },

    #[error("{table} bracket {index} starts at {found}, expected {expected}")]
    NonContiguousBrackets {
        table: &'static str,
        index: usize,
        expected: Decimal,
        found: Decimal,
    },

    #[error("{table} bracket {index} has an upper bound not above its lower bound")]
    EmptyBracket { table: &'static str, index: usize },

    #[error("{table} bracket {index} is open-ended but is not the last bracket")]
    OpenBracketNotLast { table: &'static str, index: usize },

    #[error("{table} bracket table has no open-ended top bracket")]
    MissingOpenBracket { table: &'static str },

    #[error("{table} bracket {index} has rate {rate} outside [0, 1]")]
    BracketRateOutOfRange {
        table: &'static str,
        index: usize,
        rate: Decimal,
    },

    #[error("{table} bracket {index} has a negative forfeit {amount}")]
    NegativeForfeit {
        table: &'static str,
        index: usize,
        amount: Decimal,
    },

    #[error("{table} bracket {index} is a forfeit bracket, which this table does not accept")]
    ForfeitNotAllowed { table: &'static str, index: usize },

    #[error("installment due date {date} is outside tax year {tax_year}")]
    InstallmentOutsideTaxYear { date: NaiveDate, tax_year: i32 },

    #[error("installment due dates must be strictly ascending")]
    InstallmentsNotAscending,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContributionParameters {
    /// Share of the capped monthly gross withheld (e.g. `0.04`).
    pub rate: Decimal,
    /// Monthly gross above which no further contribution is due.
    pub monthly_cap: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfessionalDeductionParameters {
    /// Flat share of the post-contribution base deducted as professional expenses.
    pub rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FamilyQuotientParameters {
    pub max_parts: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MinimumWageParameters {
    pub monthly: Decimal,
    pub annual: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CorporateTaxParameters {
    /// Standard profit tax rate for domestic contributors.
    pub general_rate: Decimal,
    /// Standard profit tax rate for foreign contributors.
    pub foreign_rate: Decimal,
    /// Minimum tax rate on revenue in the normal case.
    pub min_rate_normal: Decimal,
    /// Minimum tax rate on revenue after two consecutive deficit years.
    pub min_rate_deficit: Decimal,
    /// Share of a deficit-rate minimum tax that is deductible from the standard tax.
    pub deficit_deductible_share: Decimal,
    /// Calendar due dates of the four quarterly minimum-tax installments.
    pub installment_due_dates: [NaiveDate; 4],
}

/// Every statutory constant the simulators read, for a single tax year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiscalParameterSet {
    pub tax_year: i32,
    pub contribution: ContributionParameters,
    pub professional_deduction: ProfessionalDeductionParameters,
    pub family_quotient: FamilyQuotientParameters,
    pub minimum_wage: MinimumWageParameters,
    /// Personal income tax schedule. Percentage brackets only.
    pub income_tax_brackets: Vec<Bracket>,
    /// Wage tax schedule. May open with a forfeit bracket.
    pub wage_tax_brackets: Vec<Bracket>,
    pub corporate_tax: CorporateTaxParameters,
    /// Flat annual wage tax floor for earners under the annual minimum wage.
    pub wage_minimum_annual_tax: Decimal,
}

pub(crate) const INCOME_TAX_TABLE: &str = "income tax";
pub(crate) const WAGE_TAX_TABLE: &str = "wage tax";

impl FiscalParameterSet {
    /// Checks that every rate, amount, bracket table and due date is coherent.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParameterError`] found, checking scalar values
    /// first, then the income tax table, the wage tax table and finally the
    /// installment calendar.
    pub fn validate(&self) -> Result<(), ParameterError> {
        check_rate("contribution rate", self.contribution.rate)?;
        check_amount("contribution monthly cap", self.contribution.monthly_cap)?;
        check_rate(
            "professional deduction rate",
            self.professional_deduction.rate,
        )?;
        if self.family_quotient.max_parts < Decimal::ONE {
            return Err(ParameterError::InvalidMaxParts(
                self.family_quotient.max_parts,
            ));
        }
        check_amount("monthly minimum wage", self.minimum_wage.monthly)?;
        check_amount("annual minimum wage", self.minimum_wage.annual)?;
        check_amount("wage minimum annual tax", self.wage_minimum_annual_tax)?;

        let corporate = &self.corporate_tax;
        check_rate("corporate general rate", corporate.general_rate)?;
        check_rate("corporate foreign rate", corporate.foreign_rate)?;
        check_rate("corporate minimum rate", corporate.min_rate_normal)?;
        check_rate("corporate deficit minimum rate", corporate.min_rate_deficit)?;
        check_rate(
            "deficit deductible share",
            corporate.deficit_deductible_share,
        )?;

        validate_brackets(INCOME_TAX_TABLE, &self.income_tax_brackets, false)?;
        validate_brackets(WAGE_TAX_TABLE, &self.wage_tax_brackets, true)?;

        self.validate_installments()
    }

    fn validate_installments(&self) -> Result<(), ParameterError> {
        let dates = &self.corporate_tax.installment_due_dates;
        for date in dates {
            if date.year() != self.tax_year {
                return Err(ParameterError::InstallmentOutsideTaxYear {
                    date: *date,
                    tax_year: self.tax_year,
                });
            }
        }
        if dates.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(ParameterError::InstallmentsNotAscending);
        }
        Ok(())
    }
}

fn check_rate(
    field: &'static str,
    value: Decimal,
) -> Result<(), ParameterError> {
    if value < Decimal::ZERO || value > Decimal::ONE {
        return Err(ParameterError::RateOutOfRange { field, value });
    }
    Ok(())
}

fn check_amount(
    field: &'static str,
    value: Decimal,
) -> Result<(), ParameterError> {
    if value < Decimal::ZERO {
        return Err(ParameterError::NegativeAmount { field, value });
    }
    Ok(())
}

/// Brackets must be sorted, contiguous from 0 and end with exactly one
/// open-ended bracket.
fn validate_brackets(
    table: &'static str,
    brackets: &[Bracket],
    allow_forfeit: bool,
) -> Result<(), ParameterError> {
    let first = brackets
        .first()
        .ok_or(ParameterError::EmptyBrackets { table })?;
    if first.min != Decimal::ZERO {
        return Err(ParameterError::FirstBracketNotAtZero {
            table,
            min: first.min,
        });
    }

    let last_index = brackets.len() - 1;
    let mut expected_min = Decimal::ZERO;

    for (index, bracket) in brackets.iter().enumerate() {
        if bracket.min != expected_min {
            return Err(ParameterError::NonContiguousBrackets {
                table,
                index,
                expected: expected_min,
                found: bracket.min,
            });
        }

        match bracket.charge {
            BracketCharge::Percentage(rate) => {
                if rate < Decimal::ZERO || rate > Decimal::ONE {
                    return Err(ParameterError::BracketRateOutOfRange { table, index, rate });
                }
            }
            BracketCharge::Forfeit(amount) => {
                if !allow_forfeit {
                    return Err(ParameterError::ForfeitNotAllowed { table, index });
                }
                if amount < Decimal::ZERO {
                    return Err(ParameterError::NegativeForfeit {
                        table,
                        index,
                        amount,
                    });
                }
            }
        }

        match bracket.max {
            Some(max) if max <= bracket.min => {
                return Err(ParameterError::EmptyBracket { table, index });
            }
            Some(_) if index == last_index => {
                return Err(ParameterError::MissingOpenBracket { table });
            }
            Some(max) => expected_min = max,
            None if index != last_index => {
                return Err(ParameterError::OpenBracketNotLast { table, index });
            }
            None => {}
        }
    }

    Ok(())
}
