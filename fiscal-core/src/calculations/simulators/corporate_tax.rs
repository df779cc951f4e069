//! Corporate minimum tax simulator.
//!
//! Compares the standard profit tax with a minimum tax assessed on gross
//! revenue, schedules the minimum tax in four quarterly installments and
//! computes how much of it can be offset against the standard tax.
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Revenue base: exploitation + financial + non-ordinary - liberatory withholdings |
//! | 2    | Minimum rate: deficit rate after two loss years, normal rate otherwise |
//! | 3    | Minimum tax: base × rate, never below zero |
//! | 4    | Four equal installments on the configured due dates |
//! | 5    | Standard tax: taxable profit × general or foreign rate |
//! | 6    | Tax due: the larger of standard and minimum tax |
//! | 7    | Deductible minimum: all of it, or the deficit share under the deficit rate |
//! | 8    | Balance: standard tax minus deductible minimum, never below zero |

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::common::{max, non_negative, round_currency};
use crate::{ContributorType, CorporateTaxInput, CorporateTaxParameters, FiscalParameterSet};

const QUARTERS: Decimal = Decimal::from_parts(4, 0, 0, false, 0);

/// One quarterly payment of the minimum tax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installment {
    /// 1 to 4.
    pub quarter: u8,
    pub due_date: NaiveDate,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorporateTaxResult {
    /// Revenue subject to the minimum tax. May be negative when withholdings
    /// exceed revenue.
    pub revenue_base: Decimal,
    pub deficit_rate_applied: bool,
    pub minimum_rate: Decimal,
    pub minimum_tax: Decimal,
    pub installments: Vec<Installment>,

    pub standard_rate: Decimal,
    pub standard_tax: Decimal,

    pub due_tax: Decimal,
    /// The minimum tax exceeded the standard tax.
    pub minimum_applied: bool,

    pub deductible_minimum: Decimal,
    pub balance_after_deduction: Decimal,
}

#[derive(Debug, Clone)]
pub struct CorporateTaxSimulator<'a> {
    tax_year: i32,
    params: &'a CorporateTaxParameters,
}

impl<'a> CorporateTaxSimulator<'a> {
    pub fn new(params: &'a FiscalParameterSet) -> Self {
        Self {
            tax_year: params.tax_year,
            params: &params.corporate_tax,
        }
    }

    pub fn calculate(
        &self,
        input: &CorporateTaxInput,
    ) -> CorporateTaxResult {
        let revenue_base = self.revenue_base(input);

        let deficit_rate_applied = input.deficit_two_consecutive_years;
        let minimum_rate = if deficit_rate_applied {
            self.params.min_rate_deficit
        } else {
            self.params.min_rate_normal
        };
        let minimum_tax = max(round_currency(revenue_base * minimum_rate), Decimal::ZERO);
        let installments = self.installments(minimum_tax);

        let standard_rate = match input.contributor_type {
            ContributorType::Domestic => self.params.general_rate,
            ContributorType::Foreign => self.params.foreign_rate,
        };
        let taxable_profit = non_negative("taxable_profit", input.taxable_profit);
        let standard_tax = round_currency(taxable_profit * standard_rate);

        let due_tax = max(standard_tax, minimum_tax);
        let minimum_applied = standard_tax < minimum_tax && minimum_tax > Decimal::ZERO;

        let deductible_minimum = self.deductible_minimum(minimum_tax, deficit_rate_applied);
        let balance_after_deduction = max(standard_tax - deductible_minimum, Decimal::ZERO);

        debug!(
            tax_year = self.tax_year,
            revenue_base = %revenue_base,
            minimum_tax = %minimum_tax,
            standard_tax = %standard_tax,
            minimum_applied,
            "corporate tax computed"
        );

        CorporateTaxResult {
            revenue_base,
            deficit_rate_applied,
            minimum_rate,
            minimum_tax,
            installments,
            standard_rate,
            standard_tax,
            due_tax,
            minimum_applied,
            deductible_minimum,
            balance_after_deduction,
        }
    }

    /// Sum of the revenue lines minus liberatory withholdings. Not floored,
    /// but saturates at [`Decimal::MAX`].
    fn revenue_base(
        &self,
        input: &CorporateTaxInput,
    ) -> Decimal {
        non_negative("exploitation_revenue", input.exploitation_revenue)
            .saturating_add(non_negative("financial_revenue", input.financial_revenue))
            .saturating_add(non_negative("non_ordinary_revenue", input.non_ordinary_revenue))
            .saturating_sub(non_negative(
                "liberatory_withholdings",
                input.liberatory_withholdings,
            ))
    }

    fn installments(
        &self,
        minimum_tax: Decimal,
    ) -> Vec<Installment> {
        let amount = round_currency(minimum_tax / QUARTERS);
        self.params
            .installment_due_dates
            .iter()
            .zip(1u8..)
            .map(|(due_date, quarter)| Installment {
                quarter,
                due_date: *due_date,
                amount,
            })
            .collect()
    }

    fn deductible_minimum(
        &self,
        minimum_tax: Decimal,
        deficit_rate_applied: bool,
    ) -> Decimal {
        if deficit_rate_applied {
            round_currency(minimum_tax * self.params.deficit_deductible_share)
        } else {
            minimum_tax
        }
    }
}
