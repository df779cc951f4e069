//! Wage tax simulator.
//!
//! Shares the household pipeline with the personal income tax, with four
//! differences:
//!
//! - benefits in kind and bonuses are added to the gross before annualizing;
//! - the family quotient is opt-in, one part by default;
//! - the schedule may open with a forfeit bracket;
//! - earners under the annual minimum wage owe at least the flat wage
//!   minimum tax.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::pipeline::{self, Household, TaxComputation};
use crate::calculations::common::{annualize, non_negative};
use crate::{FiscalParameterSet, WageTaxInput};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WageTaxResult {
    #[serde(flatten)]
    pub computation: TaxComputation,

    pub annual_benefits_in_kind: Decimal,
    pub annual_bonuses: Decimal,

    /// The flat wage minimum tax replaced a lower computed tax.
    pub minimum_tax_applied: bool,

    /// Annual gross is under the annual minimum wage, whether or not the
    /// floor changed the tax.
    pub below_minimum_wage: bool,
}

#[derive(Debug, Clone)]
pub struct WageTaxSimulator<'a> {
    params: &'a FiscalParameterSet,
}

impl<'a> WageTaxSimulator<'a> {
    pub fn new(params: &'a FiscalParameterSet) -> Self {
        Self { params }
    }

    /// Runs the full wage tax computation.
    pub fn calculate(
        &self,
        input: &WageTaxInput,
    ) -> WageTaxResult {
        let salary = non_negative("gross_income", input.gross_income);
        let benefits = non_negative("benefits_in_kind", input.benefits_in_kind);
        let bonuses = non_negative("bonuses", input.bonuses);

        let household = Household {
            income: annualize(
                salary.saturating_add(benefits).saturating_add(bonuses),
                input.period,
            ),
            marital_status: input.marital_status,
            dependent_children: input.dependent_children,
            apply_family_quotient: Some(input.apply_family_quotient.unwrap_or(false)),
        };

        let computation = pipeline::run(self.params, &self.params.wage_tax_brackets, &household);

        let below_minimum_wage = computation.annual_gross < self.params.minimum_wage.annual;
        let floor = self.params.wage_minimum_annual_tax;
        let minimum_tax_applied = below_minimum_wage && computation.annual_tax < floor;

        let computation = if minimum_tax_applied {
            computation.with_annual_tax(floor)
        } else {
            computation
        };

        debug!(
            tax_year = self.params.tax_year,
            annual_gross = %computation.annual_gross,
            parts = %computation.parts,
            annual_tax = %computation.annual_tax,
            minimum_tax_applied,
            below_minimum_wage,
            "wage tax computed"
        );

        WageTaxResult {
            computation,
            annual_benefits_in_kind: annualize(benefits, input.period).annual,
            annual_bonuses: annualize(bonuses, input.period).annual,
            minimum_tax_applied,
            below_minimum_wage,
        }
    }
}
