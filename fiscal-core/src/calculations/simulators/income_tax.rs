//! Personal income tax simulator.
//!
//! # Pipeline
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Annualize the gross income |
//! | 2    | Capped social contribution on the monthly gross |
//! | 3    | Flat professional deduction on gross minus contribution |
//! | 4    | Family quotient parts (always applied for this product) |
//! | 5    | Net taxable income divided by parts |
//! | 6    | Percentage brackets applied to the per-part income |
//! | 7    | Tax per part multiplied back by parts, then monthly tax |
//! | 8    | Effective rate over net taxable income |
//! | 9    | Net income after contribution and tax |

use tracing::debug;

use super::pipeline::{self, Household, TaxComputation};
use crate::calculations::common::{annualize, non_negative};
use crate::{FiscalParameterSet, IncomeTaxInput};

#[derive(Debug, Clone)]
pub struct IncomeTaxSimulator<'a> {
    params: &'a FiscalParameterSet,
}

impl<'a> IncomeTaxSimulator<'a> {
    pub fn new(params: &'a FiscalParameterSet) -> Self {
        Self { params }
    }

    /// Runs the full personal income tax computation.
    pub fn calculate(
        &self,
        input: &IncomeTaxInput,
    ) -> TaxComputation {
        let gross = non_negative("gross_income", input.gross_income);

        let household = Household {
            income: annualize(gross, input.period),
            marital_status: input.marital_status,
            dependent_children: input.dependent_children,
            apply_family_quotient: Some(true),
        };

        let result = pipeline::run(self.params, &self.params.income_tax_brackets, &household);

        debug!(
            tax_year = self.params.tax_year,
            annual_gross = %result.annual_gross,
            parts = %result.parts,
            annual_tax = %result.annual_tax,
            "income tax computed"
        );

        result
    }
}
