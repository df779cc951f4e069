//! Shared household pipeline: contribution, net taxable base, family
//! quotient and bracket schedule, composed into one annual computation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::brackets::{BracketLine, BracketSchedule};
use crate::calculations::common::{Annualized, MONTHS_PER_YEAR, round_currency, round_rate};
use crate::calculations::contribution::ContributionCalculator;
use crate::calculations::family_quotient::family_quotient_parts;
use crate::calculations::net_base::NetTaxableBaseCalculator;
use crate::{Bracket, FiscalParameterSet, MaritalStatus};

/// Itemized result of a personal income tax or wage tax computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxComputation {
    pub monthly_gross: Decimal,
    pub annual_gross: Decimal,

    pub contribution_base: Decimal,
    pub contribution: Decimal,
    pub contribution_capped: bool,

    pub base_after_contribution: Decimal,
    pub professional_deduction: Decimal,
    pub net_taxable_income: Decimal,

    pub parts: Decimal,
    pub per_part_income: Decimal,
    pub brackets: Vec<BracketLine>,
    pub tax_per_part: Decimal,

    pub annual_tax: Decimal,
    pub monthly_tax: Decimal,
    /// Annual tax as a percentage of net taxable income, two decimals.
    pub effective_rate: Decimal,
    pub net_income_after_tax: Decimal,
}

impl TaxComputation {
    /// Replaces the annual tax and recomputes every figure derived from it.
    pub(crate) fn with_annual_tax(
        mut self,
        annual_tax: Decimal,
    ) -> Self {
        self.annual_tax = annual_tax;
        self.monthly_tax = round_currency(annual_tax / MONTHS_PER_YEAR);
        self.effective_rate = effective_rate(annual_tax, self.net_taxable_income);
        self.net_income_after_tax = self.annual_gross - self.contribution - annual_tax;
        self
    }
}

fn effective_rate(
    annual_tax: Decimal,
    net_taxable_income: Decimal,
) -> Decimal {
    if net_taxable_income <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    round_rate(annual_tax / net_taxable_income * Decimal::ONE_HUNDRED)
}

/// Household inputs after normalization, ready for the pipeline.
pub(crate) struct Household {
    pub income: Annualized,
    pub marital_status: MaritalStatus,
    pub dependent_children: Option<u32>,
    pub apply_family_quotient: Option<bool>,
}

pub(crate) fn run(
    params: &FiscalParameterSet,
    brackets: &[Bracket],
    household: &Household,
) -> TaxComputation {
    let income = household.income;

    let contribution =
        ContributionCalculator::new(&params.contribution).calculate(income.monthly);

    let base = NetTaxableBaseCalculator::new(&params.professional_deduction)
        .calculate(income.annual, contribution.annual_contribution);

    let parts = family_quotient_parts(
        household.marital_status,
        household.dependent_children,
        household.apply_family_quotient,
        &params.family_quotient,
    );

    let per_part_income = round_currency(base.net_taxable / parts);
    let outcome = BracketSchedule::new(brackets).apply(per_part_income);
    let annual_tax = round_currency(outcome.total_tax * parts);

    TaxComputation {
        monthly_gross: income.monthly,
        annual_gross: income.annual,
        contribution_base: contribution.annual_base,
        contribution: contribution.annual_contribution,
        contribution_capped: contribution.cap_applied,
        base_after_contribution: base.base_after_contribution,
        professional_deduction: base.deduction,
        net_taxable_income: base.net_taxable,
        parts,
        per_part_income,
        brackets: outcome.lines,
        tax_per_part: outcome.total_tax,
        annual_tax: Decimal::ZERO,
        monthly_tax: Decimal::ZERO,
        effective_rate: Decimal::ZERO,
        net_income_after_tax: Decimal::ZERO,
    }
    .with_annual_tax(annual_tax)
}
