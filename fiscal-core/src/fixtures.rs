//! Shared test parameter set mirroring the bundled 2024 data files.

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use crate::models::{
    Bracket, ContributionParameters, CorporateTaxParameters, FamilyQuotientParameters,
    FiscalParameterSet, MinimumWageParameters, ProfessionalDeductionParameters,
};

fn due(
    month: u32,
    day: u32,
) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, month, day).unwrap()
}

pub(crate) fn income_tax_brackets() -> Vec<Bracket> {
    vec![
        Bracket::percentage(dec!(0), Some(dec!(464000)), dec!(0.01)),
        Bracket::percentage(dec!(464000), Some(dec!(1000000)), dec!(0.10)),
        Bracket::percentage(dec!(1000000), Some(dec!(3000000)), dec!(0.25)),
        Bracket::percentage(dec!(3000000), None, dec!(0.40)),
    ]
}

pub(crate) fn wage_tax_brackets() -> Vec<Bracket> {
    vec![
        Bracket::forfeit(dec!(0), Some(dec!(615000)), dec!(1200)),
        Bracket::percentage(dec!(615000), Some(dec!(1500000)), dec!(0.10)),
        Bracket::percentage(dec!(1500000), Some(dec!(4000000)), dec!(0.15)),
        Bracket::percentage(dec!(4000000), Some(dec!(8000000)), dec!(0.20)),
        Bracket::percentage(dec!(8000000), None, dec!(0.30)),
    ]
}

pub(crate) fn reference_parameters() -> FiscalParameterSet {
    FiscalParameterSet {
        tax_year: 2024,
        contribution: ContributionParameters {
            rate: dec!(0.04),
            monthly_cap: dec!(1200000),
        },
        professional_deduction: ProfessionalDeductionParameters { rate: dec!(0.20) },
        family_quotient: FamilyQuotientParameters {
            max_parts: dec!(6.5),
        },
        minimum_wage: MinimumWageParameters {
            monthly: dec!(70400),
            annual: dec!(844800),
        },
        income_tax_brackets: income_tax_brackets(),
        wage_tax_brackets: wage_tax_brackets(),
        corporate_tax: CorporateTaxParameters {
            general_rate: dec!(0.25),
            foreign_rate: dec!(0.33),
            min_rate_normal: dec!(0.01),
            min_rate_deficit: dec!(0.02),
            deficit_deductible_share: dec!(0.5),
            installment_due_dates: [due(3, 20), due(6, 20), due(9, 20), due(12, 20)],
        },
        wage_minimum_annual_tax: dec!(1200),
    }
}
