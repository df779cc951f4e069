//! Flat professional-expense deduction applied after the contribution.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ProfessionalDeductionParameters;
use crate::calculations::common::{max, round_currency};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetTaxableBase {
    /// Annual gross minus the annual contribution, never below zero.
    pub base_after_contribution: Decimal,
    pub deduction: Decimal,
    pub net_taxable: Decimal,
}

#[derive(Debug, Clone)]
pub struct NetTaxableBaseCalculator<'a> {
    params: &'a ProfessionalDeductionParameters,
}

impl<'a> NetTaxableBaseCalculator<'a> {
    pub fn new(params: &'a ProfessionalDeductionParameters) -> Self {
        Self { params }
    }

    /// Derives the net taxable income from annual gross and contribution.
    ///
    /// A contribution at or above the gross leaves nothing to deduct from:
    /// all three figures are zero.
    pub fn calculate(
        &self,
        annual_gross: Decimal,
        annual_contribution: Decimal,
    ) -> NetTaxableBase {
        let base_after_contribution = max(annual_gross - annual_contribution, Decimal::ZERO);
        let deduction = round_currency(base_after_contribution * self.params.rate);

        NetTaxableBase {
            base_after_contribution,
            deduction,
            net_taxable: base_after_contribution - deduction,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn params() -> ProfessionalDeductionParameters {
        ProfessionalDeductionParameters { rate: dec!(0.20) }
    }

    #[test]
    fn deducts_flat_share_of_post_contribution_base() {
        let params = params();
        let result = NetTaxableBaseCalculator::new(&params).calculate(dec!(12000000), dec!(480000));

        assert_eq!(result.base_after_contribution, dec!(11520000));
        assert_eq!(result.deduction, dec!(2304000));
        assert_eq!(result.net_taxable, dec!(9216000));
    }

    #[test]
    fn contribution_equal_to_gross_yields_zeros() {
        let params = params();
        let result = NetTaxableBaseCalculator::new(&params).calculate(dec!(480000), dec!(480000));

        assert_eq!(result.base_after_contribution, dec!(0));
        assert_eq!(result.deduction, dec!(0));
        assert_eq!(result.net_taxable, dec!(0));
    }

    #[test]
    fn contribution_above_gross_is_clamped_not_negative() {
        let params = params();
        let result = NetTaxableBaseCalculator::new(&params).calculate(dec!(1000), dec!(5000));

        assert_eq!(result.base_after_contribution, dec!(0));
        assert_eq!(result.deduction, dec!(0));
        assert_eq!(result.net_taxable, dec!(0));
    }

    #[test]
    fn contribution_just_below_gross_keeps_small_positive_base() {
        let params = params();
        let result = NetTaxableBaseCalculator::new(&params).calculate(dec!(5010), dec!(5000));

        assert_eq!(result.base_after_contribution, dec!(10));
        assert_eq!(result.deduction, dec!(2));
        assert_eq!(result.net_taxable, dec!(8));
    }
}
