use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ContributorType, MaritalStatus, Period};

/// Input to the personal income tax simulator.
///
/// Missing or negative amounts are treated as zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeTaxInput {
    pub gross_income: Option<Decimal>,
    pub period: Period,
    pub marital_status: MaritalStatus,
    pub dependent_children: Option<u32>,
}

/// Input to the wage tax simulator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WageTaxInput {
    pub gross_income: Option<Decimal>,
    pub period: Period,
    pub marital_status: MaritalStatus,
    pub dependent_children: Option<u32>,

    /// Benefits in kind, expressed in the same period as `gross_income`.
    #[serde(default)]
    pub benefits_in_kind: Option<Decimal>,

    /// Bonuses, expressed in the same period as `gross_income`.
    #[serde(default)]
    pub bonuses: Option<Decimal>,

    /// Opt in to the family quotient. Absent means one part.
    #[serde(default)]
    pub apply_family_quotient: Option<bool>,
}

/// Input to the corporate minimum tax simulator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorporateTaxInput {
    pub exploitation_revenue: Option<Decimal>,
    pub financial_revenue: Option<Decimal>,
    pub non_ordinary_revenue: Option<Decimal>,
    /// Withholdings already discharged at source, removed from the revenue base.
    pub liberatory_withholdings: Option<Decimal>,
    pub taxable_profit: Option<Decimal>,
    /// Two consecutive loss-making years switch to the deficit minimum rate.
    #[serde(default)]
    pub deficit_two_consecutive_years: bool,
    #[serde(default)]
    pub contributor_type: ContributorType,
}
