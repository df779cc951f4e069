//! Fiscal calculation modules.
//!
//! Leaf calculators (contribution, net taxable base, family quotient,
//! bracket schedule) are composed by the simulators into full personal
//! income tax, wage tax and corporate minimum tax computations.

pub mod brackets;
pub mod common;
pub mod contribution;
pub mod family_quotient;
pub mod net_base;
pub mod simulators;

pub use brackets::{BracketLine, BracketOutcome, BracketSchedule};
pub use common::{Annualized, annualize};
pub use contribution::{ContributionCalculator, ContributionResult};
pub use family_quotient::family_quotient_parts;
pub use net_base::{NetTaxableBase, NetTaxableBaseCalculator};
pub use simulators::{
    CorporateTaxResult, CorporateTaxSimulator, IncomeTaxSimulator, Installment, TaxComputation,
    WageTaxResult, WageTaxSimulator,
};
