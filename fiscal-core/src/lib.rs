pub mod calculations;
pub mod models;
pub mod store;

pub use calculations::{
    BracketLine, BracketOutcome, BracketSchedule, CorporateTaxResult, CorporateTaxSimulator,
    IncomeTaxSimulator, Installment, TaxComputation, WageTaxResult, WageTaxSimulator,
};
pub use models::*;
pub use store::ParameterStore;

#[cfg(test)]
pub(crate) mod fixtures;
