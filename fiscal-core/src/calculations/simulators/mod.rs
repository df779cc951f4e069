//! The three tax products, each a pure function of an input and a
//! parameter set.

pub mod corporate_tax;
pub mod income_tax;
mod pipeline;
pub mod wage_tax;

pub use corporate_tax::{CorporateTaxResult, CorporateTaxSimulator, Installment};
pub use income_tax::IncomeTaxSimulator;
pub use pipeline::TaxComputation;
pub use wage_tax::{WageTaxResult, WageTaxSimulator};
