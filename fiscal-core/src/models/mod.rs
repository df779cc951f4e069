mod bracket;
mod contributor_type;
mod inputs;
mod marital_status;
mod parameters;
mod period;

pub use bracket::{Bracket, BracketCharge};
pub use contributor_type::{ContributorType, UnknownContributorType};
pub use inputs::{CorporateTaxInput, IncomeTaxInput, WageTaxInput};
pub use marital_status::{MaritalStatus, UnknownMaritalStatus};
pub use parameters::{
    ContributionParameters, CorporateTaxParameters, FamilyQuotientParameters, FiscalParameterSet,
    MinimumWageParameters, ParameterError, ProfessionalDeductionParameters,
};
pub use period::{Period, UnknownPeriod};
