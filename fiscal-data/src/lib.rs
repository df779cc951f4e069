pub mod loader;
pub mod logging;
pub mod report;

pub use loader::{BracketRecord, LoaderError, ParameterFile, ParameterLoader};
