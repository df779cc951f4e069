use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Residence of a corporate taxpayer; selects the standard profit tax rate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributorType {
    #[default]
    Domestic,
    Foreign,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown contributor type '{0}' (expected domestic or foreign)")]
pub struct UnknownContributorType(pub String);

impl ContributorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Domestic => "domestic",
            Self::Foreign => "foreign",
        }
    }
}

impl FromStr for ContributorType {
    type Err = UnknownContributorType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "domestic" => Ok(Self::Domestic),
            "foreign" => Ok(Self::Foreign),
            _ => Err(UnknownContributorType(s.to_string())),
        }
    }
}

impl fmt::Display for ContributorType {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
