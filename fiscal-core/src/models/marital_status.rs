use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaritalStatus {
    Single,
    Married,
    Divorced,
    Widowed,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown marital status '{0}' (expected single, married, divorced or widowed)")]
pub struct UnknownMaritalStatus(pub String);

impl MaritalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Married => "married",
            Self::Divorced => "divorced",
            Self::Widowed => "widowed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" => Some(Self::Single),
            "married" => Some(Self::Married),
            "divorced" => Some(Self::Divorced),
            "widowed" => Some(Self::Widowed),
            _ => None,
        }
    }
}

impl FromStr for MaritalStatus {
    type Err = UnknownMaritalStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownMaritalStatus(s.to_string()))
    }
}

impl fmt::Display for MaritalStatus {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_accepts_every_code_case_insensitively() {
        assert_eq!(MaritalStatus::parse("single"), Some(MaritalStatus::Single));
        assert_eq!(MaritalStatus::parse("Married"), Some(MaritalStatus::Married));
        assert_eq!(MaritalStatus::parse(" DIVORCED "), Some(MaritalStatus::Divorced));
        assert_eq!(MaritalStatus::parse("widowed"), Some(MaritalStatus::Widowed));
    }

    #[test]
    fn from_str_rejects_unknown_code() {
        assert_eq!(
            "engaged".parse::<MaritalStatus>(),
            Err(UnknownMaritalStatus("engaged".to_string()))
        );
    }

    #[test]
    fn as_str_round_trips_through_parse() {
        for status in [
            MaritalStatus::Single,
            MaritalStatus::Married,
            MaritalStatus::Divorced,
            MaritalStatus::Widowed,
        ] {
            assert_eq!(MaritalStatus::parse(status.as_str()), Some(status));
        }
    }
}
