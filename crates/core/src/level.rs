//! Sign-off levels

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::error::CoreError;

/// The two sequential approval stages
///
/// Parses case-insensitively from `FIRST`/`SECOND` and the long forms
/// `FIRST_LEVEL`/`SECOND_LEVEL`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumString, Display,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignOffLevel {
    #[strum(to_string = "FIRST", serialize = "FIRST_LEVEL")]
    First,

    #[strum(to_string = "SECOND", serialize = "SECOND_LEVEL")]
    Second,
}

impl SignOffLevel {
    /// Parse a level from untrusted input
    pub fn parse(input: &str) -> Result<Self, CoreError> {
        input
            .trim()
            .parse()
            .map_err(|_| CoreError::InvalidSignOffLevel(input.to_string()))
    }

    /// Short code used by storage backends
    pub fn code(&self) -> &'static str {
        match self {
            SignOffLevel::First => "FIRST",
            SignOffLevel::Second => "SECOND",
        }
    }
}
