//! ABO/Rh blood type enumeration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the eight ABO/Rh blood groups.
///
/// Variant order is the canonical enumeration order used throughout the
/// library: every function returning a set of blood types yields it in
/// this order, so callers and tests see stable output.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BloodType {
    #[serde(rename = "O-")]
    ONegative,
    #[serde(rename = "O+")]
    OPositive,
    #[serde(rename = "A-")]
    ANegative,
    #[serde(rename = "A+")]
    APositive,
    #[serde(rename = "B-")]
    BNegative,
    #[serde(rename = "B+")]
    BPositive,
    #[serde(rename = "AB-")]
    ABNegative,
    #[serde(rename = "AB+")]
    ABPositive,
}

/// Error for a string that is not one of the eight blood type symbols.
///
/// Inputs are matched exactly, never guessed or coerced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid blood type: {0:?}")]
pub struct InvalidBloodType(pub String);

impl BloodType {
    /// All eight types in canonical enumeration order.
    pub const ALL: [BloodType; 8] = [
        BloodType::ONegative,
        BloodType::OPositive,
        BloodType::ANegative,
        BloodType::APositive,
        BloodType::BNegative,
        BloodType::BPositive,
        BloodType::ABNegative,
        BloodType::ABPositive,
    ];

    /// The conventional symbol, e.g. `"O-"` or `"AB+"`.
    pub fn symbol(&self) -> &'static str {
        match self {
            BloodType::ONegative => "O-",
            BloodType::OPositive => "O+",
            BloodType::ANegative => "A-",
            BloodType::APositive => "A+",
            BloodType::BNegative => "B-",
            BloodType::BPositive => "B+",
            BloodType::ABNegative => "AB-",
            BloodType::ABPositive => "AB+",
        }
    }

    /// Whether the Rh factor is positive.
    pub fn is_rh_positive(&self) -> bool {
        matches!(
            self,
            BloodType::OPositive
                | BloodType::APositive
                | BloodType::BPositive
                | BloodType::ABPositive
        )
    }
}

impl fmt::Display for BloodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for BloodType {
    type Err = InvalidBloodType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BloodType::ALL
            .into_iter()
            .find(|t| t.symbol() == s)
            .ok_or_else(|| InvalidBloodType(s.to_string()))
    }
}
