//! Fractional purchase portions of a wholesale case.
//!
//! A case can be bought whole or, for split-eligible products, as a half or
//! quarter portion. Each portion carries an exact decimal price multiplier,
//! so line totals never accumulate binary-float error.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Portion`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PortionError {
    /// The input string is not a recognized portion label.
    #[error("unknown portion: {0:?}")]
    Unknown(String),
}

/// A fractional purchase unit of a case.
///
/// The enumeration is closed: once a value exists, every operation on it is
/// total. Unknown labels are rejected at the parse/deserialize boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Portion {
    /// A whole case. Factor 1.
    Full,
    /// Half a case. Factor 0.5.
    Half,
    /// A quarter case. Factor 0.25.
    Quarter,
}

impl Portion {
    /// All portions, largest first. Useful for rendering portion pickers.
    pub const ALL: [Self; 3] = [Self::Full, Self::Half, Self::Quarter];

    /// The price multiplier for this portion.
    ///
    /// Always a positive exact decimal no greater than one.
    #[must_use]
    pub fn factor(self) -> Decimal {
        match self {
            Self::Full => Decimal::ONE,
            Self::Half => Decimal::new(5, 1),
            Self::Quarter => Decimal::new(25, 2),
        }
    }

    /// Lowercase display label ("full", "half", "quarter").
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Half => "half",
            Self::Quarter => "quarter",
        }
    }
}

impl fmt::Display for Portion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for Portion {
    type Err = PortionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full" => Ok(Self::Full),
            "half" => Ok(Self::Half),
            "quarter" => Ok(Self::Quarter),
            other => Err(PortionError::Unknown(other.to_owned())),
        }
    }
}
