//! Domain entities: core data structures

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::{DomainError, DomainResult};

/// Minimum lead value a Sociopath will bother with.
pub const SOCIOPATH_MIN_LEAD_VALUE: f64 = 1_000_000.0;

/// A potential deal for the company (not a salesperson's manager).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLead")]
pub struct Lead {
    name: String,
    value: f64,
}

/// Unvalidated lead as it appears in scenario files.
#[derive(Debug, Clone, Deserialize)]
struct RawLead {
    name: String,
    value: f64,
}

impl TryFrom<RawLead> for Lead {
    type Error = DomainError;

    fn try_from(raw: RawLead) -> Result<Self, Self::Error> {
        Lead::new(raw.name, raw.value)
    }
}

impl Lead {
    /// Create a lead; the value must be a finite, non-negative amount.
    pub fn new(name: impl Into<String>, value: f64) -> DomainResult<Self> {
        let name = name.into();
        if !value.is_finite() {
            return Err(DomainError::InvalidLead {
                name,
                reason: format!("value is not a finite number: {}", value),
            });
        }
        if value < 0.0 {
            return Err(DomainError::InvalidLead {
                name,
                reason: format!("value must not be negative: {}", value),
            });
        }
        Ok(Self { name, value })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

impl fmt::Display for Lead {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Value = {}", self.name, self.value)
    }
}

/// Closed set of salesperson roles. Each carries its own risk behavior,
/// see [`crate::domain::risk`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Sociopath,
    Clueless,
    Loser,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Sociopath => "Sociopath",
            Variant::Clueless => "Clueless",
            Variant::Loser => "Loser",
        }
    }
}

impl FromStr for Variant {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Sociopath" => Ok(Variant::Sociopath),
            "Clueless" => Ok(Variant::Clueless),
            "Loser" => Ok(Variant::Loser),
            other => Err(DomainError::UnknownVariant(other.to_string())),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of a salesperson in the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Salesperson {
    pub name: String,
    pub variant: Variant,
}

impl Salesperson {
    pub fn new(name: impl Into<String>, variant: Variant) -> Self {
        Self {
            name: name.into(),
            variant,
        }
    }
}

impl fmt::Display for Salesperson {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.name, self.variant)
    }
}
