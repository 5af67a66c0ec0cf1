//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent business logic violations.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("parse error: {0}")]
    Parse(String),

    #[error("unknown salesperson variant: {0}")]
    UnknownVariant(String),

    #[error("no available rep for lead: {lead}")]
    NoAvailableRep { lead: String },

    #[error("invalid lead {name}: {reason}")]
    InvalidLead { name: String, reason: String },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
