//! Application-level errors (wraps domain errors)

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("scenario not found: {0}")]
    ScenarioNotFound(PathBuf),

    #[error("invalid scenario {path}: {message}")]
    Scenario { path: PathBuf, message: String },

    #[error("no hierarchy given: pass one explicitly or set `hierarchy` in the config")]
    MissingHierarchy,

    #[error("config error: {message}")]
    Config { message: String },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
