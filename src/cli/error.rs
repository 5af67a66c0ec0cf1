//! CLI-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("{0}")]
    Usage(String),
}

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(InfraError::Application(e))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) | CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Infra(e) => match e {
                InfraError::Io { .. } => crate::exitcode::IOERR,
                InfraError::Application(app) => match app {
                    ApplicationError::Domain(DomainError::NoAvailableRep { .. }) => {
                        crate::exitcode::UNAVAILABLE
                    }
                    ApplicationError::Domain(_) | ApplicationError::Scenario { .. } => {
                        crate::exitcode::DATAERR
                    }
                    ApplicationError::ScenarioNotFound(_) => crate::exitcode::NOINPUT,
                    ApplicationError::MissingHierarchy => crate::exitcode::USAGE,
                    ApplicationError::Config { .. } => crate::exitcode::CONFIG,
                    ApplicationError::OperationFailed { .. } => crate::exitcode::IOERR,
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::path::PathBuf;

    #[rstest]
    #[case(DomainError::Parse("no salespeople parsed".into()).into(), crate::exitcode::DATAERR)]
    #[case(DomainError::UnknownVariant("Boss".into()).into(), crate::exitcode::DATAERR)]
    #[case(
        DomainError::NoAvailableRep { lead: "x".into() }.into(),
        crate::exitcode::UNAVAILABLE
    )]
    #[case(ApplicationError::ScenarioNotFound(PathBuf::from("s.toml")), crate::exitcode::NOINPUT)]
    #[case(ApplicationError::MissingHierarchy, crate::exitcode::USAGE)]
    #[case(ApplicationError::Config { message: "x".into() }, crate::exitcode::CONFIG)]
    fn given_application_error_when_mapping_then_sysexits_code(
        #[case] error: ApplicationError,
        #[case] expected: i32,
    ) {
        assert_eq!(CliError::from(error).exit_code(), expected);
    }

    #[test]
    fn given_usage_error_then_usage_code() {
        assert_eq!(
            CliError::Usage("x".into()).exit_code(),
            crate::exitcode::USAGE
        );
    }
}
