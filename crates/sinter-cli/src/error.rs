//! Errors raised by the command-line front end itself.

use std::path::PathBuf;

use thiserror::Error;

/// Failures that happen before or around a study service call.
#[derive(Debug, Error)]
pub enum CliError {
    /// No login or password was supplied.
    #[error("credentials required: pass --login and --password or set SINTER_LOGIN and SINTER_PASSWORD")]
    MissingCredentials,

    /// The login and password did not match an account.
    #[error("invalid login or password")]
    InvalidCredentials,

    /// A report file could not be written.
    #[error("failed to write report {path}: {message}")]
    Export {
        /// File being written.
        path: PathBuf,
        /// Underlying failure.
        message: String,
    },
}

impl CliError {
    /// Process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::MissingCredentials => 2,
            Self::InvalidCredentials => 4,
            Self::Export { .. } => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes() {
        assert_eq!(CliError::MissingCredentials.exit_code(), 2);
        assert_eq!(CliError::InvalidCredentials.exit_code(), 4);
    }

    #[test]
    fn export_error_names_path() {
        let err = CliError::Export {
            path: PathBuf::from("out.csv"),
            message: "disk full".to_string(),
        };
        assert_eq!(err.to_string(), "failed to write report out.csv: disk full");
    }
}
