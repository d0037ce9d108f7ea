use std::time::Duration;

use miette::Diagnostic;
use thiserror::Error;

/// Failure loading resolver settings.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("settings loading failed: {0}")]
    #[diagnostic(
        code(beast_unifi::config::settings),
        help("Check the BEAST_UNIFI_* environment variables for malformed values.")
    )]
    Figment(Box<figment::Error>),

    #[error("invalid {field}: {reason}")]
    #[diagnostic(code(beast_unifi::config::validation))]
    Validation { field: String, reason: String },
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

/// A single 1Password CLI lookup failed.
///
/// These never escape credential resolution; the resolver logs them and
/// moves on to the next credential.
#[derive(Debug, Error)]
pub enum OpError {
    #[error("op CLI could not be started: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("op CLI I/O failed: {0}")]
    Io(#[source] std::io::Error),

    #[error("op CLI exited with status {code:?}")]
    Failed { code: Option<i32> },

    #[error("op CLI timed out after {timeout:?}")]
    Timeout { timeout: Duration },

    #[error("op CLI output is not valid UTF-8")]
    NonUtf8,
}
