use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum SyncError {
    /// The operation exists but has no implementation yet. Never a success.
    #[error("{operation}: ServiceNow sync implementation pending")]
    #[diagnostic(
        code(beast_unifi::servicenow::not_implemented),
        help("The UniFi to ServiceNow CMDB field mapping has not been defined yet.")
    )]
    NotImplemented { operation: &'static str },

    #[error("Invalid ServiceNow URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl SyncError {
    pub fn is_not_implemented(&self) -> bool {
        matches!(self, Self::NotImplemented { .. })
    }
}
