use miette::Diagnostic;
use thiserror::Error;

use beast_unifi_config::CredentialName;

/// Top-level error type for the `beast-unifi-api` crate.
///
/// Covers client construction (missing credentials, bad URLs) and every
/// request failure. Nothing is retried; callers decide what to do.
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    // ── Configuration ───────────────────────────────────────────────
    /// No credential available after the explicit value and the env fallback.
    #[error("{message}")]
    #[diagnostic(
        code(beast_unifi::missing_credential),
        help("Set {credential} in ~/.env, or add the '{item}' item to your 1Password vault.")
    )]
    MissingCredential {
        credential: CredentialName,
        item: &'static str,
        message: String,
    },

    /// Credential contains bytes that cannot go into an HTTP header.
    #[error("Invalid {credential} value: {reason}")]
    InvalidCredential {
        credential: CredentialName,
        reason: String,
    },

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API rejected the key or token (401/403).
    #[error("Authentication rejected (HTTP {status}) by {url}")]
    #[diagnostic(
        code(beast_unifi::auth_rejected),
        help("Check that the API key or token is current and has access to this controller.")
    )]
    Authentication { status: u16, url: String },

    /// Any other non-2xx response.
    #[error("HTTP {status} from {url}: {message}")]
    Http {
        status: u16,
        url: String,
        message: String,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    pub(crate) fn missing_api_key() -> Self {
        Self::MissingCredential {
            credential: CredentialName::CloudApiKey,
            item: CredentialName::CloudApiKey.item_name(),
            message: "API key required. Provide via parameter or set UNIFI_API_KEY in ~/.env"
                .into(),
        }
    }

    pub(crate) fn missing_api_token() -> Self {
        Self::MissingCredential {
            credential: CredentialName::LocalToken,
            item: CredentialName::LocalToken.item_name(),
            message: "API token required. UniFi OS requires 2FA, so username/password won't \
                      work. Create an API token in Settings > API Tokens and set \
                      UNIFI_LOCAL_TOKEN in ~/.env"
                .into(),
        }
    }

    /// HTTP status code, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Authentication { status, .. } | Self::Http { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` for a missing or unusable credential.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::MissingCredential { .. }
                | Self::InvalidCredential { .. }
                | Self::InvalidUrl(_)
                | Self::ClientBuild(_)
        )
    }

    /// Returns `true` if the server rejected our credentials.
    pub fn is_auth_rejected(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
