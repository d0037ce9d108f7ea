// Credential selection and auth header construction.

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

use beast_unifi_config::{CredentialName, CredentialSet};

use crate::error::Error;

/// How a client authenticates. Marker only; the secret lives on the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStrategy {
    /// `X-API-Key: <key>` (Site Manager cloud API).
    ApiKey,
    /// `Authorization: Bearer <token>` (local controller).
    Bearer,
}

impl AuthStrategy {
    /// The credential this strategy needs.
    pub fn credential(self) -> CredentialName {
        match self {
            Self::ApiKey => CredentialName::CloudApiKey,
            Self::Bearer => CredentialName::LocalToken,
        }
    }
}

/// An explicit value wins (an explicit empty value counts as missing);
/// with no explicit value the fallback set is consulted.
pub(crate) fn select_secret(
    explicit: Option<SecretString>,
    fallback: &CredentialSet,
    name: CredentialName,
) -> Option<SecretString> {
    match explicit {
        Some(secret) => (!secret.expose_secret().is_empty()).then_some(secret),
        None => fallback.get(name).cloned(),
    }
}

/// Default headers for a client using `strategy` with `secret`.
pub(crate) fn default_headers(
    strategy: AuthStrategy,
    secret: &SecretString,
) -> Result<HeaderMap, Error> {
    let raw = match strategy {
        AuthStrategy::ApiKey => secret.expose_secret().to_owned(),
        AuthStrategy::Bearer => format!("Bearer {}", secret.expose_secret()),
    };
    let mut value = HeaderValue::from_str(&raw).map_err(|e| Error::InvalidCredential {
        credential: strategy.credential(),
        reason: e.to_string(),
    })?;
    value.set_sensitive(true);

    let json = HeaderValue::from_static("application/json");
    let mut headers = HeaderMap::new();
    match strategy {
        AuthStrategy::ApiKey => {
            headers.insert("X-API-Key", value);
            headers.insert(ACCEPT, json.clone());
        }
        AuthStrategy::Bearer => {
            headers.insert(AUTHORIZATION, value);
        }
    }
    headers.insert(CONTENT_TYPE, json);
    Ok(headers)
}
