// Shared transport configuration for building blocking reqwest clients.
//
// Both the cloud and local clients get TLS mode, timeout, and user agent
// from here so the builder logic lives in one place.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::HeaderMap;

use crate::error::Error;

/// Per-request timeout for the Site Manager cloud API.
pub const CLOUD_TIMEOUT: Duration = Duration::from_secs(15);

/// Per-request timeout for local controllers.
pub const LOCAL_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = concat!("beast-unifi/", env!("CARGO_PKG_VERSION"));

/// TLS verification mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TlsMode {
    /// Use the platform certificate store.
    System,
    /// Accept any certificate (local controllers ship self-signed ones).
    DangerAcceptInvalid,
}

impl TlsMode {
    pub fn from_verify(verify: bool) -> Self {
        if verify {
            Self::System
        } else {
            Self::DangerAcceptInvalid
        }
    }
}

/// Transport settings for one HTTP client.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub tls: TlsMode,
    pub timeout: Duration,
}

impl TransportConfig {
    /// Settings for `api.ui.com`: system roots, 15 s timeout.
    pub fn cloud() -> Self {
        Self {
            tls: TlsMode::System,
            timeout: CLOUD_TIMEOUT,
        }
    }

    /// Settings for a local controller: 10 s timeout, verification optional.
    pub fn local(verify_tls: bool) -> Self {
        Self {
            tls: TlsMode::from_verify(verify_tls),
            timeout: LOCAL_TIMEOUT,
        }
    }

    /// Build a blocking client that sends `headers` on every request.
    pub fn build_client(&self, headers: HeaderMap) -> Result<Client, Error> {
        let mut builder = Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .default_headers(headers);

        if self.tls == TlsMode::DangerAcceptInvalid {
            builder = builder.danger_accept_invalid_certs(true);
        }

        builder
            .build()
            .map_err(|e| Error::ClientBuild(e.to_string()))
    }
}
