// Site Manager (cloud) API client.
//
// Base: https://api.ui.com/v1
// Auth: X-API-Key header

use reqwest::blocking::{Client, Response};
use secrecy::SecretString;
use serde_json::Value;
use tracing::debug;
use url::Url;

use beast_unifi_config::{CredentialName, CredentialSet, load_env_credentials};

use crate::auth::{AuthStrategy, default_headers, select_secret};
use crate::envelope::{self, Record};
use crate::error::Error;
use crate::transport::TransportConfig;

/// Default Site Manager endpoint.
pub const CLOUD_BASE_URL: &str = "https://api.ui.com/v1";

/// Blocking client for the UniFi Site Manager API.
///
/// Multi-site fleet visibility: hosts (gateways), sites, devices, SD-WAN
/// configs and ISP metrics. Every call is a single GET with a 15 s timeout.
#[derive(Debug)]
pub struct SiteManagerClient {
    http: Client,
    base_url: String,
    api_key: SecretString,
}

impl SiteManagerClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build against `api.ui.com`.
    ///
    /// With `None`, `UNIFI_API_KEY` is taken from `~/.env` or the process
    /// environment. Fails with [`Error::MissingCredential`] if neither has it.
    pub fn new(api_key: Option<SecretString>) -> Result<Self, Error> {
        match api_key {
            Some(key) => Self::with_fallback(Some(key), &CredentialSet::new()),
            None => Self::with_fallback(None, &load_env_credentials()),
        }
    }

    /// Like [`new`](Self::new), but the fallback credentials are supplied by
    /// the caller (e.g. from a full 1Password + dotenv resolution).
    pub fn with_fallback(
        api_key: Option<SecretString>,
        fallback: &CredentialSet,
    ) -> Result<Self, Error> {
        let key = select_secret(api_key, fallback, CredentialName::CloudApiKey)
            .ok_or_else(Error::missing_api_key)?;
        Self::with_base_url(key, CLOUD_BASE_URL)
    }

    /// Target a different host (proxies, test servers). An empty key is
    /// rejected like a missing one.
    pub fn with_base_url(api_key: SecretString, base_url: &str) -> Result<Self, Error> {
        let api_key =
            select_secret(Some(api_key), &CredentialSet::new(), CredentialName::CloudApiKey)
                .ok_or_else(Error::missing_api_key)?;
        Url::parse(base_url)?;
        let base_url = base_url.trim_end_matches('/').to_owned();
        let headers = default_headers(AuthStrategy::ApiKey, &api_key)?;
        let http = TransportConfig::cloud().build_client(headers)?;
        Ok(Self {
            http,
            base_url,
            api_key,
        })
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_key(&self) -> &SecretString {
        &self.api_key
    }

    // ── Requests ─────────────────────────────────────────────────────

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// GET `{base}/{path}` and return the raw response, whatever its status.
    pub fn get(&self, path: &str) -> Result<Response, Error> {
        let url = self.url(path);
        debug!("GET {url}");
        Ok(self.http.get(url).send()?)
    }

    fn list(&self, path: &str) -> Result<Vec<Record>, Error> {
        envelope::data(self.get(path)?)
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// All hosts (UniFi OS consoles / gateways) on the account.
    pub fn hosts(&self) -> Result<Vec<Record>, Error> {
        self.list("hosts")
    }

    pub fn sites(&self) -> Result<Vec<Record>, Error> {
        self.list("sites")
    }

    pub fn devices(&self) -> Result<Vec<Record>, Error> {
        self.list("devices")
    }

    /// SD-WAN configurations (WAN / HA setups).
    pub fn sd_wan_configs(&self) -> Result<Vec<Record>, Error> {
        self.list("sd-wan-configs")
    }

    /// ISP metrics. Returned as the full decoded body, not unwrapped.
    pub fn isp_metrics(&self) -> Result<Value, Error> {
        envelope::json(self.get("isp-metrics")?)
    }
}
