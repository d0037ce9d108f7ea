// Local controller (UniFi Network Application) API client.
//
// Site-scoped resources live under `{base}/proxy/network/api/s/{site}/...`;
// site listing is controller-scoped at `{base}/proxy/network/api/self/sites`.
// Auth: `Authorization: Bearer <token>`. UniFi OS enforces 2FA on interactive
// logins, so an API token is the only supported credential.

use reqwest::blocking::{Client, RequestBuilder, Response};
use secrecy::SecretString;
use serde_json::Value;
use tracing::debug;
use url::Url;

use beast_unifi_config::{CredentialName, CredentialSet, load_env_credentials};

use crate::auth::{AuthStrategy, default_headers, select_secret};
use crate::envelope::{self, Record};
use crate::error::Error;
use crate::transport::TransportConfig;

/// Site used when none is given.
pub const DEFAULT_SITE: &str = "default";

/// Blocking client for a local UniFi controller.
#[derive(Debug)]
pub struct LocalControllerClient {
    http: Client,
    base_url: String,
    site: String,
    api_token: SecretString,
    verify_tls: bool,
}

/// Builder for [`LocalControllerClient`].
///
/// Defaults: site `"default"`, TLS verification off (local controllers
/// serve self-signed certificates), token from `~/.env` / the environment.
#[derive(Debug)]
pub struct LocalControllerBuilder {
    base_url: String,
    api_token: Option<SecretString>,
    site: String,
    verify_tls: bool,
    fallback: Option<CredentialSet>,
}

impl LocalControllerBuilder {
    pub fn api_token(mut self, token: SecretString) -> Self {
        self.api_token = Some(token);
        self
    }

    pub fn site(mut self, site: impl Into<String>) -> Self {
        self.site = site.into();
        self
    }

    pub fn verify_tls(mut self, verify: bool) -> Self {
        self.verify_tls = verify;
        self
    }

    /// Credentials to consult when no token was given explicitly.
    /// Without this, `~/.env` and the process environment are read.
    pub fn fallback(mut self, credentials: CredentialSet) -> Self {
        self.fallback = Some(credentials);
        self
    }

    pub fn build(self) -> Result<LocalControllerClient, Error> {
        // The env file is only read when no token was passed in.
        let fallback = if self.api_token.is_some() {
            CredentialSet::new()
        } else {
            self.fallback.unwrap_or_else(load_env_credentials)
        };
        let api_token = select_secret(self.api_token, &fallback, CredentialName::LocalToken)
            .ok_or_else(Error::missing_api_token)?;

        Url::parse(&self.base_url)?;
        let base_url = self.base_url.trim_end_matches('/').to_owned();
        let headers = default_headers(AuthStrategy::Bearer, &api_token)?;
        let http = TransportConfig::local(self.verify_tls).build_client(headers)?;

        Ok(LocalControllerClient {
            http,
            base_url,
            site: self.site,
            api_token,
            verify_tls: self.verify_tls,
        })
    }
}

impl LocalControllerClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Start configuring a client for the controller at `base_url`
    /// (e.g. `https://192.168.1.1`).
    pub fn builder(base_url: impl Into<String>) -> LocalControllerBuilder {
        LocalControllerBuilder {
            base_url: base_url.into(),
            api_token: None,
            site: DEFAULT_SITE.into(),
            verify_tls: false,
            fallback: None,
        }
    }

    /// Client for the `"default"` site with TLS verification off.
    ///
    /// With `None`, `UNIFI_LOCAL_TOKEN` is taken from `~/.env` or the process
    /// environment. Fails with [`Error::MissingCredential`] if neither has it.
    pub fn new(base_url: &str, api_token: Option<SecretString>) -> Result<Self, Error> {
        let builder = Self::builder(base_url);
        match api_token {
            Some(token) => builder.api_token(token).build(),
            None => builder.build(),
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    /// Controller root, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn site(&self) -> &str {
        &self.site
    }

    pub fn api_token(&self) -> &SecretString {
        &self.api_token
    }

    pub fn verify_tls(&self) -> bool {
        self.verify_tls
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Site-scoped URL: `{base}/proxy/network/api/s/{site}/{path}`.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/proxy/network/api/s/{}/{}",
            self.base_url,
            self.site,
            path.trim_start_matches('/')
        )
    }

    /// Controller-level site listing; not site-scoped.
    pub fn sites_url(&self) -> String {
        format!("{}/proxy/network/api/self/sites", self.base_url)
    }

    // ── Raw requests ─────────────────────────────────────────────────

    /// GET a site-scoped path. The response is returned whatever its status.
    pub fn get(&self, path: &str) -> Result<Response, Error> {
        let url = self.endpoint(path);
        debug!("GET {url}");
        Ok(self.http.get(url).send()?)
    }

    /// POST an optional JSON body to a site-scoped path.
    pub fn post(&self, path: &str, body: Option<&Value>) -> Result<Response, Error> {
        let url = self.endpoint(path);
        debug!("POST {url}");
        send_with_body(self.http.post(url), body)
    }

    /// PUT an optional JSON body to a site-scoped path.
    pub fn put(&self, path: &str, body: Option<&Value>) -> Result<Response, Error> {
        let url = self.endpoint(path);
        debug!("PUT {url}");
        send_with_body(self.http.put(url), body)
    }

    fn list(&self, path: &str) -> Result<Vec<Record>, Error> {
        envelope::data(self.get(path)?)
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// All sites on the controller.
    pub fn sites(&self) -> Result<Vec<Record>, Error> {
        let url = self.sites_url();
        debug!("GET {url}");
        envelope::data(self.http.get(url).send()?)
    }

    /// Adopted devices (APs, switches, gateways).
    pub fn devices(&self) -> Result<Vec<Record>, Error> {
        self.list("rest/device")
    }

    /// Known clients (stations).
    pub fn clients(&self) -> Result<Vec<Record>, Error> {
        self.list("rest/sta")
    }

    pub fn networks(&self) -> Result<Vec<Record>, Error> {
        self.list("rest/networkconf")
    }

    pub fn vpn_tunnels(&self) -> Result<Vec<Record>, Error> {
        self.list("rest/vpntunnel")
    }

    pub fn dynamic_dns(&self) -> Result<Vec<Record>, Error> {
        self.list("rest/dynamicdns")
    }

    pub fn routing(&self) -> Result<Vec<Record>, Error> {
        self.list("rest/routing")
    }
}

fn send_with_body(request: RequestBuilder, body: Option<&Value>) -> Result<Response, Error> {
    let request = match body {
        Some(body) => request.json(body),
        None => request,
    };
    Ok(request.send()?)
}
