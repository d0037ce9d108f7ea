#![allow(clippy::unwrap_used)]
// Integration tests for `SiteManagerClient` using wiremock.

mod common;

use pretty_assertions::assert_eq;
use secrecy::ExposeSecret;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

use beast_unifi_api::{CLOUD_BASE_URL, Error, SiteManagerClient};
use beast_unifi_config::{CredentialName, CredentialSet};

use common::{MockApi, secret};

// ── Helpers ─────────────────────────────────────────────────────────

fn setup() -> (MockApi, SiteManagerClient) {
    let api = MockApi::start();
    let client = SiteManagerClient::with_base_url(secret("test-key"), &api.uri()).unwrap();
    (api, client)
}

fn envelope_mock(endpoint: &str, body: &serde_json::Value) -> Mock {
    Mock::given(method("GET"))
        .and(path(format!("/{endpoint}")))
        .and(header("X-API-Key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
}

// ── Construction ────────────────────────────────────────────────────

#[test]
fn test_init_with_api_key() {
    let client = SiteManagerClient::new(Some(secret("test-key"))).unwrap();
    assert_eq!(client.api_key().expose_secret(), "test-key");
    assert_eq!(client.base_url(), CLOUD_BASE_URL);
}

#[test]
fn test_init_without_api_key_fails() {
    let result = SiteManagerClient::with_fallback(None, &CredentialSet::new());

    let err = result.unwrap_err();
    assert!(err.is_configuration());
    assert!(
        err.to_string().contains("API key required"),
        "unexpected message: {err}"
    );
    assert!(matches!(
        err,
        Error::MissingCredential {
            credential: CredentialName::CloudApiKey,
            ..
        }
    ));
}

#[test]
fn test_init_from_fallback_credentials() {
    let mut fallback = CredentialSet::new();
    fallback.insert(CredentialName::CloudApiKey, secret("env-key"));

    let client = SiteManagerClient::with_fallback(None, &fallback).unwrap();

    assert_eq!(client.api_key().expose_secret(), "env-key");
}

#[test]
fn test_explicit_empty_key_fails() {
    let mut fallback = CredentialSet::new();
    fallback.insert(CredentialName::CloudApiKey, secret("env-key"));

    let result = SiteManagerClient::with_fallback(Some(secret("")), &fallback);

    assert!(matches!(result, Err(Error::MissingCredential { .. })));
}

#[test]
fn test_empty_key_with_custom_base_url_fails() {
    let result = SiteManagerClient::with_base_url(secret(""), CLOUD_BASE_URL);

    let err = result.unwrap_err();
    assert!(err.to_string().contains("API key required"), "unexpected message: {err}");
    assert!(matches!(
        err,
        Error::MissingCredential {
            credential: CredentialName::CloudApiKey,
            ..
        }
    ));
}

// ── Endpoints ───────────────────────────────────────────────────────

#[test]
fn test_get_hosts() {
    let (api, client) = setup();
    api.mount(envelope_mock(
        "hosts",
        &json!({ "data": [{ "id": "1", "type": "UDM" }] }),
    ));

    let hosts = client.hosts().unwrap();

    assert_eq!(hosts.len(), 1);
    assert_eq!(hosts[0]["id"], "1");
}

#[test]
fn test_get_sites() {
    let (api, client) = setup();
    api.mount(envelope_mock(
        "sites",
        &json!({ "data": [{ "id": "site1", "name": "Test Site" }] }),
    ));

    let sites = client.sites().unwrap();

    assert_eq!(sites.len(), 1);
    assert_eq!(sites[0]["id"], "site1");
    assert_eq!(sites[0]["name"], "Test Site");
}

#[test]
fn test_get_devices_and_sd_wan_configs() {
    let (api, client) = setup();
    api.mount(envelope_mock(
        "devices",
        &json!({ "data": [{ "hostId": "h1", "devices": [] }, { "hostId": "h2", "devices": [] }] }),
    ));
    api.mount(envelope_mock("sd-wan-configs", &json!({ "data": [] })));

    assert_eq!(client.devices().unwrap().len(), 2);
    assert!(client.sd_wan_configs().unwrap().is_empty());
}

#[test]
fn test_isp_metrics_returns_raw_body() {
    let (api, client) = setup();
    let body = json!({
        "data": [{ "metricType": "5m", "periods": [] }],
        "httpStatusCode": 200,
        "traceId": "abc"
    });
    api.mount(envelope_mock("isp-metrics", &body));

    let metrics = client.isp_metrics().unwrap();

    assert_eq!(metrics, body);
}

#[test]
fn test_missing_data_field_is_empty() {
    let (api, client) = setup();
    api.mount(envelope_mock("hosts", &json!({ "httpStatusCode": 200 })));

    assert!(client.hosts().unwrap().is_empty());
}

#[test]
fn test_api_key_header_is_sent() {
    let (api, client) = setup();
    api.mount(envelope_mock("hosts", &json!({ "data": [] })));

    client.hosts().unwrap();

    let requests = api.received();
    assert_eq!(requests.len(), 1);
    let req = &requests[0];
    assert_eq!(req.headers.get("x-api-key").unwrap(), "test-key");
    assert_eq!(req.headers.get("accept").unwrap(), "application/json");
}

// ── Errors ──────────────────────────────────────────────────────────

#[test]
fn test_server_error_is_raised() {
    let (api, client) = setup();
    api.mount(
        Mock::given(method("GET"))
            .and(path("/devices"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded")),
    );

    let err = client.devices().unwrap_err();

    match err {
        Error::Http {
            status, ref message, ..
        } => {
            assert_eq!(status, 500);
            assert_eq!(message, "upstream exploded");
        }
        other => panic!("expected Http error, got: {other:?}"),
    }
}

#[test]
fn test_unauthorized_is_auth_error() {
    let (api, client) = setup();
    api.mount(
        Mock::given(method("GET"))
            .and(path("/hosts"))
            .respond_with(ResponseTemplate::new(401)),
    );

    let err = client.hosts().unwrap_err();

    assert!(err.is_auth_rejected(), "got: {err:?}");
    assert_eq!(err.status(), Some(401));
}

#[test]
fn test_raw_get_does_not_check_status() {
    let (api, client) = setup();
    api.mount(
        Mock::given(method("GET"))
            .and(path("/nope"))
            .respond_with(ResponseTemplate::new(404)),
    );

    let resp = client.get("/nope").unwrap();

    assert_eq!(resp.status().as_u16(), 404);
}

#[test]
fn test_malformed_body_is_deserialization_error() {
    let (api, client) = setup();
    api.mount(
        Mock::given(method("GET"))
            .and(path("/sites"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>")),
    );

    let err = client.sites().unwrap_err();

    assert!(matches!(err, Error::Deserialization { .. }), "got: {err:?}");
}
