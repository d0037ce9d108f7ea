// Response handling shared by both clients.
//
// Every UniFi endpoint answers `{ "data": [...] }`. Records are passed
// through untouched; their shape is whatever the vendor documents.

use reqwest::blocking::Response;
use serde::Deserialize;
use serde_json::Value;
use tracing::trace;

use crate::error::Error;

/// One opaque record from a `data` array (device, site, host, client, ...).
pub type Record = Value;

/// The `{ "data": [...] }` wrapper. A missing or `null` `data` is empty.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    data: Option<Vec<Record>>,
}

impl Envelope {
    pub fn into_data(self) -> Vec<Record> {
        self.data.unwrap_or_default()
    }
}

/// Turn any non-2xx response into an error; pass 2xx through.
pub(crate) fn check_status(resp: Response) -> Result<Response, Error> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let url = resp.url().to_string();
    if matches!(status.as_u16(), 401 | 403) {
        return Err(Error::Authentication {
            status: status.as_u16(),
            url,
        });
    }

    let body = resp.text().unwrap_or_default();
    let message = if body.trim().is_empty() {
        status.canonical_reason().unwrap_or("request failed").to_owned()
    } else {
        body.chars().take(200).collect()
    };
    Err(Error::Http {
        status: status.as_u16(),
        url,
        message,
    })
}

/// Check status and decode the body as arbitrary JSON.
pub(crate) fn json(resp: Response) -> Result<Value, Error> {
    let resp = check_status(resp)?;
    let body = resp.text()?;
    trace!(bytes = body.len(), "response body received");
    serde_json::from_str(&body).map_err(|e| Error::Deserialization {
        message: e.to_string(),
        body,
    })
}

/// Check status, decode the envelope, return its `data` array.
pub(crate) fn data(resp: Response) -> Result<Vec<Record>, Error> {
    let resp = check_status(resp)?;
    let body = resp.text()?;
    let envelope: Envelope = serde_json::from_str(&body).map_err(|e| {
        let preview: String = body.chars().take(200).collect();
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body: body.clone(),
        }
    })?;
    Ok(envelope.into_data())
}
