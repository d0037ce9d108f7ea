use std::collections::HashMap;

use secrecy::SecretString;
use serde_json::{Map, Value};
use tracing::warn;
use url::Url;

use beast_unifi_api::{LocalControllerClient, SiteManagerClient};

use crate::error::SyncError;

/// Summary of one sync run, as reported back to the caller.
pub type SyncReport = Map<String, Value>;

/// Pushes UniFi inventory (devices, sites, clients) into ServiceNow.
///
/// Either UniFi client may be absent; which one a sync reads from is part
/// of the pending implementation.
#[derive(Debug)]
pub struct UnifiServiceNowSync {
    servicenow_url: Url,
    servicenow_credentials: HashMap<String, SecretString>,
    cloud_client: Option<SiteManagerClient>,
    local_client: Option<LocalControllerClient>,
}

impl UnifiServiceNowSync {
    pub fn new(
        servicenow_url: &str,
        servicenow_credentials: HashMap<String, SecretString>,
    ) -> Result<Self, SyncError> {
        Ok(Self {
            servicenow_url: Url::parse(servicenow_url)?,
            servicenow_credentials,
            cloud_client: None,
            local_client: None,
        })
    }

    pub fn with_cloud_client(mut self, client: SiteManagerClient) -> Self {
        self.cloud_client = Some(client);
        self
    }

    pub fn with_local_client(mut self, client: LocalControllerClient) -> Self {
        self.local_client = Some(client);
        self
    }

    pub fn servicenow_url(&self) -> &Url {
        &self.servicenow_url
    }

    /// A ServiceNow credential by key (e.g. `"username"`).
    pub fn credential(&self, key: &str) -> Option<&SecretString> {
        self.servicenow_credentials.get(key)
    }

    pub fn cloud_client(&self) -> Option<&SiteManagerClient> {
        self.cloud_client.as_ref()
    }

    pub fn local_client(&self) -> Option<&LocalControllerClient> {
        self.local_client.as_ref()
    }

    /// Sync UniFi devices into the CMDB.
    pub fn sync_devices(&self) -> Result<SyncReport, SyncError> {
        self.pending("sync_devices")
    }

    /// Sync UniFi sites into ServiceNow locations.
    pub fn sync_sites(&self) -> Result<SyncReport, SyncError> {
        self.pending("sync_sites")
    }

    /// Sync connected UniFi clients into ServiceNow.
    pub fn sync_clients(&self) -> Result<SyncReport, SyncError> {
        self.pending("sync_clients")
    }

    fn pending(&self, operation: &'static str) -> Result<SyncReport, SyncError> {
        warn!(
            operation,
            instance = %self.servicenow_url,
            "ServiceNow sync requested but not implemented"
        );
        Err(SyncError::NotImplemented { operation })
    }
}
