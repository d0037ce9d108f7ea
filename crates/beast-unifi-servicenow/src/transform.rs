// UniFi record to ServiceNow CMDB record transformations.
//
// The field mapping is an external contract that has not been supplied, so
// both entry points refuse to produce anything rather than guess.

use beast_unifi_api::Record;

use crate::error::SyncError;

/// Map a UniFi device record onto a CMDB configuration item.
pub fn device_to_servicenow(_device: &Record) -> Result<Record, SyncError> {
    Err(SyncError::NotImplemented {
        operation: "device_to_servicenow",
    })
}

/// Map a UniFi site record onto a CMDB location.
pub fn site_to_servicenow(_site: &Record) -> Result<Record, SyncError> {
    Err(SyncError::NotImplemented {
        operation: "site_to_servicenow",
    })
}
