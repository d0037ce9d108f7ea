//! ServiceNow synchronization for UniFi network data.
//!
//! Only the shape exists so far: [`UnifiServiceNowSync`] composes the UniFi
//! clients with ServiceNow credentials, and every sync or transform call
//! returns [`SyncError::NotImplemented`].

pub mod error;
pub mod sync;
pub mod transform;

pub use error::SyncError;
pub use sync::{SyncReport, UnifiServiceNowSync};
