// beast-unifi-api: Blocking Rust clients for the UniFi Site Manager (cloud)
// and local controller APIs.

pub mod auth;
pub mod cloud;
pub mod envelope;
pub mod error;
pub mod local;
pub mod transport;

pub use auth::AuthStrategy;
pub use cloud::{CLOUD_BASE_URL, SiteManagerClient};
pub use envelope::{Envelope, Record};
pub use error::Error;
pub use local::{DEFAULT_SITE, LocalControllerBuilder, LocalControllerClient};
pub use transport::{CLOUD_TIMEOUT, LOCAL_TIMEOUT, TlsMode, TransportConfig};
