//! Credential resolution for UniFi tooling.
//!
//! Credentials come from a 1Password vault via the `op` CLI first, then from
//! a dotenv file (`~/.env` by default) for anything the vault did not have.
//! The result is a [`CredentialSet`] handed to the API clients explicitly;
//! nothing is written back into the process environment.

pub mod credentials;
pub mod env_file;
pub mod error;
pub mod onepassword;
pub mod resolver;
pub mod settings;

pub use credentials::{CredentialName, CredentialSet};
pub use env_file::{DotenvSource, EnvLookup, default_env_path};
pub use error::{ConfigError, OpError};
pub use onepassword::{OnePasswordSource, OpCli, SecretCli, is_placeholder};
pub use resolver::{CredentialResolver, CredentialSource, resolve, resolve_credentials};
pub use settings::ResolverSettings;

/// Credentials available without the secret manager: `~/.env` plus the
/// process environment. This is what the API clients fall back on when
/// constructed without an explicit key.
pub fn load_env_credentials() -> CredentialSet {
    DotenvSource::home().load()
}
