// Resolver settings: which vault to query, where the dotenv file lives,
// how to invoke the 1Password CLI.

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};

use crate::env_file::default_env_path;
use crate::error::ConfigError;

/// Environment variable prefix for settings overrides
/// (`BEAST_UNIFI_VAULT`, `BEAST_UNIFI_OP_TIMEOUT_SECS`, ...).
pub const ENV_PREFIX: &str = "BEAST_UNIFI_";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ResolverSettings {
    /// 1Password vault holding the UniFi items.
    #[serde(default = "default_vault")]
    pub vault: String,

    /// Dotenv file override. `None` means `~/.env`.
    #[serde(default)]
    pub env_file: Option<PathBuf>,

    /// Path or bare name of the `op` executable.
    #[serde(default = "default_op_path")]
    pub op_path: PathBuf,

    /// Upper bound for a single `op` invocation.
    #[serde(default = "default_op_timeout_secs")]
    pub op_timeout_secs: u64,

    /// Let already-exported process variables win over the dotenv file.
    #[serde(default = "default_inherit_process_env")]
    pub inherit_process_env: bool,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            vault: default_vault(),
            env_file: None,
            op_path: default_op_path(),
            op_timeout_secs: default_op_timeout_secs(),
            inherit_process_env: default_inherit_process_env(),
        }
    }
}

fn default_vault() -> String {
    "Beastmaster".into()
}
fn default_op_path() -> PathBuf {
    PathBuf::from("op")
}
fn default_op_timeout_secs() -> u64 {
    10
}
fn default_inherit_process_env() -> bool {
    true
}

impl ResolverSettings {
    /// Defaults overlaid with `BEAST_UNIFI_*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(
            Figment::new()
                .merge(Serialized::defaults(Self::default()))
                .merge(Env::prefixed(ENV_PREFIX)),
        )
    }

    /// Extract and validate settings from an arbitrary provider stack.
    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let settings: Self = figment.extract()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.vault.trim().is_empty() {
            return Err(ConfigError::Validation {
                field: "vault".into(),
                reason: "must not be empty".into(),
            });
        }
        if self.op_timeout_secs == 0 {
            return Err(ConfigError::Validation {
                field: "op_timeout_secs".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    pub fn op_timeout(&self) -> Duration {
        Duration::from_secs(self.op_timeout_secs)
    }

    /// The dotenv path to read, if one can be determined.
    pub fn env_file_path(&self) -> Option<PathBuf> {
        self.env_file.clone().or_else(default_env_path)
    }
}
