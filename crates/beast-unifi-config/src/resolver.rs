// Credential resolution: preferred source first, fallback fills the gaps.

use tracing::debug;

use crate::credentials::CredentialSet;
use crate::env_file::DotenvSource;
use crate::error::ConfigError;
use crate::onepassword::OnePasswordSource;
use crate::settings::ResolverSettings;

/// A place credentials can be read from.
///
/// Implementations swallow their own failures: a source that cannot be
/// read simply contributes nothing.
pub trait CredentialSource {
    /// Short name for logs.
    fn label(&self) -> &'static str;

    /// Read every credential this source knows about.
    fn load(&self) -> CredentialSet;
}

/// Merge two sources. Values from `preferred` always win; `fallback` is
/// only consulted (once) when `preferred` left at least one gap.
pub fn resolve(preferred: &dyn CredentialSource, fallback: &dyn CredentialSource) -> CredentialSet {
    let mut credentials = preferred.load();
    for name in credentials.names() {
        debug!(credential = %name, source = preferred.label(), "credential resolved");
    }

    if credentials.is_complete() {
        return credentials;
    }

    let filled = credentials.fill_gaps(&fallback.load());
    for name in filled {
        debug!(credential = %name, source = fallback.label(), "credential resolved");
    }
    for name in credentials.missing() {
        debug!(credential = %name, "credential not found in any source");
    }

    credentials
}

/// The default chain: 1Password vault, then the dotenv file.
#[derive(Debug, Clone)]
pub struct CredentialResolver {
    vault: OnePasswordSource,
    env: DotenvSource,
}

impl CredentialResolver {
    pub fn from_settings(settings: &ResolverSettings) -> Self {
        let env = settings
            .env_file_path()
            .map_or_else(DotenvSource::process_only, DotenvSource::new)
            .inherit_process_env(settings.inherit_process_env);
        Self {
            vault: OnePasswordSource::from_settings(settings),
            env,
        }
    }

    pub fn resolve(&self) -> CredentialSet {
        resolve(&self.vault, &self.env)
    }
}

impl Default for CredentialResolver {
    fn default() -> Self {
        Self::from_settings(&ResolverSettings::default())
    }
}

/// Load settings from the environment and run the default chain.
pub fn resolve_credentials() -> Result<CredentialSet, ConfigError> {
    let settings = ResolverSettings::load()?;
    Ok(CredentialResolver::from_settings(&settings).resolve())
}
