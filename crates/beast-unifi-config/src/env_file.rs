// Dotenv credential source.
//
// The file is parsed into a local map; the process environment is only
// read, never written.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use secrecy::SecretString;
use tracing::{debug, warn};

use crate::credentials::{CredentialName, CredentialSet};
use crate::resolver::CredentialSource;

/// `~/.env`, when a home directory can be determined.
pub fn default_env_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(".env"))
}

/// Looks up one process environment variable.
pub type EnvLookup = fn(&str) -> Option<String>;

fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Reads the four UniFi keys from a dotenv file.
///
/// With process inheritance on, a non-empty variable already exported in
/// the environment wins over the file, the same way `dotenvy` refuses to
/// override existing variables.
#[derive(Debug, Clone)]
pub struct DotenvSource {
    path: Option<PathBuf>,
    inherit_process_env: bool,
    env_lookup: EnvLookup,
}

impl DotenvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            inherit_process_env: true,
            env_lookup: process_env,
        }
    }

    /// Source backed by `~/.env`.
    pub fn home() -> Self {
        Self {
            path: default_env_path(),
            inherit_process_env: true,
            env_lookup: process_env,
        }
    }

    /// Source that only consults the process environment.
    pub fn process_only() -> Self {
        Self {
            path: None,
            inherit_process_env: true,
            env_lookup: process_env,
        }
    }

    pub fn inherit_process_env(mut self, inherit: bool) -> Self {
        self.inherit_process_env = inherit;
        self
    }

    /// Replace the process environment lookup (tests, sandboxed callers).
    pub fn with_env_lookup(mut self, lookup: EnvLookup) -> Self {
        self.env_lookup = lookup;
        self
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn read_file(&self) -> HashMap<String, String> {
        let Some(path) = self.path.as_deref() else {
            return HashMap::new();
        };
        if !path.exists() {
            debug!(path = %path.display(), "dotenv file not found");
            return HashMap::new();
        }

        match dotenvy::from_path_iter(path) {
            Ok(lines) => lines
                .filter_map(|line| match line {
                    Ok(pair) => Some(pair),
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "skipping malformed dotenv line");
                        None
                    }
                })
                .collect(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read dotenv file");
                HashMap::new()
            }
        }
    }

    fn process_var(&self, key: &str) -> Option<String> {
        if !self.inherit_process_env {
            return None;
        }
        (self.env_lookup)(key).filter(|v| !v.is_empty())
    }
}

impl Default for DotenvSource {
    fn default() -> Self {
        Self::home()
    }
}

impl CredentialSource for DotenvSource {
    fn label(&self) -> &'static str {
        "dotenv"
    }

    fn load(&self) -> CredentialSet {
        let file = self.read_file();
        let mut set = CredentialSet::new();

        for name in CredentialName::all() {
            let key = name.env_key();
            let value = self
                .process_var(key)
                .or_else(|| file.get(key).filter(|v| !v.is_empty()).cloned());
            if let Some(value) = value {
                set.insert(name, SecretString::from(value));
            }
        }

        debug!(
            path = ?self.path,
            found = set.len(),
            "loaded credentials from environment"
        );
        set
    }
}
