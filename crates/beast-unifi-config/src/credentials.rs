// Credential names and the resolved credential set.
//
// The four logical credentials are a closed set; each knows its dotenv key
// and where it lives in the 1Password vault.

use std::collections::BTreeMap;
use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use strum::{EnumIter, IntoEnumIterator, IntoStaticStr};

/// One of the logical credentials UniFi tooling needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, IntoStaticStr)]
pub enum CredentialName {
    /// Site Manager (cloud) API key.
    #[strum(serialize = "UNIFI_API_KEY")]
    CloudApiKey,
    /// Local controller API token.
    #[strum(serialize = "UNIFI_LOCAL_TOKEN")]
    LocalToken,
    /// Local controller username (discovery only; UniFi OS login needs 2FA).
    #[strum(serialize = "UNIFI_USERNAME")]
    Username,
    /// Local controller password.
    #[strum(serialize = "UNIFI_PASSWORD")]
    Password,
}

impl CredentialName {
    /// All credential names, in resolution order.
    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }

    /// The dotenv / environment variable key, e.g. `UNIFI_API_KEY`.
    pub fn env_key(self) -> &'static str {
        self.into()
    }

    /// Title of the 1Password item holding this credential.
    pub fn item_name(self) -> &'static str {
        match self {
            Self::CloudApiKey => "UniFi Site Manager API Key",
            Self::LocalToken => "UniFi Local API Token",
            Self::Username => "UniFi Username",
            Self::Password => "UniFi Password",
        }
    }

    /// Field label inside the 1Password item.
    pub fn field_name(self) -> &'static str {
        match self {
            Self::CloudApiKey => "api_key",
            Self::LocalToken => "api_token",
            Self::Username => "username",
            Self::Password => "password",
        }
    }
}

impl fmt::Display for CredentialName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.env_key())
    }
}

/// Credentials resolved for one process invocation.
///
/// Only names that were actually found are present. Empty values are
/// rejected on insert, so a lookup hit always carries a real secret.
#[derive(Debug, Clone, Default)]
pub struct CredentialSet {
    values: BTreeMap<CredentialName, SecretString>,
}

impl CredentialSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value. Returns `false` (and stores nothing) for an empty value.
    pub fn insert(&mut self, name: CredentialName, value: SecretString) -> bool {
        if value.expose_secret().is_empty() {
            return false;
        }
        self.values.insert(name, value);
        true
    }

    pub fn get(&self, name: CredentialName) -> Option<&SecretString> {
        self.values.get(&name)
    }

    pub fn contains(&self, name: CredentialName) -> bool {
        self.values.contains_key(&name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// True once all four credentials are present.
    pub fn is_complete(&self) -> bool {
        CredentialName::all().all(|name| self.contains(name))
    }

    /// Names not yet resolved.
    pub fn missing(&self) -> Vec<CredentialName> {
        CredentialName::all()
            .filter(|name| !self.contains(*name))
            .collect()
    }

    /// Resolved names, in declaration order.
    pub fn names(&self) -> impl Iterator<Item = CredentialName> + '_ {
        self.values.keys().copied()
    }

    /// Resolved `(name, value)` pairs, in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = (CredentialName, &SecretString)> {
        self.values.iter().map(|(name, value)| (*name, value))
    }

    /// Copy in values from `other` for names this set lacks.
    ///
    /// Existing entries are never overwritten. Returns the names filled.
    pub fn fill_gaps(&mut self, other: &Self) -> Vec<CredentialName> {
        let mut filled = Vec::new();
        for (name, value) in other.entries() {
            if !self.contains(name) && self.insert(name, value.clone()) {
                filled.push(name);
            }
        }
        filled
    }
}
