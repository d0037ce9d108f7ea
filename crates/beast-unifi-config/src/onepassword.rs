// 1Password credential source.
//
// Shells out to the `op` CLI once per credential:
//   op item get <item> --vault <vault> --fields <field> --format json --reveal
// Every failure is local to that credential; the source never errors as a
// whole.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use secrecy::SecretString;
use serde_json::Value;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

use crate::credentials::{CredentialName, CredentialSet};
use crate::error::OpError;
use crate::resolver::CredentialSource;
use crate::settings::ResolverSettings;

/// What `op` prints in place of a concealed field when `--reveal` is not
/// honoured, e.g. `[use 'op item get abc --reveal' to reveal]`.
pub const PLACEHOLDER_PREFIX: &str = "[use 'op item get";

/// Something that can fetch one field of one vault item.
///
/// Returns the CLI's raw stdout; interpretation happens in
/// [`OnePasswordSource`].
pub trait SecretCli {
    fn item_field(&self, item: &str, vault: &str, field: &str) -> Result<String, OpError>;
}

impl<F> SecretCli for F
where
    F: Fn(&str, &str, &str) -> Result<String, OpError>,
{
    fn item_field(&self, item: &str, vault: &str, field: &str) -> Result<String, OpError> {
        self(item, vault, field)
    }
}

// ── op process runner ───────────────────────────────────────────────

/// The real `op` binary, run as a child process with a deadline.
/// A child still running at the deadline is killed.
#[derive(Debug, Clone)]
pub struct OpCli {
    program: PathBuf,
    timeout: Duration,
}

impl Default for OpCli {
    fn default() -> Self {
        Self::new("op", Duration::from_secs(10))
    }
}

impl OpCli {
    pub fn new(program: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    pub fn from_settings(settings: &ResolverSettings) -> Self {
        Self::new(settings.op_path.clone(), settings.op_timeout())
    }

    /// Run `op` to completion on a private current-thread runtime.
    ///
    /// Must not be called from inside an async context.
    fn run(&self, args: &[&str]) -> Result<String, OpError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(OpError::Io)?;
        runtime.block_on(self.output(args))
    }

    async fn output(&self, args: &[&str]) -> Result<String, OpError> {
        let child = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            // stderr can echo item names and vault paths
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(OpError::Spawn)?;

        // On timeout the dropped future takes the child with it.
        let output = timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| OpError::Timeout {
                timeout: self.timeout,
            })?
            .map_err(OpError::Io)?;

        if !output.status.success() {
            return Err(OpError::Failed {
                code: output.status.code(),
            });
        }

        String::from_utf8(output.stdout).map_err(|_| OpError::NonUtf8)
    }
}

impl SecretCli for OpCli {
    fn item_field(&self, item: &str, vault: &str, field: &str) -> Result<String, OpError> {
        self.run(&[
            "item", "get", item, "--vault", vault, "--fields", field, "--format", "json",
            "--reveal",
        ])
    }
}

// ── Output interpretation ───────────────────────────────────────────

/// True for the sentinel strings `op` prints instead of a revealed secret.
pub fn is_placeholder(value: &str) -> bool {
    value.starts_with(PLACEHOLDER_PREFIX) || value.to_ascii_lowercase().contains("--reveal")
}

/// Pull the secret out of `op`'s stdout.
///
/// Accepts `[{"value": ...}]`, `{"value": ...}` / `{"<field>": ...}`, a JSON
/// string, or plain text. Empty and placeholder values come back as `None`.
pub(crate) fn extract_value(stdout: &str, field: &str) -> Option<String> {
    let raw = stdout.trim();
    let value = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) => items
            .first()
            .and_then(|item| item.get("value"))
            .and_then(Value::as_str)
            .map(str::to_owned),
        Ok(Value::Object(map)) => map
            .get("value")
            .and_then(Value::as_str)
            .filter(|v| !v.is_empty())
            .or_else(|| map.get(field).and_then(Value::as_str))
            .map(str::to_owned),
        Ok(Value::String(s)) => Some(s),
        Ok(_) | Err(_) => Some(raw.to_owned()),
    };
    value.filter(|v| !v.is_empty() && !is_placeholder(v))
}

// ── Source ──────────────────────────────────────────────────────────

/// Credentials stored as items in a 1Password vault.
#[derive(Debug, Clone)]
pub struct OnePasswordSource<C = OpCli> {
    cli: C,
    vault: String,
}

impl OnePasswordSource<OpCli> {
    /// Query `vault` with the `op` binary on `PATH`.
    pub fn new(vault: impl Into<String>) -> Self {
        Self::with_cli(OpCli::default(), vault)
    }

    pub fn from_settings(settings: &ResolverSettings) -> Self {
        Self::with_cli(OpCli::from_settings(settings), settings.vault.clone())
    }
}

impl<C: SecretCli> OnePasswordSource<C> {
    pub fn with_cli(cli: C, vault: impl Into<String>) -> Self {
        Self {
            cli,
            vault: vault.into(),
        }
    }

    pub fn vault(&self) -> &str {
        &self.vault
    }

    /// Look up one credential. `Ok(None)` means the CLI answered but had no
    /// usable (non-empty, revealed) value.
    pub fn lookup(&self, name: CredentialName) -> Result<Option<SecretString>, OpError> {
        let stdout = self
            .cli
            .item_field(name.item_name(), &self.vault, name.field_name())?;
        Ok(extract_value(&stdout, name.field_name()).map(SecretString::from))
    }
}

impl<C: SecretCli> CredentialSource for OnePasswordSource<C> {
    fn label(&self) -> &'static str {
        "1password"
    }

    fn load(&self) -> CredentialSet {
        let mut set = CredentialSet::new();
        for name in CredentialName::all() {
            match self.lookup(name) {
                Ok(Some(value)) => {
                    set.insert(name, value);
                }
                Ok(None) => debug!(credential = %name, vault = %self.vault, "no usable value in 1Password"),
                Err(e) => debug!(credential = %name, vault = %self.vault, error = %e, "1Password lookup failed"),
            }
        }
        set
    }
}
