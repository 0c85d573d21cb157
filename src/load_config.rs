//! `load_config` module: resolves sentry-cli credentials from the plugin's
//! properties file or, failing that, from the environment.
//!
//! # Responsibilities
//! - Parse the line-oriented `sentry.properties` file (three recognised keys, last one wins)
//! - Read the `SENTRY_ORG` / `SENTRY_PROJECT` / `SENTRY_AUTH_TOKEN` fallback
//! - Apply strict source precedence: the first source yielding complete credentials wins
//!
//! Sources never merge. A properties file with org and project but no token is
//! discarded as a whole and the environment is consulted instead.
//!
//! # Errors
//! Nothing here fails outward. Unreadable or incomplete sources are logged at
//! debug level and simply yield no credentials.

use std::io;
use std::path::Path;
use tracing::{debug, info};

use crate::config::{
    read_text_lossy, Credentials, ENV_AUTH_TOKEN, ENV_ORG, ENV_PROJECT, PROPERTIES_FILE,
};
use crate::contract::Environment;

const KEY_PROJECT: &str = "defaults.project=";
const KEY_ORG: &str = "defaults.org=";
const KEY_AUTH_TOKEN: &str = "auth.token=";

/// A credential source: yields complete credentials or nothing.
pub type CredentialSource<'a> = Box<dyn Fn() -> Option<Credentials> + 'a>;

#[derive(Debug)]
pub enum PropertiesError {
    Io(io::Error),
    /// File parsed but at least one of the three keys ended up empty.
    Incomplete,
}

impl From<io::Error> for PropertiesError {
    fn from(e: io::Error) -> Self {
        PropertiesError::Io(e)
    }
}

/// Parses properties text. Values are trimmed; for repeated keys the last line wins.
pub fn parse_properties(content: &str) -> Result<Credentials, PropertiesError> {
    let content = content.strip_prefix('\u{FEFF}').unwrap_or(content);
    let mut org = String::new();
    let mut project = String::new();
    let mut token = String::new();

    for line in content.lines() {
        if let Some(value) = line.strip_prefix(KEY_PROJECT) {
            project = value.trim().to_owned();
        } else if let Some(value) = line.strip_prefix(KEY_ORG) {
            org = value.trim().to_owned();
        } else if let Some(value) = line.strip_prefix(KEY_AUTH_TOKEN) {
            token = value.trim().to_owned();
        }
    }

    Credentials::new(org, project, token).ok_or(PropertiesError::Incomplete)
}

/// Reads and parses the properties file at `path`. Undecodable bytes do not fail the read.
pub fn read_properties_file(path: &Path) -> Result<Credentials, PropertiesError> {
    let content = read_text_lossy(path)?;
    parse_properties(&content)
}

/// Properties-file source. Absent, unreadable or incomplete files yield nothing.
pub fn properties_source(plugin_root: &Path) -> Option<Credentials> {
    let path = plugin_root.join(PROPERTIES_FILE);
    if !path.is_file() {
        debug!(properties_path = ?path, "[CONFIG] No properties file");
        return None;
    }
    match read_properties_file(&path) {
        Ok(creds) => {
            creds.trace_loaded("properties");
            Some(creds)
        }
        Err(e) => {
            debug!(properties_path = ?path, error = ?e, "[CONFIG] Properties file unusable, falling through");
            None
        }
    }
}

/// Environment source. Values are taken verbatim, without trimming.
pub fn environment_source(env: &dyn Environment) -> Option<Credentials> {
    let org = env.var(ENV_ORG).unwrap_or_default();
    let project = env.var(ENV_PROJECT).unwrap_or_default();
    let token = env.var(ENV_AUTH_TOKEN).unwrap_or_default();

    match Credentials::new(org, project, token) {
        Some(creds) => {
            creds.trace_loaded("environment");
            Some(creds)
        }
        None => {
            debug!("[CONFIG] Environment credentials incomplete");
            None
        }
    }
}

/// First source to yield credentials wins; later sources are not consulted.
pub fn first_available(sources: &[CredentialSource<'_>]) -> Option<Credentials> {
    sources.iter().find_map(|source| source())
}

/// Resolves credentials: properties file under `plugin_root` first, then `env`.
pub fn resolve_credentials(plugin_root: &Path, env: &dyn Environment) -> Option<Credentials> {
    let sources: [CredentialSource<'_>; 2] = [
        Box::new(|| properties_source(plugin_root)),
        Box::new(|| environment_source(env)),
    ];
    let resolved = first_available(&sources);
    if resolved.is_none() {
        info!(plugin_root = ?plugin_root, "[CONFIG] No source provided complete credentials");
    }
    resolved
}
