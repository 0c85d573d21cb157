//! Data model and fixed project-relative locations for the symbol upload step.

use serde::Serialize;
use std::convert::Infallible;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

/// Directory (relative to the plugin root) whose presence means the Sentry plugin is installed.
pub const PLUGIN_DIR: [&str; 2] = ["Plugins", "Sentry"];

/// Project settings file scanned for the upload flag.
pub const ENGINE_INI: [&str; 2] = ["Config", "DefaultEngine.ini"];

/// Properties file holding org/project/token for sentry-cli.
pub const PROPERTIES_FILE: &str = "sentry.properties";

/// Joins `segments` onto `root` one component at a time.
pub fn join_all(root: &Path, segments: &[&str]) -> PathBuf {
    segments.iter().fold(root.to_path_buf(), |path, segment| path.join(segment))
}

/// Reads a text file the way the build tools write it: invalid UTF-8 is replaced
/// rather than rejected and a leading byte-order mark is dropped.
///
/// Only genuine I/O failures are errors.
pub fn read_text_lossy(path: &Path) -> io::Result<String> {
    let bytes = fs::read(path)?;
    let text = String::from_utf8_lossy(&bytes);
    let text: &str = &text;
    Ok(text.strip_prefix('\u{FEFF}').unwrap_or(text).to_owned())
}

pub const ENV_UPLOAD_SYMBOLS: &str = "SENTRY_UPLOAD_SYMBOLS_AUTOMATICALLY";
pub const ENV_PROJECT: &str = "SENTRY_PROJECT";
pub const ENV_ORG: &str = "SENTRY_ORG";
pub const ENV_AUTH_TOKEN: &str = "SENTRY_AUTH_TOKEN";

/// The organisation/project/token triple sentry-cli needs to authorise an upload.
///
/// Only constructible through [`Credentials::new`], which refuses empty fields,
/// so any value of this type is valid.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    organization: String,
    project: String,
    auth_token: String,
}

impl Credentials {
    /// Returns `None` unless all three fields are non-empty.
    pub fn new(
        organization: impl Into<String>,
        project: impl Into<String>,
        auth_token: impl Into<String>,
    ) -> Option<Self> {
        let organization = organization.into();
        let project = project.into();
        let auth_token = auth_token.into();
        if organization.is_empty() || project.is_empty() || auth_token.is_empty() {
            return None;
        }
        Some(Self {
            organization,
            project,
            auth_token,
        })
    }

    pub fn organization(&self) -> &str {
        &self.organization
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn auth_token(&self) -> &str {
        &self.auth_token
    }

    pub fn trace_loaded(&self, source: &str) {
        info!(
            source,
            org = %self.organization,
            project = %self.project,
            "Loaded Credentials"
        );
        debug!(?self, "Credentials loaded (full debug)");
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("organization", &self.organization)
            .field("project", &self.project)
            .field("auth_token", &"<redacted>")
            .finish()
    }
}

/// Kind of target being built. Only [`TargetKind::Editor`] is the tooling variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    Game,
    Client,
    Server,
    Program,
    Editor,
}

impl TargetKind {
    pub fn is_editor(self) -> bool {
        matches!(self, TargetKind::Editor)
    }
}

/// Target platform as named by the build system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Platform {
    Win64,
    Mac,
    Linux,
    LinuxArm64,
    /// Anything without a known uploader binary; keeps the name it was given.
    Unsupported(String),
}

impl FromStr for Platform {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let known = [
            ("Win64", Platform::Win64),
            ("Mac", Platform::Mac),
            ("Linux", Platform::Linux),
            ("LinuxArm64", Platform::LinuxArm64),
        ];
        Ok(known
            .into_iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(s.trim()))
            .map(|(_, platform)| platform)
            .unwrap_or_else(|| Platform::Unsupported(s.to_owned())))
    }
}

impl From<&str> for Platform {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(platform) => platform,
            Err(never) => match never {},
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::Win64 => "Win64",
            Platform::Mac => "Mac",
            Platform::Linux => "Linux",
            Platform::LinuxArm64 => "LinuxArm64",
            Platform::Unsupported(name) => name,
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn lossy_read_drops_bom_and_replaces_bad_bytes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.ini");
        fs::write(&path, b"\xEF\xBB\xBFfirst=1\n; Caf\xe9\nlast=2\n").unwrap();

        let text = read_text_lossy(&path).expect("readable");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["first=1", "; Caf\u{FFFD}", "last=2"]);
    }

    #[test]
    fn lossy_read_still_reports_io_errors() {
        let dir = tempdir().unwrap();
        assert!(read_text_lossy(&dir.path().join("absent")).is_err());
        assert!(read_text_lossy(dir.path()).is_err());
    }

    #[test]
    fn credentials_reject_any_empty_field() {
        assert!(Credentials::new("", "p", "t").is_none());
        assert!(Credentials::new("o", "", "t").is_none());
        assert!(Credentials::new("o", "p", "").is_none());
        let creds = Credentials::new("o", "p", "t").expect("all fields set");
        assert_eq!(creds.organization(), "o");
        assert_eq!(creds.project(), "p");
        assert_eq!(creds.auth_token(), "t");
    }

    #[test]
    fn debug_output_hides_the_token() {
        let creds = Credentials::new("acme", "tower", "sntrys_secret").unwrap();
        let rendered = format!("{creds:?}");
        assert!(rendered.contains("acme"));
        assert!(!rendered.contains("sntrys_secret"), "token leaked: {rendered}");
    }

    #[test]
    fn platform_names_parse_case_insensitively() {
        assert_eq!(Platform::from("Win64"), Platform::Win64);
        assert_eq!(Platform::from("mac"), Platform::Mac);
        assert_eq!(Platform::from("LINUXARM64"), Platform::LinuxArm64);
        assert_eq!(
            Platform::from("IOS"),
            Platform::Unsupported("IOS".to_string())
        );
    }

    #[test]
    fn platform_display_is_the_directory_segment() {
        assert_eq!(Platform::LinuxArm64.to_string(), "LinuxArm64");
        assert_eq!(Platform::Unsupported("Android".into()).to_string(), "Android");
    }

    #[test]
    fn only_editor_is_tooling() {
        assert!(TargetKind::Editor.is_editor());
        for kind in [
            TargetKind::Game,
            TargetKind::Client,
            TargetKind::Server,
            TargetKind::Program,
        ] {
            assert!(!kind.is_editor());
        }
    }
}
