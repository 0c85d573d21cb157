//! Upload gate: decides whether a symbol upload should be attempted at all.
//!
//! The checks run cheapest-first: target kind, plugin presence, then the
//! enablement signal. The enablement signal is the env override when it is set,
//! otherwise a line scan of the project INI.

use std::path::Path;
use tracing::debug;

use crate::config::{read_text_lossy, TargetKind};

/// Literal assignment whose presence anywhere in a line enables upload.
pub const INI_UPLOAD_FLAG: &str = "UploadSymbolsAutomatically=True";

/// Returns `true` when the upload step should proceed to credential resolution.
///
/// `ini_flag_scanner` is only invoked when no non-empty `env_override` is given.
pub fn should_attempt_upload<F>(
    target_kind: TargetKind,
    plugin_root_exists: bool,
    env_override: Option<&str>,
    ini_flag_scanner: F,
) -> bool
where
    F: FnOnce() -> bool,
{
    if target_kind.is_editor() || !plugin_root_exists {
        return false;
    }
    upload_enabled(env_override, ini_flag_scanner)
}

/// Enablement signal alone. A non-empty override is the sole determinant.
pub fn upload_enabled<F>(env_override: Option<&str>, ini_flag_scanner: F) -> bool
where
    F: FnOnce() -> bool,
{
    match env_override {
        Some(value) if !value.is_empty() => value.eq_ignore_ascii_case("true"),
        _ => ini_flag_scanner(),
    }
}

/// Scans `path` line by line for [`INI_UPLOAD_FLAG`].
///
/// Plain substring containment, no INI parsing: a commented-out line still matches.
/// Undecodable bytes are replaced, not rejected. A missing or unreadable file
/// counts as disabled.
pub fn ini_enables_upload(path: &Path) -> bool {
    match read_text_lossy(path) {
        Ok(content) => content.lines().any(|line| line.contains(INI_UPLOAD_FLAG)),
        Err(e) => {
            debug!(ini_path = ?path, error = %e, "[GATE] Engine INI not readable, treating upload as disabled");
            false
        }
    }
}
