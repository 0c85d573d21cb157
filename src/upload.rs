//! Synthesises the sentry-cli `debug-files upload` command line.

use std::path::Path;

use crate::config::Credentials;

/// Builds the sentry-cli invocation that uploads debug files and sources.
///
/// Every token is wrapped in double quotes as-is. Embedded `"` characters are
/// not escaped, so a value containing one produces a broken command line.
/// Inputs are not validated: `credentials` is valid by construction and the
/// caller has already resolved `binary_path`.
pub fn build_upload_command(
    binary_path: &Path,
    credentials: &Credentials,
    binaries_dir: &Path,
    plugin_binaries_dir: &Path,
) -> String {
    format!(
        "\"{}\" debug-files upload --org \"{}\" --project \"{}\" --auth-token \"{}\" --include-sources \"{}\" \"{}\"",
        binary_path.display(),
        credentials.organization(),
        credentials.project(),
        credentials.auth_token(),
        binaries_dir.display(),
        plugin_binaries_dir.display(),
    )
}
