//! Locates the bundled sentry-cli binary and the directories it uploads from.

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::{join_all, Platform, PLUGIN_DIR};

/// Location of the bundled sentry-cli binaries, relative to the plugin directory.
const CLI_DIR: [&str; 3] = ["Source", "ThirdParty", "CLI"];

const CLI_WINDOWS: &str = "sentry-cli-Windows-x86_64.exe";
const CLI_DARWIN_UNIVERSAL: &str = "sentry-cli-Darwin-universal";
const CLI_DARWIN_X86_64: &str = "sentry-cli-Darwin-x86_64";
const CLI_LINUX: &str = "sentry-cli-Linux-x86_64";

/// `<root>/Plugins/Sentry`.
pub fn plugin_dir(plugin_root: &Path) -> PathBuf {
    join_all(plugin_root, &PLUGIN_DIR)
}

fn cli_dir(plugin_root: &Path) -> PathBuf {
    join_all(&plugin_dir(plugin_root), &CLI_DIR)
}

/// Path to the uploader binary for `platform`, or `None` when there is none.
///
/// Mac prefers the universal binary when it exists on disk; otherwise the
/// x86_64 path is returned without checking it.
pub fn resolve_binary_path(plugin_root: &Path, platform: &Platform) -> Option<PathBuf> {
    let dir = cli_dir(plugin_root);
    let path = match platform {
        Platform::Win64 => dir.join(CLI_WINDOWS),
        Platform::Mac => {
            let universal = dir.join(CLI_DARWIN_UNIVERSAL);
            if universal.is_file() {
                universal
            } else {
                debug!(universal = ?universal, "[PATH] Universal binary absent, using x86_64");
                dir.join(CLI_DARWIN_X86_64)
            }
        }
        Platform::Linux | Platform::LinuxArm64 => dir.join(CLI_LINUX),
        Platform::Unsupported(_) => return None,
    };
    Some(path)
}

/// `<root>/Binaries/<Platform>`: the built game binaries.
pub fn binaries_dir(plugin_root: &Path, platform: &Platform) -> PathBuf {
    plugin_root.join("Binaries").join(platform.to_string())
}

/// `<root>/Plugins/Sentry/Source/ThirdParty/<Platform>`: the plugin's native libraries.
pub fn plugin_binaries_dir(plugin_root: &Path, platform: &Platform) -> PathBuf {
    plugin_dir(plugin_root)
        .join("Source")
        .join("ThirdParty")
        .join(platform.to_string())
}
