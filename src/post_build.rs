//! Post-build orchestration: gate → credentials → uploader path → command.
//!
//! This is the entry point the build-system side calls once per target. It
//! appends at most one command to the caller's post-build step list and never
//! fails: each unmet precondition ends the run with a logged [`StepOutcome`].
//!
//! # Navigation
//! - Main entrypoint: [`maybe_emit_upload_step`]
//! - Decision without side effects on the step list: [`decide`]

use serde::Serialize;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::config::{join_all, Credentials, Platform, TargetKind, ENGINE_INI, ENV_UPLOAD_SYMBOLS};
use crate::contract::Environment;
use crate::gate::{ini_enables_upload, should_attempt_upload};
use crate::load_config::resolve_credentials;
use crate::platform::{binaries_dir, plugin_binaries_dir, plugin_dir, resolve_binary_path};
use crate::upload::build_upload_command;

/// Why the gate stopped the upload step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    EditorTarget,
    PluginMissing,
    Disabled,
}

/// Why an enabled upload step could not be built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnavailableReason {
    MissingCredentials,
    UnsupportedPlatform(String),
}

/// Outcome of the gate and credential stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadDecision {
    Proceed {
        credentials: Credentials,
        platform: Platform,
    },
    SkippedByGate(SkipReason),
    Unavailable(UnavailableReason),
}

/// What [`maybe_emit_upload_step`] did. Carries no secrets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum StepOutcome {
    Emitted,
    Skipped(SkipReason),
    Unavailable(UnavailableReason),
}

/// Runs the gate and resolves credentials.
pub fn decide(
    target_kind: TargetKind,
    platform: &Platform,
    plugin_root: &Path,
    env: &dyn Environment,
) -> UploadDecision {
    let ini_path = join_all(plugin_root, &ENGINE_INI);
    let plugin_exists = plugin_dir(plugin_root).is_dir();
    let env_override = env.var(ENV_UPLOAD_SYMBOLS);

    if !should_attempt_upload(target_kind, plugin_exists, env_override.as_deref(), || {
        ini_enables_upload(&ini_path)
    }) {
        let reason = if target_kind.is_editor() {
            SkipReason::EditorTarget
        } else if !plugin_exists {
            SkipReason::PluginMissing
        } else {
            SkipReason::Disabled
        };
        return UploadDecision::SkippedByGate(reason);
    }

    match resolve_credentials(plugin_root, env) {
        Some(credentials) => UploadDecision::Proceed {
            credentials,
            platform: platform.clone(),
        },
        None => UploadDecision::Unavailable(UnavailableReason::MissingCredentials),
    }
}

/// Appends the symbol upload command to `post_build_steps` when everything lines up.
pub fn maybe_emit_upload_step(
    target_kind: TargetKind,
    platform: &Platform,
    plugin_root: &Path,
    env: &dyn Environment,
    post_build_steps: &mut Vec<String>,
) -> StepOutcome {
    info!(?target_kind, %platform, plugin_root = ?plugin_root, "[POST-BUILD] Evaluating symbol upload step");

    let (credentials, platform) = match decide(target_kind, platform, plugin_root, env) {
        UploadDecision::Proceed {
            credentials,
            platform,
        } => (credentials, platform),
        UploadDecision::SkippedByGate(SkipReason::Disabled) => {
            info!("[GATE] Symbol upload is disabled, skipping post-build step");
            return StepOutcome::Skipped(SkipReason::Disabled);
        }
        UploadDecision::SkippedByGate(reason) => {
            debug!(?reason, "[GATE] Symbol upload not applicable, skipping");
            return StepOutcome::Skipped(reason);
        }
        UploadDecision::Unavailable(reason) => {
            warn!(?reason, "[CONFIG] Configuration not found, skipping symbol upload");
            return StepOutcome::Unavailable(reason);
        }
    };

    let Some(binary_path) = resolve_binary_path(plugin_root, &platform) else {
        info!(%platform, "[PATH] No uploader binary for platform, skipping symbol upload");
        return StepOutcome::Unavailable(UnavailableReason::UnsupportedPlatform(
            platform.to_string(),
        ));
    };

    let command = build_upload_command(
        &binary_path,
        &credentials,
        &binaries_dir(plugin_root, &platform),
        &plugin_binaries_dir(plugin_root, &platform),
    );
    post_build_steps.push(command);

    info!(
        %platform,
        binary = ?binary_path,
        org = %credentials.organization(),
        project = %credentials.project(),
        "[BUILD] Added post-build step for symbol upload"
    );
    StepOutcome::Emitted
}
