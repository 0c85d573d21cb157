///
/// This module implements the CLI for symbol-upload-step: it plays the part of
/// the build system, handing a target kind, platform and plugin root to
/// [`maybe_emit_upload_step`] and printing whatever post-build steps come back.
///
/// ## How To Use
/// - From a build script: `symbol-upload-step plan --target game --platform Win64 --plugin-root <dir>`
///   and run each printed line after the build.
/// - For programmatic/integration use: call [`run`] with a constructed [`Cli`].
///
/// The upload step is best-effort, so a skipped upload is not an error exit.
use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

use crate::config::{Platform, TargetKind};
use crate::contract::ProcessEnvironment;
use crate::post_build::{maybe_emit_upload_step, StepOutcome};

/// CLI for symbol-upload-step: synthesise the sentry-cli symbol upload post-build step.
#[derive(Parser)]
#[clap(
    name = "symbol-upload-step",
    version,
    about = "Decide whether debug symbols should be uploaded after a build and print the uploader command"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate the upload gates and print the post-build command, if any
    Plan {
        /// Kind of target being built
        #[clap(long, value_enum)]
        target: TargetKind,
        /// Build system platform name (Win64, Mac, Linux, LinuxArm64, ...)
        #[clap(long)]
        platform: Platform,
        /// Project directory containing Plugins/, Config/ and sentry.properties
        #[clap(long)]
        plugin_root: PathBuf,
        /// Print the outcome and steps as JSON
        #[clap(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct PlanReport<'a> {
    outcome: &'a StepOutcome,
    post_build_steps: &'a [String],
}

/// CLI logic entrypoint, writing results to `out`.
pub fn run_with_output<W: Write>(cli: Cli, out: &mut W) -> Result<()> {
    match cli.command {
        Commands::Plan {
            target,
            platform,
            plugin_root,
            json,
        } => {
            tracing::info!(command = "plan", ?target, %platform, "Planning post-build steps");
            let mut post_build_steps = Vec::new();
            let outcome = maybe_emit_upload_step(
                target,
                &platform,
                &plugin_root,
                &ProcessEnvironment,
                &mut post_build_steps,
            );

            if json {
                let report = PlanReport {
                    outcome: &outcome,
                    post_build_steps: &post_build_steps,
                };
                serde_json::to_writer_pretty(&mut *out, &report)?;
                writeln!(out)?;
            } else {
                for step in &post_build_steps {
                    writeln!(out, "{step}")?;
                }
            }
            tracing::info!(command = "plan", ?outcome, "Planning complete");
            Ok(())
        }
    }
}

/// CLI logic entrypoint for integration tests and main(), writing to stdout.
pub fn run(cli: Cli) -> Result<()> {
    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    run_with_output(cli, &mut lock)
}
