#![doc = "symbol-upload-step: decides whether debug symbols are uploaded after a build."]

//! Given a target kind, a platform and the project's plugin root, this crate
//! runs the upload gates, resolves sentry-cli credentials, locates the bundled
//! uploader and synthesises a single post-build command line. It never runs the
//! uploader and never fails a build: every unmet precondition is a logged skip.
//!
//! # Usage
//! Call [`post_build::maybe_emit_upload_step`] with the caller's post-build step
//! list, or use the `symbol-upload-step` binary.

pub mod cli;
pub mod config;
pub mod contract;
pub mod gate;
pub mod load_config;
pub mod platform;
pub mod post_build;
pub mod upload;

pub use cli::{run, Cli, Commands};
