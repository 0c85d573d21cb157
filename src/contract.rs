//! # contract: seams between the upload-step logic and the outside world
//!
//! The only ambient input the core reads besides the filesystem is the process
//! environment. It goes through [`Environment`] so that gates and credential
//! sources can be exercised with a mock instead of mutating global state.
//!
//! ## Mocking & Testing
//! - The trait is annotated for `mockall`; `MockEnvironment` is exported in
//!   tests and under the default `test-export-mocks` feature.

#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;

/// Read-only view of environment variables.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
pub trait Environment {
    /// Value of `key`, or `None` when it is unset or not valid unicode.
    fn var(&self, key: &str) -> Option<String>;
}

/// [`Environment`] backed by the real process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

#[cfg(any(test, feature = "test-export-mocks"))]
impl MockEnvironment {
    /// Mock answering from a fixed set of variables; everything else is unset.
    pub fn with_vars(vars: &[(&str, &str)]) -> Self {
        let vars: std::collections::HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let mut env = MockEnvironment::new();
        env.expect_var().returning(move |key| vars.get(key).cloned());
        env
    }
}
