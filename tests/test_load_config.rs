use serial_test::serial;
use std::env;
use std::fs::write;
use symbol_upload_step::config::{ENV_AUTH_TOKEN, ENV_ORG, ENV_PROJECT, PROPERTIES_FILE};
use symbol_upload_step::contract::ProcessEnvironment;
use symbol_upload_step::load_config::resolve_credentials;
use tempfile::tempdir;

fn set_env_credentials(org: &str, project: &str, token: &str) {
    env::set_var(ENV_ORG, org);
    env::set_var(ENV_PROJECT, project);
    env::set_var(ENV_AUTH_TOKEN, token);
}

fn clear_env_credentials() {
    env::remove_var(ENV_ORG);
    env::remove_var(ENV_PROJECT);
    env::remove_var(ENV_AUTH_TOKEN);
}

/// A complete properties file wins over fully-set environment variables.
#[test]
#[serial]
fn test_properties_file_takes_precedence_over_env() {
    let root = tempdir().expect("temp dir");
    write(
        root.path().join(PROPERTIES_FILE),
        "defaults.url=https://sentry.io/\ndefaults.org=file-org\ndefaults.project=file-project\nauth.token=file-token\n",
    )
    .unwrap();
    set_env_credentials("env-org", "env-project", "env-token");

    let creds = resolve_credentials(root.path(), &ProcessEnvironment).expect("credentials");

    assert_eq!(creds.organization(), "file-org");
    assert_eq!(creds.project(), "file-project");
    assert_eq!(creds.auth_token(), "file-token");
    clear_env_credentials();
}

/// Last occurrence of a repeated key wins.
#[test]
#[serial]
fn test_properties_last_write_wins() {
    let root = tempdir().expect("temp dir");
    write(
        root.path().join(PROPERTIES_FILE),
        "defaults.project=A\ndefaults.org=B\ndefaults.org=C\nauth.token=D\n",
    )
    .unwrap();
    clear_env_credentials();

    let creds = resolve_credentials(root.path(), &ProcessEnvironment).expect("credentials");

    assert_eq!(creds.organization(), "C");
    assert_eq!(creds.project(), "A");
    assert_eq!(creds.auth_token(), "D");
}

/// A properties file missing the token is discarded whole; the env supplies everything.
#[test]
#[serial]
fn test_partial_properties_fall_through_to_env_without_merge() {
    let root = tempdir().expect("temp dir");
    write(
        root.path().join(PROPERTIES_FILE),
        "defaults.project=A\ndefaults.org=B\n",
    )
    .unwrap();
    set_env_credentials("O2", "P2", "T2");

    let creds = resolve_credentials(root.path(), &ProcessEnvironment).expect("credentials");

    assert_eq!(creds.project(), "P2");
    assert_eq!(creds.organization(), "O2");
    assert_eq!(creds.auth_token(), "T2");
    clear_env_credentials();
}

/// No properties file and an incomplete environment resolve to nothing.
#[test]
#[serial]
fn test_incomplete_env_without_file_is_unavailable() {
    let root = tempdir().expect("temp dir");
    clear_env_credentials();
    env::set_var(ENV_ORG, "only-org");

    assert!(resolve_credentials(root.path(), &ProcessEnvironment).is_none());
    clear_env_credentials();
}
