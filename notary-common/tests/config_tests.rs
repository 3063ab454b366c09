//! Tests for setting resolution priority
//!
//! Uses serial_test to prevent ENV variable race conditions. Tests that touch
//! NOTARY_SERVER_URL or NOTARY_STATE_DIR are marked #[serial].

use notary_common::config::{
    default_state_dir, ConfigResolver, LoggingConfig, TomlConfig, DEFAULT_SERVER_URL,
    SERVER_URL_ENV, STATE_DIR_ENV,
};
use serial_test::serial;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

fn toml_with_url(url: &str) -> TomlConfig {
    TomlConfig {
        server_url: Some(url.to_string()),
        request_timeout_secs: None,
        state_dir: Some(PathBuf::from("/tmp/notary-toml-state")),
        logging: LoggingConfig::default(),
    }
}

#[test]
#[serial]
fn test_no_overrides_uses_compiled_default() {
    env::remove_var(SERVER_URL_ENV);
    env::remove_var(STATE_DIR_ENV);

    let toml = TomlConfig::default();
    let resolver = ConfigResolver::new(&toml);

    assert_eq!(resolver.server_url(None), DEFAULT_SERVER_URL);
    assert_eq!(resolver.state_dir(None), default_state_dir());
}

#[test]
#[serial]
fn test_cli_beats_env_and_toml() {
    env::set_var(SERVER_URL_ENV, "http://env.example:1");
    let toml = toml_with_url("http://toml.example:2");
    let resolver = ConfigResolver::new(&toml);

    assert_eq!(resolver.server_url(Some("http://cli.example:3")), "http://cli.example:3");
    assert_eq!(
        resolver.state_dir(Some(Path::new("/tmp/cli-state"))),
        PathBuf::from("/tmp/cli-state")
    );

    env::remove_var(SERVER_URL_ENV);
}

#[test]
#[serial]
fn test_env_beats_toml() {
    env::set_var(SERVER_URL_ENV, "http://env.example:1");
    env::set_var(STATE_DIR_ENV, "/tmp/env-state");
    let toml = toml_with_url("http://toml.example:2");
    let resolver = ConfigResolver::new(&toml);

    assert_eq!(resolver.server_url(None), "http://env.example:1");
    assert_eq!(resolver.state_dir(None), PathBuf::from("/tmp/env-state"));

    env::remove_var(SERVER_URL_ENV);
    env::remove_var(STATE_DIR_ENV);
}

#[test]
#[serial]
fn test_blank_env_is_ignored() {
    env::remove_var(STATE_DIR_ENV);
    env::set_var(SERVER_URL_ENV, "   ");
    let toml = toml_with_url("http://toml.example:2");
    let resolver = ConfigResolver::new(&toml);

    assert_eq!(resolver.server_url(None), "http://toml.example:2");
    assert_eq!(
        resolver.state_dir(None),
        PathBuf::from("/tmp/notary-toml-state")
    );

    env::remove_var(SERVER_URL_ENV);
}

#[test]
#[serial]
fn test_client_config_carries_timeout() {
    env::remove_var(SERVER_URL_ENV);
    let mut toml = toml_with_url("https://notary.example.org/");
    toml.request_timeout_secs = Some(20);

    let config = ConfigResolver::new(&toml).client_config(None).unwrap();
    assert_eq!(config.base_url, "https://notary.example.org");
    assert_eq!(config.request_timeout, Some(Duration::from_secs(20)));
}

#[test]
#[serial]
fn test_client_config_rejects_bad_cli_url() {
    env::remove_var(SERVER_URL_ENV);
    let toml = TomlConfig::default();
    assert!(ConfigResolver::new(&toml).client_config(Some("localhost:8080")).is_err());
}
