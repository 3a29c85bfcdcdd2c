#[path = "common/mod.rs"]
mod common;

use common::write_credentials;
use std::path::Path;
use tetl::{ConfigError, Credentials, RunOptions, TetlError};

#[test]
fn loads_all_four_secrets() {
    let dir = tempfile::tempdir().unwrap();
    let p = write_credentials(
        dir.path(),
        r#"{"consumer_key": "abc", "consumer_secret": "def", "access_token": "tek", "access_token_secret": "klf"}"#,
    );
    let c = Credentials::load(&p).unwrap();
    assert_eq!(c.consumer_key, "abc");
    assert_eq!(c.consumer_secret, "def");
    assert_eq!(c.access_token, "tek");
    assert_eq!(c.access_token_secret, "klf");

    // secrets never leak through Debug
    let dbg = format!("{c:?}");
    assert!(!dbg.contains("def") && !dbg.contains("klf"));
}

#[test]
fn missing_file_is_a_configuration_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Credentials::load(dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, TetlError::Config(ConfigError::Read { .. })), "got {err:?}");
}

#[test]
fn missing_key_is_a_configuration_error() {
    let dir = tempfile::tempdir().unwrap();
    let p = write_credentials(
        dir.path(),
        r#"{"consumer_key": "abc", "consumer_secret": "def", "access_token": "tek"}"#,
    );
    let err = Credentials::load(&p).unwrap_err();
    match err {
        TetlError::Config(ConfigError::Parse { source, .. }) => {
            assert!(source.to_string().contains("access_token_secret"));
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn malformed_json_and_blank_secrets_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let p = write_credentials(dir.path(), "consumer_key=abc");
    assert!(matches!(
        Credentials::load(&p).unwrap_err(),
        TetlError::Config(ConfigError::Parse { .. })
    ));

    let p = write_credentials(
        dir.path(),
        r#"{"consumer_key": " ", "consumer_secret": "def", "access_token": "tek", "access_token_secret": "klf"}"#,
    );
    assert!(matches!(
        Credentials::load(&p).unwrap_err(),
        TetlError::Config(ConfigError::Invalid(_))
    ));
}

#[test]
fn run_options_builder_and_validation() {
    let opts = RunOptions::default()
        .with_user_name("@VRmatkalla")
        .with_bucket("b")
        .with_page_size(1000)
        .with_api_base("http://localhost:1234/");
    assert_eq!(opts.user_name, "VRmatkalla");
    assert_eq!(opts.page_size, 200);
    assert_eq!(opts.api_base, "http://localhost:1234");
    assert_eq!(opts.region, "eu-west-1");
    assert_eq!(opts.raw_prefix, "data/raw");
    assert_eq!(opts.tsv_prefix, "data/tsv");
    assert!(opts.validate().is_ok());

    assert!(opts.clone().with_user_name("much_too_long_handle").validate().is_err());
    assert!(opts.clone().with_user_name("").validate().is_err());
    assert!(opts.with_bucket("  ").validate().is_err());
}

/// TETL_* variables replace their options; blank values leave the defaults alone.
#[test]
fn env_overrides_apply_and_blank_values_are_ignored() {
    const VARS: [&str; 4] = ["TETL_CREDENTIALS_FILE", "TETL_OUT_DIR", "TETL_API_BASE", "TETL_S3_ENDPOINT"];

    std::env::set_var("TETL_CREDENTIALS_FILE", "/secrets/keys.json");
    std::env::set_var("TETL_OUT_DIR", "/tmp/tetl-out");
    std::env::set_var("TETL_API_BASE", "http://127.0.0.1:9000/");
    std::env::set_var("TETL_S3_ENDPOINT", "http://127.0.0.1:4566");
    let opts = RunOptions::default().with_env_overrides();
    assert_eq!(opts.credentials_path, Path::new("/secrets/keys.json"));
    assert_eq!(opts.out_dir, Path::new("/tmp/tetl-out"));
    assert_eq!(opts.api_base, "http://127.0.0.1:9000");
    assert_eq!(opts.s3_endpoint.as_deref(), Some("http://127.0.0.1:4566"));

    for var in VARS {
        std::env::set_var(var, "  ");
    }
    let defaults = RunOptions::default();
    let opts = RunOptions::default().with_env_overrides();
    assert_eq!(opts.credentials_path, defaults.credentials_path);
    assert_eq!(opts.out_dir, defaults.out_dir);
    assert_eq!(opts.api_base, defaults.api_base);
    assert_eq!(opts.s3_endpoint, None);

    for var in VARS {
        std::env::remove_var(var);
    }
}
