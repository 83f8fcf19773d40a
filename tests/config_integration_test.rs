//! Integration tests for configuration loading and validation
//!
//! Tests that modify environment variables hold `ENV_MUTEX` so they do not
//! interfere with each other.

use pii_anonymizer::anonymization::CipherProfile;
use pii_anonymizer::config::load_config;
use pii_anonymizer::domain::AnonymizerError;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn cleanup_env_vars() {
    for name in [
        "ANONYMIZER_APPLICATION_LOG_LEVEL",
        "ANONYMIZER_APPLICATION_BATCH_CONCURRENCY",
        "ANONYMIZER_ANONYMIZATION_CIPHER_PROFILE",
        "ANONYMIZER_ANONYMIZATION_AUDIT_ENABLED",
        "ANONYMIZER_ANONYMIZATION_AUDIT_LOG_PATH",
        "ANONYMIZER_LOGGING_LOCAL_ROTATION",
        "ANONYMIZER_TEMPLATE_KEY",
        "TEST_AUDIT_DIR",
    ] {
        std::env::remove_var(name);
    }
}

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let template = write_config(r#"{"fieldTypeTransformations":[]}"#);
    let content = format!(
        r#"
[application]
log_level = "debug"
batch_concurrency = 8

[anonymization]
cipher_profile = "numeric"

[anonymization.audit]
enabled = true
log_path = "/tmp/anonymizer-audit/anonymization.log"
json_format = false

[logging]
local_enabled = true
local_path = "/tmp/anonymizer-logs"
local_rotation = "hourly"

[template]
path = "{}"
key = "clinic.anonymize.v1"
"#,
        template.path().display()
    );
    let file = write_config(&content);

    let config = load_config(file.path()).unwrap();
    assert_eq!(config.application.log_level, "debug");
    assert_eq!(config.application.batch_concurrency, 8);
    assert_eq!(config.anonymization.cipher_profile, CipherProfile::Numeric);
    assert!(config.anonymization.audit.enabled);
    assert!(!config.anonymization.audit.json_format);
    assert!(config.logging.local_enabled);
    assert_eq!(config.logging.local_rotation, "hourly");
    assert_eq!(config.template.path.as_deref(), Some(template.path()));
    assert_eq!(
        config.template.key.unwrap().as_str(),
        "clinic.anonymize.v1"
    );
}

#[test]
fn test_load_minimal_config_uses_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config("[application]\nlog_level = \"warn\"\n");
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "warn");
    assert_eq!(config.application.batch_concurrency, 4);
    assert_eq!(config.anonymization.cipher_profile, CipherProfile::Alphanumeric);
    assert!(!config.anonymization.audit.enabled);
    assert!(!config.logging.local_enabled);
    assert!(config.template.path.is_none());
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("TEST_AUDIT_DIR", "/tmp/substituted-audit");

    let file = write_config(
        r#"
[anonymization.audit]
log_path = "${TEST_AUDIT_DIR}/audit.log"
"#,
    );
    let config = load_config(file.path()).unwrap();
    assert_eq!(
        config.anonymization.audit.log_path.to_str(),
        Some("/tmp/substituted-audit/audit.log")
    );

    cleanup_env_vars();
}

#[test]
fn test_missing_env_var_is_an_error() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config(
        r#"
[anonymization.audit]
log_path = "${TEST_AUDIT_DIR}/audit.log"
"#,
    );
    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("TEST_AUDIT_DIR"));
}

#[test]
fn test_env_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("ANONYMIZER_APPLICATION_LOG_LEVEL", "trace");
    std::env::set_var("ANONYMIZER_APPLICATION_BATCH_CONCURRENCY", "16");
    std::env::set_var("ANONYMIZER_ANONYMIZATION_CIPHER_PROFILE", "NUMERIC");
    std::env::set_var("ANONYMIZER_TEMPLATE_KEY", "hr.export.nightly");

    let file = write_config("[application]\nlog_level = \"info\"\n");
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "trace");
    assert_eq!(config.application.batch_concurrency, 16);
    assert_eq!(config.anonymization.cipher_profile, CipherProfile::Numeric);
    assert_eq!(config.template.key.unwrap().as_str(), "hr.export.nightly");

    cleanup_env_vars();
}

#[test]
fn test_invalid_env_override_is_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("ANONYMIZER_ANONYMIZATION_AUDIT_ENABLED", "sometimes");

    let file = write_config("");
    let err = load_config(file.path()).unwrap_err();
    assert!(matches!(err, AnonymizerError::Configuration(_)));

    cleanup_env_vars();
}

#[test]
fn test_validation_errors() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    for content in [
        "[application]\nlog_level = \"verbose\"\n",
        "[application]\nbatch_concurrency = 0\n",
        "[logging]\nlocal_rotation = \"weekly\"\n",
        "[template]\npath = \"/definitely/not/a/template.json\"\n",
        "[anonymization]\ncipher_profile = \"hex\"\n",
    ] {
        let file = write_config(content);
        let err = load_config(file.path()).unwrap_err();
        assert!(
            matches!(err, AnonymizerError::Configuration(_)),
            "expected configuration error for {content:?}"
        );
    }
}

#[test]
fn test_missing_file() {
    let err = load_config("/definitely/not/anonymizer.toml").unwrap_err();
    assert!(err.to_string().contains("not found"));
}

#[test]
fn test_invalid_toml() {
    let file = write_config("[application\nlog_level = ");
    assert!(matches!(
        load_config(file.path()),
        Err(AnonymizerError::Configuration(_))
    ));
}
