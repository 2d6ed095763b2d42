//! Integration tests for logging system

use bridge_traits::LogLevel;
use core_runtime::logging::{init_logging, redact_if_sensitive, LogFormat, LoggingConfig};

#[test]
fn test_second_initialization_is_rejected() {
    // Only one global subscriber may exist per process
    let first = init_logging(LoggingConfig::default().with_format(LogFormat::Compact));
    let second = init_logging(LoggingConfig::default().with_format(LogFormat::Json));

    assert!(first.is_ok());
    assert!(second.is_err());
}

#[test]
fn test_invalid_filter_is_rejected_before_install() {
    let config = LoggingConfig::default().with_filter("redrive=loud");
    assert!(init_logging(config).is_err());
}

#[test]
fn test_emails_never_logged_verbatim() {
    let redacted = redact_if_sensitive("viewer", "someone@edcode.org");

    assert!(redacted.starts_with('s'));
    assert!(!redacted.contains("edcode.org"));
}

#[test]
fn test_default_level_is_info() {
    let config = LoggingConfig::default();
    assert_eq!(config.level, LogLevel::Info);
    assert!(config.logger_sink.is_none());
}
