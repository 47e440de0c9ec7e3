//! Tests for the show-config CLI command

use crate::common::create_test_services;
use kbsearch::cli::commands::{config, ConfigArgs};
use kbsearch::cli::OutputFormat;
use tempfile::TempDir;

/// Test show-config in human format
#[test]
fn test_show_config_human() {
    let temp = TempDir::new().unwrap();
    let services = create_test_services(temp.path());

    let result = config::execute(ConfigArgs {}, &services, OutputFormat::Human);
    assert!(result.is_ok());
}

/// Test show-config in JSON format (no build needed)
#[test]
fn test_show_config_json() {
    let temp = TempDir::new().unwrap();
    let services = create_test_services(temp.path());

    let result = config::execute(ConfigArgs {}, &services, OutputFormat::Json);
    assert!(result.is_ok());
    assert!(!services.kb.is_built());
}
