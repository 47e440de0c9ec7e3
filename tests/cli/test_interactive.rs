//! Tests for the interactive session loop

use crate::common::{build_services, create_test_services, TestKb};
use kbsearch::cli::commands::interactive::run_session;
use kbsearch::cli::commands::InteractiveArgs;
use kbsearch::cli::OutputFormat;

fn run(services: &kbsearch::Services, input: &str, format: OutputFormat) -> String {
    let args = InteractiveArgs { all_chunks: false };
    let mut out = Vec::new();
    run_session(&args, services, format, input.as_bytes(), &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

/// Test queries and commands in a JSON session
#[test]
fn test_session_json() {
    let kb = TestKb::standard();
    let (services, _) = build_services(kb.path());

    let out = run(&services, "quick fox\n:get A.md\n:quit\n", OutputFormat::Json);
    assert!(out.contains("\"doc_id\": \"A.md\""));
    assert!(out.contains("\"found\": true"));
}

/// Test a human session including the rebuild command
#[test]
fn test_session_human_rebuild() {
    let kb = TestKb::standard();
    let services = create_test_services(kb.path());
    colored::control::set_override(false);

    let out = run(&services, ":build\nlazy dog\n", OutputFormat::Human);
    assert!(services.kb.is_built());
    assert!(out.contains("A.md"));
}

/// Search errors are reported inline and do not end the session
#[test]
fn test_session_reports_errors_inline() {
    let kb = TestKb::standard();
    let services = create_test_services(kb.path());
    colored::control::set_override(false);

    let out = run(&services, "quick fox\n:help\n", OutputFormat::Human);
    assert!(out.contains("not built"));
    assert!(out.contains(":quit"));
}

/// Missing argument to :get prints usage
#[test]
fn test_session_get_usage() {
    let kb = TestKb::standard();
    let (services, _) = build_services(kb.path());

    let out = run(&services, ":get\n", OutputFormat::Human);
    assert!(out.contains("Usage"));
}
