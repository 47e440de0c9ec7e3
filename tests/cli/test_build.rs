//! Tests for the build and stats CLI commands

use crate::common::{create_test_services, TestKb};
use kbsearch::cli::commands::{build, stats, BuildArgs, StatsArgs};
use kbsearch::cli::OutputFormat;

/// Test build in human format
#[test]
fn test_build_human() {
    let kb = TestKb::standard();
    let services = create_test_services(kb.path());

    let result = build::execute(BuildArgs { quiet: true }, &services, OutputFormat::Human);
    assert!(result.is_ok(), "Build should succeed: {:?}", result.err());
    assert!(services.kb.is_built());
}

/// Test build in JSON format
#[test]
fn test_build_json() {
    let kb = TestKb::standard();
    let services = create_test_services(kb.path());

    let result = build::execute(BuildArgs { quiet: false }, &services, OutputFormat::Json);
    assert!(result.is_ok());
    assert_eq!(services.kb.stats().documents_count, 3);
}

/// Test build of a missing folder surfaces the error
#[test]
fn test_build_missing_folder() {
    let kb = TestKb::standard();
    let services = create_test_services(&kb.path().join("absent"));

    let result = build::execute(BuildArgs { quiet: true }, &services, OutputFormat::Human);
    let err = result.unwrap_err();
    assert!(err.to_string().contains("not found"));
}

/// Test the human build summary
#[test]
fn test_build_render_mentions_counts() {
    let kb = TestKb::standard();
    let services = create_test_services(kb.path());
    let stats = services.kb.build().unwrap();

    colored::control::set_override(false);
    let text = build::render(&stats);
    assert!(text.contains('3'));
    assert!(text.contains(&stats.model_kind));
}

/// Test stats command builds before reporting
#[test]
fn test_stats_json() {
    let kb = TestKb::standard();
    let services = create_test_services(kb.path());

    let result = stats::execute(StatsArgs {}, &services, OutputFormat::Json);
    assert!(result.is_ok());
    assert!(services.kb.is_built());
}

/// Test the human stats rendering before any build
#[test]
fn test_stats_render_uninitialized() {
    let kb = TestKb::standard();
    let services = create_test_services(kb.path());

    colored::control::set_override(false);
    let text = stats::render(&services.kb.stats());
    assert!(text.contains("uninitialized"));
}
