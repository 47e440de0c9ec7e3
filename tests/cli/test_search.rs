//! Tests for the search CLI command
//!
//! Tests the search command handler with various scenarios:
//! - Valid queries with results
//! - Empty queries
//! - Parameter resolution against configured defaults
//! - Output format variations

use crate::common::{build_services, create_test_services, TestKb};
use kbsearch::cli::commands::search::{execute, render, SearchArgs};
use kbsearch::cli::OutputFormat;

fn args(query: &str) -> SearchArgs {
    SearchArgs {
        query: query.to_string(),
        top_k: None,
        min_score: None,
        all_chunks: false,
    }
}

/// Test search with valid query in human format
#[test]
fn test_search_valid_query_human() {
    let kb = TestKb::standard();
    let services = create_test_services(kb.path());

    let result = execute(args("quick fox"), &services, OutputFormat::Human);
    assert!(result.is_ok(), "Search should succeed: {:?}", result.err());
}

/// Test search with valid query in JSON format
#[test]
fn test_search_valid_query_json() {
    let kb = TestKb::standard();
    let services = create_test_services(kb.path());

    let mut search_args = args("lorem ipsum");
    search_args.top_k = Some(2);
    search_args.min_score = Some(-0.5);

    let result = execute(search_args, &services, OutputFormat::Json);
    assert!(result.is_ok());
}

/// Test that a blank query is reported, not failed
#[test]
fn test_search_blank_query() {
    let kb = TestKb::standard();
    let services = create_test_services(kb.path());

    let result = execute(args("   "), &services, OutputFormat::Human);
    assert!(result.is_ok());
}

/// Test search when the folder cannot be indexed
#[test]
fn test_search_missing_folder() {
    let kb = TestKb::standard();
    let services = create_test_services(&kb.path().join("absent"));

    let result = execute(args("quick fox"), &services, OutputFormat::Json);
    assert!(result.is_err());
}

/// Test argument resolution against the configured defaults
#[test]
fn test_search_params_resolution() {
    let kb = TestKb::standard();
    let services = create_test_services(kb.path());

    let defaults = args("fox").params(&services);
    assert_eq!(defaults.top_k, services.config.search.default_top_k);
    assert_eq!(defaults.min_score, services.config.search.default_min_score);
    assert!(defaults.deduplicate_docs);

    let custom = SearchArgs {
        query: "fox".to_string(),
        top_k: Some(9),
        min_score: Some(-0.25),
        all_chunks: true,
    }
    .params(&services);
    assert_eq!(custom.top_k, 9);
    assert_eq!(custom.min_score, -0.25);
    assert!(!custom.deduplicate_docs);
}

/// Test the human rendering of hits and of an empty result
#[test]
fn test_search_render() {
    let kb = TestKb::standard();
    let (services, _) = build_services(kb.path());
    colored::control::set_override(false);

    let response = services.kb.search_default("quick fox").unwrap();
    let text = render(&response);
    assert!(text.contains("A.md"));
    assert!(text.contains("Quick Fox"));

    let mut params = services.kb.default_search_params();
    params.min_score = 0.99;
    let none = services.kb.search("zzzz", params).unwrap();
    assert!(render(&none).contains("No results"));

    let blank = services.kb.search_default("").unwrap();
    assert!(render(&blank).contains("Query is empty"));
}
