//! Tests for the list-documents and get-document CLI commands

use crate::common::{build_services, create_test_services, TestKb};
use kbsearch::cli::commands::documents::{
    execute_get, execute_list, render_document, render_page, GetArgs, ListArgs,
};
use kbsearch::cli::OutputFormat;

fn get_args(doc_id: &str) -> GetArgs {
    GetArgs {
        doc_id: doc_id.to_string(),
        no_content: false,
        max_chars: None,
    }
}

/// Test listing with defaults
#[test]
fn test_list_documents_human() {
    let kb = TestKb::standard();
    let services = create_test_services(kb.path());

    let args = ListArgs {
        limit: None,
        offset: 0,
        name: None,
    };
    let result = execute_list(args, &services, OutputFormat::Human);
    assert!(result.is_ok(), "List should succeed: {:?}", result.err());
}

/// Test listing with a filter and paging in JSON
#[test]
fn test_list_documents_json_filtered() {
    let kb = TestKb::standard();
    let services = create_test_services(kb.path());

    let args = ListArgs {
        limit: Some(1),
        offset: 0,
        name: Some("lorem".to_string()),
    };
    let result = execute_list(args, &services, OutputFormat::Json);
    assert!(result.is_ok());
}

/// Test fetching an existing document
#[test]
fn test_get_document_found() {
    let kb = TestKb::standard();
    let services = create_test_services(kb.path());

    let result = execute_get(get_args("A.md"), &services, OutputFormat::Human);
    assert!(result.is_ok());

    let mut args = get_args("B.md");
    args.no_content = true;
    let result = execute_get(args, &services, OutputFormat::Json);
    assert!(result.is_ok());
}

/// Unknown documents are an error for humans and a structured answer in JSON
#[test]
fn test_get_document_not_found() {
    let kb = TestKb::standard();
    let services = create_test_services(kb.path());

    let result = execute_get(get_args("missing.md"), &services, OutputFormat::Human);
    let err = result.unwrap_err();
    assert!(err.to_string().contains("missing.md"));

    let result = execute_get(get_args("missing.md"), &services, OutputFormat::Json);
    assert!(result.is_ok());
}

/// Test the human renderers
#[test]
fn test_document_renderers() {
    let kb = TestKb::standard();
    let (services, _) = build_services(kb.path());
    colored::control::set_override(false);

    let page = render_page(&services.kb.list_documents(20, 0, None));
    assert!(page.contains("A.md"));
    assert!(page.contains("C.md"));

    let empty = render_page(&services.kb.list_documents(20, 0, Some("zzz")));
    assert!(!empty.contains("A.md"));

    let document = render_document(&services.kb.get_document("A.md", true, 4000));
    assert!(document.contains("Quick Fox"));
    assert!(document.contains("lazy dog"));
}
