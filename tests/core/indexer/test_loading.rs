// Folder loading: which files become documents

use crate::common::{build_services, create_test_services, TestKb};
use std::fs;

#[test]
fn test_only_top_level_markdown_is_indexed() {
    let mut kb = TestKb::standard();
    kb.write("notes.txt", "Plain text is ignored.");
    fs::create_dir(kb.path().join("nested")).unwrap();
    fs::write(kb.path().join("nested/deep.md"), "# Deep\n\nNot indexed.").unwrap();

    let (services, stats) = build_services(kb.path());
    assert_eq!(stats.documents_count, 3);

    let ids: Vec<String> = services
        .kb
        .list_documents(200, 0, None)
        .items
        .into_iter()
        .map(|d| d.doc_id)
        .collect();
    assert_eq!(ids, vec!["A.md", "B.md", "C.md"]);
}

#[test]
fn test_blank_documents_are_skipped() {
    let mut kb = TestKb::standard();
    kb.write("empty.md", "\n\n   \n");

    let (services, stats) = build_services(kb.path());
    assert_eq!(stats.documents_count, 3);
    assert!(!services.kb.get_document("empty.md", false, 4000).found);
}

#[test]
fn test_title_falls_back_to_file_stem() {
    let kb = TestKb::with_files(&[
        ("untitled.md", "#\n\nOnly a bare hash on the first line."),
        ("linked.md", "[Linked Page](https://example.com/page)\n\nBody."),
        ("third.md", "Plain first line\n\nSecond paragraph."),
    ]);

    let (services, _) = build_services(kb.path());

    let title = |id: &str| {
        services
            .kb
            .get_document(id, false, 4000)
            .document
            .unwrap()
            .title
    };
    assert_eq!(title("untitled.md"), "untitled");
    assert_eq!(title("linked.md"), "Linked Page");
    assert_eq!(title("third.md"), "Plain first line");
}

#[test]
fn test_missing_folder_is_config_error() {
    let kb = TestKb::standard();
    let services = create_test_services(&kb.path().join("does-not-exist"));

    let err = services.kb.build().unwrap_err();
    assert!(err.is_config_error());
    assert!(!services.kb.is_built());
}

#[test]
fn test_folder_without_markdown_is_config_error() {
    let kb = TestKb::with_files(&[("readme.txt", "no markdown here")]);
    let services = create_test_services(kb.path());

    let err = services.kb.build().unwrap_err();
    assert!(err.is_config_error());
}
