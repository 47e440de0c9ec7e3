// Decoding of non-UTF-8 and BOM-prefixed sources
//
// Knowledge bases scraped from older sites mix encodings; every file
// must still load as text.

use crate::common::{build_services, TestKb};
use encoding_rs::WINDOWS_1251;

#[test]
fn test_cp1251_document_is_decoded() {
    let mut kb = TestKb::standard();
    let (bytes, _, had_errors) = WINDOWS_1251.encode("# Привет\n\nПривет мир, это заметка.");
    assert!(!had_errors);
    kb.write_bytes("russian.md", &bytes);

    let (services, stats) = build_services(kb.path());
    assert_eq!(stats.documents_count, 4);

    let lookup = services.kb.get_document("russian.md", true, 4000);
    let document = lookup.document.expect("russian.md should be indexed");
    assert_eq!(document.title, "Привет");
    assert!(document.content.unwrap().contains("Привет мир"));
}

#[test]
fn test_utf8_bom_is_stripped() {
    let mut kb = TestKb::standard();
    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    bytes.extend_from_slice("# Bom Title\n\nBody text here.".as_bytes());
    kb.write_bytes("bom.md", &bytes);

    let (services, _) = build_services(kb.path());

    let document = services
        .kb
        .get_document("bom.md", true, 4000)
        .document
        .unwrap();
    assert_eq!(document.title, "Bom Title");
    assert!(!document.content.unwrap().starts_with('\u{feff}'));
}

#[test]
fn test_cyrillic_query_finds_cp1251_document() {
    let mut kb = TestKb::standard();
    let (bytes, _, _) = WINDOWS_1251.encode("# Заметка\n\nКэширование данных в памяти.");
    kb.write_bytes("cache_ru.md", &bytes);

    let (services, _) = build_services(kb.path());
    let response = services.kb.search_default("кэширование данных").unwrap();

    assert_eq!(response.results[0].doc_id, "cache_ru.md");
}

#[test]
fn test_accented_query_matches_plain_text() {
    let kb = TestKb::with_files(&[
        ("cafe.md", "# Cafe\n\nOur cafe serves espresso every morning."),
        ("tea.md", "# Tea\n\nGreen tea is brewed in the kitchen."),
        ("bread.md", "# Bread\n\nSourdough bread is baked in the kitchen."),
    ]);

    let (services, _) = build_services(kb.path());
    let response = services.kb.search_default("café espresso").unwrap();

    assert_eq!(response.results[0].doc_id, "cafe.md");
}
