// Chunk boundaries as seen through a built index

use crate::common::{build_services, TestKb};
use kbsearch::core::config::Config;
use kbsearch::core::services::Services;

fn long_document() -> String {
    (0..12)
        .map(|i| format!("Paragraph {i} talks about topic{i} in some detail."))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[test]
fn test_small_documents_make_one_chunk_each() {
    let kb = TestKb::standard();
    let (services, stats) = build_services(kb.path());

    assert_eq!(stats.chunks_count, 3);
    let generation = services.kb.current().unwrap();
    for chunk in &generation.chunks {
        assert_eq!(chunk.chunk_index, 0);
        assert_eq!(chunk.chunk_id, format!("{}::chunk-0", chunk.doc_id));
    }
}

#[test]
fn test_long_document_is_split_within_chunk_size() {
    let text = long_document();
    let kb = TestKb::with_files(&[
        ("long.md", text.as_str()),
        ("B.md", "# Lorem\n\nLorem ipsum dolor sit amet."),
        ("C.md", "# Cache\n\nWrite-through caching."),
    ]);

    let mut config = Config::for_dir(kb.path());
    config.index.chunk_size = 120;
    config.index.chunk_overlap = 20;
    let services = Services::new(config);
    let stats = services.kb.build().unwrap();

    let generation = services.kb.current().unwrap();
    let long_chunks: Vec<_> = generation
        .chunks
        .iter()
        .filter(|c| c.doc_id == "long.md")
        .collect();

    assert!(long_chunks.len() > 1);
    assert_eq!(stats.chunks_count, long_chunks.len() + 2);
    for (i, chunk) in long_chunks.iter().enumerate() {
        assert_eq!(chunk.chunk_index, i);
        assert!(chunk.text.chars().count() <= 120);
        assert!(!chunk.text.trim().is_empty());
    }
}

#[test]
fn test_chunks_follow_document_order() {
    let kb = TestKb::generated(8);
    let (services, _) = build_services(kb.path());

    let generation = services.kb.current().unwrap();
    let doc_ids: Vec<&str> = generation.chunks.iter().map(|c| c.doc_id.as_str()).collect();
    let mut sorted = doc_ids.clone();
    sorted.sort();
    assert_eq!(doc_ids, sorted);
}
