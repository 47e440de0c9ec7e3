// Knowledge base lifecycle: before the first build, rebuilds, failed
// rebuilds and searches racing a rebuild.

use crate::common::{assert_valid_stats, build_services, create_test_services, TestKb};
use kbsearch::core::config::Config;
use kbsearch::core::services::Services;
use kbsearch::core::store::BUILT_AT_FORMAT;
use std::fs;
use std::sync::Arc;
use std::thread;

#[test]
fn test_stats_before_build() {
    let kb = TestKb::standard();
    let services = create_test_services(kb.path());

    let stats = services.kb.stats();
    assert_eq!(stats.documents_count, 0);
    assert_eq!(stats.chunks_count, 0);
    assert_eq!(stats.total_chars, 0);
    assert_eq!(stats.model_kind, "uninitialized");
    assert!(stats.built_at.is_none());
    assert!(stats.build_duration_ms.is_none());
    assert_eq!(stats.chunk_size, 1400);
}

#[test]
fn test_search_before_build_is_not_ready() {
    let kb = TestKb::standard();
    let services = create_test_services(kb.path());

    let err = services.kb.search_default("quick fox").unwrap_err();
    assert!(err.is_not_ready());
}

#[test]
fn test_blank_query_before_build_is_answered() {
    let kb = TestKb::standard();
    let services = create_test_services(kb.path());

    let response = services.kb.search_default("").unwrap();
    assert!(response.error.is_some());
    assert_eq!(response.model_kind, "uninitialized");
}

#[test]
fn test_build_reports_stats() {
    let kb = TestKb::standard();
    let (services, stats) = build_services(kb.path());

    assert_valid_stats(&stats);
    assert_eq!(stats.documents_count, 3);
    assert_eq!(stats.chunks_count, 3);

    let built_at = stats.built_at.clone().unwrap();
    assert!(chrono::NaiveDateTime::parse_from_str(&built_at, BUILT_AT_FORMAT).is_ok());

    let expected_dir = fs::canonicalize(kb.path()).unwrap();
    assert_eq!(stats.kb_dir, expected_dir.display().to_string());

    let again = services.kb.stats();
    assert_eq!(again.documents_count, stats.documents_count);
    assert_eq!(again.built_at, stats.built_at);
}

#[test]
fn test_rebuild_is_idempotent() {
    let kb = TestKb::generated(10);
    let (services, first) = build_services(kb.path());
    let first_response = services.kb.search_default("rust search").unwrap();

    let second = services.kb.build().unwrap();
    let second_response = services.kb.search_default("rust search").unwrap();

    assert_eq!(first.documents_count, second.documents_count);
    assert_eq!(first.chunks_count, second.chunks_count);
    assert_eq!(first.total_chars, second.total_chars);
    assert_eq!(first.model_kind, second.model_kind);

    let ids = |r: &kbsearch::SearchResponse| {
        r.results
            .iter()
            .map(|h| (h.chunk_id.clone(), h.score))
            .collect::<Vec<_>>()
    };
    assert_eq!(ids(&first_response), ids(&second_response));
}

#[test]
fn test_rebuild_picks_up_new_files() {
    let mut kb = TestKb::standard();
    let (services, first) = build_services(kb.path());
    assert_eq!(first.documents_count, 3);

    kb.write("D.md", "# Otters\n\nSea otters hold hands while they sleep.");
    let second = services.kb.build().unwrap();

    assert_eq!(second.documents_count, 4);
    assert!(services.kb.get_document("D.md", false, 4000).found);
}

#[test]
fn test_failed_rebuild_keeps_previous_index() {
    let kb = TestKb::standard();
    let (services, first) = build_services(kb.path());

    for file in &kb.files {
        fs::remove_file(file).unwrap();
    }

    let err = services.kb.build().unwrap_err();
    assert!(err.is_config_error());

    assert!(services.kb.is_built());
    let stats = services.kb.stats();
    assert_eq!(stats.documents_count, first.documents_count);
    assert_eq!(stats.built_at, first.built_at);

    let response = services.kb.search_default("quick fox").unwrap();
    assert_eq!(response.results[0].doc_id, "A.md");
}

#[test]
fn test_zero_chunk_size_is_rejected() {
    let kb = TestKb::standard();
    let mut config = Config::for_dir(kb.path());
    config.index.chunk_size = 0;
    let services = Services::new(config);

    let err = services.kb.build().unwrap_err();
    assert!(err.is_config_error());
    assert!(!services.kb.is_built());
}

#[cfg(not(feature = "lsa"))]
#[test]
fn test_lsa_without_feature_is_setup_error() {
    let kb = TestKb::standard();
    let services = Services::new(Config::for_dir(kb.path()));

    let err = services.kb.build().unwrap_err();
    assert!(err.is_setup_error());
}

#[test]
fn test_searches_during_rebuild() {
    let kb = TestKb::generated(20);
    let (services, stats) = build_services(kb.path());
    let expected_docs = stats.documents_count;

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let services: Arc<Services> = Arc::clone(&services);
            thread::spawn(move || {
                for _ in 0..25 {
                    let response = services.kb.search_default("cache index").unwrap();
                    assert!(response.error.is_none());
                    assert!(!response.results.is_empty());
                    assert_eq!(services.kb.stats().documents_count, expected_docs);
                }
            })
        })
        .collect();

    for _ in 0..5 {
        services.kb.build().unwrap();
    }

    for reader in readers {
        reader.join().unwrap();
    }
    assert!(services.kb.is_built());
}
