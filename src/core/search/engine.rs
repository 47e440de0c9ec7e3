//! Similarity ranking over an index generation.
//!
//! The engine is read-only: it scores the query against every chunk
//! of one generation, walks the chunks in descending score order and
//! keeps hits until the score floor or the result limit is reached.

use std::collections::HashSet;
use std::time::Instant;

use crate::core::search::snippet::{self, DEFAULT_SNIPPET_LEN};
use crate::core::store::Generation;
use crate::core::types::{SearchHit, SearchResponse};

/// Upper bound for `top_k`
pub const MAX_TOP_K: usize = 50;

/// Message returned for blank queries
pub const EMPTY_QUERY_ERROR: &str = "Query is empty";

/// Decimal places kept in reported scores
const SCORE_DECIMALS: i32 = 6;

/// Effective search parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchParams {
    pub top_k: usize,
    pub min_score: f64,
    pub deduplicate_docs: bool,
}

impl SearchParams {
    /// Clamp into the accepted ranges
    ///
    /// `top_k` is bounded to `[1, 50]` and `min_score` to `[-1, 1]`;
    /// a NaN floor accepts everything.
    pub fn clamped(self) -> Self {
        let min_score = if self.min_score.is_nan() {
            -1.0
        } else {
            self.min_score.clamp(-1.0, 1.0)
        };

        Self {
            top_k: self.top_k.clamp(1, MAX_TOP_K),
            min_score,
            deduplicate_docs: self.deduplicate_docs,
        }
    }
}

/// Response for a query that is blank after trimming
pub fn empty_query_response(
    query: &str,
    params: SearchParams,
    model_kind: String,
) -> SearchResponse {
    let params = params.clamped();
    SearchResponse {
        query: query.trim().to_string(),
        top_k: params.top_k,
        min_score: params.min_score,
        deduplicate_docs: params.deduplicate_docs,
        model_kind,
        results_count: 0,
        results: Vec::new(),
        error: Some(EMPTY_QUERY_ERROR.to_string()),
    }
}

/// Rank the chunks of `generation` against a non-blank query
pub fn search(generation: &Generation, query: &str, params: SearchParams) -> SearchResponse {
    let start = Instant::now();
    let params = params.clamped();
    let query = query.trim();

    let scores = generation.model.scores(query);

    // Descending score; equal scores keep chunk order
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]).then(a.cmp(&b)));

    let mut seen_docs: HashSet<&str> = HashSet::new();
    let mut results = Vec::with_capacity(params.top_k);

    for idx in order {
        // Rounding is monotone, so the first miss ends the walk
        let Some(score) = reported_score(scores[idx], params.min_score) else {
            break;
        };

        let chunk = &generation.chunks[idx];
        if params.deduplicate_docs && !seen_docs.insert(chunk.doc_id.as_str()) {
            continue;
        }

        let (title, path) = generation
            .document(&chunk.doc_id)
            .map(|doc| (doc.title.clone(), doc.path.clone()))
            .unwrap_or_default();

        results.push(SearchHit {
            chunk_id: chunk.chunk_id.clone(),
            doc_id: chunk.doc_id.clone(),
            title,
            chunk_index: chunk.chunk_index,
            score,
            snippet: snippet::extract(&chunk.text, query, DEFAULT_SNIPPET_LEN),
            path,
        });

        if results.len() >= params.top_k {
            break;
        }
    }

    tracing::debug!(
        "Search '{}' returned {} results in {}ms",
        query,
        results.len(),
        start.elapsed().as_millis()
    );

    SearchResponse {
        query: query.to_string(),
        top_k: params.top_k,
        min_score: params.min_score,
        deduplicate_docs: params.deduplicate_docs,
        model_kind: generation.model_kind().to_string(),
        results_count: results.len(),
        results,
        error: None,
    }
}

/// Rounded score if it clears the floor; the floor applies to the
/// value the caller sees
fn reported_score(raw: f64, min_score: f64) -> Option<f64> {
    let score = round_score(raw);
    (score >= min_score).then_some(score)
}

fn round_score(score: f64) -> f64 {
    let factor = 10f64.powi(SCORE_DECIMALS);
    (score * factor).round() / factor
}
