//! TF-IDF vectorizer over unigrams and bigrams.
//!
//! Weights are raw term counts times a smoothed inverse document
//! frequency, `ln((1 + n) / (1 + df)) + 1`, and every row is scaled to
//! unit L2 norm. The vocabulary keeps the `max_features` terms with the
//! highest total count across the corpus.

use std::collections::{BTreeMap, HashMap};

use crate::core::error::{KbError, Result};
use crate::core::vector::analyzer;

/// A sparse row: parallel `(column, value)` pairs sorted by column
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    pub indices: Vec<usize>,
    pub values: Vec<f64>,
}

impl SparseVector {
    /// Euclidean norm
    pub fn norm(&self) -> f64 {
        self.values.iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    /// Scale to unit length; zero vectors are left untouched
    pub fn normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for v in &mut self.values {
                *v /= norm;
            }
        }
    }

    /// Number of stored entries
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    /// Iterate `(column, value)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }

    /// Expand into a dense vector of length `dim`
    pub fn to_dense(&self, dim: usize) -> Vec<f64> {
        let mut dense = vec![0.0; dim];
        for (col, value) in self.iter() {
            dense[col] = value;
        }
        dense
    }
}

/// Row-major sparse matrix
#[derive(Debug, Clone, Default)]
pub struct SparseMatrix {
    pub rows: Vec<SparseVector>,
    pub n_cols: usize,
}

impl SparseMatrix {
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }
}

/// Fitted TF-IDF vectorizer
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    /// Term -> column index (columns ordered lexically by term)
    vocabulary: HashMap<String, usize>,

    /// Inverse document frequency per column
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Learn the vocabulary and idf weights, and return the weighted
    /// matrix of the training texts
    ///
    /// # Errors
    ///
    /// `KbError::EmptyCorpus` if no text yields a single term.
    pub fn fit_transform<S: AsRef<str>>(
        texts: &[S],
        max_features: usize,
    ) -> Result<(Self, SparseMatrix)> {
        let analyzed: Vec<Vec<String>> =
            texts.iter().map(|t| analyzer::terms(t.as_ref())).collect();

        // Corpus frequency and document frequency per term
        let mut counts: BTreeMap<&str, (u64, u64)> = BTreeMap::new();
        for terms in &analyzed {
            let mut seen: Vec<&str> = Vec::with_capacity(terms.len());
            for term in terms {
                let entry = counts.entry(term.as_str()).or_insert((0, 0));
                entry.0 += 1;
                seen.push(term.as_str());
            }
            seen.sort_unstable();
            seen.dedup();
            for term in seen {
                if let Some(entry) = counts.get_mut(term) {
                    entry.1 += 1;
                }
            }
        }

        if counts.is_empty() {
            return Err(KbError::EmptyCorpus);
        }

        // Keep the most frequent terms; ties go to the lexically smaller one
        let mut ranked: Vec<(&str, u64, u64)> =
            counts.iter().map(|(t, (tf, df))| (*t, *tf, *df)).collect();
        if ranked.len() > max_features {
            ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
            ranked.truncate(max_features);
            ranked.sort_by(|a, b| a.0.cmp(b.0));
        }

        let n_docs = texts.len() as f64;
        let mut vocabulary = HashMap::with_capacity(ranked.len());
        let mut idf = Vec::with_capacity(ranked.len());
        for (col, (term, _, df)) in ranked.iter().enumerate() {
            vocabulary.insert(term.to_string(), col);
            idf.push(((1.0 + n_docs) / (1.0 + *df as f64)).ln() + 1.0);
        }

        tracing::debug!(
            "TF-IDF vocabulary: {} terms kept of {}",
            vocabulary.len(),
            counts.len()
        );

        let vectorizer = Self { vocabulary, idf };
        let rows = analyzed.iter().map(|terms| vectorizer.weigh(terms)).collect();
        let matrix = SparseMatrix {
            rows,
            n_cols: vectorizer.n_features(),
        };

        Ok((vectorizer, matrix))
    }

    /// Vectorize a single text with the fitted vocabulary
    ///
    /// Unknown terms are ignored; a text with no known term maps to
    /// the zero vector.
    pub fn transform(&self, text: &str) -> SparseVector {
        self.weigh(&analyzer::terms(text))
    }

    /// Number of columns
    pub fn n_features(&self) -> usize {
        self.idf.len()
    }

    fn weigh(&self, terms: &[String]) -> SparseVector {
        let mut tf: BTreeMap<usize, f64> = BTreeMap::new();
        for term in terms {
            if let Some(&col) = self.vocabulary.get(term) {
                *tf.entry(col).or_insert(0.0) += 1.0;
            }
        }

        let mut row = SparseVector {
            indices: Vec::with_capacity(tf.len()),
            values: Vec::with_capacity(tf.len()),
        };
        for (col, count) in tf {
            row.indices.push(col);
            row.values.push(count * self.idf[col]);
        }
        row.normalize();
        row
    }
}
