//! Vector space model for chunk retrieval.
//!
//! A model is fitted once per build over every chunk text and then
//! answers queries by cosine similarity against its search matrix.
//! Two variants exist:
//!
//! - **Tfidf**: sparse TF-IDF rows searched directly
//! - **Lsa**: TF-IDF followed by a truncated SVD projection and
//!   row normalization (requires the `lsa` feature)
//!
//! Row `i` of the search matrix always corresponds to chunk `i`.

pub mod analyzer;
#[cfg(feature = "lsa")]
pub mod svd;
pub mod tfidf;

use std::fmt;

#[cfg(feature = "lsa")]
use ndarray::Array2;

use crate::core::error::{KbError, Result};
pub use tfidf::{SparseMatrix, SparseVector, TfidfVectorizer};

/// Smallest projection rank worth applying
pub const MIN_SVD_RANK: usize = 2;

/// Rows and columns a matrix needs before a projection is attempted
const MIN_LSA_DIMENSION: usize = 3;

/// Label of the fitted model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    Uninitialized,
    Tfidf,
    Lsa { rank: usize },
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelKind::Uninitialized => write!(f, "uninitialized"),
            ModelKind::Tfidf => write!(f, "tfidf"),
            ModelKind::Lsa { rank } => write!(f, "lsa_tfidf_svd_{rank}"),
        }
    }
}

/// Model fitting parameters
#[derive(Debug, Clone, Copy)]
pub struct ModelParams {
    /// Vocabulary cap
    pub max_features: usize,

    /// Requested projection rank (values below 2 disable the projection)
    pub svd_components: usize,
}

/// Check that the fitting code for `params` is compiled in
///
/// Runs before any document is read, so a build that cannot succeed
/// fails fast.
pub fn ensure_available(params: &ModelParams) -> Result<()> {
    if params.svd_components >= MIN_SVD_RANK && !cfg!(feature = "lsa") {
        return Err(KbError::MissingDependency(format!(
            "svd_components = {} requires the `lsa` feature; rebuild with \
             `--features lsa` or set svd_components to 0",
            params.svd_components
        )));
    }
    Ok(())
}

/// Fitted vector model
#[derive(Debug, Clone)]
pub enum VectorModel {
    Tfidf {
        vectorizer: TfidfVectorizer,
        matrix: SparseMatrix,
    },
    #[cfg(feature = "lsa")]
    Lsa {
        vectorizer: TfidfVectorizer,
        svd: svd::TruncatedSvd,
        normalizer: svd::Normalizer,
        matrix: Array2<f64>,
    },
}

impl VectorModel {
    /// Fit a model over chunk texts
    ///
    /// # Errors
    ///
    /// * `KbError::EmptyCorpus` if there is no text or no text yields a term
    /// * `KbError::MissingDependency` if a projection is requested
    ///   without the `lsa` feature
    pub fn fit<S: AsRef<str>>(texts: &[S], params: &ModelParams) -> Result<Self> {
        ensure_available(params)?;

        if texts.is_empty() {
            return Err(KbError::EmptyCorpus);
        }

        let (vectorizer, matrix) = TfidfVectorizer::fit_transform(texts, params.max_features)?;

        match Self::projection_rank(matrix.n_rows(), matrix.n_cols, params.svd_components) {
            #[cfg(feature = "lsa")]
            Some(rank) => {
                let svd = svd::TruncatedSvd::fit(&matrix, rank, svd::DEFAULT_SEED);
                let normalizer = svd::Normalizer;
                let projected = normalizer.transform(svd.transform(&matrix));

                tracing::info!(
                    "Fitted LSA model: {} chunks, {} terms, rank {}",
                    matrix.n_rows(),
                    matrix.n_cols,
                    rank
                );

                Ok(VectorModel::Lsa {
                    vectorizer,
                    svd,
                    normalizer,
                    matrix: projected,
                })
            }
            #[cfg(not(feature = "lsa"))]
            Some(_) => Err(KbError::MissingDependency(
                "truncated SVD requires the `lsa` feature".to_string(),
            )),
            None => {
                tracing::info!(
                    "Fitted TF-IDF model: {} chunks, {} terms",
                    matrix.n_rows(),
                    matrix.n_cols
                );
                Ok(VectorModel::Tfidf { vectorizer, matrix })
            }
        }
    }

    /// Rank of the projection for a matrix shape, if one applies
    pub fn projection_rank(n_rows: usize, n_cols: usize, svd_components: usize) -> Option<usize> {
        if n_rows < MIN_LSA_DIMENSION || n_cols < MIN_LSA_DIMENSION {
            return None;
        }
        let rank = svd_components.min(n_rows - 1).min(n_cols - 1);
        (rank >= MIN_SVD_RANK).then_some(rank)
    }

    pub fn kind(&self) -> ModelKind {
        match self {
            VectorModel::Tfidf { .. } => ModelKind::Tfidf,
            #[cfg(feature = "lsa")]
            VectorModel::Lsa { svd, .. } => ModelKind::Lsa { rank: svd.rank() },
        }
    }

    /// Number of rows in the search matrix
    pub fn n_rows(&self) -> usize {
        match self {
            VectorModel::Tfidf { matrix, .. } => matrix.n_rows(),
            #[cfg(feature = "lsa")]
            VectorModel::Lsa { matrix, .. } => matrix.nrows(),
        }
    }

    /// Cosine similarity of the query against every row
    ///
    /// The query goes through the same transform chain as the chunks.
    /// Zero vectors score 0 against everything.
    pub fn scores(&self, query: &str) -> Vec<f64> {
        match self {
            VectorModel::Tfidf { vectorizer, matrix } => {
                let q = vectorizer.transform(query);
                let q_norm = q.norm();
                if q_norm == 0.0 {
                    return vec![0.0; matrix.n_rows()];
                }

                let dense = q.to_dense(matrix.n_cols);
                matrix
                    .rows
                    .iter()
                    .map(|row| {
                        let row_norm = row.norm();
                        if row_norm == 0.0 {
                            return 0.0;
                        }
                        let dot: f64 = row.iter().map(|(col, v)| v * dense[col]).sum();
                        dot / (q_norm * row_norm)
                    })
                    .collect()
            }
            #[cfg(feature = "lsa")]
            VectorModel::Lsa {
                vectorizer,
                svd,
                normalizer,
                matrix,
            } => {
                let q = normalizer.transform_row(svd.transform_row(&vectorizer.transform(query)));
                let q_norm = q.dot(&q).sqrt();
                if q_norm == 0.0 {
                    return vec![0.0; matrix.nrows()];
                }

                matrix
                    .outer_iter()
                    .map(|row| {
                        let row_norm = row.dot(&row).sqrt();
                        if row_norm == 0.0 {
                            0.0
                        } else {
                            row.dot(&q) / (q_norm * row_norm)
                        }
                    })
                    .collect()
            }
        }
    }
}
