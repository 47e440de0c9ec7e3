//! Randomized truncated SVD (latent semantic analysis).
//!
//! Projects sparse TF-IDF rows onto the top `rank` right singular
//! vectors of the training matrix. The range of the matrix is sampled
//! with a seeded random test matrix, refined with power iterations,
//! and the small projected problem is solved exactly with a Jacobi
//! eigendecomposition. Same input and seed give the same projection.

use ndarray::{Array1, Array2, ArrayViewMut1, Axis};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::vector::tfidf::{SparseMatrix, SparseVector};

/// Seed for the random test matrix
pub const DEFAULT_SEED: u64 = 42;

/// Extra sampled dimensions beyond the requested rank
const OVERSAMPLES: usize = 10;

/// Power iterations applied to the sampled range
const POWER_ITERATIONS: usize = 5;

/// Sweeps after which the Jacobi solver gives up converging
const MAX_JACOBI_SWEEPS: usize = 100;

/// Columns below this norm are treated as linearly dependent
const RANK_EPSILON: f64 = 1e-10;

/// Fitted truncated SVD projection
#[derive(Debug, Clone)]
pub struct TruncatedSvd {
    /// Right singular vectors, one per column (`n_features x rank`)
    components: Array2<f64>,

    /// Singular values in descending order
    singular_values: Array1<f64>,
}

impl TruncatedSvd {
    /// Fit a rank-`rank` projection on `matrix`
    ///
    /// `rank` must not exceed `min(n_rows, n_cols)`; callers choose it
    /// below both bounds. Only the narrow `n_rows x sample` side is
    /// orthonormalized, so the cost stays linear in the vocabulary size.
    pub fn fit(matrix: &SparseMatrix, rank: usize, seed: u64) -> Self {
        let n_rows = matrix.n_rows();
        let n_cols = matrix.n_cols;
        let sample = (rank + OVERSAMPLES).min(n_rows).min(n_cols);

        // Step 1: Sample the range of A with a random test matrix
        let mut rng = StdRng::seed_from_u64(seed);
        let omega = Array2::from_shape_fn((n_cols, sample), |_| rng.gen_range(-1.0..1.0));
        let mut q = orthonormalize(sparse_dot(matrix, &omega));

        // Step 2: Power iterations sharpen the spectrum: Q <- orth(A A^T Q)
        for _ in 0..POWER_ITERATIONS {
            q = orthonormalize(sparse_dot(matrix, &sparse_t_dot(matrix, &q)));
        }

        // Step 3: Z = A^T Q is B^T, so B B^T = Z^T Z (sample x sample)
        let z = sparse_t_dot(matrix, &q);
        let (eigenvalues, eigenvectors) = symmetric_eigen(z.t().dot(&z));

        // Step 4: V = Z U_b / S for the leading pairs
        let mut basis = Array2::zeros((sample, rank));
        let mut singular_values = Array1::zeros(rank);
        for (k, &(value, col)) in eigenvalues.iter().take(rank).enumerate() {
            let sigma = value.max(0.0).sqrt();
            singular_values[k] = sigma;
            if sigma > RANK_EPSILON {
                basis.column_mut(k).assign(&(&eigenvectors.column(col) / sigma));
            }
        }

        let mut components = z.dot(&basis);
        for v_k in components.columns_mut() {
            flip_sign(v_k);
        }

        tracing::debug!(
            "Truncated SVD: {} x {} -> rank {}, top singular value {:.4}",
            n_rows,
            n_cols,
            rank,
            singular_values.get(0).copied().unwrap_or(0.0)
        );

        Self {
            components,
            singular_values,
        }
    }

    /// Number of output dimensions
    pub fn rank(&self) -> usize {
        self.components.ncols()
    }

    /// Project a sparse row: `x V`
    pub fn transform_row(&self, row: &SparseVector) -> Array1<f64> {
        let mut projected = Array1::zeros(self.rank());
        for (col, value) in row.iter() {
            projected.scaled_add(value, &self.components.row(col));
        }
        projected
    }

    /// Project every row of a sparse matrix
    pub fn transform(&self, matrix: &SparseMatrix) -> Array2<f64> {
        let mut projected = Array2::zeros((matrix.n_rows(), self.rank()));
        for (i, row) in matrix.rows.iter().enumerate() {
            projected.row_mut(i).assign(&self.transform_row(row));
        }
        projected
    }
}

/// Row-wise L2 normalization applied after the projection
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer;

impl Normalizer {
    /// Scale every row to unit length; zero rows stay zero
    pub fn transform(&self, mut matrix: Array2<f64>) -> Array2<f64> {
        for mut row in matrix.axis_iter_mut(Axis(0)) {
            let norm = row.dot(&row).sqrt();
            if norm > 0.0 {
                row /= norm;
            }
        }
        matrix
    }

    pub fn transform_row(&self, mut row: Array1<f64>) -> Array1<f64> {
        let norm = row.dot(&row).sqrt();
        if norm > 0.0 {
            row /= norm;
        }
        row
    }
}

/// A (sparse) * dense: `(n_rows x n_cols) * (n_cols x k)`
fn sparse_dot(matrix: &SparseMatrix, dense: &Array2<f64>) -> Array2<f64> {
    let mut out = Array2::zeros((matrix.n_rows(), dense.ncols()));
    for (i, row) in matrix.rows.iter().enumerate() {
        let mut out_row = out.row_mut(i);
        for (col, value) in row.iter() {
            out_row.scaled_add(value, &dense.row(col));
        }
    }
    out
}

/// A^T (sparse) * dense: `(n_cols x n_rows) * (n_rows x k)`
fn sparse_t_dot(matrix: &SparseMatrix, dense: &Array2<f64>) -> Array2<f64> {
    let mut out = Array2::zeros((matrix.n_cols, dense.ncols()));
    for (i, row) in matrix.rows.iter().enumerate() {
        let dense_row = dense.row(i);
        for (col, value) in row.iter() {
            out.row_mut(col).scaled_add(value, &dense_row);
        }
    }
    out
}

/// Orthonormalize the columns of a tall `n x k` matrix
///
/// Runs modified Gram-Schmidt over the rows of the transposed copy so
/// every vector is contiguous. Columns that collapse to (near) zero are
/// zeroed rather than normalized, so the result may have fewer than
/// `k` useful columns.
fn orthonormalize(m: Array2<f64>) -> Array2<f64> {
    let mut basis = m.reversed_axes().as_standard_layout().into_owned();

    for j in 0..basis.nrows() {
        let (done, mut rest) = basis.view_mut().split_at(Axis(0), j);
        let mut row = rest.row_mut(0);
        for prev in done.rows() {
            let proj = prev.dot(&row);
            row.scaled_add(-proj, &prev);
        }

        let norm = row.dot(&row).sqrt();
        if norm > RANK_EPSILON {
            row /= norm;
        } else {
            row.fill(0.0);
        }
    }

    basis.reversed_axes().as_standard_layout().into_owned()
}

/// Eigendecomposition of a symmetric matrix by cyclic Jacobi rotations
///
/// Returns `(eigenvalue, column)` pairs sorted by descending eigenvalue
/// (ties by column) and the eigenvector matrix (one vector per column).
fn symmetric_eigen(mut a: Array2<f64>) -> (Vec<(f64, usize)>, Array2<f64>) {
    let n = a.nrows();
    let mut v = Array2::<f64>::eye(n);

    for _ in 0..MAX_JACOBI_SWEEPS {
        let off_diagonal: f64 = (0..n)
            .flat_map(|p| ((p + 1)..n).map(move |q| (p, q)))
            .map(|(p, q)| a[[p, q]] * a[[p, q]])
            .sum();
        let scale: f64 = a.iter().map(|x| x * x).sum();
        if off_diagonal <= f64::EPSILON * f64::EPSILON * scale.max(f64::MIN_POSITIVE) {
            break;
        }

        for p in 0..n {
            for q in (p + 1)..n {
                let apq = a[[p, q]];
                if apq == 0.0 {
                    continue;
                }

                let theta = (a[[q, q]] - a[[p, p]]) / (2.0 * apq);
                let t = theta.signum() / (theta.abs() + (theta * theta + 1.0).sqrt());
                let c = 1.0 / (t * t + 1.0).sqrt();
                let s = t * c;

                // A <- J^T A J
                for k in 0..n {
                    let akp = a[[k, p]];
                    let akq = a[[k, q]];
                    a[[k, p]] = c * akp - s * akq;
                    a[[k, q]] = s * akp + c * akq;
                }
                for k in 0..n {
                    let apk = a[[p, k]];
                    let aqk = a[[q, k]];
                    a[[p, k]] = c * apk - s * aqk;
                    a[[q, k]] = s * apk + c * aqk;
                }

                // V <- V J
                for k in 0..n {
                    let vkp = v[[k, p]];
                    let vkq = v[[k, q]];
                    v[[k, p]] = c * vkp - s * vkq;
                    v[[k, q]] = s * vkp + c * vkq;
                }
            }
        }
    }

    let mut eigenvalues: Vec<(f64, usize)> = (0..n).map(|i| (a[[i, i]], i)).collect();
    eigenvalues.sort_by(|x, y| y.0.total_cmp(&x.0).then(x.1.cmp(&y.1)));

    (eigenvalues, v)
}

/// Make the largest-magnitude entry positive
fn flip_sign(mut vector: ArrayViewMut1<f64>) {
    let pivot = vector
        .iter()
        .copied()
        .fold(0.0f64, |best, x| if x.abs() > best.abs() { x } else { best });
    if pivot < 0.0 {
        vector.mapv_inplace(|x| -x);
    }
}
