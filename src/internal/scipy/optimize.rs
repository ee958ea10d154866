//! SciPy optimization functions port.
//!
//! Ported from scipy.optimize.linear_sum_assignment
//! License: BSD 3-Clause (SciPy Developers)

#![allow(clippy::needless_range_loop)]

use nalgebra::DMatrix;

/// Represents a match between a row index and column index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Assignment {
    pub row_idx: usize,
    pub col_idx: usize,
    pub cost: f64,
}

/// Result of linear sum assignment.
#[derive(Debug, Clone)]
pub struct AssignmentResult {
    /// Valid assignments (row, col pairs), sorted by row
    pub assignments: Vec<Assignment>,
    /// Indices of rows that were not matched
    pub unmatched_rows: Vec<usize>,
    /// Indices of columns that were not matched
    pub unmatched_cols: Vec<usize>,
}

impl AssignmentResult {
    fn unmatched(num_rows: usize, num_cols: usize) -> Self {
        Self {
            assignments: Vec::new(),
            unmatched_rows: (0..num_rows).collect(),
            unmatched_cols: (0..num_cols).collect(),
        }
    }
}

/// Solve the linear sum assignment problem using the Hungarian algorithm.
///
/// Finds the optimal assignment between rows and columns to minimize total cost.
/// This is a port of scipy.optimize.linear_sum_assignment.
///
/// # Arguments
/// * `cost_matrix` - cost[(i, j)] is the cost of assigning row i to column j
/// * `max_cost` - Maximum cost threshold; pairs with cost > max_cost are forbidden
///
/// # Returns
/// AssignmentResult containing:
/// - assignments: Valid (row, col) pairs with cost <= max_cost
/// - unmatched_rows: Row indices that were not matched
/// - unmatched_cols: Column indices that were not matched
///
/// # Algorithm
/// Forbidden pairs (cost above `max_cost`, NaN or infinite) are never part of
/// the result. They are replaced by a penalty larger than any combination of
/// allowed costs, so the solver first maximizes the number of allowed pairs
/// and then minimizes their summed cost. The shortest augmenting path variant
/// with row/column potentials runs in O(n^2 m) for n <= m.
pub fn linear_sum_assignment(cost_matrix: &DMatrix<f64>, max_cost: f64) -> AssignmentResult {
    let (num_rows, num_cols) = cost_matrix.shape();
    if num_rows == 0 || num_cols == 0 {
        return AssignmentResult::unmatched(num_rows, num_cols);
    }

    let allowed = |c: f64| c.is_finite() && c <= max_cost;

    let allowed_sum: f64 = cost_matrix.iter().filter(|&&c| allowed(c)).map(|c| c.abs()).sum();
    if cost_matrix.iter().all(|&c| !allowed(c)) {
        return AssignmentResult::unmatched(num_rows, num_cols);
    }
    let penalty = 1.0 + 2.0 * allowed_sum;

    // The solver needs rows <= cols.
    let transposed = num_rows > num_cols;
    let work = if transposed {
        cost_matrix.transpose()
    } else {
        cost_matrix.clone()
    };
    let work = work.map(|c| if allowed(c) { c } else { penalty });

    let col_to_row = hungarian_algorithm(&work);

    let mut assignments = Vec::new();
    let mut matched_rows = vec![false; num_rows];
    let mut matched_cols = vec![false; num_cols];

    for (work_col, work_row) in col_to_row.iter().enumerate() {
        let Some(work_row) = *work_row else { continue };
        let (row, col) = if transposed {
            (work_col, work_row)
        } else {
            (work_row, work_col)
        };
        let cost = cost_matrix[(row, col)];
        if allowed(cost) {
            assignments.push(Assignment {
                row_idx: row,
                col_idx: col,
                cost,
            });
            matched_rows[row] = true;
            matched_cols[col] = true;
        }
    }
    assignments.sort_by_key(|a| a.row_idx);

    let unmatched_rows: Vec<usize> = (0..num_rows).filter(|&i| !matched_rows[i]).collect();
    let unmatched_cols: Vec<usize> = (0..num_cols).filter(|&j| !matched_cols[j]).collect();

    AssignmentResult {
        assignments,
        unmatched_rows,
        unmatched_cols,
    }
}

/// Hungarian algorithm (Kuhn-Munkres) for minimum cost assignment.
///
/// Requires `nrows <= ncols` and finite costs. Returns a vector where
/// `result[j] = Some(i)` means column j is assigned to row i.
fn hungarian_algorithm(cost: &DMatrix<f64>) -> Vec<Option<usize>> {
    let (n, m) = cost.shape();
    debug_assert!(n <= m);

    // 1-based potentials; index 0 is a virtual column holding the row being inserted.
    let mut u = vec![0.0; n + 1];
    let mut v = vec![0.0; m + 1];
    let mut p = vec![0usize; m + 1];
    let mut way = vec![0usize; m + 1];

    for i in 1..=n {
        p[0] = i;
        let mut j0 = 0;
        let mut minv = vec![f64::INFINITY; m + 1];
        let mut used = vec![false; m + 1];

        loop {
            used[j0] = true;
            let i0 = p[j0];
            let mut delta = f64::INFINITY;
            let mut j1 = 0;

            for j in 1..=m {
                if used[j] {
                    continue;
                }
                let reduced = cost[(i0 - 1, j - 1)] - u[i0] - v[j];
                if reduced < minv[j] {
                    minv[j] = reduced;
                    way[j] = j0;
                }
                if minv[j] < delta {
                    delta = minv[j];
                    j1 = j;
                }
            }

            for j in 0..=m {
                if used[j] {
                    u[p[j]] += delta;
                    v[j] -= delta;
                } else {
                    minv[j] -= delta;
                }
            }

            j0 = j1;
            if p[j0] == 0 {
                break;
            }
        }

        // Augment along the alternating path
        loop {
            let j1 = way[j0];
            p[j0] = p[j1];
            j0 = j1;
            if j0 == 0 {
                break;
            }
        }
    }

    (1..=m)
        .map(|j| if p[j] == 0 { None } else { Some(p[j] - 1) })
        .collect()
}
