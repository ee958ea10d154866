//! Greedy minimum-distance matching between two point sets.

use nalgebra::DMatrix;

/// Match sources to targets using greedy minimum-distance matching.
///
/// Repeatedly takes the globally closest remaining (source, target) pair whose
/// distance is within `threshold`, until no such pair is left. Ties are broken
/// in row-major order (lower source index first, then lower target index).
///
/// # Arguments
/// * `distance_matrix` - Distance matrix (n_sources x n_targets)
/// * `threshold` - Maximum distance for a valid match
///
/// # Returns
/// Tuple of (matched_source_indices, matched_target_indices) where entry i
/// indicates the matched pair, in the order the pairs were taken. Unmatched
/// sources/targets are not included.
pub fn greedy_match(distance_matrix: &DMatrix<f64>, threshold: f64) -> (Vec<usize>, Vec<usize>) {
    let n_sources = distance_matrix.nrows();
    let n_targets = distance_matrix.ncols();

    if n_sources == 0 || n_targets == 0 {
        return (Vec::new(), Vec::new());
    }

    // Collect all valid (distance, source_idx, target_idx) pairs
    let mut pairs: Vec<(f64, usize, usize)> = Vec::new();
    for i in 0..n_sources {
        for j in 0..n_targets {
            let dist = distance_matrix[(i, j)];
            if dist.is_finite() && dist <= threshold {
                pairs.push((dist, i, j));
            }
        }
    }

    // Stable sort keeps row-major order among equal distances
    pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut used_sources = vec![false; n_sources];
    let mut used_targets = vec![false; n_targets];

    let mut matched_sources = Vec::new();
    let mut matched_targets = Vec::new();

    for (_dist, source_idx, target_idx) in pairs {
        if used_sources[source_idx] || used_targets[target_idx] {
            continue;
        }

        matched_sources.push(source_idx);
        matched_targets.push(target_idx);
        used_sources[source_idx] = true;
        used_targets[target_idx] = true;

        if matched_sources.len() == n_sources.min(n_targets) {
            break;
        }
    }

    (matched_sources, matched_targets)
}

/// Get unmatched indices from a match result.
pub fn get_unmatched(total: usize, matched: &[usize]) -> Vec<usize> {
    let mut is_matched = vec![false; total];
    for &idx in matched {
        is_matched[idx] = true;
    }
    (0..total).filter(|&i| !is_matched[i]).collect()
}
