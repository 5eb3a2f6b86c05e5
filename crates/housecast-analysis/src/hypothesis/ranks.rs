//! Ranking with average ranks for ties.

use std::cmp::Ordering;

/// 1-based ranks, ties receiving the average of the ranks they span.
///
/// Also returns the tie-correction term `Σ (t³ - t)` over tie groups.
pub fn rank_average(values: &[f64]) -> (Vec<f64>, f64) {
    let n = values.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| values[a].partial_cmp(&values[b]).unwrap_or(Ordering::Equal));

    let mut ranks = vec![0.0; n];
    let mut tie_term = 0.0;
    let mut i = 0;
    while i < n {
        let mut j = i;
        while j < n && values[order[j]] == values[order[i]] {
            j += 1;
        }
        let avg_rank = (i + j - 1) as f64 / 2.0 + 1.0;
        for &idx in &order[i..j] {
            ranks[idx] = avg_rank;
        }
        let t = (j - i) as f64;
        tie_term += t * t * t - t;
        i = j;
    }

    (ranks, tie_term)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranks_without_ties() {
        let (ranks, ties) = rank_average(&[30.0, 10.0, 20.0]);
        assert_eq!(ranks, vec![3.0, 1.0, 2.0]);
        assert_eq!(ties, 0.0);
    }

    #[test]
    fn test_ranks_with_ties() {
        let (ranks, ties) = rank_average(&[1.0, 2.0, 2.0, 3.0]);
        assert_eq!(ranks, vec![1.0, 2.5, 2.5, 4.0]);
        // One pair tied: 2^3 - 2
        assert_eq!(ties, 6.0);
    }
}
