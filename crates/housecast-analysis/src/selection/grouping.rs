//! Splitting a sample by a grouping variable.

use std::hash::Hash;

use rustc_hash::FxHashMap;

use housecast_core::errors::AnalysisError;

use crate::Result;

/// Row indices of each distinct group, groups in order of first appearance.
pub fn group_indices<G: Eq + Hash>(grouping: &[G]) -> Vec<Vec<usize>> {
    let mut slot: FxHashMap<&G, usize> = FxHashMap::default();
    let mut groups: Vec<Vec<usize>> = Vec::new();
    for (row, key) in grouping.iter().enumerate() {
        let idx = *slot.entry(key).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[idx].push(row);
    }
    groups
}

/// Values of each group, groups in order of first appearance.
pub fn split_by_group<G: Eq + Hash, T: Copy>(grouping: &[G], values: &[T]) -> Result<Vec<Vec<T>>> {
    if grouping.len() != values.len() {
        return Err(AnalysisError::LengthMismatch {
            expected: grouping.len(),
            actual: values.len(),
        });
    }
    Ok(group_indices(grouping)
        .into_iter()
        .map(|rows| rows.into_iter().map(|r| values[r]).collect())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_appearance_order() {
        let groups = group_indices(&["b", "a", "b", "c", "a"]);
        assert_eq!(groups, vec![vec![0, 2], vec![1, 4], vec![3]]);
    }

    #[test]
    fn test_split_values() {
        let split = split_by_group(&[2, 1, 2], &[10.0, 20.0, 30.0]).unwrap();
        assert_eq!(split, vec![vec![10.0, 30.0], vec![20.0]]);
    }

    #[test]
    fn test_split_length_mismatch() {
        assert!(matches!(
            split_by_group(&[1, 2], &[1.0]),
            Err(AnalysisError::LengthMismatch { expected: 2, actual: 1 })
        ));
    }
}
