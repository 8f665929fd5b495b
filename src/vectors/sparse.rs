// Sparse vectors: the representation behind item and profile vectors.
//
// A vector of dimensionality D is stored as (index, weight) pairs sorted by
// index with no explicit zeros. Dot products are a linear merge of the two
// entry lists, so comparing against a short genre vector is cheap no matter
// how large the vocabulary grows.

/// A sparse vector with a fixed dimensionality.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseVector {
    dim: usize,
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// The zero vector of dimensionality `dim`.
    pub fn zeros(dim: usize) -> Self {
        Self {
            dim,
            entries: Vec::new(),
        }
    }

    /// Build from (index, weight) pairs in any order. Zero weights are
    /// dropped and duplicate indices are summed.
    pub fn from_entries(dim: usize, mut entries: Vec<(usize, f64)>) -> Self {
        debug_assert!(entries.iter().all(|&(i, _)| i < dim));

        entries.sort_by_key(|&(i, _)| i);
        let mut merged: Vec<(usize, f64)> = Vec::with_capacity(entries.len());
        for (i, w) in entries {
            match merged.last_mut() {
                Some((last, acc)) if *last == i => *acc += w,
                _ => merged.push((i, w)),
            }
        }
        merged.retain(|&(_, w)| w != 0.0);

        Self {
            dim,
            entries: merged,
        }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of non-zero entries.
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    /// Weight at `index` (0.0 when absent).
    pub fn get(&self, index: usize) -> f64 {
        self.entries
            .binary_search_by_key(&index, |&(i, _)| i)
            .map(|pos| self.entries[pos].1)
            .unwrap_or(0.0)
    }

    /// Euclidean (L2) norm.
    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    /// Dot product by merging the two sorted entry lists.
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (a, b) = (&self.entries, &other.entries);
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;

        while i < a.len() && j < b.len() {
            match a[i].0.cmp(&b[j].0) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a[i].1 * b[j].1;
                    i += 1;
                    j += 1;
                }
            }
        }

        sum
    }

    /// Scale to unit length. The zero vector stays zero.
    pub fn normalized(mut self) -> Self {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, w) in &mut self.entries {
                *w /= norm;
            }
        }
        self
    }

    /// Element-wise arithmetic mean of vectors sharing dimensionality `dim`.
    /// An empty input yields the zero vector.
    pub fn mean<'a, I>(dim: usize, vectors: I) -> Self
    where
        I: IntoIterator<Item = &'a SparseVector>,
    {
        let mut sum = vec![0.0_f64; dim];
        let mut count = 0usize;

        for v in vectors {
            debug_assert_eq!(v.dim, dim);
            for &(i, w) in &v.entries {
                sum[i] += w;
            }
            count += 1;
        }

        if count == 0 {
            return Self::zeros(dim);
        }

        let n = count as f64;
        let entries = sum
            .into_iter()
            .enumerate()
            .filter(|&(_, w)| w != 0.0)
            .map(|(i, w)| (i, w / n))
            .collect();

        Self { dim, entries }
    }

    /// Expand into a dense vector of length `dim`.
    pub fn to_dense(&self) -> Vec<f64> {
        let mut dense = vec![0.0; self.dim];
        for &(i, w) in &self.entries {
            dense[i] = w;
        }
        dense
    }
}

/// Cosine similarity between two sparse vectors.
///
/// Applies the full formula (not a bare dot product) because profile
/// vectors are averages of unit vectors and are generally shorter than 1.
/// Returns 0.0 for mismatched dimensionality or a zero vector, and clamps
/// to [0, 1] to absorb floating-point drift.
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    if a.dim != b.dim {
        return 0.0;
    }

    let denom = a.norm() * b.norm();
    if denom < f64::EPSILON {
        0.0
    } else {
        (a.dot(b) / denom).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_entries_sorts_merges_and_drops_zeros() {
        let v = SparseVector::from_entries(5, vec![(3, 1.0), (0, 2.0), (3, 0.5), (1, 0.0)]);
        assert_eq!(v.entries(), &[(0, 2.0), (3, 1.5)]);
        assert_eq!(v.nnz(), 2);
        assert_eq!(v.get(3), 1.5);
        assert_eq!(v.get(1), 0.0);
    }

    #[test]
    fn test_dot_merges_disjoint_and_shared() {
        let a = SparseVector::from_entries(4, vec![(0, 1.0), (2, 2.0)]);
        let b = SparseVector::from_entries(4, vec![(1, 5.0), (2, 3.0), (3, 1.0)]);
        assert!((a.dot(&b) - 6.0).abs() < 1e-12);
        assert!((b.dot(&a) - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_normalized_has_unit_norm() {
        let v = SparseVector::from_entries(3, vec![(0, 3.0), (2, 4.0)]).normalized();
        assert!((v.norm() - 1.0).abs() < 1e-12);
        assert!((v.get(0) - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_zero_vector_normalizes_to_zero() {
        let v = SparseVector::zeros(3).normalized();
        assert!(v.is_zero());
        assert_eq!(v.dim(), 3);
    }

    #[test]
    fn test_mean() {
        let a = SparseVector::from_entries(3, vec![(0, 1.0)]);
        let b = SparseVector::from_entries(3, vec![(1, 1.0)]);
        let mean = SparseVector::mean(3, [&a, &b]);
        assert_eq!(mean.to_dense(), vec![0.5, 0.5, 0.0]);
    }

    #[test]
    fn test_mean_empty_is_zero() {
        let mean = SparseVector::mean(4, std::iter::empty());
        assert!(mean.is_zero());
        assert_eq!(mean.dim(), 4);
    }

    #[test]
    fn test_cosine_identical() {
        let a = SparseVector::from_entries(3, vec![(0, 1.0), (1, 2.0), (2, 3.0)]);
        assert!((cosine_similarity(&a, &a) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_cosine_is_scale_invariant() {
        let a = SparseVector::from_entries(3, vec![(0, 1.0), (1, 2.0)]);
        let b = SparseVector::from_entries(3, vec![(0, 0.25), (1, 0.5)]);
        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_cosine_orthogonal_and_zero() {
        let a = SparseVector::from_entries(3, vec![(0, 1.0)]);
        let b = SparseVector::from_entries(3, vec![(1, 1.0)]);
        assert!(cosine_similarity(&a, &b).abs() < 1e-12);
        assert!(cosine_similarity(&a, &SparseVector::zeros(3)).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_mismatched_dimensions() {
        let a = SparseVector::from_entries(2, vec![(0, 1.0)]);
        let b = SparseVector::from_entries(3, vec![(0, 1.0)]);
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }
}
