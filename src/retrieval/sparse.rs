//! Sparse term-weight vectors keyed by vocabulary id.

/// Sparse vector: parallel arrays of term ids (strictly ascending) and weights.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    indices: Vec<u32>,
    values: Vec<f64>,
}

impl SparseVector {
    /// Build a vector from `(term id, weight)` pairs in any order.
    ///
    /// Weights for a repeated id are summed.
    pub fn from_pairs(mut pairs: Vec<(u32, f64)>) -> Self {
        pairs.sort_by_key(|&(idx, _)| idx);
        let mut indices: Vec<u32> = Vec::with_capacity(pairs.len());
        let mut values: Vec<f64> = Vec::with_capacity(pairs.len());
        for (idx, value) in pairs {
            if indices.last() == Some(&idx) {
                if let Some(last) = values.last_mut() {
                    *last += value;
                }
            } else {
                indices.push(idx);
                values.push(value);
            }
        }
        Self { indices, values }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Weight stored for `idx`, or 0.0 when the term is absent.
    pub fn get(&self, idx: u32) -> f64 {
        self.indices
            .binary_search(&idx)
            .map(|pos| self.values[pos])
            .unwrap_or(0.0)
    }

    /// Sum of squared weights.
    pub fn squared_norm(&self) -> f64 {
        self.values.iter().map(|v| v * v).sum()
    }

    /// Euclidean length of the weights; 0.0 for an empty vector.
    pub fn norm(&self) -> f64 {
        self.squared_norm().sqrt()
    }

    /// Dot product over the intersection of both key sets.
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let mut sum = 0.0f64;
        let (mut i, mut j) = (0, 0);
        while i < self.indices.len() && j < other.indices.len() {
            match self.indices[i].cmp(&other.indices[j]) {
                std::cmp::Ordering::Equal => {
                    sum += self.values[i] * other.values[j];
                    i += 1;
                    j += 1;
                }
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
            }
        }
        sum
    }

    /// Iterate `(term id, weight)` pairs in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }
}
