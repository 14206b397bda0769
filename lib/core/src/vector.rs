use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A dense feature vector
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vector {
    data: Vec<f32>,
}

impl Vector {
    #[inline]
    #[must_use]
    pub fn new(data: Vec<f32>) -> Self {
        Self { data }
    }

    #[inline]
    #[must_use]
    pub fn zeros(dim: usize) -> Self {
        Self {
            data: vec![0.0; dim],
        }
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.data.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Sub-slice covering one block of the feature layout
    #[inline]
    pub fn block(&self, range: Range<usize>) -> &[f32] {
        &self.data[range]
    }

    #[inline]
    pub fn dot(&self, other: &Vector) -> f32 {
        crate::simd::dot_product_simd(&self.data, &other.data)
    }

    #[inline]
    pub fn norm(&self) -> f32 {
        crate::simd::norm_simd(&self.data)
    }

    /// Compute cosine similarity with another vector
    ///
    /// A zero-norm vector is similar to nothing: the result is 0.0 rather
    /// than NaN. Mismatched dimensions also yield 0.0.
    #[inline]
    pub fn cosine_similarity(&self, other: &Vector) -> f32 {
        if self.dim() != other.dim() {
            return 0.0;
        }
        cosine_with_norms(self.dot(other), self.norm(), other.norm())
    }

    /// True when every component is exactly zero
    pub fn is_zero(&self) -> bool {
        self.data.iter().all(|x| *x == 0.0)
    }
}

/// Cosine from a precomputed dot product and norms
///
/// Zero norms and overflowed inputs give 0.0, never NaN.
#[inline]
pub fn cosine_with_norms(dot: f32, norm_a: f32, norm_b: f32) -> f32 {
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    let cosine = dot / (norm_a * norm_b);
    if cosine.is_finite() {
        cosine
    } else {
        0.0
    }
}

impl From<Vec<f32>> for Vector {
    fn from(data: Vec<f32>) -> Self {
        Vector::new(data)
    }
}
