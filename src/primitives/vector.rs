//! Vector type for 1D numeric data.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// A dense 1D vector of values.
///
/// # Examples
///
/// ```
/// use wirelab::primitives::Vector;
///
/// let v = Vector::from_slice(&[1.0, 2.0, 3.0]);
/// assert_eq!(v.len(), 3);
/// assert!((v.dot(&v) - 14.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vector<T> {
    data: Vec<T>,
}

impl<T: Copy> Vector<T> {
    /// Creates a vector that takes ownership of `data`.
    #[must_use]
    pub fn from_vec(data: Vec<T>) -> Self {
        Self { data }
    }

    /// Creates a vector by copying a slice.
    #[must_use]
    pub fn from_slice(data: &[T]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the vector has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the underlying data as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Returns the underlying data as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Iterates over the elements.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Consumes the vector, returning its storage.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl Vector<f64> {
    /// Creates a vector of zeros.
    #[must_use]
    pub fn zeros(len: usize) -> Self {
        Self {
            data: vec![0.0; len],
        }
    }

    /// Dot product.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if the lengths differ.
    #[must_use]
    pub fn dot(&self, other: &Self) -> f64 {
        debug_assert_eq!(self.len(), other.len(), "dot product length mismatch");
        self.data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| a * b)
            .sum()
    }

    /// Sum of absolute values (L1 norm).
    #[must_use]
    pub fn l1_norm(&self) -> f64 {
        self.data.iter().map(|x| x.abs()).sum()
    }

    /// Sum of squares (squared L2 norm).
    #[must_use]
    pub fn squared_norm(&self) -> f64 {
        self.data.iter().map(|x| x * x).sum()
    }
}

impl<T> Index<usize> for Vector<T> {
    type Output = T;

    fn index(&self, idx: usize) -> &T {
        &self.data[idx]
    }
}

impl<T> IndexMut<usize> for Vector<T> {
    fn index_mut(&mut self, idx: usize) -> &mut T {
        &mut self.data[idx]
    }
}

impl<T> FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_norms() {
        let v = Vector::from_slice(&[-3.0, 4.0]);
        assert!((v.l1_norm() - 7.0).abs() < 1e-12);
        assert!((v.squared_norm() - 25.0).abs() < 1e-12);
    }

    #[test]
    fn test_dot_commutative() {
        let u = Vector::from_slice(&[1.0, 2.0, 3.0]);
        let v = Vector::from_slice(&[4.0, 5.0, 6.0]);
        assert!((u.dot(&v) - v.dot(&u)).abs() < 1e-12);
        assert!((u.dot(&v) - 32.0).abs() < 1e-12);
    }

    #[test]
    fn test_index_mut() {
        let mut v = Vector::zeros(3);
        v[1] = 2.5;
        assert_eq!(v.as_slice(), &[0.0, 2.5, 0.0]);
    }

    #[test]
    fn test_collect() {
        let v: Vector<f64> = (0..4).map(f64::from).collect();
        assert_eq!(v.len(), 4);
        assert!(!v.is_empty());
    }
}
