//! Core compute primitives (Vector, Matrix).
//!
//! Dense row-major `f64` storage for feature matrices and weight vectors.

mod matrix;
mod vector;

pub use matrix::Matrix;
pub use vector::Vector;
