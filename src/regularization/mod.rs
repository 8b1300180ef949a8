//! Weight penalties for regularized logistic regression.
//!
//! # Techniques
//! - L1: `Σ|wᵢ|`, sub-gradient `sign(wᵢ)`; drives weights to exactly zero
//! - L2: `Σwᵢ²`, gradient `wᵢ`; shrinks weights smoothly

use crate::primitives::Vector;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Penalty applied to the weight vector during fitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegularizationKind {
    /// Unpenalized
    None,
    /// Lasso
    #[default]
    L1,
    /// Ridge
    L2,
}

impl RegularizationKind {
    /// Penalty term before scaling: `Σ|wᵢ|` (L1), `Σwᵢ²` (L2), 0 (None).
    #[must_use]
    pub fn penalty(self, weights: &Vector<f64>) -> f64 {
        match self {
            Self::None => 0.0,
            Self::L1 => weights.l1_norm(),
            Self::L2 => weights.squared_norm(),
        }
    }

    /// Adds `strength · ∂penalty/∂w / rows` to `grad`, every weight including
    /// the intercept.
    pub fn add_gradient(self, grad: &mut Vector<f64>, weights: &Vector<f64>, strength: f64, rows: usize) {
        if self == Self::None || strength == 0.0 {
            return;
        }
        let scale = strength / rows as f64;
        for (g, &w) in grad.as_mut_slice().iter_mut().zip(weights.as_slice()) {
            *g += match self {
                Self::L1 => scale * sign(w),
                Self::L2 => scale * w,
                Self::None => 0.0,
            };
        }
    }
}

impl fmt::Display for RegularizationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::L1 => f.write_str("l1"),
            Self::L2 => f.write_str("l2"),
        }
    }
}

/// Sign with `sign(0) = 0`, so a weight sitting at zero gets no L1 push.
fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}
