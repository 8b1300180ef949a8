//! Feature encoding: diagrams to fixed-length numeric vectors.
//!
//! The grid is painted in placement order (later wires overwrite earlier ones
//! where they cross), flattened row-major into 400 palette codes, and in
//! [`EncoderMode::ColorOrder`] followed by the per-placement color codes.
//!
//! # Example
//!
//! ```
//! use wirelab::format::parse_diagram;
//! use wirelab::preprocessing::{DiagramEncoder, EncoderMode};
//!
//! let diagram = parse_diagram("Row 1 Red,Column 1 Blue").expect("valid input");
//! let encoder = DiagramEncoder::new(EncoderMode::ColorOrder);
//! let features = encoder.encode(&diagram);
//!
//! assert_eq!(features.len(), 404);
//! assert_eq!(features[0], 4.0); // crossing cell takes the later color
//! assert_eq!(features[1], 1.0);
//! assert_eq!(&features[400..], &[1.0, 4.0, 0.0, 0.0]);
//! ```

use crate::error::{Result, WireError};
use crate::format::parse_diagram;
use crate::primitives::{Matrix, Vector};
use crate::synthetic::{Diagram, GRID_SIZE, PLACEMENTS_PER_DIAGRAM};
use serde::{Deserialize, Serialize};

/// Number of grid features.
pub const GRID_FEATURES: usize = GRID_SIZE * GRID_SIZE;

/// Which features the encoder emits. Training and inference must agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncoderMode {
    /// Flattened grid only (400 features).
    GridOnly,
    /// Flattened grid plus placement color codes in order (404 features).
    #[default]
    ColorOrder,
}

/// Stateless diagram-to-features encoder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagramEncoder {
    mode: EncoderMode,
}

impl DiagramEncoder {
    /// Creates an encoder for `mode`.
    #[must_use]
    pub fn new(mode: EncoderMode) -> Self {
        Self { mode }
    }

    /// Configured mode.
    #[must_use]
    pub fn mode(&self) -> EncoderMode {
        self.mode
    }

    /// Length of every vector this encoder produces (without intercept).
    #[must_use]
    pub fn feature_len(&self) -> usize {
        match self.mode {
            EncoderMode::GridOnly => GRID_FEATURES,
            EncoderMode::ColorOrder => GRID_FEATURES + PLACEMENTS_PER_DIAGRAM,
        }
    }

    /// Encodes one diagram. Partial diagrams pad the color-order tail with 0.
    #[must_use]
    pub fn encode(&self, diagram: &Diagram) -> Vec<f64> {
        let mut features = Vec::with_capacity(self.feature_len());
        features.extend(diagram.grid().codes().iter().map(|&c| f64::from(c)));

        if self.mode == EncoderMode::ColorOrder {
            let placements = diagram.placements();
            features.extend((0..PLACEMENTS_PER_DIAGRAM).map(|i| {
                placements
                    .get(i)
                    .map_or(0.0, |p| f64::from(p.color.code()))
            }));
        }

        features
    }

    /// Parses and encodes an unlabeled inference line.
    ///
    /// # Errors
    ///
    /// Returns `Parse` if the line is malformed.
    pub fn encode_str(&self, input: &str) -> Result<Vec<f64>> {
        Ok(self.encode(&parse_diagram(input)?))
    }

    /// Encodes many diagrams into a `(n, feature_len)` matrix.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` only if an encoding has the wrong length,
    /// which would indicate a bug in the encoder.
    pub fn encode_batch<'a, I>(&self, diagrams: I) -> Result<Matrix<f64>>
    where
        I: IntoIterator<Item = &'a Diagram>,
    {
        let rows: Vec<Vec<f64>> = diagrams.into_iter().map(|d| self.encode(d)).collect();
        Matrix::from_rows(self.feature_len(), &rows)
    }
}

/// Prepends a constant-1 intercept column.
#[must_use]
pub fn add_intercept(x: &Matrix<f64>) -> Matrix<f64> {
    x.prepend_ones_column()
}

/// Prepends the intercept term to a single feature vector.
#[must_use]
pub fn with_intercept(features: &[f64]) -> Vector<f64> {
    std::iter::once(1.0).chain(features.iter().copied()).collect()
}

/// Checks that a feature vector has the length the encoder would produce.
///
/// # Errors
///
/// Returns `DimensionMismatch` otherwise.
pub fn check_feature_len(encoder: &DiagramEncoder, features: &[f64]) -> Result<()> {
    if features.len() == encoder.feature_len() {
        Ok(())
    } else {
        Err(WireError::dimension_mismatch(
            "features",
            encoder.feature_len(),
            features.len(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthetic::{Color, DiagramGenerator};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn cell(features: &[f64], row: usize, col: usize) -> f64 {
        features[row * GRID_SIZE + col]
    }

    #[test]
    fn test_feature_lengths() {
        assert_eq!(DiagramEncoder::new(EncoderMode::GridOnly).feature_len(), 400);
        assert_eq!(DiagramEncoder::new(EncoderMode::ColorOrder).feature_len(), 404);
        assert_eq!(DiagramEncoder::default().mode(), EncoderMode::ColorOrder);
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let mut rng = StdRng::seed_from_u64(1);
        let encoder = DiagramEncoder::default();
        for (diagram, _) in DiagramGenerator::new().generate_many(20, &mut rng) {
            assert_eq!(encoder.encode(&diagram), encoder.encode(&diagram));
        }
    }

    #[test]
    fn test_later_placement_wins_at_crossing() {
        let encoder = DiagramEncoder::new(EncoderMode::GridOnly);
        let features = encoder
            .encode_str("Row 3 Red,Column 5 Blue,Row 5 Green,Column 3 Yellow")
            .expect("valid diagram");

        // Row 3 (idx 2) x Column 5 (idx 4): Blue placed after Red
        assert_eq!(cell(&features, 2, 4), f64::from(Color::Blue.code()));
        // Row 3 x Column 3 (idx 2): Yellow placed last
        assert_eq!(cell(&features, 2, 2), f64::from(Color::Yellow.code()));
        // Row 5 (idx 4) x Column 5: Green placed after Blue
        assert_eq!(cell(&features, 4, 4), f64::from(Color::Green.code()));
        // Untouched cell
        assert_eq!(cell(&features, 0, 0), 0.0);
        // Plain row cell
        assert_eq!(cell(&features, 2, 19), f64::from(Color::Red.code()));
    }

    #[test]
    fn test_encoding_matches_grid() {
        let mut rng = StdRng::seed_from_u64(8);
        let encoder = DiagramEncoder::default();
        for (diagram, _) in DiagramGenerator::new().generate_many(10, &mut rng) {
            let features = encoder.encode(&diagram);
            let grid = diagram.grid();
            for (f, &code) in features.iter().zip(grid.codes()) {
                assert_eq!(*f, f64::from(code));
            }
            let tail: Vec<f64> = diagram
                .placements()
                .iter()
                .map(|p| f64::from(p.color.code()))
                .collect();
            assert_eq!(&features[GRID_FEATURES..], tail.as_slice());
        }
    }

    #[test]
    fn test_encode_batch_shape() {
        let mut rng = StdRng::seed_from_u64(2);
        let batch = DiagramGenerator::new().generate_many(6, &mut rng);
        let encoder = DiagramEncoder::new(EncoderMode::GridOnly);
        let x = encoder
            .encode_batch(batch.iter().map(|(d, _)| d))
            .expect("encoder emits fixed-length rows");
        assert_eq!(x.shape(), (6, 400));
    }

    #[test]
    fn test_encode_str_reports_parse_errors() {
        let encoder = DiagramEncoder::default();
        assert!(matches!(
            encoder.encode_str("Row one Red"),
            Err(WireError::Parse { .. })
        ));
    }

    #[test]
    fn test_intercept_helpers() {
        let x = Matrix::from_vec(2, 1, vec![3.0, 4.0]).expect("2x1");
        assert_eq!(add_intercept(&x).as_slice(), &[1.0, 3.0, 1.0, 4.0]);
        assert_eq!(with_intercept(&[2.0, 5.0]).as_slice(), &[1.0, 2.0, 5.0]);
    }

    #[test]
    fn test_check_feature_len() {
        let encoder = DiagramEncoder::new(EncoderMode::GridOnly);
        assert!(check_feature_len(&encoder, &[0.0; 400]).is_ok());
        assert!(check_feature_len(&encoder, &[0.0; 404]).is_err());
    }
}
