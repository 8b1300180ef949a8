//! Synthetic wire-diagram generation.
//!
//! A diagram is four colored wires laid on a 20×20 grid, alternating rows
//! and columns, each wire a different color. Its label depends only on the
//! order in which colors were placed: Red followed (at any distance) by
//! Yellow is dangerous.
//!
//! # Quick Start
//!
//! ```
//! use rand::{rngs::StdRng, SeedableRng};
//! use wirelab::synthetic::{DiagramGenerator, Label};
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let batch = DiagramGenerator::new().generate_many(10, &mut rng);
//! assert_eq!(batch.len(), 10);
//! assert!(batch.iter().all(|(d, _)| d.is_complete()));
//! # let _ = Label::Safe;
//! ```

mod diagram;
mod generator;

pub use diagram::{
    Color, Diagram, Grid, HazardRule, Label, Orientation, Placement, Position, GRID_SIZE,
    PLACEMENTS_PER_DIAGRAM,
};
pub use generator::{label_placements, DiagramGenerator};
