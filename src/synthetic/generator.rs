//! Random diagram generation with ground-truth labels.

use super::diagram::{
    Color, Diagram, HazardRule, Label, Orientation, Placement, Position, GRID_SIZE,
    PLACEMENTS_PER_DIAGRAM,
};
use crate::error::Result;
use rand::Rng;

/// Produces random complete diagrams and labels them with a [`HazardRule`].
///
/// The random source is always supplied by the caller, so a seeded
/// `StdRng` makes generation reproducible.
///
/// # Examples
///
/// ```
/// use rand::{rngs::StdRng, SeedableRng};
/// use wirelab::synthetic::DiagramGenerator;
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let (diagram, label) = DiagramGenerator::new().generate(&mut rng);
/// assert_eq!(diagram.len(), 4);
/// assert_eq!(diagram.label(&Default::default()), label);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DiagramGenerator {
    rule: HazardRule,
}

impl DiagramGenerator {
    /// Generator using the default Red-before-Yellow rule.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the labeling rule.
    #[must_use]
    pub fn with_rule(mut self, rule: HazardRule) -> Self {
        self.rule = rule;
        self
    }

    /// The labeling rule in use.
    #[must_use]
    pub fn rule(&self) -> &HazardRule {
        &self.rule
    }

    /// Generates one diagram and its label.
    ///
    /// Orientation starts at random and alternates; each position is drawn
    /// independently from `1..=GRID_SIZE`; colors are drawn without
    /// replacement from the palette.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> (Diagram, Label) {
        let mut orientation = if rng.gen_bool(0.5) {
            Orientation::Row
        } else {
            Orientation::Column
        };
        let mut remaining: Vec<Color> = Color::ALL.to_vec();
        let mut placements = Vec::with_capacity(PLACEMENTS_PER_DIAGRAM);

        for _ in 0..PLACEMENTS_PER_DIAGRAM {
            let position = Position::new(rng.gen_range(1..=GRID_SIZE))
                .unwrap_or_else(|_| unreachable!("sampled inside 1..=GRID_SIZE"));
            let color = remaining.swap_remove(rng.gen_range(0..remaining.len()));
            placements.push(Placement::new(orientation, position, color));
            orientation = orientation.flipped();
        }

        let label = self.rule.label(&placements);
        let diagram = Self::assemble(placements);
        (diagram, label)
    }

    /// Generates `count` labeled diagrams.
    pub fn generate_many<R: Rng>(&self, count: usize, rng: &mut R) -> Vec<(Diagram, Label)> {
        (0..count).map(|_| self.generate(rng)).collect()
    }

    fn assemble(placements: Vec<Placement>) -> Diagram {
        match Diagram::new(placements) {
            Ok(diagram) => diagram,
            Err(err) => unreachable!("generator broke a diagram invariant: {err}"),
        }
    }
}

/// Labels an already parsed placement sequence with the default rule.
///
/// # Errors
///
/// Returns `InvalidDiagram` if the placements do not form a valid diagram.
pub fn label_placements(placements: Vec<Placement>) -> Result<Label> {
    Ok(Diagram::new(placements)?.label(&HazardRule::default()))
}

#[cfg(test)]
#[path = "generator_tests.rs"]
mod tests;
