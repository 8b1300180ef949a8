//! Wire-diagram data model: palette, placements, diagrams, labels and the
//! painted grid.

use crate::error::{Result, WireError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Side length of the square wire grid.
pub const GRID_SIZE: usize = 20;

/// Number of placements in a complete diagram (equal to the palette size).
pub const PLACEMENTS_PER_DIAGRAM: usize = 4;

/// Wire color. Codes follow the encoder palette table; 0 is reserved for
/// "uncolored".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    /// Palette code 1
    Red,
    /// Palette code 2
    Green,
    /// Palette code 3
    Yellow,
    /// Palette code 4
    Blue,
}

impl Color {
    /// Every palette color, in code order.
    pub const ALL: [Color; PLACEMENTS_PER_DIAGRAM] =
        [Color::Red, Color::Green, Color::Yellow, Color::Blue];

    /// Nonzero palette code.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Color::Red => 1,
            Color::Green => 2,
            Color::Yellow => 3,
            Color::Blue => 4,
        }
    }

    /// Inverse of [`Color::code`]; `None` for 0 and unknown codes.
    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }

    /// Name as written in diagram logs.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Color::Red => "Red",
            Color::Green => "Green",
            Color::Yellow => "Yellow",
            Color::Blue => "Blue",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Color {
    type Err = WireError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| WireError::parse(0, format!("unknown color '{s}'")))
    }
}

/// Whether a placement paints a whole row or a whole column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Horizontal wire
    Row,
    /// Vertical wire
    Column,
}

impl Orientation {
    /// The other orientation.
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Orientation::Row => Orientation::Column,
            Orientation::Column => Orientation::Row,
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Row => f.write_str("Row"),
            Orientation::Column => f.write_str("Column"),
        }
    }
}

impl FromStr for Orientation {
    type Err = WireError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Row" => Ok(Orientation::Row),
            "Column" => Ok(Orientation::Column),
            other => Err(WireError::parse(0, format!("unknown orientation '{other}'"))),
        }
    }
}

/// 1-based row/column index in `1..=GRID_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct Position(usize);

impl Position {
    /// Validates a 1-based position.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDiagram` when `value` is outside `1..=GRID_SIZE`.
    pub fn new(value: usize) -> Result<Self> {
        if (1..=GRID_SIZE).contains(&value) {
            Ok(Self(value))
        } else {
            Err(WireError::InvalidDiagram {
                message: format!("position {value} outside 1..={GRID_SIZE}"),
            })
        }
    }

    /// 1-based value as written in logs.
    #[must_use]
    pub fn get(self) -> usize {
        self.0
    }

    /// 0-based grid index.
    #[must_use]
    pub fn index(self) -> usize {
        self.0 - 1
    }
}

impl TryFrom<usize> for Position {
    type Error = WireError;

    fn try_from(value: usize) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Position> for usize {
    fn from(p: Position) -> usize {
        p.0
    }
}

/// A single colored row or column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    /// Row or column
    pub orientation: Orientation,
    /// Which row or column
    pub position: Position,
    /// Wire color
    pub color: Color,
}

impl Placement {
    /// Creates a placement.
    #[must_use]
    pub fn new(orientation: Orientation, position: Position, color: Color) -> Self {
        Self {
            orientation,
            position,
            color,
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.orientation, self.position.get(), self.color)
    }
}

/// Ground-truth safety label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    /// Class 0
    Safe,
    /// Class 1
    Dangerous,
}

impl Label {
    /// Binary class index used by the classifier (Dangerous = 1).
    #[must_use]
    pub fn class(self) -> usize {
        match self {
            Label::Safe => 0,
            Label::Dangerous => 1,
        }
    }

    /// Maps a predicted class back to a label; any nonzero class is Dangerous.
    #[must_use]
    pub fn from_class(class: usize) -> Self {
        if class == 0 {
            Label::Safe
        } else {
            Label::Dangerous
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Safe => f.write_str("Safe"),
            Label::Dangerous => f.write_str("Dangerous"),
        }
    }
}

impl FromStr for Label {
    type Err = WireError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Safe" => Ok(Label::Safe),
            "Dangerous" => Ok(Label::Dangerous),
            other => Err(WireError::parse(0, format!("unknown label '{other}'"))),
        }
    }
}

/// Ordering rule that decides the label: a diagram is dangerous when the
/// hazard color is placed after the trigger color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HazardRule {
    /// Color that arms the rule
    pub trigger: Color,
    /// Color that is dangerous once armed
    pub hazard: Color,
}

impl Default for HazardRule {
    fn default() -> Self {
        Self {
            trigger: Color::Red,
            hazard: Color::Yellow,
        }
    }
}

impl HazardRule {
    /// Labels a placement sequence by scanning it in order.
    ///
    /// Only color order matters; positions and orientations are ignored.
    #[must_use]
    pub fn label(&self, placements: &[Placement]) -> Label {
        let mut armed = false;
        for placement in placements {
            if placement.color == self.trigger {
                armed = true;
            } else if armed && placement.color == self.hazard {
                return Label::Dangerous;
            }
        }
        Label::Safe
    }
}

/// Ordered sequence of placements with distinct colors and strictly
/// alternating orientation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Diagram {
    placements: Vec<Placement>,
}

impl Diagram {
    /// Validates and wraps a placement sequence.
    ///
    /// Sequences shorter than [`PLACEMENTS_PER_DIAGRAM`] are accepted so that
    /// partially drawn diagrams can still be classified.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDiagram` if the sequence is empty, too long, repeats
    /// a color, or does not alternate orientation.
    pub fn new(placements: Vec<Placement>) -> Result<Self> {
        if placements.is_empty() || placements.len() > PLACEMENTS_PER_DIAGRAM {
            return Err(WireError::InvalidDiagram {
                message: format!(
                    "expected 1..={PLACEMENTS_PER_DIAGRAM} placements, got {}",
                    placements.len()
                ),
            });
        }

        for (i, placement) in placements.iter().enumerate() {
            if placements[..i].iter().any(|p| p.color == placement.color) {
                return Err(WireError::InvalidDiagram {
                    message: format!("color {} used more than once", placement.color),
                });
            }
        }

        if placements
            .windows(2)
            .any(|pair| pair[0].orientation == pair[1].orientation)
        {
            return Err(WireError::InvalidDiagram {
                message: "orientation must alternate between placements".to_string(),
            });
        }

        Ok(Self { placements })
    }

    /// Placements in sequence order.
    #[must_use]
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Number of placements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    /// Always false for a validated diagram; provided for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// True when every palette color has been placed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.placements.len() == PLACEMENTS_PER_DIAGRAM
    }

    /// Label under the given rule.
    #[must_use]
    pub fn label(&self, rule: &HazardRule) -> Label {
        rule.label(&self.placements)
    }

    /// Paints the diagram onto a fresh grid.
    #[must_use]
    pub fn grid(&self) -> Grid {
        Grid::paint(&self.placements)
    }
}

impl fmt::Display for Diagram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, placement) in self.placements.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{placement}")?;
        }
        Ok(())
    }
}

/// `GRID_SIZE × GRID_SIZE` palette codes, row-major; 0 means uncolored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<u8>,
}

impl Grid {
    /// An uncolored grid.
    #[must_use]
    pub fn blank() -> Self {
        Self {
            cells: vec![0; GRID_SIZE * GRID_SIZE],
        }
    }

    /// Applies placements in order; later placements overwrite earlier ones
    /// at intersecting cells.
    #[must_use]
    pub fn paint(placements: &[Placement]) -> Self {
        let mut grid = Self::blank();
        for placement in placements {
            grid.apply(placement);
        }
        grid
    }

    /// Paints one whole row or column.
    pub fn apply(&mut self, placement: &Placement) {
        let idx = placement.position.index();
        let code = placement.color.code();
        match placement.orientation {
            Orientation::Row => {
                self.cells[idx * GRID_SIZE..(idx + 1) * GRID_SIZE].fill(code);
            }
            Orientation::Column => {
                for row in 0..GRID_SIZE {
                    self.cells[row * GRID_SIZE + idx] = code;
                }
            }
        }
    }

    /// Palette code at 0-based `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if either index is `>= GRID_SIZE`.
    #[must_use]
    pub fn code_at(&self, row: usize, col: usize) -> u8 {
        self.cells[row * GRID_SIZE + col]
    }

    /// Color at 0-based `(row, col)`, if any.
    #[must_use]
    pub fn color_at(&self, row: usize, col: usize) -> Option<Color> {
        Color::from_code(self.code_at(row, col))
    }

    /// Row-major palette codes.
    #[must_use]
    pub fn codes(&self) -> &[u8] {
        &self.cells
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::blank()
    }
}
