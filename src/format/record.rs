//! Parsing and formatting of individual log records.

use crate::error::{Result, WireError};
use crate::synthetic::{Diagram, Label, Orientation, Placement, Position, PLACEMENTS_PER_DIAGRAM};

/// A diagram together with its stored label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Placement sequence
    pub diagram: Diagram,
    /// Ground-truth label
    pub label: Label,
}

/// Parses one `"<Orientation> <position> <Color>"` field.
///
/// # Errors
///
/// Returns `Parse` for a wrong token count, unknown orientation or color,
/// a non-integer position, or a position off the grid.
pub fn parse_placement(field: &str) -> Result<Placement> {
    let tokens: Vec<&str> = field.split_whitespace().collect();
    let [orientation, position, color] = tokens.as_slice() else {
        return Err(WireError::parse(
            0,
            format!(
                "expected '<Orientation> <position> <Color>', got {} token(s) in '{}'",
                tokens.len(),
                field.trim()
            ),
        ));
    };

    let orientation: Orientation = orientation.parse()?;
    let position: usize = position
        .parse()
        .map_err(|_| WireError::parse(0, format!("position '{position}' is not an integer")))?;
    let position = Position::new(position).map_err(|e| WireError::parse(0, e.to_string()))?;
    let color = color.parse()?;

    Ok(Placement::new(orientation, position, color))
}

fn parse_fields<'a>(fields: impl Iterator<Item = &'a str>) -> Result<Diagram> {
    let placements = fields.map(parse_placement).collect::<Result<Vec<_>>>()?;
    Diagram::new(placements).map_err(|e| WireError::parse(0, e.to_string()))
}

/// Parses an unlabeled inference input: 1 to 4 comma-separated placements.
///
/// # Errors
///
/// Returns `Parse` for malformed fields or sequences that break a diagram
/// invariant.
pub fn parse_diagram(input: &str) -> Result<Diagram> {
    let input = input.trim();
    if input.is_empty() {
        return Err(WireError::parse(0, "empty diagram"));
    }
    parse_fields(input.split(','))
}

/// Parses a labeled log line.
///
/// # Errors
///
/// Returns `Parse` unless the line holds exactly four placements followed by
/// `Safe` or `Dangerous`.
pub fn parse_record(line: &str) -> Result<Record> {
    let fields: Vec<&str> = line.trim().split(',').collect();
    if fields.len() != PLACEMENTS_PER_DIAGRAM + 1 {
        return Err(WireError::parse(
            0,
            format!(
                "expected {} comma-separated fields, got {}",
                PLACEMENTS_PER_DIAGRAM + 1,
                fields.len()
            ),
        ));
    }

    let (label, placements) = fields
        .split_last()
        .ok_or_else(|| WireError::parse(0, "empty record"))?;
    let label: Label = label.trim().parse()?;
    let diagram = parse_fields(placements.iter().copied())?;

    Ok(Record { diagram, label })
}

/// Formats a record exactly as the log stores it.
#[must_use]
pub fn format_record(diagram: &Diagram, label: Label) -> String {
    format!("{diagram}, {label}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthetic::Color;

    const LINE: &str = "Row 12 Red,Column 5 Blue,Row 3 Yellow,Column 18 Green, Dangerous";

    #[test]
    fn test_parse_record() {
        let record = parse_record(LINE).expect("well-formed record");
        assert_eq!(record.label, Label::Dangerous);
        let first = record.diagram.placements()[0];
        assert_eq!(first.orientation, Orientation::Row);
        assert_eq!(first.position.get(), 12);
        assert_eq!(first.color, Color::Red);
        assert_eq!(record.diagram.placements()[3].color, Color::Green);
    }

    #[test]
    fn test_format_matches_log_layout() {
        let record = parse_record(LINE).expect("well-formed record");
        assert_eq!(format_record(&record.diagram, record.label), LINE);
    }

    #[test]
    fn test_parse_tolerates_spaces_after_commas() {
        let line = "Column 1 Yellow, Row 2 Red, Column 3 Blue, Row 4 Green, Safe";
        let record = parse_record(line).expect("spaces around fields are trimmed");
        assert_eq!(record.label, Label::Safe);
        assert_eq!(record.diagram.len(), 4);
    }

    #[test]
    fn test_wrong_field_count() {
        let err = parse_record("Row 1 Red,Column 2 Blue, Safe").unwrap_err();
        assert!(matches!(err, WireError::Parse { .. }));
    }

    #[test]
    fn test_unknown_color() {
        let err = parse_placement("Row 1 Purple").unwrap_err();
        assert!(err.to_string().contains("Purple"));
    }

    #[test]
    fn test_non_integer_position() {
        let err = parse_placement("Row x Red").unwrap_err();
        assert!(err.to_string().contains("not an integer"));
    }

    #[test]
    fn test_position_off_grid() {
        assert!(matches!(
            parse_placement("Column 21 Red"),
            Err(WireError::Parse { .. })
        ));
    }

    #[test]
    fn test_wrong_token_count() {
        assert!(parse_placement("Row 1").is_err());
        assert!(parse_placement("Row 1 Red extra").is_err());
    }

    #[test]
    fn test_unknown_label() {
        let line = "Row 12 Red,Column 5 Blue,Row 3 Yellow,Column 18 Green, Unsure";
        assert!(parse_record(line).is_err());
    }

    #[test]
    fn test_repeated_color_is_parse_error() {
        let line = "Row 1 Red,Column 2 Red,Row 3 Yellow,Column 4 Green, Safe";
        assert!(matches!(parse_record(line), Err(WireError::Parse { .. })));
    }

    #[test]
    fn test_parse_partial_diagram() {
        let diagram = parse_diagram("Row 1 Red,Column 2 Yellow").expect("two placements");
        assert_eq!(diagram.len(), 2);
        assert!(!diagram.is_complete());
    }

    #[test]
    fn test_parse_empty_diagram() {
        assert!(parse_diagram("   ").is_err());
        assert!(parse_diagram("Row 1 Red,").is_err());
    }
}
