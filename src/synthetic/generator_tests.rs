use super::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

fn placement(orientation: Orientation, position: usize, color: Color) -> Placement {
    Placement::new(
        orientation,
        Position::new(position).expect("test positions are in range"),
        color,
    )
}

#[test]
fn test_generated_diagrams_hold_invariants() {
    let mut rng = StdRng::seed_from_u64(42);
    let generator = DiagramGenerator::new();

    for _ in 0..500 {
        let (diagram, _) = generator.generate(&mut rng);
        let placements = diagram.placements();
        assert_eq!(placements.len(), PLACEMENTS_PER_DIAGRAM);

        let colors: HashSet<Color> = placements.iter().map(|p| p.color).collect();
        assert_eq!(colors.len(), PLACEMENTS_PER_DIAGRAM, "colors must be distinct");

        for pair in placements.windows(2) {
            assert_ne!(pair[0].orientation, pair[1].orientation);
        }
        for p in placements {
            assert!((1..=GRID_SIZE).contains(&p.position.get()));
        }
    }
}

#[test]
fn test_generated_label_matches_rule() {
    let mut rng = StdRng::seed_from_u64(3);
    let generator = DiagramGenerator::new();
    for _ in 0..200 {
        let (diagram, label) = generator.generate(&mut rng);
        assert_eq!(diagram.label(generator.rule()), label);
    }
}

#[test]
fn test_generation_is_reproducible_with_seed() {
    let generator = DiagramGenerator::new();
    let a = generator.generate_many(20, &mut StdRng::seed_from_u64(99));
    let b = generator.generate_many(20, &mut StdRng::seed_from_u64(99));
    assert_eq!(a, b);
}

#[test]
fn test_both_labels_and_orientations_occur() {
    let mut rng = StdRng::seed_from_u64(11);
    let batch = DiagramGenerator::new().generate_many(200, &mut rng);

    assert!(batch.iter().any(|(_, l)| *l == Label::Dangerous));
    assert!(batch.iter().any(|(_, l)| *l == Label::Safe));
    assert!(batch
        .iter()
        .any(|(d, _)| d.placements()[0].orientation == Orientation::Row));
    assert!(batch
        .iter()
        .any(|(d, _)| d.placements()[0].orientation == Orientation::Column));
}

#[test]
fn test_red_before_yellow_is_dangerous() {
    let placements = vec![
        placement(Orientation::Row, 1, Color::Red),
        placement(Orientation::Column, 2, Color::Yellow),
        placement(Orientation::Row, 3, Color::Blue),
        placement(Orientation::Column, 4, Color::Green),
    ];
    assert_eq!(label_placements(placements).expect("valid diagram"), Label::Dangerous);
}

#[test]
fn test_yellow_before_red_is_safe() {
    let placements = vec![
        placement(Orientation::Row, 1, Color::Yellow),
        placement(Orientation::Column, 2, Color::Red),
        placement(Orientation::Row, 3, Color::Blue),
        placement(Orientation::Column, 4, Color::Green),
    ];
    assert_eq!(label_placements(placements).expect("valid diagram"), Label::Safe);
}

#[test]
fn test_label_ignores_positions() {
    let rule = HazardRule::default();
    let a = vec![
        placement(Orientation::Column, 20, Color::Green),
        placement(Orientation::Row, 20, Color::Red),
        placement(Orientation::Column, 1, Color::Blue),
        placement(Orientation::Row, 1, Color::Yellow),
    ];
    let b: Vec<Placement> = a
        .iter()
        .enumerate()
        .map(|(i, p)| placement(p.orientation, i + 5, p.color))
        .collect();
    assert_eq!(rule.label(&a), Label::Dangerous);
    assert_eq!(rule.label(&a), rule.label(&b));
}

#[test]
fn test_custom_rule() {
    let rule = HazardRule {
        trigger: Color::Blue,
        hazard: Color::Green,
    };
    let placements = vec![
        placement(Orientation::Row, 1, Color::Blue),
        placement(Orientation::Column, 2, Color::Green),
    ];
    assert_eq!(rule.label(&placements), Label::Dangerous);
    assert_eq!(HazardRule::default().label(&placements), Label::Safe);
}

#[test]
fn test_diagram_rejects_repeated_color() {
    let result = Diagram::new(vec![
        placement(Orientation::Row, 1, Color::Red),
        placement(Orientation::Column, 2, Color::Red),
    ]);
    assert!(result.is_err());
}

#[test]
fn test_diagram_rejects_non_alternating() {
    let result = Diagram::new(vec![
        placement(Orientation::Row, 1, Color::Red),
        placement(Orientation::Row, 2, Color::Blue),
    ]);
    assert!(result.is_err());
}

#[test]
fn test_diagram_rejects_empty_and_oversized() {
    assert!(Diagram::new(Vec::new()).is_err());

    let too_many = vec![
        placement(Orientation::Row, 1, Color::Red),
        placement(Orientation::Column, 2, Color::Blue),
        placement(Orientation::Row, 3, Color::Green),
        placement(Orientation::Column, 4, Color::Yellow),
        placement(Orientation::Row, 5, Color::Red),
    ];
    assert!(Diagram::new(too_many).is_err());
}

#[test]
fn test_position_bounds() {
    assert!(Position::new(0).is_err());
    assert!(Position::new(GRID_SIZE + 1).is_err());
    assert_eq!(Position::new(GRID_SIZE).map(Position::index).ok(), Some(GRID_SIZE - 1));
}

#[test]
fn test_grid_last_write_wins() {
    let diagram = Diagram::new(vec![
        placement(Orientation::Row, 3, Color::Red),
        placement(Orientation::Column, 5, Color::Blue),
    ])
    .expect("valid diagram");
    let grid = diagram.grid();

    assert_eq!(grid.color_at(2, 4), Some(Color::Blue));
    assert_eq!(grid.color_at(2, 0), Some(Color::Red));
    assert_eq!(grid.color_at(0, 4), Some(Color::Blue));
    assert_eq!(grid.color_at(0, 0), None);

    let reversed = Diagram::new(vec![
        placement(Orientation::Column, 5, Color::Blue),
        placement(Orientation::Row, 3, Color::Red),
    ])
    .expect("valid diagram");
    assert_eq!(reversed.grid().color_at(2, 4), Some(Color::Red));
}

#[test]
fn test_palette_codes() {
    let codes: Vec<u8> = Color::ALL.iter().map(|c| c.code()).collect();
    assert_eq!(codes, vec![1, 2, 3, 4]);
    assert_eq!(Color::from_code(0), None);
    assert_eq!(Color::from_code(3), Some(Color::Yellow));
    assert!("Purple".parse::<Color>().is_err());
    assert!("red".parse::<Color>().is_err());
}

#[test]
fn test_diagram_display_matches_log_format() {
    let diagram = Diagram::new(vec![
        placement(Orientation::Row, 12, Color::Red),
        placement(Orientation::Column, 5, Color::Blue),
    ])
    .expect("valid diagram");
    assert_eq!(diagram.to_string(), "Row 12 Red,Column 5 Blue");
}
