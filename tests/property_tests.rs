//! Property-based tests using proptest.
//!
//! These tests verify invariants of generation, labeling, encoding and
//! splitting.

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;
use wirelab::format::{format_record, parse_diagram, parse_record};
use wirelab::model_selection::train_test_split;
use wirelab::prelude::*;
use wirelab::synthetic::GRID_SIZE;

fn generated(seed: u64) -> (Diagram, Label) {
    DiagramGenerator::new().generate(&mut StdRng::seed_from_u64(seed))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn generated_diagrams_hold_invariants(seed in any::<u64>()) {
        let (diagram, _) = generated(seed);
        let placements = diagram.placements();

        prop_assert_eq!(placements.len(), 4);
        let colors: HashSet<Color> = placements.iter().map(|p| p.color).collect();
        prop_assert_eq!(colors.len(), 4);
        for pair in placements.windows(2) {
            prop_assert_ne!(pair[0].orientation, pair[1].orientation);
        }
        for p in placements {
            prop_assert!((1..=GRID_SIZE).contains(&p.position.get()));
        }
    }

    #[test]
    fn label_matches_red_before_yellow(seed in any::<u64>()) {
        let (diagram, label) = generated(seed);
        let colors: Vec<Color> = diagram.placements().iter().map(|p| p.color).collect();
        let red = colors.iter().position(|&c| c == Color::Red);
        let yellow = colors.iter().position(|&c| c == Color::Yellow);
        let expected = match (red, yellow) {
            (Some(r), Some(y)) if r < y => Label::Dangerous,
            _ => Label::Safe,
        };
        prop_assert_eq!(label, expected);
        prop_assert_eq!(diagram.label(&HazardRule::default()), label);
    }

    #[test]
    fn generation_is_reproducible(seed in any::<u64>()) {
        prop_assert_eq!(generated(seed), generated(seed));
    }

    #[test]
    fn records_survive_the_log_format(seed in any::<u64>()) {
        let (diagram, label) = generated(seed);
        let line = format_record(&diagram, label);
        let record = parse_record(&line).expect("formatted records parse");
        prop_assert_eq!(record.diagram, diagram);
        prop_assert_eq!(record.label, label);
    }

    #[test]
    fn encoding_is_deterministic_and_last_write_wins(seed in any::<u64>()) {
        let (diagram, _) = generated(seed);
        let encoder = DiagramEncoder::default();
        let a = encoder.encode(&diagram);
        let b = encoder.encode(&diagram);
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(a.len(), encoder.feature_len());

        // replay the placements cell by cell
        let mut expected = vec![0.0; GRID_SIZE * GRID_SIZE];
        for p in diagram.placements() {
            let idx = p.position.index();
            for k in 0..GRID_SIZE {
                let cell = match p.orientation {
                    Orientation::Row => idx * GRID_SIZE + k,
                    Orientation::Column => k * GRID_SIZE + idx,
                };
                expected[cell] = f64::from(p.color.code());
            }
        }
        prop_assert_eq!(&a[..GRID_SIZE * GRID_SIZE], expected.as_slice());

        let tail: Vec<f64> = diagram
            .placements()
            .iter()
            .map(|p| f64::from(p.color.code()))
            .collect();
        prop_assert_eq!(&a[GRID_SIZE * GRID_SIZE..], tail.as_slice());
    }

    #[test]
    fn partial_diagrams_keep_fixed_length(seed in any::<u64>(), keep in 1usize..=4) {
        let (diagram, _) = generated(seed);
        let prefix: Vec<String> = diagram
            .placements()
            .iter()
            .take(keep)
            .map(ToString::to_string)
            .collect();
        let partial = parse_diagram(&prefix.join(",")).expect("prefix is a valid diagram");
        let features = DiagramEncoder::default().encode(&partial);
        prop_assert_eq!(features.len(), 404);
        prop_assert!(features[400 + keep..].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn split_partitions_every_index(n in 1usize..200, seed in any::<u64>()) {
        let x = Matrix::from_vec(n, 1, (0..n).map(|i| i as f64).collect())
            .expect("n x 1 matrix");
        let y: Vec<usize> = (0..n).map(|i| i % 2).collect();
        let split = train_test_split(&x, &y, 0.8, &mut StdRng::seed_from_u64(seed))
            .expect("valid split");

        prop_assert_eq!(split.n_train(), (n as f64 * 0.8).floor() as usize);
        prop_assert_eq!(split.n_train() + split.n_test(), n);

        let mut seen: Vec<usize> = split
            .train_indices
            .iter()
            .chain(&split.test_indices)
            .copied()
            .collect();
        seen.sort_unstable();
        prop_assert_eq!(seen, (0..n).collect::<Vec<_>>());
    }

    #[test]
    fn predictions_are_binary(seed in any::<u64>(), threshold in 0.0f64..=1.0) {
        let mut rng = StdRng::seed_from_u64(seed);
        let batch = DiagramGenerator::new().generate_many(12, &mut rng);
        let diagrams: Vec<Diagram> = batch.iter().map(|(d, _)| d.clone()).collect();
        let labels: Vec<usize> = batch.iter().map(|(_, l)| l.class()).collect();
        let x = DiagramEncoder::default()
            .encode_batch(&diagrams)
            .expect("encode")
            .prepend_ones_column();

        let mut model = LogisticRegression::new()
            .with_iterations(5)
            .with_decision_threshold(threshold)
            .with_random_state(seed);
        model.fit(&x, &labels).expect("fit");
        let predictions = model.predict(&x).expect("fitted");
        prop_assert!(predictions.iter().all(|&c| c <= 1));
    }
}
