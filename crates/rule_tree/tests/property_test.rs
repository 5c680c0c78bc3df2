use proptest::prelude::*;
use rule_tree::backward::{RulePaths, backward_over_paths, backward_reasoning};
use rule_tree::conf::BackwardMode;
use rule_tree::domain::AttributeDomain;
use rule_tree::entropy::{entropy_of_counts, entropy_term, node_entropy};
use rule_tree::forward::forward_reasoning;
use rule_tree::provider::{RowValues, ScriptedValues};
use rule_tree::split::information_gain;
use rule_tree::table::Table;
use rule_tree::tree::build_tree;
use rule_tree::value::AttributeValue;

const COLUMNS: [&str; 4] = ["a", "b", "c", "label"];
const LEVELS: [&str; 3] = ["p", "q", "r"];

/// Rows over three 3-valued attributes; the label is a fixed function of
/// the attributes so the table never contradicts itself.
fn consistent_table() -> impl Strategy<Value = Table> {
    (
        prop::collection::vec(any::<bool>(), 27),
        prop::collection::vec((0usize..3, 0usize..3, 0usize..3), 1..24),
    )
        .prop_map(|(labels, rows)| {
            let rows = rows
                .into_iter()
                .map(|(a, b, c)| {
                    let label = if labels[a * 9 + b * 3 + c] { "yes" } else { "no" };
                    vec![
                        AttributeValue::from(LEVELS[a]),
                        AttributeValue::from(LEVELS[b]),
                        AttributeValue::from(LEVELS[c]),
                        AttributeValue::from(label),
                    ]
                })
                .collect();
            Table::from_rows("label", &COLUMNS, rows).unwrap()
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn entropy_stays_within_bounds(counts in prop::collection::vec(0usize..50, 1..6)) {
        let h = entropy_of_counts(&counts);
        let classes = counts.iter().filter(|&&c| c > 0).count().max(1);
        prop_assert!(h >= 0.0);
        prop_assert!(h <= (classes as f64).log2() + 1e-9);
    }

    #[test]
    fn entropy_term_ignores_empty_inputs(n in 0usize..100) {
        prop_assert_eq!(entropy_term(0, n), 0.0);
        prop_assert_eq!(entropy_term(n, 0), 0.0);
    }

    #[test]
    fn gain_never_exceeds_parent_entropy(table in consistent_table()) {
        let rows = table.all_rows();
        let parent = node_entropy(&rows, "label").unwrap();
        for attribute in ["a", "b", "c"] {
            let gain = information_gain(&rows, attribute, "label").unwrap();
            prop_assert!(gain >= 0.0);
            prop_assert!(gain <= parent + 1e-9);
        }
    }

    #[test]
    fn forward_reproduces_every_training_row(table in consistent_table()) {
        let tree = build_tree(&table, "label").unwrap();
        for row in table.rows() {
            let got = forward_reasoning(&tree, &mut RowValues::new(&row)).unwrap();
            prop_assert_eq!(&got, &row["label"]);
        }
    }

    #[test]
    fn backward_accepts_each_of_its_own_paths(table in consistent_table()) {
        let tree = build_tree(&table, "label").unwrap();
        let domain = AttributeDomain::from_table(&table);
        let paths = RulePaths::from_tree(&tree);
        for goal in paths.conclusions() {
            for path in paths.paths_for(goal).unwrap() {
                let mut answers = ScriptedValues::from_pairs(
                    path.iter().map(|(a, v)| (a.clone(), v.to_string())),
                );
                prop_assert!(backward_reasoning(&tree, &domain, "label", goal, &mut answers).unwrap());
            }
        }
    }

    #[test]
    fn confirming_rejects_paths_of_other_conclusions(table in consistent_table()) {
        let tree = build_tree(&table, "label").unwrap();
        let domain = AttributeDomain::from_table(&table);
        let paths = RulePaths::from_tree(&tree);
        let Some(no) = paths.paths_for("no") else {
            return Ok(());
        };
        if paths.paths_for("yes").is_none() {
            return Ok(());
        }
        for path in no {
            let mut answers = ScriptedValues::from_pairs(
                path.iter().map(|(a, v)| (a.clone(), v.to_string())),
            );
            let reachable = backward_over_paths(
                &paths,
                &domain,
                "label",
                "yes",
                BackwardMode::Confirm,
                &mut answers,
            );
            prop_assert!(!reachable.unwrap());
        }
    }
}
