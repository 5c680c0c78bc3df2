mod common;

use common::*;
use rule_tree::conf::BranchPolicy;
use rule_tree::error::BuildError;
use rule_tree::table::Table;
use rule_tree::tree::{DecisionTree, TreeBuilder, build_tree};
use rule_tree::value::AttributeValue;
use std::collections::BTreeMap;

fn leaf(label: &str) -> DecisionTree {
    DecisionTree::Leaf(text(label))
}

fn internal(attribute: &str, children: Vec<(AttributeValue, DecisionTree)>) -> DecisionTree {
    DecisionTree::Internal {
        attribute: attribute.to_string(),
        children: children.into_iter().collect::<BTreeMap<_, _>>(),
    }
}

#[test]
fn weather_example_builds_one_split() {
    let table = weather_table();
    let tree = build_tree(&table, "play").unwrap();
    let expected = internal(
        "weather",
        vec![(text("sunny"), leaf("yes")), (text("rainy"), leaf("no"))],
    );
    assert_eq!(tree, expected);
    assert_eq!(tree.depth(), 1);
    assert_eq!(tree.n_leaves(), 2);
}

#[test]
fn tennis_tree_matches_id3() {
    let tree = TreeBuilder::default().build(&tennis_table()).unwrap();
    let expected = internal(
        "outlook",
        vec![
            (
                text("sunny"),
                internal(
                    "humidity",
                    vec![(text("high"), leaf("no")), (text("normal"), leaf("yes"))],
                ),
            ),
            (text("overcast"), leaf("yes")),
            (
                text("rain"),
                internal(
                    "wind",
                    vec![(text("weak"), leaf("yes")), (text("strong"), leaf("no"))],
                ),
            ),
        ],
    );
    assert_eq!(tree, expected);
    assert_eq!(tree.depth(), 2);
    assert_eq!(tree.n_leaves(), 5);
    let attributes: Vec<&str> = tree.attributes().into_iter().collect();
    assert_eq!(attributes, ["humidity", "outlook", "wind"]);
}

#[test]
fn pure_table_is_a_single_leaf() {
    let table = text_table(
        "play",
        &["weather", "play"],
        &[&["sunny", "yes"], &["rainy", "yes"]],
    );
    let tree = build_tree(&table, "play").unwrap();
    assert_eq!(tree, leaf("yes"));
    assert!(tree.is_leaf());
    assert_eq!(tree.depth(), 0);
}

#[test]
fn xor_uses_fallback_then_recovers() {
    let tree = build_tree(&xor_table(), "label").unwrap();
    let t = AttributeValue::Bool(true);
    let f = AttributeValue::Bool(false);
    let expected = internal(
        "a",
        vec![
            (
                t.clone(),
                internal("b", vec![(t.clone(), leaf("no")), (f.clone(), leaf("yes"))]),
            ),
            (
                f.clone(),
                internal("b", vec![(t.clone(), leaf("yes")), (f.clone(), leaf("no"))]),
            ),
        ],
    );
    assert_eq!(tree, expected);
}

#[test]
fn conflicting_rows_end_in_majority_leaf() {
    let table = text_table(
        "label",
        &["colour", "size", "label"],
        &[
            &["red", "big", "yes"],
            &["red", "big", "no"],
            &["red", "big", "no"],
            &["blue", "big", "yes"],
        ],
    );
    let tree = build_tree(&table, "label").unwrap();
    let expected = internal(
        "colour",
        vec![(text("red"), leaf("no")), (text("blue"), leaf("yes"))],
    );
    assert_eq!(tree, expected);
}

#[test]
fn majority_tie_goes_to_first_seen_label() {
    let table = text_table(
        "label",
        &["colour", "label"],
        &[&["red", "yes"], &["red", "no"]],
    );
    assert_eq!(build_tree(&table, "label").unwrap(), leaf("yes"));
}

#[test]
fn observed_policy_only_branches_on_seen_values() {
    let tree = build_tree(&sparse_table(), "play").unwrap();
    let expected = internal(
        "outlook",
        vec![
            (
                text("sunny"),
                internal(
                    "temperature",
                    vec![(text("hot"), leaf("no")), (text("mild"), leaf("yes"))],
                ),
            ),
            (text("rainy"), leaf("yes")),
        ],
    );
    assert_eq!(tree, expected);
}

#[test]
fn boolean_policy_branches_true_false() {
    let t = AttributeValue::Bool(true);
    let f = AttributeValue::Bool(false);
    let table = Table::from_rows(
        "plan",
        &["raining", "windy", "plan"],
        vec![
            vec![t.clone(), t.clone(), "stay".into()],
            vec![t.clone(), f.clone(), "stay".into()],
            vec![f.clone(), t.clone(), "stay".into()],
            vec![f.clone(), f.clone(), "go".into()],
        ],
    )
    .unwrap();
    let tree = TreeBuilder::new(BranchPolicy::Boolean).build(&table).unwrap();
    let expected = internal(
        "raining",
        vec![
            (t.clone(), leaf("stay")),
            (
                f.clone(),
                internal("windy", vec![(t.clone(), leaf("stay")), (f.clone(), leaf("go"))]),
            ),
        ],
    );
    assert_eq!(tree, expected);
}

#[test]
fn boolean_policy_rejects_text_attributes() {
    let err = TreeBuilder::new(BranchPolicy::Boolean)
        .build(&weather_table())
        .unwrap_err();
    assert!(matches!(err, BuildError::NonBooleanAttribute(ref a) if a == "weather"));
}

#[test]
fn empty_table_is_an_error() {
    let table = Table::from_rows("play", &["weather", "play"], Vec::new()).unwrap();
    assert!(matches!(build_tree(&table, "play"), Err(BuildError::EmptyTable)));
}

#[test]
fn impure_table_without_attributes_is_an_error() {
    let table = text_table("play", &["play"], &[&["yes"], &["no"]]);
    assert!(matches!(build_tree(&table, "play"), Err(BuildError::NoAttributes)));
}

#[test]
fn unknown_conclusion_is_an_error() {
    let err = build_tree(&weather_table(), "outcome").unwrap_err();
    assert!(matches!(err, BuildError::UnknownAttribute(ref a) if a == "outcome"));
}

#[test]
fn conclusions_and_rendering() {
    let tree = build_tree(&tennis_table(), "play").unwrap();
    let labels: Vec<String> = tree.conclusions().iter().map(|v| v.to_string()).collect();
    assert_eq!(labels, ["no", "yes"]);

    let rendered = tree.to_string();
    assert!(rendered.starts_with("outlook\n"), "got:\n{rendered}");
    assert!(rendered.contains("  = overcast => yes\n"), "got:\n{rendered}");
    assert!(rendered.contains("    humidity\n"), "got:\n{rendered}");
}

#[test]
fn conclusion_name_is_case_insensitive() {
    let table = weather_table();
    assert_eq!(
        build_tree(&table, "Play").unwrap(),
        build_tree(&table, "play").unwrap()
    );
    let builder = TreeBuilder::default();
    assert_eq!(builder.policy(), BranchPolicy::Observed);
    assert!(builder.build_for(&table, " PLAY ").is_ok());
}

#[test]
fn gain_tolerance_turns_every_split_into_a_fallback() {
    let table = tennis_table();
    let sunny = text("sunny");

    let id3 = TreeBuilder::default().build(&table).unwrap();
    assert_eq!(id3.child(&sunny).unwrap().attribute(), Some("humidity"));

    // Nothing clears the tolerance, so the first attribute that still varies is used.
    let blunt = TreeBuilder::default()
        .with_gain_tolerance(10.0)
        .build(&table)
        .unwrap();
    assert_eq!(blunt.attribute(), Some("outlook"));
    assert_eq!(blunt.child(&sunny).unwrap().attribute(), Some("temperature"));
    for row in table.rows() {
        let mut node = &blunt;
        while let Some(attribute) = node.attribute() {
            node = node.child(&row[attribute]).unwrap();
        }
        assert!(node.is_leaf());
    }
}
