#![allow(dead_code)]

use polars::prelude::*;
use rule_tree::table::Table;
use rule_tree::value::AttributeValue;

pub const TENNIS_ROWS: [[&str; 5]; 14] = [
    ["sunny", "hot", "high", "weak", "no"],
    ["sunny", "hot", "high", "strong", "no"],
    ["overcast", "hot", "high", "weak", "yes"],
    ["rain", "mild", "high", "weak", "yes"],
    ["rain", "cool", "normal", "weak", "yes"],
    ["rain", "cool", "normal", "strong", "no"],
    ["overcast", "cool", "normal", "strong", "yes"],
    ["sunny", "mild", "high", "weak", "no"],
    ["sunny", "cool", "normal", "weak", "yes"],
    ["rain", "mild", "normal", "weak", "yes"],
    ["sunny", "mild", "normal", "strong", "yes"],
    ["overcast", "mild", "high", "strong", "yes"],
    ["overcast", "hot", "normal", "weak", "yes"],
    ["rain", "mild", "high", "strong", "no"],
];

pub const TENNIS_COLUMNS: [&str; 5] = ["outlook", "temperature", "humidity", "wind", "play"];

/// Classic play-tennis data as a polars frame.
pub fn tennis_frame() -> DataFrame {
    let columns: Vec<Column> = TENNIS_COLUMNS
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let values: Vec<&str> = TENNIS_ROWS.iter().map(|row| row[i]).collect();
            Series::new(PlSmallStr::from_str(name), values).into()
        })
        .collect();
    DataFrame::new(columns).unwrap()
}

pub fn tennis_table() -> Table {
    Table::new(&tennis_frame(), "play").unwrap()
}

pub fn text_table(conclusion: &str, columns: &[&str], rows: &[&[&str]]) -> Table {
    let rows = rows
        .iter()
        .map(|row| row.iter().map(|v| AttributeValue::from(*v)).collect())
        .collect();
    Table::from_rows(conclusion, columns, rows).unwrap()
}

/// weather -> play, three rows.
pub fn weather_table() -> Table {
    text_table(
        "play",
        &["weather", "play"],
        &[&["sunny", "yes"], &["sunny", "yes"], &["rainy", "no"]],
    )
}

/// Under `outlook = sunny` only `hot` and `mild` temperatures were seen.
pub fn sparse_table() -> Table {
    text_table(
        "play",
        &["outlook", "temperature", "play"],
        &[
            &["sunny", "hot", "no"],
            &["sunny", "mild", "yes"],
            &["rainy", "hot", "yes"],
            &["rainy", "cool", "yes"],
            &["rainy", "mild", "yes"],
            &["rainy", "hot", "yes"],
        ],
    )
}

/// Label is `a xor b`: neither attribute gains anything at the root.
pub fn xor_table() -> Table {
    let t = AttributeValue::Bool(true);
    let f = AttributeValue::Bool(false);
    Table::from_rows(
        "label",
        &["a", "b", "label"],
        vec![
            vec![t.clone(), t.clone(), "no".into()],
            vec![t.clone(), f.clone(), "yes".into()],
            vec![f.clone(), t.clone(), "yes".into()],
            vec![f.clone(), f.clone(), "no".into()],
        ],
    )
    .unwrap()
}

pub fn text(value: &str) -> AttributeValue {
    AttributeValue::from(value)
}
