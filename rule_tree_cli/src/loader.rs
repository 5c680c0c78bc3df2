//! Case files in the `attribute,value,flag_1..flag_n` layout.
//!
//! Each record names one attribute value and marks, per case, whether the
//! case has it (`1`) or not (anything else). The attribute of the last
//! record is the conclusion.

use anyhow::{Context, Result, bail};
use rule_tree::table::Table;
use rule_tree::value::{AttributeValue, normalize};
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// How records turn into table columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// One text column per attribute, holding the flagged value.
    Categorical,
    /// One boolean column per `attribute=value` pair; the conclusion stays categorical.
    Binary,
}

struct Record {
    attribute: String,
    value: String,
    flags: Vec<bool>,
}

fn read_records<R: Read>(reader: R) -> Result<Vec<Record>> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for (line, result) in csv.records().enumerate() {
        let record = result.with_context(|| format!("reading record {}", line + 1))?;
        if record.len() < 3 {
            bail!(
                "record {} needs an attribute, a value and at least one case flag",
                line + 1
            );
        }
        records.push(Record {
            attribute: normalize(&record[0]),
            value: normalize(&record[1]),
            flags: record.iter().skip(2).map(|flag| flag == "1").collect(),
        });
    }
    if records.is_empty() {
        bail!("no records found");
    }
    Ok(records)
}

/// Attribute names in first-seen order.
fn attribute_order(records: &[Record]) -> Vec<String> {
    let mut order: Vec<String> = Vec::new();
    for record in records {
        if !order.contains(&record.attribute) {
            order.push(record.attribute.clone());
        }
    }
    order
}

/// The flagged value of `attribute` for every case.
fn categorical_column(records: &[Record], attribute: &str, n_cases: usize) -> Result<Vec<String>> {
    let mut values: Vec<Option<&str>> = vec![None; n_cases];
    for record in records.iter().filter(|r| r.attribute == attribute) {
        for (case, _) in record.flags.iter().enumerate().filter(|(_, flag)| **flag) {
            if let Some(previous) = values[case] {
                bail!(
                    "case {} has both '{previous}' and '{}' for '{attribute}'",
                    case + 1,
                    record.value
                );
            }
            values[case] = Some(record.value.as_str());
        }
    }
    values
        .into_iter()
        .enumerate()
        .map(|(case, value)| {
            value
                .map(str::to_string)
                .with_context(|| format!("case {} has no value for '{attribute}'", case + 1))
        })
        .collect()
}

/// Parses a case file into a table keyed on its conclusion.
pub fn load_cases<R: Read>(reader: R, layout: Layout) -> Result<Table> {
    let records = read_records(reader)?;
    let conclusion = records[records.len() - 1].attribute.clone();
    let n_cases = records[0].flags.len();

    let mut names: Vec<String> = Vec::new();
    let mut columns: Vec<Vec<AttributeValue>> = Vec::new();
    match layout {
        Layout::Categorical => {
            for attribute in attribute_order(&records) {
                let values = categorical_column(&records, &attribute, n_cases)?;
                columns.push(values.into_iter().map(AttributeValue::Text).collect());
                names.push(attribute);
            }
        }
        Layout::Binary => {
            for record in records.iter().filter(|r| r.attribute != conclusion) {
                let name = format!("{}={}", record.attribute, record.value);
                if names.contains(&name) {
                    bail!("'{name}' is listed twice");
                }
                columns.push(record.flags.iter().copied().map(AttributeValue::Bool).collect());
                names.push(name);
            }
            let labels = categorical_column(&records, &conclusion, n_cases)?;
            columns.push(labels.into_iter().map(AttributeValue::Text).collect());
            names.push(conclusion.clone());
        }
    }
    debug!(
        cases = n_cases,
        columns = names.len(),
        ?layout,
        conclusion = conclusion.as_str(),
        "case file parsed"
    );

    let rows: Vec<Vec<AttributeValue>> = (0..n_cases)
        .map(|case| columns.iter().map(|column| column[case].clone()).collect())
        .collect();
    let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();
    Ok(Table::from_rows(&conclusion, &name_refs, rows)?)
}

pub fn load_cases_from_path(path: &Path, layout: Layout) -> Result<Table> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening case file {}", path.display()))?;
    load_cases(file, layout).with_context(|| format!("loading {}", path.display()))
}
