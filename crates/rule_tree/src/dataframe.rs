use crate::error::TableError;
use crate::value::{AttributeValue, normalize};
use itertools::Itertools;
use polars::prelude::*;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Counts codes in first-seen order: `(counts, unique_codes)`.
pub fn ordered_counts<I>(iter: I) -> (Vec<usize>, Vec<u32>)
where
    I: Iterator<Item = u32>,
{
    let mut pos_map: HashMap<u32, usize> = HashMap::new();
    let mut counts: Vec<usize> = Vec::new();
    let mut unique: Vec<u32> = Vec::new();

    for code in iter {
        if let Some(&pos) = pos_map.get(&code) {
            counts[pos] += 1;
        } else {
            pos_map.insert(code, counts.len());
            counts.push(1);
            unique.push(code);
        }
    }
    (counts, unique)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Boolean,
    Text,
}

/// A column decoded once into categorical codes.
///
/// `levels[code]` is the value behind a code; levels keep first-seen order.
#[derive(Debug, Clone)]
pub struct EncodedColumn {
    pub name: String,
    pub kind: ColumnKind,
    pub levels: Vec<AttributeValue>,
    pub codes: Vec<u32>,
    positions: HashMap<AttributeValue, u32>,
}

impl EncodedColumn {
    pub fn from_values(name: &str, kind: ColumnKind, values: Vec<AttributeValue>) -> Self {
        let mut positions: HashMap<AttributeValue, u32> = HashMap::new();
        let mut levels = Vec::new();
        let codes = values
            .into_iter()
            .map(|value| {
                *positions.entry(value).or_insert_with_key(|v| {
                    levels.push(v.clone());
                    (levels.len() - 1) as u32
                })
            })
            .collect();
        Self {
            name: name.to_string(),
            kind,
            levels,
            codes,
            positions,
        }
    }

    pub fn code_of(&self, value: &AttributeValue) -> Option<u32> {
        self.positions.get(value).copied()
    }

    pub fn level(&self, code: u32) -> &AttributeValue {
        &self.levels[code as usize]
    }

    pub fn value_at(&self, row: u32) -> &AttributeValue {
        self.level(self.codes[row as usize])
    }

    pub fn is_boolean(&self) -> bool {
        self.kind == ColumnKind::Boolean
    }
}

/// Extension methods for DataFrame
pub trait RuleTreeDataFrameExt {
    /// All column names as owned Strings
    fn column_names_vec(&self) -> Vec<String>;

    /// Lowercased names and string values; rejects nulls and unsupported dtypes.
    fn normalized(&self) -> Result<DataFrame, TableError>;

    /// Decode one Boolean/String column into categorical codes.
    fn encode_column(&self, name: &str) -> Result<EncodedColumn, TableError>;

    /// Get a specific row by index as column name -> value
    fn get_row_values(&self, row_idx: usize) -> Option<BTreeMap<String, AttributeValue>>;
}

fn column_values(
    name: &str,
    series: &Series,
    normalize_text: bool,
) -> Result<(ColumnKind, Vec<AttributeValue>), TableError> {
    let missing = |row: usize| TableError::MissingValue {
        column: name.to_string(),
        row,
    };
    match series.dtype() {
        DataType::Boolean => {
            let values = series
                .bool()?
                .into_iter()
                .enumerate()
                .map(|(row, v)| v.map(AttributeValue::Bool).ok_or_else(|| missing(row)))
                .collect::<Result<Vec<_>, _>>()?;
            Ok((ColumnKind::Boolean, values))
        }
        DataType::String => {
            let values = series
                .str()?
                .into_iter()
                .enumerate()
                .map(|(row, v)| {
                    v.map(|s| {
                        if normalize_text {
                            AttributeValue::Text(normalize(s))
                        } else {
                            AttributeValue::Text(s.to_string())
                        }
                    })
                    .ok_or_else(|| missing(row))
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok((ColumnKind::Text, values))
        }
        other => Err(TableError::UnsupportedDtype {
            column: name.to_string(),
            dtype: other.to_string(),
        }),
    }
}

impl RuleTreeDataFrameExt for DataFrame {
    fn column_names_vec(&self) -> Vec<String> {
        self.get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect_vec()
    }

    fn normalized(&self) -> Result<DataFrame, TableError> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut columns: Vec<Column> = Vec::with_capacity(self.width());
        for column in self.get_columns() {
            let name = normalize(column.name().as_str());
            if !seen.insert(name.clone()) {
                return Err(TableError::DuplicateColumn(name));
            }
            let (kind, values) = column_values(&name, column.as_materialized_series(), true)?;
            let series = match kind {
                ColumnKind::Boolean => {
                    let flags: Vec<bool> = values.iter().filter_map(|v| v.as_bool()).collect();
                    Series::new(PlSmallStr::from_str(&name), flags)
                }
                ColumnKind::Text => {
                    let texts: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                    Series::new(PlSmallStr::from_str(&name), texts)
                }
            };
            columns.push(series.into());
        }
        Ok(DataFrame::new(columns)?)
    }

    fn encode_column(&self, name: &str) -> Result<EncodedColumn, TableError> {
        let column = self
            .column(name)
            .map_err(|_| TableError::MissingColumn(name.to_string()))?;
        let (kind, values) = column_values(name, column.as_materialized_series(), false)?;
        Ok(EncodedColumn::from_values(name, kind, values))
    }

    fn get_row_values(&self, row_idx: usize) -> Option<BTreeMap<String, AttributeValue>> {
        if row_idx >= self.height() {
            return None;
        }
        let mut row = BTreeMap::new();
        for c in self.get_columns() {
            let value = match c.get(row_idx).ok()? {
                AnyValue::Boolean(b) => AttributeValue::Bool(b),
                AnyValue::String(s) => AttributeValue::text(s),
                AnyValue::StringOwned(s) => AttributeValue::text(s.as_str()),
                _ => return None,
            };
            row.insert(c.name().to_string(), value);
        }
        Some(row)
    }
}
