//! Training tables and row subsets.
//!
//! A [`Table`] owns a normalized polars frame plus one [`EncodedColumn`] per
//! column. Tree growth never copies the frame: every node works on a
//! [`Subtable`], i.e. a list of row indices into the same table.

use crate::dataframe::{EncodedColumn, RuleTreeDataFrameExt, ordered_counts};
use crate::error::TableError;
use crate::value::{AttributeValue, normalize};
use polars::prelude::*;
use std::collections::BTreeMap;

/// One row as attribute name -> value.
pub type Row = BTreeMap<String, AttributeValue>;

#[derive(Debug, Clone)]
pub struct Table {
    frame: DataFrame,
    conclusion: String,
    columns: Vec<EncodedColumn>,
}

impl Table {
    pub fn new(frame: &DataFrame, conclusion: &str) -> Result<Self, TableError> {
        let frame = frame.normalized()?;
        let conclusion = normalize(conclusion);
        let names = frame.column_names_vec();
        if !names.contains(&conclusion) {
            return Err(TableError::MissingColumn(conclusion));
        }
        let columns = names
            .iter()
            .map(|name| frame.encode_column(name))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            frame,
            conclusion,
            columns,
        })
    }

    /// Builds the frame from row-major values. Every row must have one value
    /// per entry of `columns`, in the same order.
    pub fn from_rows(
        conclusion: &str,
        columns: &[&str],
        rows: Vec<Vec<AttributeValue>>,
    ) -> Result<Self, TableError> {
        let mut by_column: Vec<Vec<AttributeValue>> =
            vec![Vec::with_capacity(rows.len()); columns.len()];
        for (row_idx, row) in rows.into_iter().enumerate() {
            if row.len() != columns.len() {
                return Err(TableError::RowWidth {
                    row: row_idx,
                    expected: columns.len(),
                    found: row.len(),
                });
            }
            for (slot, value) in by_column.iter_mut().zip(row) {
                slot.push(value);
            }
        }

        let series = columns
            .iter()
            .zip(by_column)
            .map(|(name, values)| {
                let name_str = PlSmallStr::from_str(name);
                if values.iter().all(|v| v.is_bool()) {
                    let flags: Vec<bool> = values.iter().filter_map(|v| v.as_bool()).collect();
                    Ok(Series::new(name_str, flags).into())
                } else if values.iter().any(|v| v.is_bool()) {
                    Err(TableError::MixedColumn(name.to_string()))
                } else {
                    let texts: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                    Ok(Series::new(name_str, texts).into())
                }
            })
            .collect::<Result<Vec<Column>, TableError>>()?;

        let frame = DataFrame::new(series)?;
        Self::new(&frame, conclusion)
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn conclusion(&self) -> &str {
        &self.conclusion
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.height() == 0
    }

    pub fn columns(&self) -> &[EncodedColumn] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&EncodedColumn> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Column names other than `conclusion`, in column order.
    pub fn attribute_names(&self, conclusion: &str) -> Vec<&str> {
        self.columns
            .iter()
            .map(|c| c.name.as_str())
            .filter(|name| *name != conclusion)
            .collect()
    }

    pub fn row(&self, idx: usize) -> Option<Row> {
        if idx >= self.height() {
            return None;
        }
        Some(
            self.columns
                .iter()
                .map(|c| (c.name.clone(), c.value_at(idx as u32).clone()))
                .collect(),
        )
    }

    pub fn rows(&self) -> impl Iterator<Item = Row> + '_ {
        (0..self.height()).filter_map(|idx| self.row(idx))
    }

    pub fn all_rows(&self) -> Subtable<'_> {
        Subtable::new(self, (0..self.height() as u32).collect())
    }
}

/// Rows of a [`Table`] selected by index.
#[derive(Debug, Clone)]
pub struct Subtable<'a> {
    table: &'a Table,
    rows: Vec<u32>,
}

impl<'a> Subtable<'a> {
    pub fn new(table: &'a Table, rows: Vec<u32>) -> Self {
        Self { table, rows }
    }

    pub fn table(&self) -> &'a Table {
        self.table
    }

    pub fn rows(&self) -> &[u32] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows whose `column` value equals `value`; empty when the value was never seen.
    pub fn where_equals(&self, column: &EncodedColumn, value: &AttributeValue) -> Subtable<'a> {
        let rows = match column.code_of(value) {
            Some(code) => self
                .rows
                .iter()
                .copied()
                .filter(|&r| column.codes[r as usize] == code)
                .collect(),
            None => Vec::new(),
        };
        Subtable::new(self.table, rows)
    }

    /// `(counts, codes)` of `column` over these rows, in first-seen order.
    pub fn value_counts(&self, column: &EncodedColumn) -> (Vec<usize>, Vec<u32>) {
        ordered_counts(self.rows.iter().map(|&r| column.codes[r as usize]))
    }

    pub fn distinct_values(&self, column: &EncodedColumn) -> Vec<AttributeValue> {
        let (_, codes) = self.value_counts(column);
        codes.into_iter().map(|c| column.level(c).clone()).collect()
    }

    pub fn distinct_count(&self, column: &EncodedColumn) -> usize {
        self.value_counts(column).1.len()
    }

    /// The shared value when every row agrees on `column`.
    pub fn single_value<'c>(&self, column: &'c EncodedColumn) -> Option<&'c AttributeValue> {
        let (_, codes) = self.value_counts(column);
        match codes.as_slice() {
            [code] => Some(column.level(*code)),
            _ => None,
        }
    }

    /// Most frequent value of `column`; ties go to the value seen first.
    pub fn majority_value<'c>(&self, column: &'c EncodedColumn) -> Option<&'c AttributeValue> {
        let (counts, codes) = self.value_counts(column);
        let mut best: Option<(usize, u32)> = None;
        for (count, code) in counts.into_iter().zip(codes) {
            if best.is_none_or(|(best_count, _)| count > best_count) {
                best = Some((count, code));
            }
        }
        best.map(|(_, code)| column.level(code))
    }
}

