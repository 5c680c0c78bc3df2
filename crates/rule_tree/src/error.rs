use crate::value::AttributeValue;
use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    #[error(transparent)]
    Polars(#[from] PolarsError),
    #[error("column '{0}' not found")]
    MissingColumn(String),
    #[error("column '{0}' appears more than once")]
    DuplicateColumn(String),
    #[error("column '{column}' has unsupported dtype {dtype}; expected Boolean or String")]
    UnsupportedDtype { column: String, dtype: String },
    #[error("column '{column}' has no value at row {row}")]
    MissingValue { column: String, row: usize },
    #[error("column '{0}' mixes boolean and text values")]
    MixedColumn(String),
    #[error("row {row} has {found} values, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
}

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("cannot build a tree from an empty table")]
    EmptyTable,
    #[error("no attributes left to split on besides the conclusion")]
    NoAttributes,
    #[error("attribute '{0}' is not a column of the table")]
    UnknownAttribute(String),
    #[error("attribute '{0}' is not boolean; the boolean policy cannot branch on it")]
    NonBooleanAttribute(String),
    #[error(transparent)]
    Table(#[from] TableError),
}

#[derive(Debug, Error)]
pub enum ReasoningError {
    #[error("\"{value}\" is not a valid value for predicate \"{attribute}\"")]
    InvalidValue { attribute: String, value: String },
    #[error("no rule covers \"{attribute}\" = \"{value}\" at this point of the tree")]
    UnreachableBranch {
        attribute: String,
        value: AttributeValue,
    },
    #[error("\"{0}\" is not a valid conclusion")]
    UnknownConclusion(String),
    #[error("\"{0}\" is not a valid predicate")]
    UnknownPredicate(String),
    #[error("\"{0}\" has already been checked")]
    AlreadyQueried(String),
    #[error("no more answers available for \"{0}\"")]
    ProviderExhausted(String),
    #[error("value provider failed: {0}")]
    Provider(String),
}

#[derive(Debug, Error)]
pub enum RuleSetError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("inconsistent ruleset: {0}")]
    Inconsistent(String),
    #[error(transparent)]
    Build(#[from] BuildError),
}
