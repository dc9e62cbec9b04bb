//! Errors raised while turning raw CSV rows into typed records.

use std::fmt;
use thiserror::Error;

/// Which of the two source tables a row came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Daily,
    Hourly,
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableKind::Daily => write!(f, "daily"),
            TableKind::Hourly => write!(f, "hourly"),
        }
    }
}

/// A row that cannot be classified into any group.
///
/// `row` is the 1-based data row number (the header is not counted).
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("{table} table, row {row}: missing required field `{field}`")]
    MissingField {
        table: TableKind,
        row: usize,
        field: &'static str,
    },

    #[error("{table} table, row {row}: `{field}` = {value} is outside {expected}")]
    OutOfDomain {
        table: TableKind,
        row: usize,
        field: &'static str,
        value: i64,
        expected: &'static str,
    },

    #[error("{table} table, row {row}: {source}")]
    Malformed {
        table: TableKind,
        row: usize,
        #[source]
        source: csv::Error,
    },
}

impl SchemaError {
    pub fn table(&self) -> TableKind {
        match self {
            SchemaError::MissingField { table, .. }
            | SchemaError::OutOfDomain { table, .. }
            | SchemaError::Malformed { table, .. } => *table,
        }
    }

    pub fn row(&self) -> usize {
        match self {
            SchemaError::MissingField { row, .. }
            | SchemaError::OutOfDomain { row, .. }
            | SchemaError::Malformed { row, .. } => *row,
        }
    }
}
