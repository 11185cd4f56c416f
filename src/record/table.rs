//! Row-oriented tabular-sequence record.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Field types a table column can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    Int,
    Float,
    Bool,
    Text,
}

/// One column of a table schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub ty: ColumnType,
}

impl Column {
    pub fn new(name: impl Into<String>, ty: ColumnType) -> Self {
        Column {
            name: name.into(),
            ty,
        }
    }
}

/// One typed field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl Value {
    pub fn column_type(&self) -> ColumnType {
        match self {
            Value::Int(_) => ColumnType::Int,
            Value::Float(_) => ColumnType::Float,
            Value::Bool(_) => ColumnType::Bool,
            Value::Text(_) => ColumnType::Text,
        }
    }
}

/// Row rejected because it does not match the table schema.
#[derive(Debug, Error)]
pub enum RowError {
    #[error("Row has {found} fields, schema has {expected}")]
    ArityMismatch { expected: usize, found: usize },

    #[error("Field '{column}' expects {expected:?}, got {found:?}")]
    TypeMismatch {
        column: String,
        expected: ColumnType,
        found: ColumnType,
    },
}

/// An ordered sequence of rows over a fixed column schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Table {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append one row after validating it against the schema.
    pub fn push_row(&mut self, row: Vec<Value>) -> Result<(), RowError> {
        if row.len() != self.columns.len() {
            return Err(RowError::ArityMismatch {
                expected: self.columns.len(),
                found: row.len(),
            });
        }
        for (column, value) in self.columns.iter().zip(&row) {
            if value.column_type() != column.ty {
                return Err(RowError::TypeMismatch {
                    column: column.name.clone(),
                    expected: column.ty,
                    found: value.column_type(),
                });
            }
        }
        self.rows.push(row);
        Ok(())
    }

    /// Append every row of `other`, preserving its internal order.
    ///
    /// Schemas are assumed identical across merge inputs; no column
    /// reconciliation is performed.
    pub fn append_rows(&mut self, other: &Table) {
        self.rows.extend(other.rows.iter().cloned());
    }

    /// An empty table with this table's schema.
    pub fn empty_like(&self) -> Table {
        Table::new(self.columns.clone())
    }
}
