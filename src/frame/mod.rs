// In: src/frame/mod.rs

//! The in-memory tabular container.
//!
//! A `Frame` is an ordered list of uniquely named columns of equal length. A
//! column is either an Arrow array (the vectorized dtypes) or an object column
//! holding one [`Cell`] per row for values Arrow has no direct cast for.

#[cfg(feature = "frame")]
pub(crate) mod cells;

#[cfg(feature = "frame")]
use arrow::array::{Array, ArrayRef};
#[cfg(feature = "frame")]
use arrow::datatypes::{DataType, TimeUnit};
#[cfg(feature = "frame")]
use arrow::record_batch::RecordBatch;
#[cfg(feature = "frame")]
use std::sync::Arc;

use crate::error::SpanframeError;
use crate::value::Cell;

//==================================================================================
// 1. Columns & Dtypes
//==================================================================================

/// The dtype of a frame column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dtype {
    /// Nullable boolean.
    Boolean,
    /// Nullable 64-bit signed integer.
    Int64,
    Float64,
    /// Nanosecond timestamps zoned at UTC.
    TimestampUtc,
    /// Nullable UTF-8 string.
    String,
    /// Opaque per-cell values.
    Object,
    /// Any other Arrow type, as found in user-built frames.
    #[cfg(feature = "frame")]
    Arrow(DataType),
}

#[derive(Debug, Clone)]
pub enum Column {
    #[cfg(feature = "frame")]
    Arrow(ArrayRef),
    Object(Vec<Cell>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            #[cfg(feature = "frame")]
            Column::Arrow(array) => array.len(),
            Column::Object(cells) => cells.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn dtype(&self) -> Dtype {
        match self {
            #[cfg(feature = "frame")]
            Column::Arrow(array) => match array.data_type() {
                DataType::Boolean => Dtype::Boolean,
                DataType::Int64 => Dtype::Int64,
                DataType::Float64 => Dtype::Float64,
                DataType::Timestamp(TimeUnit::Nanosecond, Some(tz)) if &**tz == "UTC" => {
                    Dtype::TimestampUtc
                }
                DataType::Utf8 => Dtype::String,
                other => Dtype::Arrow(other.clone()),
            },
            Column::Object(_) => Dtype::Object,
        }
    }

    /// Reads the cell at `row`, mapping a null slot to the sentinel its dtype uses.
    pub fn cell(&self, row: usize) -> Result<Cell, SpanframeError> {
        match self {
            #[cfg(feature = "frame")]
            Column::Arrow(array) => cells::array_cell(array.as_ref(), row),
            Column::Object(cells) => cells.get(row).cloned().ok_or_else(|| {
                SpanframeError::LengthMismatch {
                    column: "<object>".to_string(),
                    expected: row + 1,
                    found: cells.len(),
                }
            }),
        }
    }

    /// Reads every cell in row order.
    pub fn to_cells(&self) -> Result<Vec<Cell>, SpanframeError> {
        match self {
            Column::Object(cells) => Ok(cells.clone()),
            #[cfg(feature = "frame")]
            Column::Arrow(_) => (0..self.len()).map(|row| self.cell(row)).collect(),
        }
    }
}

#[cfg(feature = "frame")]
impl From<ArrayRef> for Column {
    fn from(array: ArrayRef) -> Self {
        Column::Arrow(array)
    }
}

impl From<Vec<Cell>> for Column {
    fn from(cells: Vec<Cell>) -> Self {
        Column::Object(cells)
    }
}

//==================================================================================
// 2. The Frame
//==================================================================================

#[derive(Debug, Clone, Default)]
pub struct Frame {
    names: Vec<String>,
    columns: Vec<Column>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a frame from `(name, column)` pairs, checking that names are unique
    /// and lengths agree.
    pub fn from_columns<N: Into<String>>(
        columns: impl IntoIterator<Item = (N, Column)>,
    ) -> Result<Self, SpanframeError> {
        let mut frame = Self::new();
        for (name, column) in columns {
            frame.push_column(name, column)?;
        }
        Ok(frame)
    }

    pub fn push_column(
        &mut self,
        name: impl Into<String>,
        column: Column,
    ) -> Result<(), SpanframeError> {
        let name = name.into();
        if self.names.iter().any(|existing| *existing == name) {
            return Err(SpanframeError::SchemaMismatch(format!(
                "duplicate frame column '{name}'"
            )));
        }
        if let Some(first) = self.columns.first() {
            if first.len() != column.len() {
                return Err(SpanframeError::LengthMismatch {
                    column: name,
                    expected: first.len(),
                    found: column.len(),
                });
            }
        }
        self.names.push(name);
        self.columns.push(column);
        Ok(())
    }

    /// Wraps every column of an Arrow batch. No casts are applied.
    #[cfg(feature = "frame")]
    pub fn from_record_batch(batch: &RecordBatch) -> Self {
        let schema = batch.schema();
        Self {
            names: schema.fields().iter().map(|f| f.name().clone()).collect(),
            columns: batch.columns().iter().map(|c| Column::Arrow(Arc::clone(c))).collect(),
        }
    }

    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|idx| &self.columns[idx])
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.names.iter().map(String::as_str).zip(self.columns.iter())
    }

    pub fn dtypes(&self) -> Vec<Dtype> {
        self.columns.iter().map(Column::dtype).collect()
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn num_rows(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    /// The frame's values as row-major cells, in column order.
    pub fn to_rows(&self) -> Result<Vec<Vec<Cell>>, SpanframeError> {
        let num_rows = self.num_rows();
        let mut rows: Vec<Vec<Cell>> = (0..num_rows)
            .map(|_| Vec::with_capacity(self.num_columns()))
            .collect();
        for column in &self.columns {
            for (row, cell) in rows.iter_mut().zip(column.to_cells()?) {
                row.push(cell);
            }
        }
        Ok(rows)
    }
}

#[cfg(test)]
mod tests;
