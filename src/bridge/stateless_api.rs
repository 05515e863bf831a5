// In: src/bridge/stateless_api.rs

use crate::bridge::orchestrator;
use crate::config::FrameConfig;
use crate::convert::convert_outbound_with;
use crate::error::SpanframeError;
use crate::frame::Frame;
use crate::log_metric;
use crate::resolver::resolve_column_metadata;
use crate::store::{ResultSet, Store};
use crate::value::{Cell, StoreValue};

/// Converts a whole query result into a [`Frame`] with the default config.
pub fn to_frame(result: &ResultSet) -> Result<Frame, SpanframeError> {
    to_frame_with(result, &FrameConfig::default())
}

/// Converts a whole query result into a [`Frame`].
///
/// Column tags are resolved once from `result.fields`. A zero-row result still
/// yields one empty, correctly typed column per field.
pub fn to_frame_with(result: &ResultSet, config: &FrameConfig) -> Result<Frame, SpanframeError> {
    // 1. Resolve every field exactly once.
    let metadata = resolve_column_metadata(&result.fields)?;
    let width = metadata.len();

    // 2. Transpose the rows into per-column value lists.
    let mut columns: Vec<Vec<StoreValue>> = (0..width)
        .map(|_| Vec::with_capacity(result.rows.len()))
        .collect();
    for (idx, row) in result.rows.iter().enumerate() {
        if row.len() != width {
            return Err(SpanframeError::RowWidth {
                row: idx,
                expected: width,
                found: row.len(),
            });
        }
        for (column, value) in columns.iter_mut().zip(row) {
            column.push(value.clone());
        }
    }

    // 3. Convert each column with its tag.
    let mut frame = Frame::new();
    for ((name, tag), values) in metadata.iter().zip(columns) {
        let column = convert_outbound_with(values, &tag, config)?;
        frame.push_column(name, column)?;
    }

    log_metric!("event" = "to_frame", "columns" = width, "rows" = result.rows.len());
    Ok(frame)
}

/// Upserts every row of `frame` into `table` with the default config.
pub fn upsert_frame(store: &dyn Store, table: &str, frame: &Frame) -> Result<(), SpanframeError> {
    upsert_frame_with(store, table, frame, &FrameConfig::default())
}

/// Upserts every row of `frame` into `table` in a single batch.
pub fn upsert_frame_with(
    store: &dyn Store,
    table: &str,
    frame: &Frame,
    config: &FrameConfig,
) -> Result<(), SpanframeError> {
    let rows = frame.to_rows()?;
    orchestrator::upsert_rows(store, table, frame.column_names(), rows, config)
}

/// Upserts raw rows whose cells line up index-for-index with `columns`.
pub fn upsert_rows(
    store: &dyn Store,
    table: &str,
    columns: &[String],
    rows: Vec<Vec<Cell>>,
    config: &FrameConfig,
) -> Result<(), SpanframeError> {
    orchestrator::upsert_rows(store, table, columns, rows, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ColumnDescriptor, StoreType, TypeCode};

    fn fields() -> Vec<ColumnDescriptor> {
        vec![
            ColumnDescriptor::new("id", StoreType::new(TypeCode::Int64)),
            ColumnDescriptor::new("blob", StoreType::new(TypeCode::Bytes)),
        ]
    }

    #[test]
    fn test_ragged_rows_are_rejected() {
        let result = ResultSet::new(
            fields(),
            vec![
                vec![StoreValue::Int64(1), StoreValue::Bytes(vec![])],
                vec![StoreValue::Int64(2)],
            ],
        );
        assert!(matches!(
            to_frame(&result),
            Err(SpanframeError::RowWidth { row: 1, expected: 2, found: 1 })
        ));
    }

    #[test]
    fn test_zero_rows_keep_every_column() {
        let frame = ResultSet::new(fields(), vec![]).to_frame();
        // Without Arrow support the INT64 column cannot be built at all.
        #[cfg(feature = "frame")]
        {
            let frame = frame.unwrap();
            assert_eq!(frame.column_names(), &["id", "blob"]);
            assert_eq!(frame.num_rows(), 0);
        }
        #[cfg(not(feature = "frame"))]
        assert!(matches!(frame, Err(SpanframeError::MissingDependency { .. })));
    }
}
