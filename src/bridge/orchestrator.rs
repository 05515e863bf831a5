// In: src/bridge/orchestrator.rs

//! The Batch Upsert Orchestrator.
//!
//! Writes are all-or-nothing. Every cell is converted before the batch is even
//! opened, so a bad value never leaves a half-written batch behind, and the
//! batch itself lives in a [`ScopedBatch`] that rolls back on any early return.

use hashbrown::HashSet;

use crate::config::FrameConfig;
use crate::convert::convert_inbound_with;
use crate::error::{SpanframeError, StoreError};
use crate::log_metric;
use crate::resolver::resolve_column_metadata;
use crate::store::{ScopedBatch, Store};
use crate::types::TypeTag;
use crate::value::{Cell, StoreValue};

/// Prefix of the error raised when the frame's columns do not line up with the
/// table's columns.
pub const COLUMN_MISMATCH_PREFIX: &str = "Columns from dataframe did not match table column. ";

/// Marker the store puts in a `NotFound` message for an unknown column.
const COLUMN_NOT_FOUND: &str = "Column not found";

/// Converts `rows` against the live schema of `table` and submits them in one
/// committed batch.
///
/// # Errors
/// * `RowWidth` if a row's length differs from `columns.len()`.
/// * `SchemaMismatch` if the table does not exist, a column is named twice, or
///   a column is unknown to the table (checked up front and again by the store).
/// * `Conversion` / `UnknownType` from the Inbound Converter.
/// * `Store` for every other store fault.
pub fn upsert_rows(
    store: &dyn Store,
    table: &str,
    columns: &[String],
    rows: Vec<Vec<Cell>>,
    config: &FrameConfig,
) -> Result<(), SpanframeError> {
    // 1. Shape checks that need no store round trip.
    for (idx, row) in rows.iter().enumerate() {
        if row.len() != columns.len() {
            return Err(SpanframeError::RowWidth {
                row: idx,
                expected: columns.len(),
                found: row.len(),
            });
        }
    }
    let mut seen = HashSet::with_capacity(columns.len());
    for name in columns {
        if !seen.insert(name.as_str()) {
            return Err(SpanframeError::SchemaMismatch(format!(
                "column '{name}' is named more than once"
            )));
        }
    }

    // 2. Resolve the live schema once and pick the tag of each named column.
    let schema = store.table_schema(table).map_err(|err| match err {
        StoreError::NotFound(msg) => {
            SpanframeError::SchemaMismatch(format!("table '{table}' not found: {msg}"))
        }
        other => SpanframeError::Store(other),
    })?;
    let metadata = resolve_column_metadata(&schema)?;
    let tags = columns
        .iter()
        .map(|name| {
            metadata.tag(name).ok_or_else(|| {
                SpanframeError::SchemaMismatch(format!(
                    "{COLUMN_MISMATCH_PREFIX}'{name}' is not a column of '{table}'"
                ))
            })
        })
        .collect::<Result<Vec<TypeTag>, _>>()?;

    // 3. Convert every cell before touching the store.
    let row_count = rows.len();
    let converted = rows
        .into_iter()
        .map(|row| convert_row(row, &tags, config))
        .collect::<Result<Vec<_>, _>>()?;

    // 4. One batch, committed only if the write went through.
    let mut batch = ScopedBatch::begin(store)?;
    batch
        .write(config.write_mode, table, columns, converted)
        .map_err(enrich_store_error)?;
    batch.commit().map_err(enrich_store_error)?;

    log::info!("committed {row_count} rows to '{table}' ({:?})", config.write_mode);
    log_metric!("event" = "upsert", "table" = table, "rows" = row_count);
    Ok(())
}

fn convert_row(
    row: Vec<Cell>,
    tags: &[TypeTag],
    config: &FrameConfig,
) -> Result<Vec<StoreValue>, SpanframeError> {
    row.into_iter()
        .zip(tags)
        .map(|(cell, tag)| convert_inbound_with(cell, tag, config))
        .collect()
}

fn enrich_store_error(err: StoreError) -> SpanframeError {
    match err {
        StoreError::NotFound(msg) if msg.contains(COLUMN_NOT_FOUND) => {
            SpanframeError::SchemaMismatch(format!("{COLUMN_MISMATCH_PREFIX}{msg}"))
        }
        other => SpanframeError::Store(other),
    }
}
