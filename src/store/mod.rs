// In: src/store/mod.rs

//! The seam to the external relational store.
//!
//! Nothing in this crate talks to a database directly. A caller supplies a
//! [`Store`] that can describe a table's columns and open a write batch; the
//! batch orchestrator drives it through a [`ScopedBatch`] so that every exit
//! path other than an explicit commit rolls the batch back.

use crate::config::{FrameConfig, WriteMode};
use crate::error::{SpanframeError, StoreError};
use crate::frame::Frame;
use crate::types::ColumnDescriptor;
use crate::value::StoreValue;

#[cfg(test)]
pub(crate) mod mock;

//==================================================================================
// 1. Query Results
//==================================================================================

/// A fully materialized query result: the column descriptors and the rows, each
/// row holding one value per field in field order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    pub fields: Vec<ColumnDescriptor>,
    pub rows: Vec<Vec<StoreValue>>,
}

impl ResultSet {
    pub fn new(fields: Vec<ColumnDescriptor>, rows: Vec<Vec<StoreValue>>) -> Self {
        Self { fields, rows }
    }

    /// Converts the whole result into a [`Frame`] with the default config.
    pub fn to_frame(&self) -> Result<Frame, SpanframeError> {
        crate::bridge::to_frame(self)
    }

    pub fn to_frame_with(&self, config: &FrameConfig) -> Result<Frame, SpanframeError> {
        crate::bridge::to_frame_with(self, config)
    }
}

//==================================================================================
// 2. Store Traits
//==================================================================================

/// A handle to the store, as seen by the batch orchestrator.
pub trait Store {
    /// The ordered column descriptors of `table`.
    ///
    /// Must report an unknown table as `StoreError::NotFound`.
    fn table_schema(&self, table: &str) -> Result<Vec<ColumnDescriptor>, StoreError>;

    /// Opens a new write batch. Nothing written to it is visible until commit.
    fn begin_batch(&self) -> Result<Box<dyn BatchWrite + '_>, StoreError>;
}

/// The store's batch-write primitive.
pub trait BatchWrite {
    /// Stages `rows` for `table`. Each row lines up index-for-index with
    /// `columns`. A column the table does not have is `StoreError::NotFound`.
    fn write(
        &mut self,
        mode: WriteMode,
        table: &str,
        columns: &[String],
        rows: Vec<Vec<StoreValue>>,
    ) -> Result<(), StoreError>;

    fn commit(self: Box<Self>) -> Result<(), StoreError>;

    fn rollback(self: Box<Self>) -> Result<(), StoreError>;
}

//==================================================================================
// 3. Scoped Transaction Guard
//==================================================================================

/// Owns an open batch; dropping it without [`ScopedBatch::commit`] rolls back.
pub struct ScopedBatch<'a> {
    batch: Option<Box<dyn BatchWrite + 'a>>,
}

impl<'a> ScopedBatch<'a> {
    pub fn begin(store: &'a dyn Store) -> Result<Self, StoreError> {
        Ok(Self {
            batch: Some(store.begin_batch()?),
        })
    }

    pub fn write(
        &mut self,
        mode: WriteMode,
        table: &str,
        columns: &[String],
        rows: Vec<Vec<StoreValue>>,
    ) -> Result<(), StoreError> {
        match self.batch.as_mut() {
            Some(batch) => batch.write(mode, table, columns, rows),
            None => Err(StoreError::Other("write on a finished batch".to_string())),
        }
    }

    pub fn commit(mut self) -> Result<(), StoreError> {
        match self.batch.take() {
            Some(batch) => batch.commit(),
            None => Err(StoreError::Other("commit on a finished batch".to_string())),
        }
    }
}

impl Drop for ScopedBatch<'_> {
    fn drop(&mut self) {
        if let Some(batch) = self.batch.take() {
            log::warn!("write batch dropped before commit, rolling back");
            if let Err(err) = batch.rollback() {
                log::warn!("rollback failed: {err}");
            }
        }
    }
}
