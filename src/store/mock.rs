// In: src/store/mock.rs

//! An in-memory `Store` for tests.

use std::cell::RefCell;

use hashbrown::HashMap;

use super::{BatchWrite, Store};
use crate::config::WriteMode;
use crate::error::StoreError;
use crate::types::ColumnDescriptor;
use crate::value::StoreValue;

/// One committed `write` call.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct WriteRecord {
    pub mode: WriteMode,
    pub table: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<StoreValue>>,
}

#[derive(Default)]
pub(crate) struct MemoryStore {
    schemas: HashMap<String, Vec<ColumnDescriptor>>,
    committed: RefCell<Vec<WriteRecord>>,
    rollbacks: RefCell<usize>,
    /// Columns the batch primitive rejects even though the schema lists them,
    /// to stand in for a schema that changed after it was read.
    dropped_columns: Vec<String>,
    /// A fault reported only when the batch is committed.
    commit_fault: Option<StoreError>,
}

impl MemoryStore {
    pub fn with_table(mut self, table: &str, schema: Vec<ColumnDescriptor>) -> Self {
        self.schemas.insert(table.to_string(), schema);
        self
    }

    pub fn with_dropped_column(mut self, column: &str) -> Self {
        self.dropped_columns.push(column.to_string());
        self
    }

    pub fn with_commit_fault(mut self, fault: StoreError) -> Self {
        self.commit_fault = Some(fault);
        self
    }

    pub fn committed(&self) -> Vec<WriteRecord> {
        self.committed.borrow().clone()
    }

    pub fn rollbacks(&self) -> usize {
        *self.rollbacks.borrow()
    }
}

impl Store for MemoryStore {
    fn table_schema(&self, table: &str) -> Result<Vec<ColumnDescriptor>, StoreError> {
        self.schemas
            .get(table)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("Table not found: {table}")))
    }

    fn begin_batch(&self) -> Result<Box<dyn BatchWrite + '_>, StoreError> {
        Ok(Box::new(MemoryBatch {
            store: self,
            staged: Vec::new(),
        }))
    }
}

struct MemoryBatch<'a> {
    store: &'a MemoryStore,
    staged: Vec<WriteRecord>,
}

impl BatchWrite for MemoryBatch<'_> {
    fn write(
        &mut self,
        mode: WriteMode,
        table: &str,
        columns: &[String],
        rows: Vec<Vec<StoreValue>>,
    ) -> Result<(), StoreError> {
        let schema = self.store.table_schema(table)?;
        for column in columns {
            let known = schema.iter().any(|c| &c.name == column);
            if !known || self.store.dropped_columns.contains(column) {
                return Err(StoreError::NotFound(format!(
                    "Column not found in table {table}: {column}"
                )));
            }
        }
        self.staged.push(WriteRecord {
            mode,
            table: table.to_string(),
            columns: columns.to_vec(),
            rows,
        });
        Ok(())
    }

    fn commit(self: Box<Self>) -> Result<(), StoreError> {
        let MemoryBatch { store, staged } = *self;
        if let Some(fault) = &store.commit_fault {
            return Err(fault.clone());
        }
        store.committed.borrow_mut().extend(staged);
        Ok(())
    }

    fn rollback(self: Box<Self>) -> Result<(), StoreError> {
        *self.store.rollbacks.borrow_mut() += 1;
        Ok(())
    }
}
