// In: src/bridge/mod.rs

// ====================================================================================
// ARCHITECTURAL OVERVIEW: The Bridge Layer
// ====================================================================================
//
// The `bridge` is the public-facing API of spanframe. It ties the pure pieces
// (resolver, converters, frame) to the caller's query results and to the
// caller's `Store`.
//
// Data Flow (Read):
//
//   1. [Caller]                -> hands over a materialized `ResultSet`
//         |
//   2. [Stateless API (to_frame)]
//         |
//         `-> a. Resolves the field descriptors into `ColumnMetadata` (once)
//         |
//         `-> b. Transposes rows into columns
//         |
//         `-> c. Converts each column with the Outbound Converter
//         |
//   3. [Frame]                 -> returned to the caller
//
//
// Data Flow (Write):
//
//   1. [Caller]                -> hands over a `Frame` (or named raw rows) and a table
//         |
//   2. [Orchestrator (upsert_rows)]
//         |
//         `-> a. Fetches the live table schema from the `Store`, resolves it once
//         |
//         `-> b. Converts every cell with the Inbound Converter
//         |
//         `-> c. Opens a `ScopedBatch`, writes, commits
//         |
//   3. [Store]                 -> rows visible after commit, nothing on any error
//
// ====================================================================================
pub(crate) mod orchestrator;
pub mod stateless_api;

// --- Read Path ---
pub use stateless_api::{to_frame, to_frame_with};

// --- Write Path ---
pub use orchestrator::COLUMN_MISMATCH_PREFIX;
pub use stateless_api::{upsert_frame, upsert_frame_with, upsert_rows};
