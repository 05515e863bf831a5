//! This file is the root of the `spanframe` Rust crate.
//!
//! spanframe converts between a relational store's typed query results and an
//! in-memory, Arrow-backed table (`Frame`), in both directions:
//! 1.  Reading: a `ResultSet` becomes a `Frame`, one typed column per field.
//! 2.  Writing: a `Frame` is checked against the live table schema, converted
//!     cell by cell, and upserted through the caller's `Store` in one batch.
//!
//! Its responsibilities here are limited to declaring the modules and
//! re-exporting the public surface.

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
//==================================================================================
// 1. Module Declarations
//==================================================================================
#[macro_use]
pub mod observability; // Make macros available throughout the crate

pub mod bridge;
pub mod config;
pub mod convert;
pub mod error;
pub mod frame;
pub mod null_handling;
pub mod resolver;
pub mod store;
pub mod types;
pub mod value;

//==================================================================================
// 2. Public Re-exports
//==================================================================================
pub use bridge::{to_frame, to_frame_with, upsert_frame, upsert_frame_with, upsert_rows};
pub use config::{ArrayNullPolicy, FrameConfig, WriteMode};
pub use convert::{convert_inbound, convert_inbound_with, convert_outbound, convert_outbound_with};
pub use error::{SpanframeError, StoreError};
pub use frame::{Column, Dtype, Frame};
pub use observability::enable_verbose_logging;
pub use resolver::{resolve_column_metadata, resolve_type_tag, ColumnMetadata};
pub use store::{BatchWrite, ResultSet, ScopedBatch, Store};
pub use types::{ColumnDescriptor, ScalarTag, StoreType, TypeAnnotationCode, TypeCode, TypeTag};
pub use value::{Cell, CellKind, JsonObject, StoreValue};
