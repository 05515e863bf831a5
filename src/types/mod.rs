//! This module defines the strongly-typed schema representations used
//! throughout spanframe.
//!
//! `type_code` mirrors the store's wire enumeration; `type_tag` is the canonical
//! per-column conversion tag that every converter matches on.

pub mod type_code;
pub mod type_tag;

// Re-export the main type(s) for easier access.
pub use type_code::{ColumnDescriptor, StoreType, TypeAnnotationCode, TypeCode};
pub use type_tag::{ScalarTag, TypeTag};
