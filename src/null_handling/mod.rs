//! This module serves as the public API for all null-handling logic on the
//! table side of the boundary.
//!
//! The table has several ways to say "no value". On the way to the store they
//! all collapse to a single `StoreValue::Null`; this module is where that
//! recognition lives.
//!
//! This module is PURE RUST and does not depend on Arrow.

//==================================================================================
// 1. Module Declarations
//==================================================================================

/// The recognized null-sentinel kinds and the predicate built on them.
pub mod sentinel;

//==================================================================================
// 2. Public API Re-exports
//==================================================================================

pub use sentinel::{is_null_sentinel_kind, is_table_null};

//==================================================================================
// 3. Unit Tests (Module-level integration tests)
//==================================================================================
