//! Values on both sides of the conversion boundary.
//!
//! `StoreValue` is the store-native representation, `Cell` the dynamically-typed
//! table-side one, and `JsonObject` the semi-structured container shared by both.

pub mod cell;
pub mod json;
pub mod store_value;

pub use cell::{Cell, CellKind};
pub use json::JsonObject;
pub use store_value::StoreValue;
