// In: src/convert/mod.rs

// ====================================================================================
// The Converters
// ====================================================================================
//
// Both directions dispatch on the column's `TypeTag` and nothing else.
//
//   [Outbound]  Vec<StoreValue> + TypeTag  ->  frame::Column      (whole column)
//   [Inbound]   Cell + TypeTag             ->  StoreValue         (one cell)
//
// A value that survives outbound then inbound under the same tag comes back
// equal to itself, with JSON/JSONB compared on canonical text.
// ====================================================================================

pub mod inbound;
pub mod outbound;

pub use inbound::{convert_inbound, convert_inbound_with};
pub use outbound::{convert_outbound, convert_outbound_with, is_vectorized};
