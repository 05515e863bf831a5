// --- IN: src/null_handling/sentinel.rs ---

//! The set of cell kinds the table uses as typed null sentinels.

use hashbrown::HashSet;
use std::sync::LazyLock;

use crate::value::{Cell, CellKind};

/// Populated once on first use and read-only afterwards.
static NULL_SENTINEL_KINDS: LazyLock<HashSet<CellKind>> =
    LazyLock::new(|| [CellKind::Missing, CellKind::MissingTime].into_iter().collect());

/// Returns `true` if `kind` is one of the table's typed null sentinels.
pub fn is_null_sentinel_kind(kind: CellKind) -> bool {
    NULL_SENTINEL_KINDS.contains(&kind)
}

/// Returns `true` if the cell is any of the table's null forms: a typed
/// sentinel, a NaN float, or plain absence.
pub fn is_table_null(cell: &Cell) -> bool {
    if is_null_sentinel_kind(cell.kind()) {
        return true;
    }
    match cell {
        Cell::Float(v) => v.is_nan(),
        Cell::Absent => true,
        _ => false,
    }
}
