use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque handle for an actor (vehicle) registered with the contact tracker.
/// The simulation never owns actors; hosts map ids to their own entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(pub u64);

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "actor#{}", self.0)
    }
}

/// Grid cell address. Row follows world Y, column follows world X.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CellCoord {
    pub row: u32,
    pub col: u32,
}

impl CellCoord {
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Flat index into a row-major grid of side `resolution`.
    #[inline]
    pub fn index(self, resolution: u32) -> usize {
        self.row as usize * resolution as usize + self.col as usize
    }
}

/// Visual style for spray thrown by a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SprayKind {
    Snow,
    Ice,
}

/// How contact painting reaches the field within a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaintMode {
    /// Each actor paints straight into the field, in registration order.
    #[default]
    Direct,
    /// Each actor paints into a scratch buffer; buffers are merged into
    /// the field by per-cell min height at the end of the tick.
    Deferred,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_index_row_major() {
        assert_eq!(CellCoord::new(0, 0).index(8), 0);
        assert_eq!(CellCoord::new(0, 7).index(8), 7);
        assert_eq!(CellCoord::new(1, 0).index(8), 8);
        assert_eq!(CellCoord::new(7, 7).index(8), 63);
    }

    #[test]
    fn test_actor_id_display() {
        assert_eq!(ActorId(42).to_string(), "actor#42");
    }

    #[test]
    fn test_paint_mode_default_is_direct() {
        assert_eq!(PaintMode::default(), PaintMode::Direct);
    }
}
