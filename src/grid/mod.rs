//! Uniform grids: cell storage and world-to-cell placement.

pub mod map;
pub mod space;

pub use map::Map;
pub use space::{bresenham, GridSpace};

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Per-cell flag set for bitmask grids.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct CellFlags: u32 {
        const SOLID = 1 << 0;
        const ONE_WAY = 1 << 1;
        const LADDER = 1 << 2;
        const WATER = 1 << 3;
        const HAZARD = 1 << 4;
        const TRIGGER = 1 << 5;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_flags_mask() {
        let cell = CellFlags::SOLID | CellFlags::WATER;
        assert!(cell.intersects(CellFlags::SOLID | CellFlags::HAZARD));
        assert!(!cell.intersects(CellFlags::LADDER));
        assert!(CellFlags::empty().is_empty());
        // unnamed bits survive
        assert_eq!(CellFlags::from_bits_retain(1 << 20).bits(), 1 << 20);
    }
}
