//! The six face directions of a cell.

use crate::BlockPos;

/// Six face directions.
///
/// The ordinal values are stable and may be used as bit indices.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Downward (-Y direction) - ordinal 0
    Down = 0,
    /// Upward (+Y direction) - ordinal 1
    Up = 1,
    /// North (-Z direction) - ordinal 2
    North = 2,
    /// South (+Z direction) - ordinal 3
    South = 3,
    /// West (-X direction) - ordinal 4
    West = 4,
    /// East (+X direction) - ordinal 5
    East = 5,
}

impl Direction {
    /// All six directions in array form for iteration.
    pub const ALL: [Direction; 6] = [
        Direction::Down,
        Direction::Up,
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    /// The four directions of the horizontal plane.
    pub const HORIZONTAL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    /// Returns the opposite direction.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Down => Self::Up,
            Self::Up => Self::Down,
            Self::North => Self::South,
            Self::South => Self::North,
            Self::West => Self::East,
            Self::East => Self::West,
        }
    }

    /// Gets the offset in the given direction.
    ///
    /// Returns (dx, dy, dz) for this direction.
    #[must_use]
    pub const fn offset(self) -> (i32, i32, i32) {
        match self {
            Self::Down => (0, -1, 0),
            Self::Up => (0, 1, 0),
            Self::North => (0, 0, -1),
            Self::South => (0, 0, 1),
            Self::West => (-1, 0, 0),
            Self::East => (1, 0, 0),
        }
    }

    /// Whether this direction lies in the horizontal plane.
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        !matches!(self, Self::Down | Self::Up)
    }

    /// Returns a new `BlockPos` relative to the given position in this direction.
    #[must_use]
    pub const fn relative(self, pos: BlockPos) -> BlockPos {
        let (dx, dy, dz) = self.offset();
        pos.offset(dx, dy, dz)
    }
}
