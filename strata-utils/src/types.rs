// Wrapper types making it harder to accidentaly use the wrong kind of position.

use std::fmt::{self, Display};

use crate::math::Vector3;

/// Number of bits of a coordinate that address a cell inside its section.
pub const SECTION_BITS: u32 = 4;
/// Edge length of a section in cells.
pub const SECTION_SIZE: i32 = 1 << SECTION_BITS;
/// Mask extracting the in-section part of a coordinate.
pub const SECTION_MASK: i32 = SECTION_SIZE - 1;
/// Number of cells stored by one section.
pub const SECTION_VOLUME: usize = 1 << (3 * SECTION_BITS);

/// Number of bits of a section coordinate that address a section inside its chunk.
pub const CHUNK_SECTION_BITS: u32 = 1;
/// Sections per chunk along each axis.
pub const CHUNK_SECTIONS: i32 = 1 << CHUNK_SECTION_BITS;
/// Sections stored by one chunk.
pub const SECTIONS_PER_CHUNK: usize = 1 << (3 * CHUNK_SECTION_BITS);
/// Number of bits of a world coordinate that address a cell inside its chunk.
pub const CHUNK_BITS: u32 = SECTION_BITS + CHUNK_SECTION_BITS;
/// Edge length of a chunk in cells.
pub const CHUNK_SIZE: i32 = 1 << CHUNK_BITS;

// A world position of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockPos(pub Vector3<i32>);

// The position of a section, in section units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectionPos(pub Vector3<i32>);

// The position of a chunk, in chunk units. Chunks are cubic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkPos(pub Vector3<i32>);

impl BlockPos {
    /// Creates a new block position.
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self(Vector3::new(x, y, z))
    }

    /// The x coordinate.
    #[must_use]
    pub const fn x(self) -> i32 {
        self.0.x
    }

    /// The y coordinate.
    #[must_use]
    pub const fn y(self) -> i32 {
        self.0.y
    }

    /// The z coordinate.
    #[must_use]
    pub const fn z(self) -> i32 {
        self.0.z
    }

    /// Returns this position moved by the given offsets.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(self.0.x + dx, self.0.y + dy, self.0.z + dz)
    }

    /// The section containing this position.
    #[must_use]
    pub fn section_pos(self) -> SectionPos {
        SectionPos(self.0.map(|v| v >> SECTION_BITS))
    }

    /// The chunk containing this position.
    #[must_use]
    pub fn chunk_pos(self) -> ChunkPos {
        ChunkPos(self.0.map(|v| v >> CHUNK_BITS))
    }

    /// Coordinates of this position inside its section, each in `[0, SECTION_SIZE)`.
    #[must_use]
    pub fn section_local(self) -> (usize, usize, usize) {
        (
            (self.0.x & SECTION_MASK) as usize,
            (self.0.y & SECTION_MASK) as usize,
            (self.0.z & SECTION_MASK) as usize,
        )
    }
}

impl Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.0.x, self.0.y, self.0.z)
    }
}

impl SectionPos {
    /// Creates a new section position.
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self(Vector3::new(x, y, z))
    }

    /// The chunk containing this section.
    #[must_use]
    pub fn chunk_pos(self) -> ChunkPos {
        ChunkPos(self.0.map(|v| v >> CHUNK_SECTION_BITS))
    }

    /// Index of this section inside its chunk's section array.
    #[must_use]
    pub fn index_in_chunk(self) -> usize {
        let mask = CHUNK_SECTIONS - 1;
        let x = (self.0.x & mask) as usize;
        let y = (self.0.y & mask) as usize;
        let z = (self.0.z & mask) as usize;
        (x << (2 * CHUNK_SECTION_BITS)) + (y << CHUNK_SECTION_BITS) + z
    }

    /// The lowest-coordinate cell of this section.
    #[must_use]
    pub fn origin(self) -> BlockPos {
        BlockPos(self.0.map(|v| v << SECTION_BITS))
    }
}

impl ChunkPos {
    /// Creates a new chunk position.
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self(Vector3::new(x, y, z))
    }

    /// The lowest-coordinate cell of this chunk.
    #[must_use]
    pub fn origin(self) -> BlockPos {
        BlockPos(self.0.map(|v| v << CHUNK_BITS))
    }

    /// Position of the section at `index` in this chunk's section array.
    #[must_use]
    pub fn section_at(self, index: usize) -> SectionPos {
        let mask = (CHUNK_SECTIONS - 1) as usize;
        let x = (index >> (2 * CHUNK_SECTION_BITS)) & mask;
        let y = (index >> CHUNK_SECTION_BITS) & mask;
        let z = index & mask;
        SectionPos(Vector3::new(
            (self.0.x << CHUNK_SECTION_BITS) + x as i32,
            (self.0.y << CHUNK_SECTION_BITS) + y as i32,
            (self.0.z << CHUNK_SECTION_BITS) + z as i32,
        ))
    }
}

impl Display for ChunkPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.0.x, self.0.y, self.0.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hierarchy_for_positive_positions() {
        let pos = BlockPos::new(37, 5, 16);
        assert_eq!(pos.section_pos(), SectionPos::new(2, 0, 1));
        assert_eq!(pos.chunk_pos(), ChunkPos::new(1, 0, 0));
        assert_eq!(pos.section_local(), (5, 5, 0));
        assert_eq!(pos.section_pos().chunk_pos(), pos.chunk_pos());
    }

    #[test]
    fn test_hierarchy_for_negative_positions() {
        let pos = BlockPos::new(-1, -17, -33);
        assert_eq!(pos.section_pos(), SectionPos::new(-1, -2, -3));
        assert_eq!(pos.chunk_pos(), ChunkPos::new(-1, -1, -2));
        assert_eq!(pos.section_local(), (15, 15, 15));
        assert_eq!(pos.section_pos().chunk_pos(), pos.chunk_pos());
    }

    #[test]
    fn test_section_index_round_trip() {
        let chunk = ChunkPos::new(-3, 2, 7);
        for index in 0..SECTIONS_PER_CHUNK {
            let section = chunk.section_at(index);
            assert_eq!(section.chunk_pos(), chunk);
            assert_eq!(section.index_in_chunk(), index);
        }
    }

    #[test]
    fn test_every_cell_of_a_chunk_maps_back_to_it() {
        let chunk = ChunkPos::new(-1, 0, 1);
        let origin = chunk.origin();
        for d in [0, 1, SECTION_SIZE, CHUNK_SIZE - 1] {
            let pos = origin.offset(d, d, d);
            assert_eq!(pos.chunk_pos(), chunk);
        }
        assert_ne!(origin.offset(CHUNK_SIZE, 0, 0).chunk_pos(), chunk);
    }
}
