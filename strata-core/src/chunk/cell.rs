//! The packed per-cell word.
//!
//! Layout, lowest bit first. Persisted, so it must never change:
//!
//! | bits      | field         |
//! |-----------|---------------|
//! | `0..12`   | block id      |
//! | `12..18`  | block data    |
//! | `18..23`  | fluid id      |
//! | `23..26`  | fluid level   |
//! | `26`      | static flag   |
//! | `27..32`  | reserved, 0   |

use strata_registry::{
    BLOCK_DATA_BITS, BLOCK_ID_BITS, BlockId, BlockInstance, Content, FLUID_ID_BITS,
    FLUID_LEVEL_BITS, FluidId, FluidInstance, Registry,
};

const BLOCK_SHIFT: u32 = 0;
const DATA_SHIFT: u32 = BLOCK_SHIFT + BLOCK_ID_BITS;
const FLUID_SHIFT: u32 = DATA_SHIFT + BLOCK_DATA_BITS;
const LEVEL_SHIFT: u32 = FLUID_SHIFT + FLUID_ID_BITS;
const STATIC_SHIFT: u32 = LEVEL_SHIFT + FLUID_LEVEL_BITS;

const BLOCK_MASK: u32 = (1 << BLOCK_ID_BITS) - 1;
const DATA_MASK: u32 = (1 << BLOCK_DATA_BITS) - 1;
const FLUID_MASK: u32 = (1 << FLUID_ID_BITS) - 1;
const LEVEL_MASK: u32 = (1 << FLUID_LEVEL_BITS) - 1;

/// One cell's full state in a single word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct CellWord(pub u32);

impl Default for CellWord {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl CellWord {
    /// Air with no fluid, at rest.
    pub const EMPTY: CellWord = CellWord::encode(0, 0, 0, 0, true);

    /// Packs the five fields.
    ///
    /// Every field is masked to its width, so an out-of-range value can
    /// never spill into its neighbour. Debug builds assert the ranges.
    #[must_use]
    pub const fn encode(block: u16, data: u8, fluid: u8, level: u8, is_static: bool) -> Self {
        debug_assert!((block as u32) <= BLOCK_MASK, "block id out of range");
        debug_assert!((data as u32) <= DATA_MASK, "block data out of range");
        debug_assert!((fluid as u32) <= FLUID_MASK, "fluid id out of range");
        debug_assert!((level as u32) <= LEVEL_MASK, "fluid level out of range");

        Self(
            ((block as u32 & BLOCK_MASK) << BLOCK_SHIFT)
                | ((data as u32 & DATA_MASK) << DATA_SHIFT)
                | ((fluid as u32 & FLUID_MASK) << FLUID_SHIFT)
                | ((level as u32 & LEVEL_MASK) << LEVEL_SHIFT)
                | ((is_static as u32) << STATIC_SHIFT),
        )
    }

    /// Unpacks `(block, data, fluid, level, is_static)` without any id checks.
    #[must_use]
    pub const fn decode(self) -> (u16, u8, u8, u8, bool) {
        (
            self.block_id(),
            self.block_data(),
            self.fluid_id(),
            self.fluid_level(),
            self.is_static(),
        )
    }

    /// Raw block id.
    #[must_use]
    pub const fn block_id(self) -> u16 {
        ((self.0 >> BLOCK_SHIFT) & BLOCK_MASK) as u16
    }

    /// Raw block data.
    #[must_use]
    pub const fn block_data(self) -> u8 {
        ((self.0 >> DATA_SHIFT) & DATA_MASK) as u8
    }

    /// Raw fluid id.
    #[must_use]
    pub const fn fluid_id(self) -> u8 {
        ((self.0 >> FLUID_SHIFT) & FLUID_MASK) as u8
    }

    /// Fluid level.
    #[must_use]
    pub const fn fluid_level(self) -> u8 {
        ((self.0 >> LEVEL_SHIFT) & LEVEL_MASK) as u8
    }

    /// Static flag.
    #[must_use]
    pub const fn is_static(self) -> bool {
        (self.0 >> STATIC_SHIFT) & 1 == 1
    }

    /// Returns the word with only the static flag replaced.
    #[must_use]
    pub const fn with_static(self, is_static: bool) -> Self {
        Self((self.0 & !(1 << STATIC_SHIFT)) | ((is_static as u32) << STATIC_SHIFT))
    }

    /// Packs a content value.
    #[must_use]
    pub const fn from_content(content: &Content) -> Self {
        Self::encode(
            content.block.id.0,
            content.block.data,
            content.fluid.id.0,
            content.fluid.level,
            content.fluid.is_static,
        )
    }

    /// Unpacks into a content value.
    ///
    /// Ids the registry does not know, for example from a save written
    /// against a larger registry, decode to `air` and `none`.
    #[must_use]
    pub fn to_content(self, registry: &Registry) -> Content {
        let block_id = BlockId(self.block_id());
        let block = if registry.blocks.contains(block_id) {
            BlockInstance::with_data(block_id, self.block_data())
        } else {
            BlockInstance::AIR
        };

        let fluid_id = FluidId(self.fluid_id());
        let fluid = if registry.fluids.contains(fluid_id) {
            FluidInstance {
                id: fluid_id,
                level: self.fluid_level(),
                is_static: self.is_static(),
            }
        } else {
            FluidInstance::NONE
        };

        Content::new(block, fluid)
    }

    /// Whether both ids are registered and the reserved bits are clear.
    #[must_use]
    pub fn is_valid(self, registry: &Registry) -> bool {
        self.0 >> (STATIC_SHIFT + 1) == 0
            && registry.blocks.contains(BlockId(self.block_id()))
            && registry.fluids.contains(FluidId(self.fluid_id()))
    }
}
