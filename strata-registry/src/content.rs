//! Value types describing what occupies a cell.

use crate::{BlockId, FluidId, MAX_LEVEL};

/// A block type together with its auxiliary data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BlockInstance {
    /// Block type.
    pub id: BlockId,
    /// Per-block state, 6 significant bits.
    pub data: u8,
}

impl BlockInstance {
    /// An `air` block with no data.
    pub const AIR: BlockInstance = BlockInstance::new(BlockId::AIR);

    /// Creates an instance with zero data.
    #[must_use]
    pub const fn new(id: BlockId) -> Self {
        Self { id, data: 0 }
    }

    /// Creates an instance with the given data.
    #[must_use]
    pub const fn with_data(id: BlockId, data: u8) -> Self {
        Self { id, data }
    }
}

/// A fluid type, how much of it there is, and whether it is at rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FluidInstance {
    /// Fluid type.
    pub id: FluidId,
    /// Fill amount, 0 (one eighth) to 7 (full).
    pub level: u8,
    /// Static fluid has no pending tick. Flowing fluid has exactly one.
    pub is_static: bool,
}

impl FluidInstance {
    /// No fluid, at rest.
    pub const NONE: FluidInstance = FluidInstance {
        id: FluidId::NONE,
        level: 0,
        is_static: true,
    };

    /// Creates a static instance.
    #[must_use]
    pub const fn new(id: FluidId, level: u8) -> Self {
        Self {
            id,
            level,
            is_static: true,
        }
    }

    /// Creates a flowing instance.
    #[must_use]
    pub const fn flowing(id: FluidId, level: u8) -> Self {
        Self {
            id,
            level,
            is_static: false,
        }
    }

    /// Returns this instance with the static flag replaced.
    #[must_use]
    pub const fn with_static(self, is_static: bool) -> Self {
        Self { is_static, ..self }
    }

    /// Returns this instance at another level.
    #[must_use]
    pub const fn with_level(self, level: u8) -> Self {
        Self { level, ..self }
    }

    /// Whether the cell holds no fluid.
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.id.is_none()
    }

    /// Whether the cell is completely full.
    #[must_use]
    pub const fn is_full(self) -> bool {
        self.level >= MAX_LEVEL
    }

    /// Volume in eighths of a cell, zero for no fluid.
    #[must_use]
    pub const fn eighths(self) -> u32 {
        if self.is_none() {
            0
        } else {
            self.level as u32 + 1
        }
    }
}

impl Default for FluidInstance {
    fn default() -> Self {
        Self::NONE
    }
}

/// Everything stored in one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Content {
    /// The occupying block.
    pub block: BlockInstance,
    /// The fluid sharing the cell.
    pub fluid: FluidInstance,
}

impl Content {
    /// Air with no fluid.
    pub const EMPTY: Content = Content {
        block: BlockInstance::AIR,
        fluid: FluidInstance::NONE,
    };

    /// Creates a content value.
    #[must_use]
    pub const fn new(block: BlockInstance, fluid: FluidInstance) -> Self {
        Self { block, fluid }
    }

    /// Air holding the given fluid.
    #[must_use]
    pub const fn fluid(fluid: FluidInstance) -> Self {
        Self::new(BlockInstance::AIR, fluid)
    }

    /// The given block with no fluid.
    #[must_use]
    pub const fn block(block: BlockInstance) -> Self {
        Self::new(block, FluidInstance::NONE)
    }
}
