//! Block and fluid definitions for the strata simulation core.
//!
//! Definitions are registered once at startup, receive dense ids in
//! registration order, and are immutable after the registry is frozen.
//! The registry is an explicit value shared by `Arc`; nothing here is global.

pub mod block;
pub mod content;
pub mod error;
pub mod fluid;

pub use block::{BlockDefinition, BlockId, BlockRegistry};
pub use content::{BlockInstance, Content, FluidInstance};
pub use error::RegistryError;
pub use fluid::{FluidDefinition, FluidId, FluidRegistry, Phase};

/// Number of bits a block id occupies in a cell word.
pub const BLOCK_ID_BITS: u32 = 12;
/// Number of bits of per-block auxiliary data in a cell word.
pub const BLOCK_DATA_BITS: u32 = 6;
/// Number of bits a fluid id occupies in a cell word.
pub const FLUID_ID_BITS: u32 = 5;
/// Number of bits of fluid level in a cell word.
pub const FLUID_LEVEL_BITS: u32 = 3;

/// Largest block data value.
pub const MAX_BLOCK_DATA: u8 = (1 << BLOCK_DATA_BITS) - 1;
/// Level of a completely full cell.
pub const MAX_LEVEL: u8 = (1 << FLUID_LEVEL_BITS) - 1;

/// Shared behaviour of the definition registries.
pub trait RegistryExt {
    /// Prevents further registration.
    fn freeze(&mut self);

    /// Whether [`RegistryExt::freeze`] has been called.
    fn is_frozen(&self) -> bool;
}

/// Both definition tables, as handed to the simulation.
pub struct Registry {
    /// Block definitions.
    pub blocks: BlockRegistry,
    /// Fluid definitions.
    pub fluids: FluidRegistry,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Creates a registry holding only the fallback definitions, `air` and `none`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            blocks: BlockRegistry::new(),
            fluids: FluidRegistry::new(),
        }
    }

    /// Registers a block definition.
    pub fn register_block(&mut self, definition: BlockDefinition) -> Result<BlockId, RegistryError> {
        self.blocks.register(definition)
    }

    /// Registers a fluid definition.
    pub fn register_fluid(&mut self, definition: FluidDefinition) -> Result<FluidId, RegistryError> {
        self.fluids.register(definition)
    }

    /// Looks up a block definition, falling back to `air` for unknown ids.
    #[must_use]
    pub fn block(&self, id: BlockId) -> &BlockDefinition {
        self.blocks.get_or_fallback(id)
    }

    /// Looks up a fluid definition, falling back to `none` for unknown ids.
    #[must_use]
    pub fn fluid(&self, id: FluidId) -> &FluidDefinition {
        self.fluids.get_or_fallback(id)
    }
}

impl RegistryExt for Registry {
    fn freeze(&mut self) {
        self.blocks.freeze();
        self.fluids.freeze();
        log::debug!(
            "Registry frozen with {} blocks and {} fluids",
            self.blocks.len(),
            self.fluids.len()
        );
    }

    fn is_frozen(&self) -> bool {
        self.blocks.is_frozen() && self.fluids.is_frozen()
    }
}
