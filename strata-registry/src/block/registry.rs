use rustc_hash::FxHashMap;

use super::{AIR, BlockDefinition, BlockId};
use crate::{BLOCK_ID_BITS, RegistryError, RegistryExt};

/// Most block types a cell word can address.
pub const MAX_BLOCKS: usize = 1 << BLOCK_ID_BITS;

/// Block definitions indexed by id and by name.
pub struct BlockRegistry {
    by_id: Vec<BlockDefinition>,
    by_name: FxHashMap<&'static str, BlockId>,
    allows_registering: bool,
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockRegistry {
    /// Creates a registry with `air` already registered as id 0.
    #[must_use]
    pub fn new() -> Self {
        let mut by_name = FxHashMap::default();
        by_name.insert(AIR.name, BlockId::AIR);
        Self {
            by_id: vec![AIR],
            by_name,
            allows_registering: true,
        }
    }

    /// Registers a block and returns its dense id.
    pub fn register(&mut self, definition: BlockDefinition) -> Result<BlockId, RegistryError> {
        if !self.allows_registering {
            return Err(RegistryError::Frozen("block"));
        }
        if definition.name.is_empty() {
            return Err(RegistryError::InvalidDefinition {
                name: definition.name,
                reason: "name must not be empty",
            });
        }
        if self.by_name.contains_key(definition.name) {
            return Err(RegistryError::Duplicate(definition.name));
        }
        if self.by_id.len() >= MAX_BLOCKS {
            return Err(RegistryError::Full {
                kind: "block",
                max: MAX_BLOCKS,
            });
        }

        let id = BlockId(self.by_id.len() as u16);
        self.by_name.insert(definition.name, id);
        self.by_id.push(definition);
        Ok(id)
    }

    /// Gets a definition by id.
    #[must_use]
    pub fn get(&self, id: BlockId) -> Option<&BlockDefinition> {
        self.by_id.get(id.0 as usize)
    }

    /// Gets a definition by id, or `air` if the id is unknown.
    #[must_use]
    pub fn get_or_fallback(&self, id: BlockId) -> &BlockDefinition {
        self.get(id).unwrap_or(&AIR)
    }

    /// Gets the id registered under `name`.
    #[must_use]
    pub fn get_by_name(&self, name: &str) -> Option<BlockId> {
        self.by_name.get(name).copied()
    }

    /// Whether `id` refers to a registered block.
    #[must_use]
    pub fn contains(&self, id: BlockId) -> bool {
        (id.0 as usize) < self.by_id.len()
    }

    /// Number of registered blocks, `air` included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Always false, `air` is registered on construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Iterates over `(id, definition)` in id order.
    pub fn iter(&self) -> impl Iterator<Item = (BlockId, &BlockDefinition)> {
        self.by_id
            .iter()
            .enumerate()
            .map(|(id, def)| (BlockId(id as u16), def))
    }
}

impl RegistryExt for BlockRegistry {
    fn freeze(&mut self) {
        self.allows_registering = false;
    }

    fn is_frozen(&self) -> bool {
        !self.allows_registering
    }
}
