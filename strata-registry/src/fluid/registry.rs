use rustc_hash::FxHashMap;

use super::{FluidDefinition, FluidId, NONE};
use crate::{FLUID_ID_BITS, RegistryError, RegistryExt};

/// Most fluid types a cell word can address.
pub const MAX_FLUIDS: usize = 1 << FLUID_ID_BITS;

/// Fluid definitions indexed by id and by name.
pub struct FluidRegistry {
    by_id: Vec<FluidDefinition>,
    by_name: FxHashMap<&'static str, FluidId>,
    allows_registering: bool,
}

impl Default for FluidRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FluidRegistry {
    /// Creates a registry with `none` already registered as id 0.
    #[must_use]
    pub fn new() -> Self {
        let mut by_name = FxHashMap::default();
        by_name.insert(NONE.name, FluidId::NONE);
        Self {
            by_id: vec![NONE],
            by_name,
            allows_registering: true,
        }
    }

    /// Registers a fluid and returns its dense id.
    pub fn register(&mut self, definition: FluidDefinition) -> Result<FluidId, RegistryError> {
        if !self.allows_registering {
            return Err(RegistryError::Frozen("fluid"));
        }
        if let Err(reason) = definition.validate() {
            return Err(RegistryError::InvalidDefinition {
                name: definition.name,
                reason,
            });
        }
        if self.by_name.contains_key(definition.name) {
            return Err(RegistryError::Duplicate(definition.name));
        }
        if self.by_id.len() >= MAX_FLUIDS {
            return Err(RegistryError::Full {
                kind: "fluid",
                max: MAX_FLUIDS,
            });
        }

        let id = FluidId(self.by_id.len() as u8);
        self.by_name.insert(definition.name, id);
        self.by_id.push(definition);
        Ok(id)
    }

    /// Gets a definition by id.
    #[must_use]
    pub fn get(&self, id: FluidId) -> Option<&FluidDefinition> {
        self.by_id.get(id.0 as usize)
    }

    /// Gets a definition by id, or `none` if the id is unknown.
    #[must_use]
    pub fn get_or_fallback(&self, id: FluidId) -> &FluidDefinition {
        self.get(id).unwrap_or(&NONE)
    }

    /// Gets the id registered under `name`.
    #[must_use]
    pub fn get_by_name(&self, name: &str) -> Option<FluidId> {
        self.by_name.get(name).copied()
    }

    /// Whether `id` refers to a registered fluid.
    #[must_use]
    pub fn contains(&self, id: FluidId) -> bool {
        (id.0 as usize) < self.by_id.len()
    }

    /// Number of registered fluids, `none` included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Always false, `none` is registered on construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Iterates over `(id, definition)` in id order.
    pub fn iter(&self) -> impl Iterator<Item = (FluidId, &FluidDefinition)> {
        self.by_id
            .iter()
            .enumerate()
            .map(|(id, def)| (FluidId(id as u8), def))
    }
}

impl RegistryExt for FluidRegistry {
    fn freeze(&mut self) {
        self.allows_registering = false;
    }

    fn is_frozen(&self) -> bool {
        !self.allows_registering
    }
}
