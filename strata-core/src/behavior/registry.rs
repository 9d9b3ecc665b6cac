//! Behaviour registry for looking up behaviours by block and fluid id.

use std::sync::Arc;

use strata_registry::{BlockId, FluidId, Registry};

use super::{BlockBehaviour, DefaultBlock, EmptyFluid, FluidBehaviour, SolidBlock};
use crate::fluid::FlowingFluid;

/// Behaviours indexed by block id and fluid id.
///
/// Built from a definition registry: solid blocks get [`SolidBlock`], other
/// blocks [`DefaultBlock`], `none` gets [`EmptyFluid`] and every other fluid
/// [`FlowingFluid`]. Specific behaviours are assigned on top before the
/// registry is shared with a world.
pub struct BehaviourRegistry {
    blocks: Vec<Arc<dyn BlockBehaviour>>,
    fluids: Vec<Arc<dyn FluidBehaviour>>,
    default_block: Arc<dyn BlockBehaviour>,
    default_fluid: Arc<dyn FluidBehaviour>,
}

impl BehaviourRegistry {
    /// Creates a registry with the default behaviour of every registered type.
    #[must_use]
    pub fn new(registry: &Registry) -> Self {
        let default_block: Arc<dyn BlockBehaviour> = Arc::new(DefaultBlock);
        let solid_block: Arc<dyn BlockBehaviour> = Arc::new(SolidBlock);
        let empty_fluid: Arc<dyn FluidBehaviour> = Arc::new(EmptyFluid);
        let flowing_fluid: Arc<dyn FluidBehaviour> = Arc::new(FlowingFluid);

        let blocks = registry
            .blocks
            .iter()
            .map(|(_, definition)| {
                if definition.solid {
                    Arc::clone(&solid_block)
                } else {
                    Arc::clone(&default_block)
                }
            })
            .collect();

        let fluids = registry
            .fluids
            .iter()
            .map(|(id, _)| {
                if id.is_none() {
                    Arc::clone(&empty_fluid)
                } else {
                    Arc::clone(&flowing_fluid)
                }
            })
            .collect();

        Self {
            blocks,
            fluids,
            default_block,
            default_fluid: empty_fluid,
        }
    }

    /// Replaces the behaviour of a registered block. Unknown ids are ignored.
    pub fn assign_block(&mut self, id: BlockId, behaviour: Arc<dyn BlockBehaviour>) {
        match self.blocks.get_mut(id.0 as usize) {
            Some(slot) => *slot = behaviour,
            None => log::warn!("Ignoring behaviour for unregistered {id}"),
        }
    }

    /// Replaces the behaviour of a registered fluid. Unknown ids are ignored.
    pub fn assign_fluid(&mut self, id: FluidId, behaviour: Arc<dyn FluidBehaviour>) {
        match self.fluids.get_mut(id.0 as usize) {
            Some(slot) => *slot = behaviour,
            None => log::warn!("Ignoring behaviour for unregistered {id}"),
        }
    }

    /// Gets the behaviour for a block id.
    ///
    /// Returns the default behaviour if the id is invalid.
    #[must_use]
    pub fn block(&self, id: BlockId) -> &dyn BlockBehaviour {
        &**self.blocks.get(id.0 as usize).unwrap_or(&self.default_block)
    }

    /// Gets the behaviour for a fluid id.
    ///
    /// Returns the empty behaviour if the id is invalid.
    #[must_use]
    pub fn fluid(&self, id: FluidId) -> &dyn FluidBehaviour {
        &**self.fluids.get(id.0 as usize).unwrap_or(&self.default_fluid)
    }
}
