use strata_registry::FluidInstance;
use strata_utils::BlockPos;

use crate::world::World;

/// Hooks of a fluid type.
pub trait FluidBehaviour: Send + Sync {
    /// Called when a write placed this fluid at `pos` and asked for an
    /// immediate fluid update. Defaults to [`FluidBehaviour::update_soon`].
    fn update_now(&self, world: &mut World, pos: BlockPos, fluid: FluidInstance) {
        self.update_soon(world, pos, fluid);
    }

    /// Called when a face neighbour of `pos` was written. Defaults to
    /// [`World::tick_soon`], which wakes the fluid if it was at rest.
    fn update_soon(&self, world: &mut World, pos: BlockPos, fluid: FluidInstance) {
        world.tick_soon(fluid.id, pos, fluid.is_static);
    }

    /// Called when a scheduled fluid tick fires, with the live level and flag.
    fn scheduled_update(&self, _world: &mut World, _pos: BlockPos, _fluid: FluidInstance) {}
}

/// Behaviour of `none`: nothing to update.
pub struct EmptyFluid;

impl FluidBehaviour for EmptyFluid {
    fn update_now(&self, _world: &mut World, _pos: BlockPos, _fluid: FluidInstance) {}

    fn update_soon(&self, _world: &mut World, _pos: BlockPos, _fluid: FluidInstance) {}
}
