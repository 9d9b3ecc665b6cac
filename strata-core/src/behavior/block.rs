use strata_registry::{BlockInstance, Content, FluidId};
use strata_utils::{BlockPos, Direction};

use crate::world::World;

/// Hooks and capabilities of a block type.
///
/// Every method has a default, so a behaviour only overrides what it needs.
pub trait BlockBehaviour: Send + Sync {
    /// Called right after a write placed this block at `pos`.
    fn on_content_changed(&self, _world: &mut World, _pos: BlockPos, _content: Content) {}

    /// Called when the face neighbour in `direction` was written.
    fn on_neighbor_updated(
        &self,
        _world: &mut World,
        _pos: BlockPos,
        _block: BlockInstance,
        _direction: Direction,
    ) {
    }

    /// Called when a scheduled block update fires.
    fn scheduled_update(&self, _world: &mut World, _pos: BlockPos, _block: BlockInstance) {}

    /// Called when a random update samples this cell.
    fn random_update(&self, _world: &mut World, _pos: BlockPos, _block: BlockInstance) {}

    /// Called when a scheduled destroy fires. Replaces the block with air
    /// and leaves the fluid in place.
    fn destroy(&self, world: &mut World, pos: BlockPos, _content: Content) {
        world.set_block(BlockInstance::AIR, pos);
    }

    /// Whether `fluid` may enter this block through the face `from`.
    fn allows_inflow(&self, _block: BlockInstance, _fluid: FluidId, _from: Direction) -> bool {
        true
    }

    /// Whether `fluid` may leave this block through the face `toward`.
    fn allows_outflow(&self, _block: BlockInstance, _fluid: FluidId, _toward: Direction) -> bool {
        true
    }
}

/// Behaviour of non-solid blocks without anything special: fluid passes freely.
pub struct DefaultBlock;

impl BlockBehaviour for DefaultBlock {}

/// Behaviour of solid blocks: fluid neither enters nor leaves.
pub struct SolidBlock;

impl BlockBehaviour for SolidBlock {
    fn allows_inflow(&self, _block: BlockInstance, _fluid: FluidId, _from: Direction) -> bool {
        false
    }

    fn allows_outflow(&self, _block: BlockInstance, _fluid: FluidId, _toward: Direction) -> bool {
        false
    }
}
