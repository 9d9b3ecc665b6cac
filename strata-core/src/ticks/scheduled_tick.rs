//! Scheduled tick types.

use std::cmp::Ordering;

use strata_registry::BlockId;
use strata_utils::BlockPos;

/// What a block tick does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockTickKind {
    /// Run the block's scheduled-update hook.
    Update,
    /// Run the block's destroy operation.
    Destroy,
}

/// Payload of a block tick: the block expected at the position and the operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockTick {
    /// Block that must still occupy the cell for the tick to fire.
    pub block: BlockId,
    /// Operation to run.
    pub kind: BlockTickKind,
}

impl BlockTick {
    /// A scheduled update of `block`.
    #[must_use]
    pub const fn update(block: BlockId) -> Self {
        Self {
            block,
            kind: BlockTickKind::Update,
        }
    }

    /// A scheduled destroy of `block`.
    #[must_use]
    pub const fn destroy(block: BlockId) -> Self {
        Self {
            block,
            kind: BlockTickKind::Destroy,
        }
    }
}

/// A scheduled tick for a block or fluid.
#[derive(Debug, Clone)]
pub struct ScheduledTick<T> {
    /// The type being ticked (block tick or fluid id).
    pub tick_type: T,
    /// The position of the block/fluid.
    pub pos: BlockPos,
    /// The pass on which this should fire.
    pub trigger_tick: u64,
    /// Sub-tick ordering for ticks with the same `trigger_tick`.
    /// Lower values run first.
    pub sub_tick_order: u64,
}

impl<T> ScheduledTick<T> {
    /// Creates a new scheduled tick.
    pub const fn new(tick_type: T, pos: BlockPos, trigger_tick: u64, sub_tick_order: u64) -> Self {
        Self {
            tick_type,
            pos,
            trigger_tick,
            sub_tick_order,
        }
    }
}

impl<T> PartialEq for ScheduledTick<T> {
    fn eq(&self, other: &Self) -> bool {
        self.trigger_tick == other.trigger_tick && self.sub_tick_order == other.sub_tick_order
    }
}

impl<T> Eq for ScheduledTick<T> {}

impl<T> PartialOrd for ScheduledTick<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for ScheduledTick<T> {
    /// Ordering for the priority queue.
    ///
    /// Note: `BinaryHeap` is a max-heap, so we reverse the comparison
    /// to get earliest ticks first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .trigger_tick
            .cmp(&self.trigger_tick)
            .then_with(|| other.sub_tick_order.cmp(&self.sub_tick_order))
    }
}

/// Key for deduplication in the tick set.
///
/// Only considers position and type - ignores timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickKey<T> {
    /// The position of the block/fluid.
    pub pos: BlockPos,
    /// The type being ticked.
    pub tick_type: T,
}

impl<T: Copy> From<&ScheduledTick<T>> for TickKey<T> {
    fn from(tick: &ScheduledTick<T>) -> Self {
        Self {
            pos: tick.pos,
            tick_type: tick.tick_type,
        }
    }
}
