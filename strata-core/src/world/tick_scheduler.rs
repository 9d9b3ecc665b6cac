//! Scheduling and running block and fluid ticks on a [`World`].

use std::sync::Arc;

use rand::Rng;
use strata_registry::{BlockId, FluidId};
use strata_utils::BlockPos;

use super::World;
use crate::ticks::{BlockTick, BlockTickKind};

/// What one call to [`World::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickStats {
    /// Block ticks whose hook ran.
    pub block_ticks: usize,
    /// Fluid ticks whose hook ran.
    pub fluid_ticks: usize,
    /// Ticks dropped because the cell no longer held the expected type.
    pub stale: usize,
}

impl TickStats {
    /// Ticks whose hook ran, block and fluid together.
    #[must_use]
    pub const fn fired(&self) -> usize {
        self.block_ticks + self.fluid_ticks
    }
}

impl World {
    /// Schedules a scheduled-update of `block` at `pos` after `delay` passes.
    ///
    /// A delay of 0 is treated as 1. Dropped with a warning if the chunk is
    /// not active.
    pub fn schedule_block_tick(&mut self, pos: BlockPos, block: BlockId, delay: u32) -> bool {
        self.guard.check();
        self.block_ticks
            .schedule(pos, BlockTick::update(block), self.pass, delay)
    }

    /// Schedules a scheduled-update of `fluid` at `pos` after `delay` passes.
    ///
    /// A delay of 0 is treated as 1. Dropped with a warning if the chunk is
    /// not active.
    pub fn schedule_fluid_tick(&mut self, pos: BlockPos, fluid: FluidId, delay: u32) -> bool {
        self.guard.check();
        self.fluid_ticks.schedule(pos, fluid, self.pass, delay)
    }

    /// Schedules destruction of whatever block occupies `pos` now, after the
    /// configured destroy delay.
    pub fn schedule_destroy(&mut self, pos: BlockPos) -> bool {
        let Some(content) = self.get_content(pos) else {
            return false;
        };
        let delay = self.config.destroy_delay;
        self.block_ticks
            .schedule(pos, BlockTick::destroy(content.block.id), self.pass, delay)
    }

    /// Moves a resting fluid into motion.
    ///
    /// Does nothing for `none` or when `was_static` is false, because a
    /// flowing cell already owns its pending tick. Otherwise clears the
    /// static flag and schedules a tick after the fluid's viscosity.
    pub fn tick_soon(&mut self, fluid: FluidId, pos: BlockPos, was_static: bool) {
        if fluid.is_none() || !was_static {
            return;
        }
        self.modify_fluid_static(false, pos);
        let delay = self.registry.fluid(fluid).viscosity;
        self.schedule_fluid_tick(pos, fluid, delay);
    }

    /// Whether a block update of `block` is pending at `pos`.
    #[must_use]
    pub fn has_scheduled_block_tick(&self, pos: BlockPos, block: BlockId) -> bool {
        self.block_ticks
            .has_scheduled_tick(pos, BlockTick::update(block))
    }

    /// Whether a destroy of `block` is pending at `pos`.
    #[must_use]
    pub fn has_scheduled_destroy(&self, pos: BlockPos, block: BlockId) -> bool {
        self.block_ticks
            .has_scheduled_tick(pos, BlockTick::destroy(block))
    }

    /// Whether a tick of `fluid` is pending at `pos`.
    #[must_use]
    pub fn has_scheduled_fluid_tick(&self, pos: BlockPos, fluid: FluidId) -> bool {
        self.fluid_ticks.has_scheduled_tick(pos, fluid)
    }

    /// Block ticks waiting in active chunks.
    #[must_use]
    pub fn pending_block_ticks(&self) -> usize {
        self.block_ticks.count()
    }

    /// Fluid ticks waiting in active chunks.
    #[must_use]
    pub fn pending_fluid_ticks(&self) -> usize {
        self.fluid_ticks.count()
    }

    /// Runs one simulation pass.
    ///
    /// The pass counter advances first, then each active chunk gives up to
    /// `max_ticks_per_pass` due block ticks and as many due fluid ticks.
    /// Everything is drained before anything fires, and anything scheduled
    /// while firing lands on a later pass.
    pub fn tick(&mut self) -> TickStats {
        self.guard.check();
        self.pass += 1;

        let budget = self.config.max_ticks_per_pass;
        let block_ticks = self.block_ticks.tick(self.pass, budget);
        let fluid_ticks = self.fluid_ticks.tick(self.pass, budget);
        let behaviours = Arc::clone(&self.behaviours);
        let mut stats = TickStats::default();

        for tick in block_ticks {
            let Some(content) = self.get_content(tick.pos) else {
                stats.stale += 1;
                continue;
            };
            if content.block.id != tick.tick_type.block {
                stats.stale += 1;
                continue;
            }

            let behaviour = behaviours.block(content.block.id);
            match tick.tick_type.kind {
                BlockTickKind::Update => behaviour.scheduled_update(self, tick.pos, content.block),
                BlockTickKind::Destroy => behaviour.destroy(self, tick.pos, content),
            }
            stats.block_ticks += 1;
        }

        for tick in fluid_ticks {
            let Some(content) = self.get_content(tick.pos) else {
                stats.stale += 1;
                continue;
            };
            if content.fluid.id != tick.tick_type {
                stats.stale += 1;
                continue;
            }

            behaviours
                .fluid(content.fluid.id)
                .scheduled_update(self, tick.pos, content.fluid);
            stats.fluid_ticks += 1;
        }

        log::trace!(
            "Pass {}: {} block ticks, {} fluid ticks, {} stale",
            self.pass,
            stats.block_ticks,
            stats.fluid_ticks,
            stats.stale
        );
        stats
    }

    /// Runs chance-based updates, independent of the tick queues.
    ///
    /// Samples `random_ticks_per_section` cells from every section of every
    /// active chunk and calls each sampled block's `random_update`.
    pub fn random_tick<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.guard.check();
        let per_section = self.config.random_ticks_per_section;

        let mut samples = Vec::new();
        for chunk_pos in self.active_chunks() {
            let Some(chunk) = self.chunks.get(&chunk_pos) else {
                continue;
            };
            for (index, section) in chunk.sections().iter().enumerate() {
                let origin = chunk_pos.section_at(index).origin();
                for _ in 0..per_section {
                    let ((x, y, z), word) = section.sample_random(rng);
                    let pos = origin.offset(x as i32, y as i32, z as i32);
                    samples.push((pos, word.to_content(&self.registry).block));
                }
            }
        }

        let behaviours = Arc::clone(&self.behaviours);
        for (pos, block) in samples {
            // An earlier update in this batch may have replaced the block.
            let still_there = self
                .get_content(pos)
                .is_some_and(|content| content.block.id == block.id);
            if still_there {
                behaviours.block(block.id).random_update(self, pos, block);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use strata_registry::{BlockInstance, Content, FluidInstance};

    use super::*;
    use crate::behavior::{BlockBehaviour, FluidBehaviour};
    use crate::test_support::TestWorld;

    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<(&'static str, BlockPos)>>,
    }

    impl Recorder {
        fn calls(&self) -> Vec<(&'static str, BlockPos)> {
            self.calls.lock().clone()
        }
    }

    impl BlockBehaviour for Recorder {
        fn scheduled_update(&self, _world: &mut World, pos: BlockPos, _block: BlockInstance) {
            self.calls.lock().push(("update", pos));
        }

        fn random_update(&self, _world: &mut World, pos: BlockPos, _block: BlockInstance) {
            self.calls.lock().push(("random", pos));
        }
    }

    impl FluidBehaviour for Recorder {
        fn scheduled_update(&self, _world: &mut World, pos: BlockPos, _fluid: FluidInstance) {
            self.calls.lock().push(("fluid", pos));
        }
    }

    #[test]
    fn test_ticks_never_fire_on_the_scheduling_pass() {
        let recorder = Arc::new(Recorder::default());
        let mut test = TestWorld::with_behaviours(|behaviours, ids| {
            behaviours.assign_block(ids.stone, recorder.clone());
        });
        let pos = BlockPos::new(1, 2, 3);
        test.world.set_block(BlockInstance::new(test.stone), pos);

        test.world.schedule_block_tick(pos, test.stone, 0);
        assert_eq!(test.world.pending_block_ticks(), 1);
        assert!(test.world.has_scheduled_block_tick(pos, test.stone));

        let stats = test.world.tick();
        assert_eq!(stats.block_ticks, 1);
        assert_eq!(recorder.calls(), vec![("update", pos)]);
        assert_eq!(test.world.current_pass(), 1);
    }

    #[test]
    fn test_stale_fluid_tick_is_dropped() {
        let recorder = Arc::new(Recorder::default());
        let mut test = TestWorld::with_behaviours(|behaviours, ids| {
            behaviours.assign_fluid(ids.water, recorder.clone());
        });
        let pos = BlockPos::new(6, 6, 6);
        test.put_fluid(pos, FluidInstance::flowing(test.water, 4));
        test.world.schedule_fluid_tick(pos, test.water, 3);

        // Overwritten before the tick is due
        test.world
            .set_fluid(FluidInstance::flowing(test.oil, 4), pos);

        let mut stale = 0;
        for _ in 0..3 {
            stale += test.world.tick().stale;
        }
        assert_eq!(stale, 1);
        assert!(recorder.calls().is_empty());
    }

    #[test]
    fn test_destroy_replaces_block_and_keeps_fluid() {
        let mut test = TestWorld::new();
        let pos = BlockPos::new(9, 1, 9);
        let salt = BlockInstance::new(test.salt_block);
        test.world
            .set_content(Content::new(salt, FluidInstance::new(test.brine, 2)), pos, false);

        assert!(test.world.schedule_destroy(pos));
        assert!(test.world.has_scheduled_destroy(pos, test.salt_block));
        test.world.tick();
        assert_eq!(test.world.get_content(pos).map(|c| c.block), Some(salt));
        test.world.tick();

        let content = test.world.get_content(pos).expect("active");
        assert_eq!(content.block, BlockInstance::AIR);
        assert_eq!(content.fluid.id, test.brine);
        assert_eq!(content.fluid.level, 2);
    }

    #[test]
    fn test_destroy_of_replaced_block_is_stale() {
        let mut test = TestWorld::new();
        let pos = BlockPos::new(9, 1, 9);
        test.world.set_block(BlockInstance::new(test.salt_block), pos);
        test.world.schedule_destroy(pos);
        test.world.set_block(BlockInstance::new(test.stone), pos);

        let stats = (0..3).map(|_| test.world.tick()).fold(0, |acc, s| acc + s.stale);
        assert_eq!(stats, 1);
        assert_eq!(
            test.world.get_content(pos).map(|c| c.block.id),
            Some(test.stone)
        );
    }

    #[test]
    fn test_tick_soon_only_wakes_static_fluid() {
        let mut test = TestWorld::new();
        let pos = BlockPos::new(3, 3, 3);
        test.put_fluid(pos, FluidInstance::new(test.water, 7));

        test.world.tick_soon(FluidId::NONE, pos, true);
        test.world.tick_soon(test.water, pos, false);
        assert_eq!(test.world.pending_fluid_ticks(), 0);

        test.world.tick_soon(test.water, pos, true);
        assert_eq!(test.world.pending_fluid_ticks(), 1);
        assert!(!test.fluid_at(pos).is_static);
    }

    #[test]
    fn test_random_tick_samples_every_section() {
        let recorder = Arc::new(Recorder::default());
        let mut test = TestWorld::with_behaviours(|behaviours, _| {
            behaviours.assign_block(strata_registry::BlockId::AIR, recorder.clone());
        });
        let mut rng = StdRng::seed_from_u64(42);
        test.world.random_tick(&mut rng);

        let chunks = test.world.active_chunks().len();
        let per_section = test.world.config().random_ticks_per_section as usize;
        let expected = chunks * strata_utils::types::SECTIONS_PER_CHUNK * per_section;
        let calls = recorder.calls();
        assert_eq!(calls.len(), expected);
        assert!(calls.iter().all(|(kind, pos)| {
            *kind == "random" && test.world.get_content(*pos).is_some()
        }));
    }
}
