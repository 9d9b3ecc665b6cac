//! Worlds with a fixed set of fluids and blocks for tests and benchmarks.

use std::sync::Arc;

use strata_registry::{
    BlockDefinition, BlockId, BlockInstance, Content, FluidDefinition, FluidId, FluidInstance,
    Registry, RegistryExt,
};
use strata_utils::{BlockPos, ChunkPos};

use crate::behavior::BehaviourRegistry;
use crate::chunk::Chunk;
use crate::config::SimulationConfig;
use crate::contact::{ContactResolver, ContactRule};
use crate::world::{TickStats, World};

/// Ids of everything [`test_registry`] registers.
#[derive(Debug, Clone, Copy)]
pub struct TestIds {
    /// Density 1000, viscosity 5.
    pub water: FluidId,
    /// Density 800, viscosity 8.
    pub oil: FluidId,
    /// Density 0.6, rises.
    pub steam: FluidId,
    /// Density 3100, viscosity 30.
    pub lava: FluidId,
    /// Density 1200, viscosity 6.
    pub acid: FluidId,
    /// Density 1100, viscosity 5.
    pub brine: FluidId,
    /// Density 1150, viscosity 20.
    pub tar: FluidId,
    /// Solid.
    pub stone: BlockId,
    /// Solid.
    pub salt_block: BlockId,
}

/// A frozen registry holding the test fluids and blocks.
#[must_use]
pub fn test_registry() -> (Registry, TestIds) {
    let mut registry = Registry::new();
    let mut fluid = |name, density, viscosity| {
        registry
            .register_fluid(FluidDefinition::new(name, density, viscosity))
            .expect("test fluid registers")
    };
    let water = fluid("water", 1000.0, 5);
    let oil = fluid("oil", 800.0, 8);
    let steam = fluid("steam", 0.6, 2);
    let lava = fluid("lava", 3100.0, 30);
    let acid = fluid("acid", 1200.0, 6);
    let brine = fluid("brine", 1100.0, 5);
    let tar = fluid("tar", 1150.0, 20);
    let stone = registry
        .register_block(BlockDefinition::new("stone", true))
        .expect("stone registers");
    let salt_block = registry
        .register_block(BlockDefinition::new("salt_block", true))
        .expect("salt registers");
    registry.freeze();

    let ids = TestIds {
        water,
        oil,
        steam,
        lava,
        acid,
        brine,
        tar,
        stone,
        salt_block,
    };
    (registry, ids)
}

/// Contact rules between the test fluids.
#[must_use]
pub fn test_rules(ids: &TestIds) -> Vec<ContactRule> {
    vec![
        ContactRule::quench(ids.lava, ids.water, ids.stone, ids.steam),
        ContactRule::corrode(ids.acid, ids.oil),
        ContactRule::dissolve(ids.oil, ids.tar),
        ContactRule::mix(ids.water, ids.brine, ids.brine),
    ]
}

/// A world over the test registry with the eight chunks around the origin
/// loaded and active, so cells from -32 to 31 on every axis are live.
pub struct TestWorld {
    /// The world under test.
    pub world: World,
    #[allow(missing_docs)]
    pub water: FluidId,
    #[allow(missing_docs)]
    pub oil: FluidId,
    #[allow(missing_docs)]
    pub steam: FluidId,
    #[allow(missing_docs)]
    pub lava: FluidId,
    #[allow(missing_docs)]
    pub acid: FluidId,
    #[allow(missing_docs)]
    pub brine: FluidId,
    #[allow(missing_docs)]
    pub tar: FluidId,
    #[allow(missing_docs)]
    pub stone: BlockId,
    #[allow(missing_docs)]
    pub salt_block: BlockId,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    /// Default behaviours, default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::build(SimulationConfig::default(), |_, _| {})
    }

    /// Default settings, with behaviours adjusted by `assign`.
    #[must_use]
    pub fn with_behaviours(assign: impl FnOnce(&mut BehaviourRegistry, &TestIds)) -> Self {
        Self::build(SimulationConfig::default(), assign)
    }

    /// Default behaviours, custom settings.
    #[must_use]
    pub fn with_config(config: SimulationConfig) -> Self {
        Self::build(config, |_, _| {})
    }

    fn build(
        config: SimulationConfig,
        assign: impl FnOnce(&mut BehaviourRegistry, &TestIds),
    ) -> Self {
        strata_utils::logger::init_for_tests();

        let (registry, ids) = test_registry();
        let mut behaviours = BehaviourRegistry::new(&registry);
        assign(&mut behaviours, &ids);
        let contacts = ContactResolver::new(test_rules(&ids));
        let mut world = World::new(
            Arc::new(registry),
            Arc::new(behaviours),
            Arc::new(contacts),
            config,
        );

        for x in -1..=0 {
            for y in -1..=0 {
                for z in -1..=0 {
                    let pos = ChunkPos::new(x, y, z);
                    world.insert_chunk(Chunk::new_empty(pos));
                    world.activate_chunk(pos);
                }
            }
        }

        Self {
            world,
            water: ids.water,
            oil: ids.oil,
            steam: ids.steam,
            lava: ids.lava,
            acid: ids.acid,
            brine: ids.brine,
            tar: ids.tar,
            stone: ids.stone,
            salt_block: ids.salt_block,
        }
    }

    /// Stores content with no hooks, ticks or events.
    pub fn put_content(&mut self, pos: BlockPos, content: Content) {
        self.world.write_raw(content, pos);
    }

    /// Stores a fluid with no hooks, keeping the block.
    pub fn put_fluid(&mut self, pos: BlockPos, fluid: FluidInstance) {
        let block = self.content_at(pos).block;
        self.put_content(pos, Content::new(block, fluid));
    }

    /// Stores a block with no hooks, keeping the fluid.
    pub fn put_block(&mut self, pos: BlockPos, block: BlockInstance) {
        let fluid = self.content_at(pos).fluid;
        self.put_content(pos, Content::new(block, fluid));
    }

    /// Content of a live cell.
    ///
    /// # Panics
    /// If `pos` is outside the active chunks.
    #[must_use]
    pub fn content_at(&self, pos: BlockPos) -> Content {
        self.world
            .get_content(pos)
            .unwrap_or_else(|| panic!("{pos} is not in an active chunk"))
    }

    /// Fluid of a live cell.
    ///
    /// # Panics
    /// If `pos` is outside the active chunks.
    #[must_use]
    pub fn fluid_at(&self, pos: BlockPos) -> FluidInstance {
        self.content_at(pos).fluid
    }

    /// Eighths of `fluid` held by all active chunks.
    #[must_use]
    pub fn total_eighths(&self, fluid: FluidId) -> u32 {
        let registry = self.world.registry();
        self.world
            .active_chunks()
            .into_iter()
            .filter_map(|pos| self.world.chunk(pos))
            .flat_map(|chunk| chunk.sections().iter())
            .flat_map(|section| section.words().iter())
            .map(|word| word.to_content(&registry).fluid)
            .filter(|instance| instance.id == fluid)
            .map(FluidInstance::eighths)
            .sum()
    }

    /// Runs `passes` tick passes and adds up what they did.
    pub fn run(&mut self, passes: usize) -> TickStats {
        let mut total = TickStats::default();
        for _ in 0..passes {
            let stats = self.world.tick();
            total.block_ticks += stats.block_ticks;
            total.fluid_ticks += stats.fluid_ticks;
            total.stale += stats.stale;
        }
        total
    }

    /// Runs passes until no fluid tick is pending or `max_passes` ran.
    /// Returns the number of passes.
    pub fn settle(&mut self, max_passes: usize) -> usize {
        let mut passes = 0;
        while passes < max_passes && self.world.pending_fluid_ticks() > 0 {
            self.world.tick();
            passes += 1;
        }
        passes
    }
}
