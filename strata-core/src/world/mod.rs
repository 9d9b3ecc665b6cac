//! The world: loaded chunks, their tick queues, and the content mutation
//! protocol every behaviour goes through.

mod events;
mod thread_guard;
mod tick_scheduler;

pub use events::SectionChanged;
pub use thread_guard::ThreadGuard;
pub use tick_scheduler::TickStats;

use std::sync::Arc;

use crossbeam::channel::Receiver;
use rustc_hash::{FxHashMap, FxHashSet};
use strata_registry::{BlockInstance, Content, FluidId, FluidInstance, Registry};
use strata_utils::{BlockPos, ChunkPos, Direction};

use crate::behavior::BehaviourRegistry;
use crate::chunk::{CellWord, Chunk};
use crate::config::SimulationConfig;
use crate::contact::ContactResolver;
use crate::ticks::{BlockTick, LevelTicks};

use events::SectionChangeBus;

/// A single-threaded voxel world.
///
/// Chunks are inserted by the chunk lifecycle manager and only take part in
/// the simulation while active. Reads outside active chunks return `None`
/// and writes there are ignored.
///
/// The world is neither `Send` nor `Sync`, and every public entry point
/// additionally checks that it runs on the creating thread.
pub struct World {
    registry: Arc<Registry>,
    behaviours: Arc<BehaviourRegistry>,
    contacts: Arc<ContactResolver>,
    config: SimulationConfig,
    chunks: FxHashMap<ChunkPos, Chunk>,
    active: FxHashSet<ChunkPos>,
    block_ticks: LevelTicks<BlockTick>,
    fluid_ticks: LevelTicks<FluidId>,
    /// Number of completed or running tick passes.
    pass: u64,
    section_changes: SectionChangeBus,
    guard: ThreadGuard,
}

impl World {
    /// Creates an empty world.
    #[must_use]
    pub fn new(
        registry: Arc<Registry>,
        behaviours: Arc<BehaviourRegistry>,
        contacts: Arc<ContactResolver>,
        config: SimulationConfig,
    ) -> Self {
        Self {
            registry,
            behaviours,
            contacts,
            config,
            chunks: FxHashMap::default(),
            active: FxHashSet::default(),
            block_ticks: LevelTicks::new(),
            fluid_ticks: LevelTicks::new(),
            pass: 0,
            section_changes: SectionChangeBus::default(),
            guard: ThreadGuard::new(),
        }
    }

    /// The definition registry.
    #[must_use]
    pub fn registry(&self) -> Arc<Registry> {
        Arc::clone(&self.registry)
    }

    /// The behaviour registry.
    #[must_use]
    pub fn behaviours(&self) -> Arc<BehaviourRegistry> {
        Arc::clone(&self.behaviours)
    }

    /// The contact resolver.
    #[must_use]
    pub fn contacts(&self) -> Arc<ContactResolver> {
        Arc::clone(&self.contacts)
    }

    /// The simulation settings.
    #[must_use]
    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Number of tick passes started so far.
    #[must_use]
    pub const fn current_pass(&self) -> u64 {
        self.pass
    }

    // Chunk lifecycle

    /// Adds a loaded chunk. It stays inactive until [`World::activate_chunk`].
    ///
    /// Replacing an existing chunk deactivates it first.
    pub fn insert_chunk(&mut self, chunk: Chunk) {
        self.guard.check();
        let pos = chunk.pos();
        if self.chunks.contains_key(&pos) {
            self.deactivate_chunk(pos);
        }
        self.chunks.insert(pos, chunk);
    }

    /// Removes a chunk, deactivating it first, and hands it back for saving.
    pub fn unload_chunk(&mut self, pos: ChunkPos) -> Option<Chunk> {
        self.guard.check();
        self.deactivate_chunk(pos);
        self.chunks.remove(&pos)
    }

    /// Makes a loaded chunk take part in the simulation and gives it fresh
    /// tick queues. Returns `false` if the chunk is not loaded.
    ///
    /// Queues do not survive deactivation or persistence, so every fluid
    /// cell stored as flowing gets a new tick after its viscosity.
    pub fn activate_chunk(&mut self, pos: ChunkPos) -> bool {
        self.guard.check();
        let Some(chunk) = self.chunks.get(&pos) else {
            return false;
        };
        if !self.active.insert(pos) {
            return true;
        }
        let flowing: Vec<(BlockPos, FluidId)> = chunk
            .cells()
            .map(|(cell, word)| (cell, word.to_content(&self.registry).fluid))
            .filter(|(_, fluid)| !fluid.is_none() && !fluid.is_static)
            .map(|(cell, fluid)| (cell, fluid.id))
            .collect();

        self.block_ticks.add_container(pos);
        self.fluid_ticks.add_container(pos);
        for &(cell, fluid) in &flowing {
            let delay = self.registry.fluid(fluid).viscosity;
            self.fluid_ticks.schedule(cell, fluid, self.pass, delay);
        }
        log::debug!("Activated chunk {pos}, resumed {} flowing cells", flowing.len());
        true
    }

    /// Stops simulating a chunk. Its pending ticks are discarded, not fired.
    pub fn deactivate_chunk(&mut self, pos: ChunkPos) {
        self.guard.check();
        if !self.active.remove(&pos) {
            return;
        }
        let block = self
            .block_ticks
            .remove_container(pos)
            .map_or(0, |c| c.count());
        let fluid = self
            .fluid_ticks
            .remove_container(pos)
            .map_or(0, |c| c.count());
        log::debug!("Deactivated chunk {pos}, discarded {block} block and {fluid} fluid ticks");
    }

    /// Whether the chunk is loaded and active.
    #[must_use]
    pub fn is_chunk_active(&self, pos: ChunkPos) -> bool {
        self.guard.check();
        self.active.contains(&pos)
    }

    /// The loaded chunk at `pos`, active or not.
    #[must_use]
    pub fn chunk(&self, pos: ChunkPos) -> Option<&Chunk> {
        self.guard.check();
        self.chunks.get(&pos)
    }

    /// Positions of the active chunks in ascending order.
    #[must_use]
    pub fn active_chunks(&self) -> Vec<ChunkPos> {
        let mut chunks: Vec<ChunkPos> = self.active.iter().copied().collect();
        chunks.sort_unstable();
        chunks
    }

    fn active_chunk_mut(&mut self, pos: BlockPos) -> Option<&mut Chunk> {
        let chunk_pos = pos.chunk_pos();
        if !self.active.contains(&chunk_pos) {
            return None;
        }
        self.chunks.get_mut(&chunk_pos)
    }

    fn active_word(&self, pos: BlockPos) -> Option<CellWord> {
        let chunk_pos = pos.chunk_pos();
        if !self.active.contains(&chunk_pos) {
            return None;
        }
        self.chunks.get(&chunk_pos).map(|chunk| chunk.get(pos))
    }

    // Content mutation protocol

    /// The content of a cell, or `None` outside the active chunks.
    #[must_use]
    pub fn get_content(&self, pos: BlockPos) -> Option<Content> {
        self.guard.check();
        self.active_word(pos)
            .map(|word| word.to_content(&self.registry))
    }

    /// Stores `content` at `pos` and notifies behaviours and observers.
    ///
    /// In order: the new block's `on_content_changed`, the new fluid's
    /// `update_now` when `update_fluid` is set, then for every face
    /// neighbour with active content its block's `on_neighbor_updated` and
    /// its fluid's `update_soon`, and finally one [`SectionChanged`].
    /// Does nothing outside the active chunks.
    pub fn set_content(&mut self, content: Content, pos: BlockPos, update_fluid: bool) {
        self.guard.check();
        let Some(chunk) = self.active_chunk_mut(pos) else {
            return;
        };
        chunk.set(pos, CellWord::from_content(&content));

        let behaviours = Arc::clone(&self.behaviours);
        behaviours
            .block(content.block.id)
            .on_content_changed(self, pos, content);
        if update_fluid {
            behaviours
                .fluid(content.fluid.id)
                .update_now(self, pos, content.fluid);
        }

        for direction in Direction::ALL {
            let neighbor = direction.relative(pos);
            let Some(neighbor_content) = self.get_content(neighbor) else {
                continue;
            };
            behaviours.block(neighbor_content.block.id).on_neighbor_updated(
                self,
                neighbor,
                neighbor_content.block,
                direction.opposite(),
            );

            // The block hook may have rewritten the neighbour.
            let Some(neighbor_content) = self.get_content(neighbor) else {
                continue;
            };
            behaviours
                .fluid(neighbor_content.fluid.id)
                .update_soon(self, neighbor, neighbor_content.fluid);
        }

        self.section_changes.emit(SectionChanged::at(pos));
    }

    /// Replaces the block at `pos`, keeping its fluid. The fluid is not
    /// woken; neighbours are.
    pub fn set_block(&mut self, block: BlockInstance, pos: BlockPos) {
        let Some(content) = self.get_content(pos) else {
            return;
        };
        self.set_content(Content::new(block, content.fluid), pos, false);
    }

    /// Replaces the fluid at `pos`, keeping its block, and wakes the new fluid.
    pub fn set_fluid(&mut self, fluid: FluidInstance, pos: BlockPos) {
        let Some(content) = self.get_content(pos) else {
            return;
        };
        self.set_content(Content::new(content.block, fluid), pos, true);
    }

    /// Flips only the static flag at `pos`.
    ///
    /// No behaviour hooks run and neighbours are not notified. Observers
    /// still receive a [`SectionChanged`], since static and flowing fluid
    /// look different.
    pub fn modify_fluid_static(&mut self, is_static: bool, pos: BlockPos) {
        self.guard.check();
        let Some(chunk) = self.active_chunk_mut(pos) else {
            return;
        };
        let word = chunk.get(pos);
        if word.is_static() == is_static {
            return;
        }
        chunk.set(pos, word.with_static(is_static));
        self.section_changes.emit(SectionChanged::at(pos));
    }

    /// Stores a content value with no hooks, ticks or events.
    #[cfg(any(test, feature = "test-support"))]
    pub(crate) fn write_raw(&mut self, content: Content, pos: BlockPos) {
        if let Some(chunk) = self.active_chunk_mut(pos) {
            chunk.set(pos, CellWord::from_content(&content));
        }
    }

    /// Returns a receiver for [`SectionChanged`] values.
    ///
    /// Dropping the receiver unsubscribes it.
    pub fn subscribe_section_changes(&mut self) -> Receiver<SectionChanged> {
        self.guard.check();
        self.section_changes.subscribe()
    }
}
