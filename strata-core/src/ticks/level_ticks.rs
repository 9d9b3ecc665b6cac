//! World-level scheduled tick coordinator.

use std::hash::Hash;

use rustc_hash::FxHashMap;
use strata_utils::{BlockPos, ChunkPos};

use super::{LevelChunkTicks, ScheduledTick};

/// World-level coordinator for scheduled ticks of one kind.
///
/// # Architecture
///
/// - Each active chunk has a `LevelChunkTicks` stored in `all_containers`
/// - `next_tick_for_container` tracks the earliest trigger tick per chunk
///   so chunks with nothing due are skipped without touching their heap
/// - During `tick()` each due chunk is drained up to the per-chunk budget,
///   in chunk position order
pub struct LevelTicks<T: Copy + Eq + Hash> {
    /// Map of chunk position to chunk tick container.
    all_containers: FxHashMap<ChunkPos, LevelChunkTicks<T>>,
    /// Tracks the earliest scheduled tick for each chunk.
    next_tick_for_container: FxHashMap<ChunkPos, u64>,
    /// Counter for generating unique sub-tick order values.
    sub_tick_counter: u64,
}

impl<T: Copy + Eq + Hash> LevelTicks<T> {
    /// Creates a new empty tick coordinator.
    #[must_use]
    pub fn new() -> Self {
        Self {
            all_containers: FxHashMap::default(),
            next_tick_for_container: FxHashMap::default(),
            sub_tick_counter: 0,
        }
    }

    /// Adds an empty container for a chunk that just became active.
    ///
    /// Does nothing if the chunk already has one.
    pub fn add_container(&mut self, pos: ChunkPos) {
        self.all_containers.entry(pos).or_default();
    }

    /// Removes a chunk's container, returning it with whatever it still holds.
    pub fn remove_container(&mut self, pos: ChunkPos) -> Option<LevelChunkTicks<T>> {
        self.next_tick_for_container.remove(&pos);
        self.all_containers.remove(&pos)
    }

    /// Whether a container exists for the chunk.
    #[must_use]
    pub fn has_container(&self, pos: ChunkPos) -> bool {
        self.all_containers.contains_key(&pos)
    }

    /// Schedules a tick to fire on pass `current_tick + delay`.
    ///
    /// `delay` is raised to 1 so a tick never fires on the pass that scheduled
    /// it. Returns `false` if the chunk has no container or the same
    /// (pos, type) is already pending.
    pub fn schedule(&mut self, pos: BlockPos, tick_type: T, current_tick: u64, delay: u32) -> bool {
        let chunk_pos = pos.chunk_pos();
        let trigger_tick = current_tick + u64::from(delay.max(1));

        let Some(container) = self.all_containers.get_mut(&chunk_pos) else {
            log::warn!("Attempted to schedule tick at {pos} in inactive chunk {chunk_pos}");
            return false;
        };

        let sub_tick_order = self.sub_tick_counter;
        self.sub_tick_counter += 1;

        if container.schedule(ScheduledTick::new(tick_type, pos, trigger_tick, sub_tick_order)) {
            self.next_tick_for_container
                .entry(chunk_pos)
                .and_modify(|earliest| {
                    if trigger_tick < *earliest {
                        *earliest = trigger_tick;
                    }
                })
                .or_insert(trigger_tick);
            true
        } else {
            false
        }
    }

    /// Checks if a tick is already scheduled for the given position and type.
    #[must_use]
    pub fn has_scheduled_tick(&self, pos: BlockPos, tick_type: T) -> bool {
        self.all_containers
            .get(&pos.chunk_pos())
            .is_some_and(|c| c.has_scheduled_tick(pos, tick_type))
    }

    /// Removes the ticks due at or before `current_tick`.
    ///
    /// At most `max_per_container` ticks are taken from each chunk; anything
    /// else stays queued for a later pass. Chunks are visited in position
    /// order and each chunk's ticks come out earliest first.
    #[must_use]
    pub fn tick(&mut self, current_tick: u64, max_per_container: usize) -> Vec<ScheduledTick<T>> {
        let mut chunks_to_tick: Vec<ChunkPos> = self
            .next_tick_for_container
            .iter()
            .filter(|(_, earliest)| **earliest <= current_tick)
            .map(|(pos, _)| *pos)
            .collect();
        chunks_to_tick.sort_unstable();

        let mut result = Vec::new();
        for chunk_pos in chunks_to_tick {
            let Some(container) = self.all_containers.get_mut(&chunk_pos) else {
                continue;
            };
            container.drain_due(current_tick, max_per_container, &mut result);

            if let Some(next) = container.peek() {
                self.next_tick_for_container
                    .insert(chunk_pos, next.trigger_tick);
            } else {
                self.next_tick_for_container.remove(&chunk_pos);
            }
        }

        result
    }

    /// Returns the total number of scheduled ticks across all chunks.
    #[must_use]
    pub fn count(&self) -> usize {
        self.all_containers
            .values()
            .map(LevelChunkTicks::count)
            .sum()
    }
}

impl<T: Copy + Eq + Hash> Default for LevelTicks<T> {
    fn default() -> Self {
        Self::new()
    }
}
