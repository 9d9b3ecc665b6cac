//! Per-chunk scheduled tick storage.

use std::collections::BinaryHeap;
use std::hash::Hash;

use rustc_hash::FxHashSet;
use strata_utils::BlockPos;

use super::{ScheduledTick, TickKey};

/// Per-chunk storage for scheduled ticks.
///
/// This struct manages scheduled ticks for a single chunk, providing:
/// - A priority queue ordered by trigger pass, then scheduling order
/// - Deduplication to prevent scheduling the same (pos, type) twice
///
/// When a tick is scheduled for a position that already has a pending tick
/// of the same type, the new tick is ignored and the existing one keeps its
/// timing. This keeps a flowing cell at exactly one pending tick even when
/// it is refilled before an older tick fires.
pub struct LevelChunkTicks<T: Copy + Eq + Hash> {
    /// Priority queue of scheduled ticks, ordered by trigger time.
    tick_queue: BinaryHeap<ScheduledTick<T>>,
    /// Set of (pos, type) pairs for deduplication.
    ticks_per_position: FxHashSet<TickKey<T>>,
}

impl<T: Copy + Eq + Hash> LevelChunkTicks<T> {
    /// Creates a new empty chunk tick container.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tick_queue: BinaryHeap::new(),
            ticks_per_position: FxHashSet::default(),
        }
    }

    /// Schedules a tick if one isn't already scheduled for this (pos, type).
    ///
    /// Returns `true` if the tick was scheduled, `false` if one already exists.
    pub fn schedule(&mut self, tick: ScheduledTick<T>) -> bool {
        if self.ticks_per_position.insert(TickKey::from(&tick)) {
            self.tick_queue.push(tick);
            true
        } else {
            false
        }
    }

    /// Returns a reference to the next tick to fire, without removing it.
    #[must_use]
    pub fn peek(&self) -> Option<&ScheduledTick<T>> {
        self.tick_queue.peek()
    }

    /// Removes and returns the next tick to fire.
    pub fn poll(&mut self) -> Option<ScheduledTick<T>> {
        let tick = self.tick_queue.pop()?;
        self.ticks_per_position.remove(&TickKey::from(&tick));
        Some(tick)
    }

    /// Removes up to `max` ticks due at or before `current_tick`, earliest first.
    pub fn drain_due(&mut self, current_tick: u64, max: usize, out: &mut Vec<ScheduledTick<T>>) {
        let mut drained = 0;
        while drained < max && self.peek().is_some_and(|t| t.trigger_tick <= current_tick) {
            let Some(tick) = self.poll() else {
                break;
            };
            out.push(tick);
            drained += 1;
        }
    }

    /// Checks if a tick is scheduled for the given position and type.
    #[must_use]
    pub fn has_scheduled_tick(&self, pos: BlockPos, tick_type: T) -> bool {
        self.ticks_per_position
            .contains(&TickKey { pos, tick_type })
    }

    /// Returns the number of scheduled ticks in this chunk.
    #[must_use]
    pub fn count(&self) -> usize {
        self.tick_queue.len()
    }

    /// Returns `true` if there are no scheduled ticks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tick_queue.is_empty()
    }
}

impl<T: Copy + Eq + Hash> Default for LevelChunkTicks<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_and_poll() {
        let mut ticks: LevelChunkTicks<u32> = LevelChunkTicks::new();
        let pos = BlockPos::new(10, 14, 20);

        assert!(ticks.schedule(ScheduledTick::new(1, pos, 100, 0)));
        assert_eq!(ticks.count(), 1);

        // Same pos+type again is ignored and keeps the first timing
        assert!(!ticks.schedule(ScheduledTick::new(1, pos, 200, 1)));
        assert!(ticks.has_scheduled_tick(pos, 1));
        assert!(!ticks.has_scheduled_tick(pos, 2));

        let polled = ticks.poll().expect("should have a tick");
        assert_eq!(polled.trigger_tick, 100);
        assert!(ticks.is_empty());

        // Now we can schedule again
        assert!(ticks.schedule(ScheduledTick::new(1, pos, 300, 2)));
    }

    #[test]
    fn test_fifo_within_same_trigger() {
        let mut ticks: LevelChunkTicks<u32> = LevelChunkTicks::new();
        for i in 0..5 {
            ticks.schedule(ScheduledTick::new(i, BlockPos::new(i as i32, 0, 0), 10, u64::from(i)));
        }
        ticks.schedule(ScheduledTick::new(9, BlockPos::new(9, 0, 0), 5, 99));

        let order: Vec<u32> = std::iter::from_fn(|| ticks.poll().map(|t| t.tick_type)).collect();
        assert_eq!(order, vec![9, 0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_drain_due_respects_budget_and_time() {
        let mut ticks: LevelChunkTicks<u32> = LevelChunkTicks::new();
        for i in 0..10u32 {
            let trigger = if i < 6 { 1 } else { 5 };
            ticks.schedule(ScheduledTick::new(i, BlockPos::new(i as i32, 0, 0), trigger, u64::from(i)));
        }

        let mut out = Vec::new();
        ticks.drain_due(1, 4, &mut out);
        assert_eq!(out.len(), 4);

        out.clear();
        ticks.drain_due(1, 100, &mut out);
        assert_eq!(out.len(), 2, "only the remaining due ticks drain");
        assert_eq!(ticks.count(), 4);
    }
}
