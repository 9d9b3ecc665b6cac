//! Scheduled tick system for blocks and fluids.
//!
//! # Architecture
//!
//! - [`ScheduledTick`] - A single scheduled tick entry
//! - [`LevelChunkTicks`] - Per-chunk tick storage with deduplication
//! - [`LevelTicks`] - World-level coordinator that owns the tick storage of
//!   every active chunk
//!
//! Block ticks carry a [`BlockTick`], fluid ticks carry the fluid id. The
//! carried id is compared with the live cell when the tick fires; a mismatch
//! means the cell was overwritten and the tick is dropped as stale.

mod chunk_ticks;
mod level_ticks;
mod scheduled_tick;

pub use chunk_ticks::LevelChunkTicks;
pub use level_ticks::LevelTicks;
pub use scheduled_tick::{BlockTick, BlockTickKind, ScheduledTick, TickKey};
