//! # Strata Utils
//!
//! Shared value types for the strata voxel simulation: world, section and
//! chunk positions, face directions, a small bit set, and the logging
//! bootstrap used by binaries and tests.

pub mod codec;
pub mod direction;
pub mod logger;
pub mod math;
pub mod types;

pub use direction::Direction;
pub use types::{BlockPos, ChunkPos, SectionPos};
