//! # Strata Core
//!
//! The simulation core of a voxel world: bit-packed cell storage, the
//! deferred tick scheduler, the fluid engine and the contact resolver.
//!
//! Everything is driven through a [`world::World`], which is owned by and
//! confined to a single thread.

pub mod behavior;
pub mod chunk;
pub mod config;
pub mod contact;
pub mod fluid;
pub mod ticks;
pub mod world;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use config::SimulationConfig;
pub use world::World;
