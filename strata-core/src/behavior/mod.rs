//! Per-type behaviour hooks and the registry that dispatches to them.
//!
//! Behaviours are looked up by the id stored in a cell. Every hook receives
//! the world mutably, so a hook may read and write cells, schedule ticks, or
//! trigger further hooks through the content mutation protocol.

mod block;
mod fluid;
mod registry;

pub use block::{BlockBehaviour, DefaultBlock, SolidBlock};
pub use fluid::{EmptyFluid, FluidBehaviour};
pub use registry::BehaviourRegistry;
