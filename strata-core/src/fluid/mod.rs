//! Fluid mechanics.
//!
//! Every fluid cell is either static (at rest, no pending tick) or flowing
//! (exactly one pending tick). The primitives in [`engine`] keep that true:
//! any change of a cell's fluid or level leaves it flowing, and a tick is
//! scheduled unless the cell was already flowing with the same fluid.

pub mod engine;
mod flow_search;
mod flowing;

pub use engine::{
    FillResult, elevate, fill, is_at_surface, replace_fluid, search_flow_target, take,
    try_take_exact,
};
pub use flow_search::{FlowSearch, FlowTarget};
pub use flowing::FlowingFluid;
