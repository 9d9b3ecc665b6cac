mod fluid;
mod registry;

pub use fluid::*;
pub use registry::*;
