mod block;
mod registry;

pub use block::*;
pub use registry::*;
