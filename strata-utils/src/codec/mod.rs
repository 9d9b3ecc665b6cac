//! Compact encodings shared between crates.

mod bit_set;

pub use bit_set::BitSet;
