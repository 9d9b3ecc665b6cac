use std::fmt::{self, Display};

/// Dense id of a registered block type. Only the low 12 bits are significant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct BlockId(pub u16);

impl BlockId {
    /// The fallback block, always registered first.
    pub const AIR: BlockId = BlockId(0);

    /// Returns true if this is the air block.
    #[must_use]
    pub const fn is_air(self) -> bool {
        self.0 == 0
    }
}

impl Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "block#{}", self.0)
    }
}

/// Immutable description of a block type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockDefinition {
    /// Unique registry name.
    pub name: &'static str,
    /// Solid blocks refuse fluid in- and outflow under the default behaviour.
    pub solid: bool,
}

impl BlockDefinition {
    /// Creates a block definition.
    #[must_use]
    pub const fn new(name: &'static str, solid: bool) -> Self {
        Self { name, solid }
    }
}

/// The `air` definition registered under [`BlockId::AIR`].
pub const AIR: BlockDefinition = BlockDefinition::new("air", false);
