use thiserror::Error;

/// Reasons a definition can be refused by a registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The registry was frozen before the definition arrived.
    #[error("cannot register a {0} after the registry is frozen")]
    Frozen(&'static str),
    /// Every id the cell word can address is taken.
    #[error("{kind} registry is full ({max} entries)")]
    Full {
        /// Which registry.
        kind: &'static str,
        /// How many entries it can hold.
        max: usize,
    },
    /// A definition with the same name is already registered.
    #[error("`{0}` is already registered")]
    Duplicate(&'static str),
    /// The definition itself is malformed.
    #[error("invalid definition `{name}`: {reason}")]
    InvalidDefinition {
        /// Name of the offending definition.
        name: &'static str,
        /// What is wrong with it.
        reason: &'static str,
    },
}
