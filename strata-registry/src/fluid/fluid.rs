use std::fmt::{self, Display};

use strata_utils::Direction;

/// Reference density of air in kg/m³. Fluids flow away from it.
pub const AIR_DENSITY: f32 = 1.2;
/// Fluids at least this dense are liquids, anything lighter is a gas.
pub const GAS_DENSITY_THRESHOLD: f32 = 100.0;

/// Dense id of a registered fluid type. Only the low 5 bits are significant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct FluidId(pub u8);

impl FluidId {
    /// The "no fluid" sentinel, always registered first.
    pub const NONE: FluidId = FluidId(0);

    /// Returns true if this is the "no fluid" sentinel.
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl Display for FluidId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fluid#{}", self.0)
    }
}

/// Whether a fluid behaves as a liquid or a gas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Density at or above [`GAS_DENSITY_THRESHOLD`].
    Liquid,
    /// Density below [`GAS_DENSITY_THRESHOLD`].
    Gas,
}

/// Immutable description of a fluid type.
#[derive(Debug, Clone, PartialEq)]
pub struct FluidDefinition {
    /// Unique registry name.
    pub name: &'static str,
    /// Density in kg/m³.
    pub density: f32,
    /// Passes between two scheduled updates. Always at least 1.
    pub viscosity: u32,
}

impl FluidDefinition {
    /// Creates a fluid definition.
    #[must_use]
    pub const fn new(name: &'static str, density: f32, viscosity: u32) -> Self {
        Self {
            name,
            density,
            viscosity,
        }
    }

    /// The direction this fluid pours in: down when denser than air, up
    /// when lighter, `None` when it does not flow at all.
    #[must_use]
    pub fn flow_direction(&self) -> Option<Direction> {
        if self.density > AIR_DENSITY {
            Some(Direction::Down)
        } else if self.density < AIR_DENSITY {
            Some(Direction::Up)
        } else {
            None
        }
    }

    /// Liquid or gas, by density.
    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.density >= GAS_DENSITY_THRESHOLD {
            Phase::Liquid
        } else {
            Phase::Gas
        }
    }

    pub(crate) fn validate(&self) -> Result<(), &'static str> {
        if self.name.is_empty() {
            return Err("name must not be empty");
        }
        if !self.density.is_finite() || self.density <= 0.0 {
            return Err("density must be finite and positive");
        }
        if self.viscosity == 0 {
            return Err("viscosity must be at least 1");
        }
        Ok(())
    }
}

/// The `none` definition registered under [`FluidId::NONE`].
///
/// It has exactly the reference density, so it never flows.
pub const NONE: FluidDefinition = FluidDefinition::new("none", AIR_DENSITY, 1);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flow_direction_follows_density() {
        assert_eq!(
            FluidDefinition::new("water", 1000.0, 5).flow_direction(),
            Some(Direction::Down)
        );
        assert_eq!(
            FluidDefinition::new("steam", 0.6, 2).flow_direction(),
            Some(Direction::Up)
        );
        assert_eq!(NONE.flow_direction(), None);
    }

    #[test]
    fn test_phase_threshold() {
        assert_eq!(FluidDefinition::new("oil", 800.0, 8).phase(), Phase::Liquid);
        assert_eq!(
            FluidDefinition::new("edge", GAS_DENSITY_THRESHOLD, 1).phase(),
            Phase::Liquid
        );
        assert_eq!(FluidDefinition::new("smoke", 1.1, 1).phase(), Phase::Gas);
    }

    #[test]
    fn test_validate() {
        assert!(FluidDefinition::new("water", 1000.0, 5).validate().is_ok());
        assert!(FluidDefinition::new("sludge", 1000.0, 0).validate().is_err());
        assert!(FluidDefinition::new("void", f32::NAN, 1).validate().is_err());
        assert!(FluidDefinition::new("", 1.0, 1).validate().is_err());
    }
}
