//! What happens where two different fluids meet.
//!
//! Rules are declared once per unordered fluid pair. A pair without a rule
//! falls back to [`Reaction::DensitySwap`].

mod reaction;

use rustc_hash::FxHashMap;
use strata_registry::{BlockId, FluidId, FluidInstance};
use strata_utils::BlockPos;

pub use reaction::Reaction;

use crate::world::World;

/// A reaction declared for one pair of fluids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactRule {
    /// One side of the pair.
    pub first: FluidId,
    /// The other side. Order does not matter.
    pub second: FluidId,
    /// What happens on contact.
    pub reaction: Reaction,
}

impl ContactRule {
    /// Declares `reaction` for the pair.
    #[must_use]
    pub const fn new(first: FluidId, second: FluidId, reaction: Reaction) -> Self {
        Self {
            first,
            second,
            reaction,
        }
    }

    /// `hot` turns into the `product` block, `coolant` boils into `vapor`.
    /// A `vapor` of `none` makes the coolant lose one level instead.
    #[must_use]
    pub const fn quench(hot: FluidId, coolant: FluidId, product: BlockId, vapor: FluidId) -> Self {
        Self::new(
            hot,
            coolant,
            Reaction::Quench {
                hot,
                coolant,
                product,
                vapor,
            },
        )
    }

    /// `victim` is destroyed and `corrosive` loses one level.
    #[must_use]
    pub const fn corrode(corrosive: FluidId, victim: FluidId) -> Self {
        Self::new(corrosive, victim, Reaction::Corrode { corrosive, victim })
    }

    /// `solute` loses one level into `solvent`.
    #[must_use]
    pub const fn dissolve(solvent: FluidId, solute: FluidId) -> Self {
        Self::new(solvent, solute, Reaction::Dissolve { solvent, solute })
    }

    /// Both cells become `result`, each keeping its level.
    #[must_use]
    pub const fn mix(first: FluidId, second: FluidId, result: FluidId) -> Self {
        Self::new(
            first,
            second,
            Reaction::Mix {
                first,
                second,
                result,
            },
        )
    }

    fn key(&self) -> (FluidId, FluidId) {
        pair_key(self.first, self.second)
    }
}

fn pair_key(a: FluidId, b: FluidId) -> (FluidId, FluidId) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Looks up and applies contact reactions.
#[derive(Debug, Default)]
pub struct ContactResolver {
    rules: FxHashMap<(FluidId, FluidId), Reaction>,
}

impl ContactResolver {
    /// Builds the rule table. A later rule for the same pair replaces an
    /// earlier one.
    #[must_use]
    pub fn new(rules: impl IntoIterator<Item = ContactRule>) -> Self {
        let mut table = FxHashMap::default();
        for rule in rules {
            if rule.first == rule.second {
                log::warn!("Ignoring contact rule of {} with itself", rule.first);
                continue;
            }
            if let Some(previous) = table.insert(rule.key(), rule.reaction) {
                log::warn!(
                    "Contact rule for {} and {} replaces {previous:?}",
                    rule.first,
                    rule.second
                );
            }
        }
        log::debug!("Loaded {} contact rules", table.len());
        Self { rules: table }
    }

    /// The reaction for a pair, in either order.
    #[must_use]
    pub fn reaction(&self, a: FluidId, b: FluidId) -> Reaction {
        self.rules
            .get(&pair_key(a, b))
            .copied()
            .unwrap_or(Reaction::DensitySwap)
    }

    /// Number of declared rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no rules were declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Resolves the meeting of fluid `a` at `pos_a` with fluid `b` at `pos_b`.
    ///
    /// Returns whether anything changed. Identical fluids and `none` never
    /// react. Both cells are read again, and nothing happens unless they
    /// still hold the given fluid types; the live levels are used.
    pub fn handle_contact(
        &self,
        world: &mut World,
        a: FluidInstance,
        pos_a: BlockPos,
        b: FluidInstance,
        pos_b: BlockPos,
    ) -> bool {
        if a.id == b.id || a.is_none() || b.is_none() {
            return false;
        }
        let (Some(live_a), Some(live_b)) = (world.get_content(pos_a), world.get_content(pos_b))
        else {
            return false;
        };
        if live_a.fluid.id != a.id || live_b.fluid.id != b.id {
            log::trace!("Skipping contact at {pos_a} and {pos_b}, cells changed");
            return false;
        }
        let (a, b) = (live_a.fluid, live_b.fluid);
        let reaction = self.reaction(a.id, b.id);
        let resolved = reaction.apply(world, (a, pos_a), (b, pos_b));
        if resolved {
            log::trace!("{:?} between {} at {pos_a} and {} at {pos_b}", reaction, a.id, b.id);
        }
        resolved
    }
}
