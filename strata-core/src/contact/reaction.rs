use std::cmp::Ordering;

use strata_registry::{BlockId, BlockInstance, Content, FluidId, FluidInstance};
use strata_utils::{BlockPos, Direction};

use crate::fluid::{replace_fluid, take};
use crate::world::World;

type Side = (FluidInstance, BlockPos);

/// What two fluids do when they meet.
///
/// Named reactions pick their roles by fluid id, never by argument order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    /// Denser fluid sinks below lighter fluid.
    DensitySwap,
    /// `hot` solidifies into `product`, `coolant` boils into `vapor`.
    Quench {
        /// Fluid that turns into a block.
        hot: FluidId,
        /// Fluid that boils away.
        coolant: FluidId,
        /// Block left where `hot` was.
        product: BlockId,
        /// Fluid left where `coolant` was, `none` to lose a level instead.
        vapor: FluidId,
    },
    /// `victim` is destroyed, `corrosive` is used up by one level.
    Corrode {
        /// Fluid that eats the other.
        corrosive: FluidId,
        /// Fluid that disappears.
        victim: FluidId,
    },
    /// `solute` loses one level.
    Dissolve {
        /// Fluid left untouched.
        solvent: FluidId,
        /// Fluid that shrinks.
        solute: FluidId,
    },
    /// Both cells turn into `result`.
    Mix {
        /// One fluid of the pair.
        first: FluidId,
        /// The other fluid of the pair.
        second: FluidId,
        /// Fluid both cells end up holding.
        result: FluidId,
    },
}

/// Orders two sides so the one holding `id` comes first.
fn roles(id: FluidId, a: Side, b: Side) -> Option<(Side, Side)> {
    if a.0.id == id {
        Some((a, b))
    } else if b.0.id == id {
        Some((b, a))
    } else {
        None
    }
}

/// Removes one level from the side, emptying it at level 0.
fn lower(world: &mut World, (fluid, pos): Side) -> bool {
    take(world, fluid.id, pos, 0)
}

impl Reaction {
    /// Applies the reaction to the two sides. Returns whether it resolved.
    pub(crate) fn apply(self, world: &mut World, a: Side, b: Side) -> bool {
        match self {
            Self::DensitySwap => density_swap(world, a, b),
            Self::Quench {
                hot,
                coolant,
                product,
                vapor,
            } => {
                let Some(((_, hot_pos), coolant_side)) = roles(hot, a, b) else {
                    return false;
                };
                if coolant_side.0.id != coolant {
                    return false;
                }
                world.set_content(Content::block(BlockInstance::new(product)), hot_pos, true);
                if vapor.is_none() {
                    lower(world, coolant_side);
                } else {
                    let (coolant, coolant_pos) = coolant_side;
                    let steam = FluidInstance::flowing(vapor, coolant.level);
                    replace_fluid(world, coolant_pos, steam);
                }
                true
            }
            Self::Corrode { corrosive, victim } => {
                let Some((corrosive_side, (victim_fluid, victim_pos))) = roles(corrosive, a, b)
                else {
                    return false;
                };
                if victim_fluid.id != victim {
                    return false;
                }
                replace_fluid(world, victim_pos, FluidInstance::NONE);
                lower(world, corrosive_side);
                true
            }
            Self::Dissolve { solvent, solute } => {
                let Some((_, solute_side)) = roles(solvent, a, b) else {
                    return false;
                };
                solute_side.0.id == solute && lower(world, solute_side)
            }
            Self::Mix {
                first,
                second,
                result,
            } => {
                let Some(((first_fluid, first_pos), (second_fluid, second_pos))) =
                    roles(first, a, b)
                else {
                    return false;
                };
                if second_fluid.id != second {
                    return false;
                }
                for (fluid, pos) in [(first_fluid, first_pos), (second_fluid, second_pos)] {
                    if fluid.id != result {
                        replace_fluid(world, pos, FluidInstance::flowing(result, fluid.level));
                    }
                }
                true
            }
        }
    }
}

fn density_swap(world: &mut World, a: Side, b: Side) -> bool {
    let registry = world.registry();
    let density_a = registry.fluid(a.0.id).density;
    let density_b = registry.fluid(b.0.id).density;
    let (dense, light) = match density_a.partial_cmp(&density_b) {
        Some(Ordering::Greater) => (a, b),
        Some(Ordering::Less) => (b, a),
        _ => return false,
    };

    match light.1.y().cmp(&dense.1.y()) {
        Ordering::Equal => lift(world, dense, light),
        Ordering::Greater => false,
        Ordering::Less => {
            replace_fluid(world, dense.1, light.0);
            replace_fluid(world, light.1, dense.0);
            true
        }
    }
}

/// Side by side: the lighter fluid climbs into the empty cell above it, the
/// denser fluid follows with one eighth into the cell it left.
fn lift(world: &mut World, (dense, dense_pos): Side, (light, light_pos): Side) -> bool {
    if dense.level == 0 {
        return false;
    }
    let above = Direction::Up.relative(light_pos);
    let (Some(above_content), Some(light_content)) =
        (world.get_content(above), world.get_content(light_pos))
    else {
        return false;
    };
    let behaviours = world.behaviours();
    let passable = above_content.fluid.is_none()
        && behaviours
            .block(light_content.block.id)
            .allows_outflow(light_content.block, light.id, Direction::Up)
        && behaviours
            .block(above_content.block.id)
            .allows_inflow(above_content.block, light.id, Direction::Down);
    if !passable {
        return false;
    }

    replace_fluid(world, above, FluidInstance::flowing(light.id, light.level));
    replace_fluid(world, light_pos, FluidInstance::flowing(dense.id, 0));
    replace_fluid(world, dense_pos, FluidInstance::flowing(dense.id, dense.level - 1));
    true
}
