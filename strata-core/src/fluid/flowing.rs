//! Reference behaviour of every registered fluid: pour, react, spread, settle.

use strata_registry::{BlockInstance, Content, FluidId, FluidInstance};
use strata_utils::{BlockPos, Direction};

use super::engine::{fill, search_flow_target, take};
use crate::behavior::FluidBehaviour;
use crate::world::World;

/// Default behaviour of a registered fluid.
///
/// On each scheduled tick a flowing cell tries, in order:
/// 1. to pour along its flow direction into the same fluid or an empty cell,
///    or to react with a different fluid there;
/// 2. to react with a different fluid beside it;
/// 3. to spread one eighth into an empty horizontal neighbour, or toward the
///    nearest connected cell at least two levels lower.
///
/// If something moved and the cell still holds flowing fluid of its kind,
/// it ticks again after its viscosity. Otherwise it comes to rest.
pub struct FlowingFluid;

impl FluidBehaviour for FlowingFluid {
    fn scheduled_update(&self, world: &mut World, pos: BlockPos, fluid: FluidInstance) {
        let Some(content) = world.get_content(pos) else {
            return;
        };
        let registry = world.registry();
        let definition = registry.fluid(fluid.id);

        let moved = definition
            .flow_direction()
            .is_some_and(|direction| pour(world, pos, content, direction))
            || touch_neighbours(world, pos, content)
            || spread(world, pos, content);

        let Some(now) = world.get_content(pos) else {
            return;
        };
        // Whoever replaced the fluid also took care of its tick
        if now.fluid.id != fluid.id {
            return;
        }
        if !moved {
            world.modify_fluid_static(true, pos);
        } else if !now.fluid.is_static {
            world.schedule_fluid_tick(pos, fluid.id, definition.viscosity);
        }
    }
}

fn allows_outflow(world: &World, block: BlockInstance, fluid: FluidId, toward: Direction) -> bool {
    world
        .behaviours()
        .block(block.id)
        .allows_outflow(block, fluid, toward)
}

fn pour(world: &mut World, pos: BlockPos, content: Content, direction: Direction) -> bool {
    let fluid = content.fluid;
    if !allows_outflow(world, content.block, fluid.id, direction) {
        return false;
    }
    let target = direction.relative(pos);
    let Some(below) = world.get_content(target) else {
        return false;
    };

    if below.fluid.id == fluid.id || below.fluid.is_none() {
        let result = fill(world, fluid.id, target, fluid.level, direction.opposite());
        if !result.success {
            return false;
        }
        let deposited = result.deposited(fluid.level);
        deposited > 0 && take(world, fluid.id, pos, deposited - 1)
    } else {
        world
            .contacts()
            .handle_contact(world, fluid, pos, below.fluid, target)
    }
}

fn touch_neighbours(world: &mut World, pos: BlockPos, content: Content) -> bool {
    let fluid = content.fluid;
    for direction in Direction::HORIZONTAL {
        let neighbour = direction.relative(pos);
        let Some(other) = world.get_content(neighbour) else {
            continue;
        };
        if other.fluid.is_none() || other.fluid.id == fluid.id {
            continue;
        }
        let passable = allows_outflow(world, content.block, fluid.id, direction)
            && world
                .behaviours()
                .block(other.block.id)
                .allows_inflow(other.block, fluid.id, direction.opposite());
        if passable
            && world
                .contacts()
                .handle_contact(world, fluid, pos, other.fluid, neighbour)
        {
            return true;
        }
    }
    false
}

fn spread(world: &mut World, pos: BlockPos, content: Content) -> bool {
    let fluid = content.fluid;
    if fluid.level == 0 {
        return false;
    }

    for direction in Direction::HORIZONTAL {
        if !allows_outflow(world, content.block, fluid.id, direction) {
            continue;
        }
        let neighbour = direction.relative(pos);
        let empty = world
            .get_content(neighbour)
            .is_some_and(|other| other.fluid.is_none());
        if empty && fill(world, fluid.id, neighbour, 0, direction.opposite()).success {
            return take(world, fluid.id, pos, 0);
        }
    }

    if fluid.level < 2 {
        return false;
    }
    let radius = world.config().flow_search_radius;
    let Some(target) = search_flow_target(world, fluid.id, pos, fluid.level - 2, radius) else {
        return false;
    };
    let Some(entry_side) = target.entry_side else {
        return false;
    };
    fill(world, fluid.id, target.pos, 0, entry_side).success && take(world, fluid.id, pos, 0)
}
