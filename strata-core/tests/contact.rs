#![allow(missing_docs)]
//! Contact reactions between fluids, driven directly and through ticks.

use strata_core::test_support::TestWorld;
use strata_registry::{BlockInstance, FluidInstance};
use strata_utils::{BlockPos, Direction};

fn contact(test: &mut TestWorld, a: BlockPos, b: BlockPos) -> bool {
    let fluid_a = test.fluid_at(a);
    let fluid_b = test.fluid_at(b);
    test.world
        .contacts()
        .handle_contact(&mut test.world, fluid_a, a, fluid_b, b)
}

#[test]
fn test_side_by_side_lift_conserves_volume() {
    let mut test = TestWorld::new();
    let dense = BlockPos::new(1, 1, 1);
    let light = Direction::East.relative(dense);
    let above = Direction::Up.relative(light);
    test.put_fluid(dense, FluidInstance::new(test.water, 4));
    test.put_fluid(light, FluidInstance::new(test.oil, 3));
    let water = test.total_eighths(test.water);
    let oil = test.total_eighths(test.oil);

    assert!(contact(&mut test, light, dense));

    assert_eq!(test.fluid_at(above), FluidInstance::flowing(test.oil, 3));
    assert_eq!(test.fluid_at(light), FluidInstance::flowing(test.water, 0));
    assert_eq!(test.fluid_at(dense), FluidInstance::flowing(test.water, 3));
    assert_eq!(test.total_eighths(test.water), water);
    assert_eq!(test.total_eighths(test.oil), oil);
    for pos in [above, light, dense] {
        let fluid = test.fluid_at(pos);
        assert!(test.world.has_scheduled_fluid_tick(pos, fluid.id), "{pos}");
    }
}

#[test]
fn test_lift_needs_room_and_volume() {
    let mut test = TestWorld::new();
    let dense = BlockPos::new(1, 1, 1);
    let light = Direction::East.relative(dense);
    test.put_fluid(dense, FluidInstance::new(test.water, 0));
    test.put_fluid(light, FluidInstance::new(test.oil, 3));

    // Nothing left to follow with
    assert!(!contact(&mut test, dense, light));

    test.put_fluid(dense, FluidInstance::new(test.water, 6));
    test.put_block(Direction::Up.relative(light), BlockInstance::new(test.stone));
    assert!(!contact(&mut test, dense, light));

    assert_eq!(test.fluid_at(light), FluidInstance::new(test.oil, 3));
    assert_eq!(test.world.pending_fluid_ticks(), 0);
}

#[test]
fn test_dense_fluid_sinks_through_light() {
    let mut test = TestWorld::new();
    let low = BlockPos::new(4, 1, 4);
    let high = Direction::Up.relative(low);
    test.put_fluid(low, FluidInstance::new(test.oil, 5));
    test.put_fluid(high, FluidInstance::new(test.water, 2));

    assert!(contact(&mut test, high, low));
    assert_eq!(test.fluid_at(low), FluidInstance::flowing(test.water, 2));
    assert_eq!(test.fluid_at(high), FluidInstance::flowing(test.oil, 5));

    // Now correctly ordered
    assert!(!contact(&mut test, high, low));
}

#[test]
fn test_quench_roles_do_not_depend_on_argument_order() {
    for lava_first in [true, false] {
        let mut test = TestWorld::new();
        let lava = BlockPos::new(2, 2, 2);
        let water = Direction::Down.relative(lava);
        test.put_fluid(lava, FluidInstance::new(test.lava, 2));
        test.put_fluid(water, FluidInstance::new(test.water, 5));

        let resolved = if lava_first {
            contact(&mut test, lava, water)
        } else {
            contact(&mut test, water, lava)
        };

        assert!(resolved);
        let solid = test.content_at(lava);
        assert_eq!(solid.block, BlockInstance::new(test.stone));
        assert!(solid.fluid.is_none());
        assert_eq!(test.fluid_at(water), FluidInstance::flowing(test.steam, 5));
        assert!(test.world.has_scheduled_fluid_tick(water, test.steam));
    }
}

#[test]
fn test_corrode_destroys_victim_and_spends_corrosive() {
    let mut test = TestWorld::new();
    let acid = BlockPos::new(6, 1, 6);
    let oil = Direction::North.relative(acid);
    test.put_fluid(acid, FluidInstance::new(test.acid, 3));
    test.put_fluid(oil, FluidInstance::new(test.oil, 6));

    assert!(contact(&mut test, oil, acid));
    assert!(test.fluid_at(oil).is_none());
    assert_eq!(test.fluid_at(acid), FluidInstance::flowing(test.acid, 2));
    assert!(test.world.has_scheduled_fluid_tick(acid, test.acid));
}

#[test]
fn test_dissolve_only_shrinks_solute() {
    let mut test = TestWorld::new();
    let oil = BlockPos::new(6, 1, 6);
    let tar = Direction::West.relative(oil);
    test.put_fluid(oil, FluidInstance::new(test.oil, 4));
    test.put_fluid(tar, FluidInstance::new(test.tar, 1));

    assert!(contact(&mut test, oil, tar));
    assert_eq!(test.fluid_at(tar), FluidInstance::flowing(test.tar, 0));
    assert!(contact(&mut test, tar, oil));
    assert!(test.fluid_at(tar).is_none());
    let solvent = test.fluid_at(oil);
    assert_eq!((solvent.id, solvent.level), (test.oil, 4));
}

#[test]
fn test_mix_converts_the_other_side() {
    let mut test = TestWorld::new();
    let water = BlockPos::new(8, 1, 8);
    let brine = Direction::South.relative(water);
    test.put_fluid(water, FluidInstance::new(test.water, 6));
    test.put_fluid(brine, FluidInstance::new(test.brine, 2));

    assert!(contact(&mut test, brine, water));
    assert_eq!(test.fluid_at(water), FluidInstance::flowing(test.brine, 6));
    let unchanged = test.fluid_at(brine);
    assert_eq!((unchanged.id, unchanged.level), (test.brine, 2));
    assert!(test.world.has_scheduled_fluid_tick(water, test.brine));
}

#[test]
fn test_outdated_instances_are_checked_against_the_cells() {
    let mut test = TestWorld::new();
    let held = BlockPos::new(3, 3, 3);
    let water = Direction::Down.relative(held);
    test.put_fluid(held, FluidInstance::new(test.oil, 4));
    test.put_fluid(water, FluidInstance::new(test.water, 5));

    // The cell no longer holds lava
    let lava = FluidInstance::new(test.lava, 4);
    let water_fluid = test.fluid_at(water);
    let resolved = test
        .world
        .contacts()
        .handle_contact(&mut test.world, lava, held, water_fluid, water);
    assert!(!resolved);
    assert_eq!(test.content_at(held).block, BlockInstance::AIR);
    assert_eq!(test.fluid_at(held), FluidInstance::new(test.oil, 4));
    assert_eq!(test.fluid_at(water), FluidInstance::new(test.water, 5));
    assert_eq!(test.world.pending_fluid_ticks(), 0);
}

#[test]
fn test_lift_uses_live_levels() {
    let mut test = TestWorld::new();
    let dense = BlockPos::new(1, 1, 1);
    let light = Direction::East.relative(dense);
    let above = Direction::Up.relative(light);
    test.put_fluid(dense, FluidInstance::new(test.water, 4));
    test.put_fluid(light, FluidInstance::new(test.oil, 3));

    let old_oil = FluidInstance::new(test.oil, 7);
    let old_water = FluidInstance::new(test.water, 0);
    let resolved = test
        .world
        .contacts()
        .handle_contact(&mut test.world, old_oil, light, old_water, dense);
    assert!(resolved);

    assert_eq!(test.fluid_at(above), FluidInstance::flowing(test.oil, 3));
    assert_eq!(test.fluid_at(dense), FluidInstance::flowing(test.water, 3));
}

#[test]
fn test_same_or_missing_fluid_never_reacts() {
    let mut test = TestWorld::new();
    let a = BlockPos::new(1, 1, 1);
    let b = Direction::East.relative(a);
    test.put_fluid(a, FluidInstance::new(test.water, 3));
    test.put_fluid(b, FluidInstance::new(test.water, 1));
    assert!(!contact(&mut test, a, b));

    test.put_fluid(b, FluidInstance::NONE);
    assert!(!contact(&mut test, a, b));
}

#[test]
fn test_lava_pouring_onto_water_is_quenched_by_its_tick() {
    let mut test = TestWorld::new();
    let water = BlockPos::new(10, 1, 10);
    let lava = Direction::Up.relative(water);
    test.put_block(Direction::Down.relative(water), BlockInstance::new(test.stone));
    test.put_fluid(water, FluidInstance::new(test.water, 7));
    test.world.set_fluid(FluidInstance::new(test.lava, 7), lava);

    // Lava ticks after its viscosity
    let viscosity = test.world.registry().fluid(test.lava).viscosity;
    test.run(viscosity as usize);

    assert_eq!(test.content_at(lava).block.id, test.stone);
    assert_eq!(test.fluid_at(water).id, test.steam);
}
