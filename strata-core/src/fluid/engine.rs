//! Fill, take and elevate primitives.
//!
//! Levels run from 0 (one eighth) to 7 (full), so a level `l` stands for
//! `l + 1` eighths. Amounts passed to [`fill`] and [`take`] use the same
//! convention.

use strata_registry::{Content, FluidId, FluidInstance, MAX_LEVEL};
use strata_utils::{BlockPos, Direction};

use super::{FlowSearch, FlowTarget};
use crate::world::World;

/// Outcome of [`fill`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillResult {
    /// Whether any fluid entered the cell.
    pub success: bool,
    /// Level still left to place, or [`FillResult::ABSORBED`] if everything fit.
    pub remaining: i8,
}

impl FillResult {
    /// `remaining` value meaning the whole amount was absorbed.
    pub const ABSORBED: i8 = -1;

    const fn refused(level: u8) -> Self {
        Self {
            success: false,
            remaining: level as i8,
        }
    }

    /// Whether nothing is left to place.
    #[must_use]
    pub const fn is_absorbed(&self) -> bool {
        self.remaining == Self::ABSORBED
    }

    /// Eighths that entered the cell out of a request of `level`.
    #[must_use]
    pub const fn deposited(&self, level: u8) -> u8 {
        (level as i8 - self.remaining) as u8
    }
}

/// Writes `fluid` as flowing and schedules its tick unless the cell already
/// held the same fluid in motion, in which case its pending tick is kept.
fn place_flowing(world: &mut World, pos: BlockPos, before: Content, fluid: FluidInstance) {
    let owns_tick = !before.fluid.is_static && before.fluid.id == fluid.id;
    world.set_content(Content::new(before.block, fluid.with_static(false)), pos, true);
    if !owns_tick {
        let delay = world.registry().fluid(fluid.id).viscosity;
        world.schedule_fluid_tick(pos, fluid.id, delay);
    }
}

/// Replaces whatever fluid is at `pos`, keeping the block.
///
/// `none` leaves the cell empty and static; any other fluid is left flowing
/// with a pending tick.
pub fn replace_fluid(world: &mut World, pos: BlockPos, fluid: FluidInstance) {
    let Some(content) = world.get_content(pos) else {
        return;
    };
    if fluid.is_none() {
        world.set_content(Content::new(content.block, FluidInstance::NONE), pos, true);
    } else {
        place_flowing(world, pos, content, fluid);
    }
}

/// Pours `level` of `fluid` into `pos` through the face `entry_side`.
///
/// The occupying block must allow the inflow. A cell of the same fluid that
/// is not full takes as much as fits; an empty cell takes everything. Any
/// other cell refuses and `remaining` is the requested level.
pub fn fill(
    world: &mut World,
    fluid: FluidId,
    pos: BlockPos,
    level: u8,
    entry_side: Direction,
) -> FillResult {
    debug_assert!(level <= MAX_LEVEL);
    if fluid.is_none() {
        return FillResult::refused(level);
    }
    let Some(content) = world.get_content(pos) else {
        return FillResult::refused(level);
    };
    let behaviours = world.behaviours();
    if !behaviours
        .block(content.block.id)
        .allows_inflow(content.block, fluid, entry_side)
    {
        return FillResult::refused(level);
    }

    if content.fluid.id == fluid && !content.fluid.is_full() {
        let old = content.fluid.level;
        let new = (old + level + 1).min(MAX_LEVEL);
        place_flowing(world, pos, content, FluidInstance::flowing(fluid, new));
        FillResult {
            success: true,
            remaining: level as i8 - (new - old) as i8,
        }
    } else if content.fluid.is_none() {
        place_flowing(world, pos, content, FluidInstance::flowing(fluid, level));
        FillResult {
            success: true,
            remaining: FillResult::ABSORBED,
        }
    } else {
        FillResult::refused(level)
    }
}

/// Removes `level` of `fluid` from `pos`.
///
/// Fails if the cell holds another fluid or none. Taking at least the
/// current level empties the cell; less leaves it flowing at
/// `current - level - 1`.
pub fn take(world: &mut World, fluid: FluidId, pos: BlockPos, level: u8) -> bool {
    let Some(content) = world.get_content(pos) else {
        return false;
    };
    if fluid.is_none() || content.fluid.id != fluid {
        return false;
    }

    let current = content.fluid.level;
    if level >= current {
        world.set_content(Content::new(content.block, FluidInstance::NONE), pos, true);
    } else {
        place_flowing(
            world,
            pos,
            content,
            FluidInstance::flowing(fluid, current - level - 1),
        );
    }
    true
}

/// Like [`take`], but only when the cell holds at least `level`.
/// On failure nothing changes.
pub fn try_take_exact(world: &mut World, fluid: FluidId, pos: BlockPos, level: u8) -> bool {
    let Some(content) = world.get_content(pos) else {
        return false;
    };
    if fluid.is_none() || content.fluid.id != fluid || level > content.fluid.level {
        return false;
    }
    take(world, fluid, pos, level)
}

/// Pumps the fluid at `pos` straight up through at most `pump_distance` cells.
///
/// Each cell above is filled from below with what is still carried. The
/// pump stops at the first cell that is missing or refuses the fluid, when
/// the cell underneath does not let it out upward, or when nothing is left.
/// Exactly the deposited amount is then taken from the source. Returns the
/// number of eighths moved.
pub fn elevate(world: &mut World, fluid: FluidId, pos: BlockPos, pump_distance: u32) -> u8 {
    let Some(source) = world.get_content(pos) else {
        return 0;
    };
    if fluid.is_none() || source.fluid.id != fluid {
        return 0;
    }

    let behaviours = world.behaviours();
    let mut carried = source.fluid.level as i8;
    let mut below = pos;
    for _ in 0..pump_distance {
        if carried < 0 {
            break;
        }
        let Some(below_content) = world.get_content(below) else {
            break;
        };
        if !behaviours
            .block(below_content.block.id)
            .allows_outflow(below_content.block, fluid, Direction::Up)
        {
            break;
        }

        let target = Direction::Up.relative(below);
        let result = fill(world, fluid, target, carried as u8, Direction::Down);
        if !result.success {
            break;
        }
        carried = result.remaining;
        below = target;
    }

    let deposited = (source.fluid.level as i8 - carried) as u8;
    if deposited > 0 {
        take(world, fluid, pos, deposited - 1);
    }
    deposited
}

/// Whether the cell one step along the fluid's flow direction holds
/// something other than this fluid.
///
/// Fluids that do not flow are always at their surface.
#[must_use]
pub fn is_at_surface(world: &World, fluid: FluidId, pos: BlockPos) -> bool {
    let Some(direction) = world.registry().fluid(fluid).flow_direction() else {
        return true;
    };
    world
        .get_content(direction.relative(pos))
        .is_none_or(|content| content.fluid.id != fluid)
}

/// Finds the nearest cell of `fluid` at or below `max_level` that is
/// horizontally connected to `pos` through cells of the same fluid.
///
/// See [`FlowSearch`] for the bounds.
#[must_use]
pub fn search_flow_target(
    world: &World,
    fluid: FluidId,
    pos: BlockPos,
    max_level: u8,
    radius: u32,
) -> Option<FlowTarget> {
    FlowSearch::new(radius).run(world, fluid, pos, max_level)
}

#[cfg(test)]
mod tests {
    use strata_registry::BlockInstance;

    use super::*;
    use crate::test_support::TestWorld;

    #[test]
    fn test_fill_then_take_returns_cell_to_empty() {
        let mut test = TestWorld::new();
        let pos = BlockPos::new(4, 4, 4);

        let result = fill(&mut test.world, test.water, pos, 5, Direction::Up);
        assert_eq!(result, FillResult { success: true, remaining: FillResult::ABSORBED });
        let filled = test.fluid_at(pos);
        assert_eq!((filled.id, filled.level, filled.is_static), (test.water, 5, false));
        assert!(test.world.has_scheduled_fluid_tick(pos, test.water));

        assert!(take(&mut test.world, test.water, pos, 5));
        assert_eq!(test.fluid_at(pos), FluidInstance::NONE);
    }

    #[test]
    fn test_fill_same_fluid_reports_overflow() {
        let mut test = TestWorld::new();
        let pos = BlockPos::new(4, 4, 4);
        test.put_fluid(pos, FluidInstance::new(test.water, 6));

        // 4 eighths offered, 1 fits
        let result = fill(&mut test.world, test.water, pos, 3, Direction::North);
        assert!(result.success);
        assert_eq!(result.remaining, 2);
        assert_eq!(result.deposited(3), 1);
        assert_eq!(test.fluid_at(pos).level, 7);

        let full = fill(&mut test.world, test.water, pos, 0, Direction::North);
        assert_eq!(full, FillResult { success: false, remaining: 0 });
    }

    #[test]
    fn test_fill_refused_by_other_fluid_or_solid_block() {
        let mut test = TestWorld::new();
        let oily = BlockPos::new(1, 1, 1);
        let wall = BlockPos::new(2, 1, 1);
        test.put_fluid(oily, FluidInstance::new(test.oil, 2));
        test.put_block(wall, BlockInstance::new(test.stone));

        assert_eq!(
            fill(&mut test.world, test.water, oily, 4, Direction::Up),
            FillResult { success: false, remaining: 4 }
        );
        assert!(!fill(&mut test.world, test.water, wall, 4, Direction::Up).success);
        assert_eq!(test.world.pending_fluid_ticks(), 0);
    }

    #[test]
    fn test_take_wakes_static_cell_once() {
        let mut test = TestWorld::new();
        let pos = BlockPos::new(7, 7, 7);
        test.put_fluid(pos, FluidInstance::new(test.water, 6));

        assert!(take(&mut test.world, test.water, pos, 1));
        assert_eq!(test.fluid_at(pos), FluidInstance::flowing(test.water, 4));
        assert!(take(&mut test.world, test.water, pos, 1));
        assert_eq!(test.fluid_at(pos).level, 2);
        assert_eq!(test.world.pending_fluid_ticks(), 1);

        assert!(!take(&mut test.world, test.oil, pos, 0));
        assert!(!take(&mut test.world, FluidId::NONE, pos, 0));
    }

    #[test]
    fn test_try_take_exact_is_all_or_nothing() {
        let mut test = TestWorld::new();
        let pos = BlockPos::new(7, 7, 7);
        test.put_fluid(pos, FluidInstance::new(test.water, 2));
        let changes = test.world.subscribe_section_changes();

        assert!(!try_take_exact(&mut test.world, test.water, pos, 3));
        assert!(!try_take_exact(&mut test.world, test.oil, pos, 0));
        assert_eq!(test.fluid_at(pos), FluidInstance::new(test.water, 2));
        assert_eq!(changes.try_iter().count(), 0);

        assert!(try_take_exact(&mut test.world, test.water, pos, 2));
        assert_eq!(test.fluid_at(pos), FluidInstance::NONE);
    }

    #[test]
    fn test_elevate_into_partial_column() {
        let mut test = TestWorld::new();
        let source = BlockPos::new(3, 2, 3);
        test.put_fluid(source, FluidInstance::new(test.water, 7));
        for dy in 1..=3 {
            test.put_fluid(source.offset(0, dy, 0), FluidInstance::new(test.water, 5));
        }
        test.put_block(source.offset(0, 4, 0), BlockInstance::new(test.stone));
        let before = test.total_eighths(test.water);

        let moved = elevate(&mut test.world, test.water, source, 10);

        assert_eq!(moved, 6);
        assert_eq!(test.fluid_at(source).level, 1);
        for dy in 1..=3 {
            assert_eq!(test.fluid_at(source.offset(0, dy, 0)).level, 7);
        }
        assert!(test.fluid_at(source.offset(0, 4, 0)).is_none());
        assert_eq!(test.total_eighths(test.water), before);
    }

    #[test]
    fn test_elevate_into_empty_column_moves_everything_once() {
        let mut test = TestWorld::new();
        let source = BlockPos::new(3, 2, 3);
        test.put_fluid(source, FluidInstance::new(test.water, 7));

        let moved = elevate(&mut test.world, test.water, source, 10);

        assert_eq!(moved, 8);
        assert!(test.fluid_at(source).is_none());
        assert_eq!(test.fluid_at(source.offset(0, 1, 0)).level, 7);
        assert!(test.fluid_at(source.offset(0, 2, 0)).is_none());
    }

    #[test]
    fn test_elevate_blocked_by_source_block() {
        let mut test = TestWorld::new();
        let source = BlockPos::new(3, 2, 3);
        test.put_content(
            source,
            Content::new(BlockInstance::new(test.stone), FluidInstance::new(test.water, 7)),
        );

        assert_eq!(elevate(&mut test.world, test.water, source, 10), 0);
        assert_eq!(test.fluid_at(source), FluidInstance::new(test.water, 7));
    }

    #[test]
    fn test_is_at_surface() {
        let mut test = TestWorld::new();
        let deep = BlockPos::new(5, 5, 5);
        let top = deep.offset(0, 1, 0);
        test.put_fluid(deep, FluidInstance::new(test.water, 7));
        test.put_fluid(top, FluidInstance::new(test.water, 7));

        // Water flows down: the lower cell rests on nothing of its own kind
        assert!(is_at_surface(&test.world, test.water, deep));
        assert!(!is_at_surface(&test.world, test.water, top));

        // Steam rises: its surface is whatever lies above
        test.put_fluid(deep, FluidInstance::new(test.steam, 3));
        assert!(is_at_surface(&test.world, test.steam, deep));

        assert!(is_at_surface(&test.world, FluidId::NONE, deep));
    }
}
