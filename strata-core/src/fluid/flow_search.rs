use smallvec::SmallVec;
use strata_registry::{BlockInstance, Content, FluidId, FluidInstance};
use strata_utils::codec::BitSet;
use strata_utils::{BlockPos, Direction};

use crate::world::World;

/// A cell found by [`FlowSearch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowTarget {
    /// Where the cell is.
    pub pos: BlockPos,
    /// Its fluid when it was visited.
    pub fluid: FluidInstance,
    /// The block that holds the fluid.
    pub block: BlockInstance,
    /// Face the search entered through, `None` for the start cell.
    pub entry_side: Option<Direction>,
}

type Frontier = SmallVec<[(BlockPos, Content); 16]>;

/// Breadth-first search over the horizontal plane through cells of one fluid.
///
/// At most `radius + 1` rings are expanded, so every visited cell lies in a
/// square of side `2 * (radius + 1) + 1` around the start. A bit grid of
/// that size marks visited cells.
pub struct FlowSearch {
    radius: u32,
    side: usize,
    visited: BitSet,
}

impl FlowSearch {
    /// Creates a search bounded by `radius` rings.
    #[must_use]
    pub fn new(radius: u32) -> Self {
        let side = 2 * (radius as usize + 1) + 1;
        Self {
            radius,
            side,
            visited: BitSet::new(side * side),
        }
    }

    /// Number of cells marked by the last run.
    #[must_use]
    pub fn visited(&self) -> usize {
        self.visited.count_ones()
    }

    /// Capacity of the visited grid.
    #[must_use]
    pub fn grid_len(&self) -> usize {
        self.side * self.side
    }

    fn index(&self, start: BlockPos, pos: BlockPos) -> Option<usize> {
        let half = self.radius as i64 + 1;
        let dx = i64::from(pos.x()) - i64::from(start.x()) + half;
        let dz = i64::from(pos.z()) - i64::from(start.z()) + half;
        let side = self.side as i64;
        if (0..side).contains(&dx) && (0..side).contains(&dz) {
            Some((dx * side + dz) as usize)
        } else {
            None
        }
    }

    /// Returns the nearest cell of `fluid` whose level is at most
    /// `max_level`, starting with `start` itself.
    ///
    /// A hop is legal only if the block being left allows outflow that way
    /// and the block being entered allows inflow from the opposite face.
    pub fn run(
        &mut self,
        world: &World,
        fluid: FluidId,
        start: BlockPos,
        max_level: u8,
    ) -> Option<FlowTarget> {
        if self.visited() > 0 {
            self.visited = BitSet::new(self.grid_len());
        }
        if fluid.is_none() {
            return None;
        }
        let content = world.get_content(start)?;
        if content.fluid.id != fluid {
            return None;
        }
        let origin = self.index(start, start)?;
        self.visited.set(origin, true);
        if content.fluid.level <= max_level {
            return Some(FlowTarget {
                pos: start,
                fluid: content.fluid,
                block: content.block,
                entry_side: None,
            });
        }

        let behaviours = world.behaviours();
        let mut frontier: Frontier = SmallVec::new();
        let mut next: Frontier = SmallVec::new();
        frontier.push((start, content));

        for _ in 0..=self.radius {
            if frontier.is_empty() {
                break;
            }
            for &(pos, from) in &frontier {
                for direction in Direction::HORIZONTAL {
                    let neighbour = direction.relative(pos);
                    let Some(index) = self.index(start, neighbour) else {
                        continue;
                    };
                    if self.visited.get(index)
                        || !behaviours
                            .block(from.block.id)
                            .allows_outflow(from.block, fluid, direction)
                    {
                        continue;
                    }
                    let Some(content) = world.get_content(neighbour) else {
                        continue;
                    };
                    let entry_side = direction.opposite();
                    if content.fluid.id != fluid
                        || !behaviours
                            .block(content.block.id)
                            .allows_inflow(content.block, fluid, entry_side)
                    {
                        continue;
                    }

                    self.visited.set(index, true);
                    if content.fluid.level <= max_level {
                        return Some(FlowTarget {
                            pos: neighbour,
                            fluid: content.fluid,
                            block: content.block,
                            entry_side: Some(entry_side),
                        });
                    }
                    next.push((neighbour, content));
                }
            }
            std::mem::swap(&mut frontier, &mut next);
            next.clear();
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::behavior::BlockBehaviour;
    use crate::test_support::TestWorld;

    /// Lets fluid in from every side but only out toward the west.
    struct WestValve;

    impl BlockBehaviour for WestValve {
        fn allows_outflow(&self, _block: BlockInstance, _fluid: FluidId, toward: Direction) -> bool {
            toward == Direction::West
        }
    }

    fn corridor(test: &mut TestWorld, length: i32, last_level: u8) -> BlockPos {
        let start = BlockPos::new(0, 1, 0);
        for dx in 0..length {
            test.put_fluid(start.offset(dx, 0, 0), FluidInstance::new(test.water, 7));
        }
        test.put_fluid(start.offset(length - 1, 0, 0), FluidInstance::new(test.water, last_level));
        start
    }

    #[test]
    fn test_finds_far_end_of_corridor() {
        let mut test = TestWorld::new();
        let start = corridor(&mut test, 10, 1);

        let mut search = FlowSearch::new(20);
        let target = search.run(&test.world, test.water, start, 5).expect("end of corridor");

        assert_eq!(target.pos, start.offset(9, 0, 0));
        assert_eq!(target.fluid.level, 1);
        assert_eq!(target.entry_side, Some(Direction::West));
        assert_eq!(search.visited(), 10);
        assert_eq!(search.grid_len(), 43 * 43);
    }

    #[test]
    fn test_radius_bounds_the_search() {
        let mut test = TestWorld::new();
        let start = corridor(&mut test, 10, 1);

        let mut search = FlowSearch::new(3);
        assert_eq!(search.run(&test.world, test.water, start, 5), None);
        // Start plus four rings
        assert_eq!(search.visited(), 5);
    }

    #[test]
    fn test_start_cell_matches_first() {
        let mut test = TestWorld::new();
        let start = corridor(&mut test, 3, 0);

        let target = FlowSearch::new(4)
            .run(&test.world, test.water, start, 7)
            .expect("start qualifies");
        assert_eq!(target.pos, start);
        assert_eq!(target.entry_side, None);

        assert_eq!(FlowSearch::new(4).run(&test.world, test.oil, start, 7), None);
    }

    #[test]
    fn test_blocks_gate_hops() {
        let mut test = TestWorld::with_behaviours(|behaviours, ids| {
            behaviours.assign_block(ids.salt_block, Arc::new(WestValve));
        });
        let start = corridor(&mut test, 4, 0);
        let valve = start.offset(1, 0, 0);
        let fluid = test.fluid_at(valve);
        test.put_content(
            valve,
            Content::new(BlockInstance::new(test.salt_block), fluid),
        );

        // Entering the valve is fine, leaving it east is not
        let mut search = FlowSearch::new(8);
        assert_eq!(search.run(&test.world, test.water, start, 0), None);
        assert_eq!(search.visited(), 2);

        // From the far end, the valve lets fluid out west
        let end = start.offset(3, 0, 0);
        test.put_fluid(end, FluidInstance::new(test.water, 7));
        test.put_fluid(start, FluidInstance::new(test.water, 0));
        let target = search.run(&test.world, test.water, end, 0).expect("valve passes west");
        assert_eq!(target.pos, start);
        assert_eq!(target.entry_side, Some(Direction::East));
    }
}
