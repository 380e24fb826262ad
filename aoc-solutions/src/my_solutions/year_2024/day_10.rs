use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::dp_cache::{DpCache, DpProblem, VecBackend};
use crate::utils::grid::{Grid, Vec2};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 10, tags = ["grid", "dp"])]
pub struct Solver;

pub const TRAILHEAD: u8 = 0;
pub const SUMMIT: u8 = 9;

#[derive(Debug)]
pub struct TopoMap {
    heights: Grid<u8>,
}

impl TopoMap {
    /// Cells one step higher than `pos`, orthogonally adjacent.
    fn uphill(&self, pos: Vec2) -> impl Iterator<Item = Vec2> + '_ {
        let next_height = self.heights.get(pos).map(|&h| h + 1);
        self.heights
            .neighbors(pos)
            .map(|(next, _)| next)
            .filter(move |&next| next_height.is_some() && self.heights.get(next).copied() == next_height)
    }

    fn trailheads(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.heights
            .iter()
            .filter(|&(_, &h)| h == TRAILHEAD)
            .map(|(pos, _)| pos)
    }

    /// Distinct summits reachable from `head`. `stamp` marks cells already
    /// visited from the same head with `head`'s id.
    fn score(&self, head: Vec2, id: usize, stamp: &mut Grid<usize>) -> usize {
        let mut summits = 0;
        let mut stack = vec![head];
        stamp[head] = id;
        while let Some(pos) = stack.pop() {
            if self.heights[pos] == SUMMIT {
                summits += 1;
                continue;
            }
            for next in self.uphill(pos) {
                if stamp[next] != id {
                    stamp[next] = id;
                    stack.push(next);
                }
            }
        }
        summits
    }
}

/// Number of distinct uphill trails from a cell to any summit.
struct Trails<'a>(&'a TopoMap);

impl DpProblem<usize, u64> for Trails<'_> {
    fn deps(&self, &cell: &usize) -> Vec<usize> {
        let heights = &self.0.heights;
        self.0
            .uphill(heights.position_of(cell))
            .filter_map(|next| heights.index_of(next))
            .collect()
    }

    fn compute(&self, &cell: &usize, deps: Vec<u64>) -> u64 {
        if self.0.heights.cells()[cell] == SUMMIT {
            1
        } else {
            deps.iter().sum()
        }
    }
}

impl AocParser for Solver {
    type SharedData<'a> = TopoMap;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let heights = Grid::parse(input.trim_start(), |pos, c| {
            c.to_digit(10)
                .map(|d| d as u8)
                .ok_or_else(|| ParseError::InvalidFormat(format!("'{c}' at {pos} is not a height")))
        })?;
        Ok(TopoMap { heights })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        // ids start at 1 so the zeroed grid counts as unvisited
        let mut stamp = shared.heights.map(|_| 0);
        let total: usize = shared
            .trailheads()
            .enumerate()
            .map(|(i, head)| shared.score(head, i + 1, &mut stamp))
            .sum();
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let map: &TopoMap = shared;
        let cache = DpCache::with_problem(VecBackend::with_capacity(map.heights.len()), Trails(map));
        let total: u64 = map
            .trailheads()
            .filter_map(|head| map.heights.index_of(head))
            .map(|cell| cache.get(&cell))
            .sum();
        Ok(total.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const SAMPLE: &str = "\
89010123
78121874
87430965
96549874
45678903
32019012
01329801
10456732
";

    #[test]
    fn test_sample() {
        let mut shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "36");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "81");
    }

    #[test]
    fn test_single_trail() {
        let mut shared = Solver::parse("0123\n9854\n3761\n").unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "1");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "1");
    }

    #[test]
    fn test_forking_trails_share_summit() {
        // height is x + y, so every monotone lattice path is a trail
        let mut shared = Solver::parse("012\n123\n234\n345\n456\n567\n678\n789\n").unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "1");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "36");
    }

    #[test]
    fn test_rejects_non_digit() {
        assert!(matches!(Solver::parse("01\n2x\n"), Err(ParseError::InvalidFormat(_))));
    }
}
