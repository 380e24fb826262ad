use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use rustc_hash::FxHashSet;

use crate::utils::grid::{Grid, Vec2};
use crate::utils::parse::{fixed_integers, parse_lines};
use crate::utils::search::{Cost, Dijkstra, WalkSpace};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 18, tags = ["grid", "search"])]
pub struct Solver;

pub const MEMORY_SIZE: usize = 71;
pub const FALLEN_BYTES: usize = 1024;

fn corrupted(size: usize, bytes: &[Vec2]) -> Result<Grid<bool>, SolveError> {
    let mut walls = Grid::new(size, size, false);
    for &byte in bytes {
        if walls.set(byte, true).is_none() {
            return Err(SolveError::SolveFailed(
                format!("byte {byte} falls outside the {size}x{size} memory space").into(),
            ));
        }
    }
    Ok(walls)
}

fn exit(size: usize) -> Vec2 {
    Vec2::new(size as i64 - 1, size as i64 - 1)
}

/// Fewest steps from the top-left to the bottom-right corner once the first
/// `fallen` bytes are down. `None` if the exit is cut off.
pub fn shortest_escape(bytes: &[Vec2], size: usize, fallen: usize) -> Result<Option<Cost>, SolveError> {
    let walls = corrupted(size, &bytes[..fallen.min(bytes.len())])?;
    // also covers an empty memory space, which has no start cell
    if walls.get(Vec2::ZERO) != Some(&false) {
        return Ok(None);
    }
    let space = WalkSpace::new(&walls);
    let mut search = Dijkstra::new(&space, Vec2::ZERO);
    Ok(search.run_until(|pos| pos == exit(size)).map(|(_, cost)| cost))
}

/// The first byte after which no path to the exit remains.
///
/// The search is only repeated when a byte lands on the path currently in
/// use, since any other byte leaves that path intact.
pub fn first_blocker(bytes: &[Vec2], size: usize) -> Result<Option<Vec2>, SolveError> {
    // validates every coordinate up front
    corrupted(size, bytes)?;

    let mut walls = Grid::new(size, size, false);
    let goal = exit(size);
    let mut path = FxHashSet::default();
    let mut path_stale = true;

    for &byte in bytes {
        walls.set(byte, true);
        if !path_stale && !path.contains(&byte) {
            continue;
        }
        if walls.get(Vec2::ZERO) != Some(&false) || walls.get(goal) != Some(&false) {
            return Ok(Some(byte));
        }
        let space = WalkSpace::new(&walls);
        let mut search = Dijkstra::new(&space, Vec2::ZERO);
        if search.run_until(|pos| pos == goal).is_none() {
            return Ok(Some(byte));
        }
        path = search.path_to(goal).unwrap_or_default().into_iter().collect();
        path_stale = false;
    }
    Ok(None)
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Vec2>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input, |line| {
            let [x, y] = fixed_integers(line)?;
            Ok(Vec2::new(x, y))
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shortest_escape(shared, MEMORY_SIZE, FALLEN_BYTES)?
            .map(|steps| steps.to_string())
            .ok_or_else(|| SolveError::NoSolution("exit is unreachable".into()))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        first_blocker(shared, MEMORY_SIZE)?
            .map(|byte| byte.to_string())
            .ok_or_else(|| SolveError::NoSolution("exit is never cut off".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const SAMPLE: &str = "\
5,4
4,2
4,5
3,0
2,1
6,3
2,4
1,5
0,6
3,3
2,6
5,1
1,2
5,5
2,5
6,5
1,4
0,4
6,4
1,1
6,1
1,0
0,5
1,6
2,0
";

    #[test]
    fn test_sample_steps() {
        let bytes = Solver::parse(SAMPLE).unwrap();
        assert_eq!(shortest_escape(&bytes, 7, 12).unwrap(), Some(22));
        assert_eq!(shortest_escape(&bytes, 7, 0).unwrap(), Some(12));
    }

    #[test]
    fn test_sample_blocker() {
        let bytes = Solver::parse(SAMPLE).unwrap();
        assert_eq!(first_blocker(&bytes, 7).unwrap(), Some(Vec2::new(6, 1)));
        assert_eq!(Vec2::new(6, 1).to_string(), "6,1");
    }

    #[test]
    fn test_blocker_matches_brute_force() {
        let bytes = Solver::parse(SAMPLE).unwrap();
        let brute = (1..=bytes.len())
            .find(|&n| shortest_escape(&bytes, 7, n).unwrap().is_none())
            .map(|n| bytes[n - 1]);
        assert_eq!(first_blocker(&bytes, 7).unwrap(), brute);
    }

    #[test]
    fn test_never_blocked() {
        assert_eq!(first_blocker(&[Vec2::new(1, 0)], 3).unwrap(), None);
    }

    #[test]
    fn test_empty_memory_space() {
        assert_eq!(shortest_escape(&[], 0, 0).unwrap(), None);
        assert_eq!(first_blocker(&[], 0).unwrap(), None);
        assert!(matches!(first_blocker(&[Vec2::ZERO], 0), Err(SolveError::SolveFailed(_))));
        assert_eq!(shortest_escape(&[Vec2::ZERO], 1, 1).unwrap(), None);
        assert_eq!(shortest_escape(&[], 1, 0).unwrap(), Some(0));
    }

    #[test]
    fn test_byte_outside_memory() {
        let mut bytes = Solver::parse("1,1\n80,3\n").unwrap();
        assert!(matches!(
            Solver::solve_part(&mut bytes, 2),
            Err(SolveError::SolveFailed(_))
        ));
    }
}
