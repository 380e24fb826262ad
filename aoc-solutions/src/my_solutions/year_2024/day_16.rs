use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::{Dir, Grid, Vec2, parse_walls};
use crate::utils::search::{Cost, Dijkstra, FacingSpace};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 16, tags = ["grid", "search"])]
pub struct Solver;

pub const MOVE_COST: Cost = 1;
pub const TURN_COST: Cost = 1000;

#[derive(Debug)]
pub struct SharedData {
    walls: Grid<bool>,
    start: Vec2,
    end: Vec2,
    best: Option<BestPaths>,
}

#[derive(Debug, Clone, Copy)]
struct BestPaths {
    score: Cost,
    tiles: usize,
}

/// Search once for both parts: the reindeer starts facing east and may reach
/// the end tile facing any way.
fn best_paths(shared: &mut SharedData) -> Result<BestPaths, SolveError> {
    if let Some(best) = shared.best {
        return Ok(best);
    }
    let space = FacingSpace::new(&shared.walls, MOVE_COST, TURN_COST);
    let mut search = Dijkstra::new(&space, (shared.start, Dir::East));
    search.run();

    let goals = FacingSpace::all_facings(shared.end);
    let score = search
        .min_cost(goals.clone())
        .ok_or_else(|| SolveError::NoSolution(format!("end tile {} is unreachable", shared.end)))?;
    let best = BestPaths {
        score,
        tiles: search.minimal_path_cells(goals).len(),
    };
    shared.best = Some(best);
    Ok(best)
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let (walls, start, end) = parse_walls(input.trim_start())?;
        Ok(SharedData {
            walls,
            start,
            end,
            best: None,
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(best_paths(shared)?.score.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(best_paths(shared)?.tiles.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const FIRST: &str = "\
###############
#.......#....E#
#.#.###.#.###.#
#.....#.#...#.#
#.###.#####.#.#
#.#.#.......#.#
#.#.#####.###.#
#...........#.#
###.#.#####.#.#
#...#.....#.#.#
#.#.#.###.#.#.#
#.....#...#.#.#
#.###.#.#.#.#.#
#S..#.....#...#
###############
";

    const SECOND: &str = "\
#################
#...#...#...#..E#
#.#.#.#.#.#.#.#.#
#.#.#.#...#...#.#
#.#.#.#.###.#.#.#
#...#.#.#.....#.#
#.#.#.#.#.#####.#
#.#...#.#.#.....#
#.#.#####.#.###.#
#.#.#.......#...#
#.#.###.#####.###
#.#.#...#.....#.#
#.#.#.#####.###.#
#.#.#.........#.#
#.#.#.#########.#
#S#.............#
#################
";

    fn answers(input: &str) -> (String, String) {
        let mut shared = Solver::parse(input).unwrap();
        (
            Solver::solve_part(&mut shared, 1).unwrap(),
            Solver::solve_part(&mut shared, 2).unwrap(),
        )
    }

    #[test]
    fn test_first_maze() {
        assert_eq!(answers(FIRST), ("7036".into(), "45".into()));
    }

    #[test]
    fn test_second_maze() {
        assert_eq!(answers(SECOND), ("11048".into(), "64".into()));
    }

    #[test]
    fn test_part_two_alone() {
        let mut shared = Solver::parse(SECOND).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "64");
    }

    #[test]
    fn test_walled_off_end() {
        let mut shared = Solver::parse("#####\n#S#E#\n#####\n").unwrap();
        assert!(matches!(
            Solver::solve_part(&mut shared, 1),
            Err(SolveError::NoSolution(_))
        ));
    }

    #[test]
    fn test_missing_marker() {
        assert!(matches!(
            Solver::parse("#####\n#S..#\n#####\n"),
            Err(ParseError::MissingData(_))
        ));
    }
}
