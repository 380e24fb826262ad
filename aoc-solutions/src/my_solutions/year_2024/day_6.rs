use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::{Dir, DirSet, Grid, Vec2};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 6, tags = ["grid", "simulation"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Patrol {
    Exits,
    Loops,
}

/// The lab map and where the guard starts, facing north.
#[derive(Debug)]
pub struct Lab {
    obstacles: Grid<bool>,
    start: Vec2,
}

impl Lab {
    /// Walk the guard until it leaves the map or repeats a (cell, facing)
    /// pair. `extra` is one more obstacle on top of the map. `seen` is
    /// cleared first and afterwards holds every facing the guard had on
    /// each cell.
    fn patrol(&self, extra: Option<Vec2>, seen: &mut Grid<DirSet>) -> Patrol {
        seen.fill(DirSet::EMPTY);
        let mut pos = self.start;
        let mut dir = Dir::North;
        loop {
            match seen.get_mut(pos) {
                Some(facings) => {
                    if !facings.insert(dir) {
                        return Patrol::Loops;
                    }
                }
                None => return Patrol::Exits,
            }
            let ahead = pos + dir.offset();
            match self.obstacles.get(ahead) {
                None => return Patrol::Exits,
                Some(&blocked) if blocked || extra == Some(ahead) => dir = dir.clockwise(),
                Some(_) => pos += dir.offset(),
            }
        }
    }

    /// Cells the guard covers on the unobstructed patrol.
    fn route(&self, seen: &mut Grid<DirSet>) -> Vec<Vec2> {
        self.patrol(None, seen);
        seen.iter()
            .filter(|(_, facings)| !facings.is_empty())
            .map(|(pos, _)| pos)
            .collect()
    }

    fn new_seen(&self) -> Grid<DirSet> {
        self.obstacles.map(|_| DirSet::EMPTY)
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Lab;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut start = None;
        let obstacles = Grid::parse(input.trim_start(), |pos, c| match c {
            '#' => Ok(true),
            '.' => Ok(false),
            '^' => match start.replace(pos) {
                None => Ok(false),
                Some(first) => Err(ParseError::InvalidFormat(format!(
                    "second guard at {pos}, first at {first}"
                ))),
            },
            other => Err(ParseError::InvalidFormat(format!(
                "unexpected '{other}' at {pos}"
            ))),
        })?;
        let start = start.ok_or_else(|| ParseError::MissingData("no guard '^'".to_string()))?;
        Ok(Lab { obstacles, start })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut seen = shared.new_seen();
        if shared.patrol(None, &mut seen) == Patrol::Loops {
            return Err(SolveError::NoSolution("guard never leaves the lab".to_string()));
        }
        Ok(shared.route(&mut seen).len().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut seen = shared.new_seen();
        // an obstruction off the route never changes the patrol
        let candidates = shared.route(&mut seen);
        let loops = candidates
            .into_iter()
            .filter(|&pos| pos != shared.start)
            .filter(|&pos| shared.patrol(Some(pos), &mut seen) == Patrol::Loops)
            .count();
        Ok(loops.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const SAMPLE: &str = "\
....#.....
.........#
..........
..#.......
.......#..
..........
.#..^.....
........#.
#.........
......#...
";

    #[test]
    fn test_sample() {
        let mut shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "41");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "6");
    }

    #[test]
    fn test_loop_detected_by_repeated_facing() {
        let lab = Solver::parse(".#...\n....#\n#^...\n...#.\n").unwrap();
        let mut seen = lab.new_seen();
        assert_eq!(lab.patrol(None, &mut seen), Patrol::Loops);
        // the start cell is left north and west-bound on the way round
        assert_eq!(
            seen[Vec2::new(1, 2)].iter().collect::<Vec<_>>(),
            vec![Dir::North, Dir::West]
        );
        assert!(matches!(
            Solver::solve_part(&mut { lab }, 1),
            Err(SolveError::NoSolution(_))
        ));
    }

    #[test]
    fn test_extra_obstacle_turns_guard() {
        let lab = Solver::parse("...\n...\n.^.\n").unwrap();
        let mut seen = lab.new_seen();
        assert_eq!(lab.patrol(None, &mut seen), Patrol::Exits);
        assert_eq!(lab.route(&mut seen).len(), 3);

        assert_eq!(lab.patrol(Some(Vec2::new(1, 0)), &mut seen), Patrol::Exits);
        assert_eq!(seen[Vec2::new(1, 0)], DirSet::EMPTY);
        assert_eq!(
            seen[Vec2::new(1, 1)].iter().collect::<Vec<_>>(),
            vec![Dir::North, Dir::East]
        );
        assert!(seen[Vec2::new(2, 1)].contains(Dir::East));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(Solver::parse("...\n...\n"), Err(ParseError::MissingData(_))));
        assert!(matches!(Solver::parse("^.^\n"), Err(ParseError::InvalidFormat(_))));
        assert!(matches!(Solver::parse(".x.\n.^.\n"), Err(ParseError::InvalidFormat(_))));
    }
}
