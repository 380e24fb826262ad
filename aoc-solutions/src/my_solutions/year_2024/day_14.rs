use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::{Grid, Vec2};
use crate::utils::parse::{fixed_integers, parse_lines};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 14, tags = ["simulation"])]
pub struct Solver;

pub const SPACE: Vec2 = Vec2::new(101, 103);
pub const SECONDS: i64 = 100;
/// Width of the solid top edge of the picture frame
const FRAME_WIDTH: usize = 31;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Robot {
    position: Vec2,
    velocity: Vec2,
}

impl Robot {
    fn after(&self, seconds: i64, space: Vec2) -> Vec2 {
        (self.position + self.velocity * seconds).rem_euclid(space)
    }
}

/// Product of the robot counts in the four quadrants. Robots on the middle
/// row or column belong to none.
pub fn safety_factor(robots: &[Robot], space: Vec2, seconds: i64) -> u64 {
    let middle = Vec2::new(space.x / 2, space.y / 2);
    let mut quadrants = [0u64; 4];
    for robot in robots {
        let pos = robot.after(seconds, space);
        if pos.x == middle.x || pos.y == middle.y {
            continue;
        }
        let index = usize::from(pos.x > middle.x) + 2 * usize::from(pos.y > middle.y);
        quadrants[index] += 1;
    }
    quadrants.iter().product()
}

/// First second, within one full period of the motion, at which some row
/// holds a run of at least `FRAME_WIDTH` occupied tiles.
pub fn picture_second(robots: &[Robot], space: Vec2) -> Option<i64> {
    let mut occupied = Grid::new(space.x as usize, space.y as usize, false);
    (0..space.x * space.y).find(|&second| {
        occupied.fill(false);
        for robot in robots {
            occupied.set(robot.after(second, space), true);
        }
        occupied
            .cells()
            .chunks(occupied.width())
            .any(|row| longest_run(row) >= FRAME_WIDTH)
    })
}

fn longest_run(row: &[bool]) -> usize {
    row.split(|&cell| !cell).map(<[bool]>::len).max().unwrap_or(0)
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Robot>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input, |line| {
            let [px, py, vx, vy] = fixed_integers(line)?;
            Ok(Robot {
                position: Vec2::new(px, py),
                velocity: Vec2::new(vx, vy),
            })
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(safety_factor(shared, SPACE, SECONDS).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        picture_second(shared, SPACE)
            .map(|second| second.to_string())
            .ok_or_else(|| SolveError::NoSolution("robots never line up into a picture".into()))
    }
}
