use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::{Grid, Vec2, parse_walls};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 20, tags = ["grid"])]
pub struct Solver;

pub const MIN_SAVING: usize = 100;
pub const SHORT_CHEAT: i64 = 2;
pub const LONG_CHEAT: i64 = 20;

/// The race track as a single path from start to end, plus each cell's
/// position along it.
#[derive(Debug)]
pub struct Track {
    path: Vec<Vec2>,
    distance: Grid<Option<usize>>,
}

impl Track {
    /// Follow the only open way forward from `start` until `end`. A fork or
    /// a dead end before `end` means the map isn't a single track.
    fn walk(walls: &Grid<bool>, start: Vec2, end: Vec2) -> Result<Self, ParseError> {
        let mut distance = walls.map(|_| None);
        let mut path = vec![start];
        distance[start] = Some(0);

        let mut current = start;
        while current != end {
            let next = {
                let mut ahead = walls
                    .neighbors(current)
                    .map(|(next, _)| next)
                    .filter(|&next| walls.get(next) == Some(&false) && distance[next].is_none());
                let next = ahead.next().ok_or_else(|| {
                    ParseError::InvalidFormat(format!("track dead-ends at {current}"))
                })?;
                if ahead.next().is_some() {
                    return Err(ParseError::InvalidFormat(format!("track forks at {current}")));
                }
                next
            };
            distance[next] = Some(path.len());
            path.push(next);
            current = next;
        }
        Ok(Self { path, distance })
    }

    /// Picoseconds to run the track without cheating.
    pub fn length(&self) -> usize {
        self.path.len() - 1
    }

    /// Cheats of up to `max_len` picoseconds through walls that save at least
    /// `min_saving`. A cheat is identified by its start and end cell, so
    /// each pair of track cells counts once.
    pub fn count_cheats(&self, max_len: i64, min_saving: usize) -> usize {
        let offsets: Vec<(Vec2, usize)> = (-max_len..=max_len)
            .flat_map(|dy| (-max_len..=max_len).map(move |dx| Vec2::new(dx, dy)))
            .filter(|offset| (2..=max_len).contains(&offset.manhattan()))
            .map(|offset| (offset, offset.manhattan() as usize))
            .collect();

        self.path
            .iter()
            .enumerate()
            .map(|(from, &pos)| {
                offsets
                    .iter()
                    .filter(|&&(offset, len)| {
                        self.distance
                            .get(pos + offset)
                            .copied()
                            .flatten()
                            .is_some_and(|to| to >= from + len + min_saving)
                    })
                    .count()
            })
            .sum()
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Track;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let (walls, start, end) = parse_walls(input.trim_start())?;
        Track::walk(&walls, start, end)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.count_cheats(SHORT_CHEAT, MIN_SAVING).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.count_cheats(LONG_CHEAT, MIN_SAVING).to_string())
    }
}
