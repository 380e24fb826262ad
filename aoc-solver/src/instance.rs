//! Solver instances bound to one parsed input

use crate::error::{ParseError, SolveError};
use crate::solver::{Solver, SolverExt};

/// Parsed input for a specific year/day plus the answers computed so far.
///
/// Parts run against the same shared data, so a part may reuse work stored
/// there by an earlier part. Answers are cached: solving a part twice only
/// computes it once.
pub struct SolverInstance<'a, S: Solver> {
    year: u16,
    day: u8,
    shared: S::SharedData<'a>,
    answers: Vec<Option<String>>,
}

impl<'a, S: Solver> SolverInstance<'a, S> {
    /// Parse `input` and bind it to `year`/`day`.
    pub fn new(year: u16, day: u8, input: &'a str) -> Result<Self, ParseError> {
        let shared = S::parse(input)?;
        Ok(Self::from_shared(year, day, shared))
    }

    /// Wrap already parsed shared data.
    pub fn from_shared(year: u16, day: u8, shared: S::SharedData<'a>) -> Self {
        Self {
            year,
            day,
            shared,
            answers: vec![None; S::PARTS as usize],
        }
    }
}

/// Object-safe view of a [`SolverInstance`], used by the registry to hand out
/// solvers of different types uniformly.
///
/// ```no_run
/// use aoc_solver::DynSolver;
///
/// fn print_all(solver: &mut dyn DynSolver) -> Result<(), aoc_solver::SolveError> {
///     for part in 1..=solver.parts() {
///         println!("{}/{:02} part {}: {}", solver.year(), solver.day(), part, solver.solve(part)?);
///     }
///     Ok(())
/// }
/// ```
pub trait DynSolver {
    /// Solve (or fetch the cached answer of) the given part.
    fn solve(&mut self, part: u8) -> Result<String, SolveError>;

    fn year(&self) -> u16;

    fn day(&self) -> u8;

    /// Number of parts the underlying solver supports
    fn parts(&self) -> u8;
}

impl<'a, S: Solver> DynSolver for SolverInstance<'a, S> {
    fn solve(&mut self, part: u8) -> Result<String, SolveError> {
        let slot = part
            .checked_sub(1)
            .map(usize::from)
            .filter(|&i| i < self.answers.len())
            .ok_or(SolveError::PartOutOfRange(part))?;

        if let Some(answer) = &self.answers[slot] {
            return Ok(answer.clone());
        }

        let answer = S::solve_part_checked_range(&mut self.shared, part)?;
        self.answers[slot] = Some(answer.clone());
        Ok(answer)
    }

    fn year(&self) -> u16 {
        self.year
    }

    fn day(&self) -> u8 {
        self.day
    }

    fn parts(&self) -> u8 {
        S::PARTS
    }
}
