//! Advent of Code Solver Library
//!
//! A small, type-safe framework for puzzle solvers. Each solver parses its
//! input once into shared data and answers any number of parts from it.
//!
//! # Overview
//!
//! - [`AocParser`] parses input into `SharedData`
//! - [`PartSolver<N>`] solves part `N`
//! - [`Solver`] dispatches part numbers, usually derived with `#[derive(AocSolver)]`
//! - [`SolverRegistryBuilder`] / [`SolverRegistry`] map year/day to solvers
//! - [`SolverPlugin`] + `#[derive(AutoRegisterSolver)]` register solvers at link time
//!
//! # Quick Example
//!
//! ```
//! use aoc_solver::{AocParser, AocSolver, ParseError, PartSolver, SolveError, Solver};
//!
//! #[derive(AocSolver)]
//! #[aoc_solver(max_parts = 2)]
//! struct Calories;
//!
//! impl AocParser for Calories {
//!     type SharedData<'a> = Vec<u32>;
//!
//!     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
//!         input
//!             .split("\n\n")
//!             .map(|elf| {
//!                 elf.lines()
//!                     .map(|l| l.parse::<u32>().map_err(|_| ParseError::InvalidFormat(l.into())))
//!                     .sum::<Result<u32, ParseError>>()
//!             })
//!             .collect()
//!     }
//! }
//!
//! impl PartSolver<1> for Calories {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.iter().max().copied().unwrap_or_default().to_string())
//!     }
//! }
//!
//! impl PartSolver<2> for Calories {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         shared.sort_unstable_by(|a, b| b.cmp(a));
//!         Ok(shared.iter().take(3).sum::<u32>().to_string())
//!     }
//! }
//!
//! let mut shared = Calories::parse("1\n2\n\n4\n\n3").unwrap();
//! assert_eq!(Calories::solve_part(&mut shared, 1).unwrap(), "4");
//! assert_eq!(Calories::solve_part(&mut shared, 2).unwrap(), "10");
//! ```

mod error;
mod instance;
mod registry;
mod solver;

pub use error::{ParseError, RegistrationError, SolveError, SolverError};
pub use instance::{DynSolver, SolverInstance};
pub use registry::{
    FactoryInfo, RegisterableSolver, SolverFactory, SolverPlugin, SolverRegistry,
    SolverRegistryBuilder,
};
pub use solver::{AocParser, PartSolver, Solver, SolverExt};

// The derive macros expand to paths under `::aoc_solver::inventory`
pub use inventory;

pub use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
