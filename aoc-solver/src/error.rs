//! Error types for the solver library

use thiserror::Error;

/// Error raised while turning raw puzzle input into shared data
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Input doesn't match the expected structure (ragged grid, bad integer, ...)
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
    /// A required section or marker is absent from the input
    #[error("Missing data: {0}")]
    MissingData(String),
}

/// Error raised while solving a single part
#[derive(Debug, Error)]
pub enum SolveError {
    /// The solver declares the part but has no implementation for it
    #[error("Part {0} is not implemented")]
    PartNotImplemented(u8),
    /// The part number is 0 or exceeds the solver's `PARTS`
    #[error("Part {0} is out of range")]
    PartOutOfRange(u8),
    /// The input is well-formed but the puzzle has no answer for it
    #[error("No solution: {0}")]
    NoSolution(String),
    /// Any other failure while solving
    #[error("Solve failed: {0}")]
    SolveFailed(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Error type for looking up and running a registered solver
#[derive(Debug, Error)]
pub enum SolverError {
    /// No solver registered for the year/day pair
    #[error("Solver not found for year {0} day {1}")]
    NotFound(u16, u8),
    /// The year/day pair is outside the supported range
    #[error("Invalid year {0} or day {1}")]
    InvalidYearDay(u16, u8),
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("Solve error: {0}")]
    Solve(#[from] SolveError),
}

/// Error type for registration failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// A solver is already registered for the year/day pair
    #[error("Duplicate solver registration for year {0} day {1}")]
    DuplicateSolver(u16, u8),
    /// The year/day pair can't be stored in the registry
    #[error("Invalid year {0} or day {1}")]
    InvalidYearDay(u16, u8),
}
