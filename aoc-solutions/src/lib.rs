//! Advent of Code puzzle solutions with automatic registration
//!
//! Solutions are organised by year. Each one derives `AutoRegisterSolver`
//! so it lands in the plugin inventory and can be picked up with
//! `SolverRegistryBuilder::register_all_plugins`. The grid, search and
//! memoisation building blocks they share live in [`utils`].

pub mod utils;

#[cfg(feature = "my-solutions")]
pub mod my_solutions;
