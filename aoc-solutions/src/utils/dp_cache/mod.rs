//! Memoised evaluation of recurrences whose values depend on other values.
//!
//! A [`DpProblem`] names, for every index, the indices it depends on and how
//! to combine their values. [`DpCache`] resolves those dependencies on demand
//! and computes each index at most once, storing results in a [`Backend`].
//!
//! The dependency graph must be acyclic. A cycle recurses until the stack
//! overflows.
//!
//! ```rust
//! use aoc_solutions::utils::dp_cache::{DpCache, DpProblem, HashMapBackend};
//!
//! /// Number of digits after `steps` rounds of "split every number in two digits"
//! struct Halving;
//!
//! impl DpProblem<(u64, u32), u64> for Halving {
//!     fn deps(&self, &(n, steps): &(u64, u32)) -> Vec<(u64, u32)> {
//!         if steps == 0 || n < 10 { vec![] } else { vec![(n / 10, steps - 1), (n % 10, steps - 1)] }
//!     }
//!
//!     fn compute(&self, _index: &(u64, u32), deps: Vec<u64>) -> u64 {
//!         if deps.is_empty() { 1 } else { deps.iter().sum() }
//!     }
//! }
//!
//! let cache = DpCache::with_problem(HashMapBackend::new(), Halving);
//! assert_eq!(cache.get(&(42, 1)), 2);
//! assert_eq!(cache.get(&(42, 0)), 1);
//! ```

mod backend;
mod cache;
mod problem;

pub use backend::{Backend, HashMapBackend, VecBackend};
pub use cache::DpCache;
pub use problem::DpProblem;

#[cfg(test)]
mod tests;
