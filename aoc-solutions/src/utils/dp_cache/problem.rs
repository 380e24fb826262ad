//! Recurrence definition.

/// A recurrence over indices `I` producing values `K`.
///
/// # Example
///
/// ```rust
/// use aoc_solutions::utils::dp_cache::{DpCache, DpProblem, VecBackend};
///
/// /// Ways to climb `n` stairs taking one or two at a time
/// struct Stairs;
///
/// impl DpProblem<usize, u64> for Stairs {
///     fn deps(&self, n: &usize) -> Vec<usize> {
///         if *n < 2 { vec![] } else { vec![n - 1, n - 2] }
///     }
///
///     fn compute(&self, _n: &usize, deps: Vec<u64>) -> u64 {
///         if deps.is_empty() { 1 } else { deps[0] + deps[1] }
///     }
/// }
///
/// let cache = DpCache::with_problem(VecBackend::new(), Stairs);
/// assert_eq!(cache.get(&10), 89);
/// ```
pub trait DpProblem<I, K> {
    /// Indices `index` depends on. Empty for base cases.
    fn deps(&self, index: &I) -> Vec<I>;

    /// Value of `index`, given the values of its dependencies in the order
    /// `deps` returned them.
    fn compute(&self, index: &I, deps: Vec<K>) -> K;
}
