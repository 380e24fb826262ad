//! Tests for the DP cache module.

use std::cell::Cell;
use std::rc::Rc;

use proptest::prelude::*;

use super::*;

/// Ways to tile a 1×n strip with tiles of length 1 and 2
struct Tilings;

impl DpProblem<usize, u64> for Tilings {
    fn deps(&self, n: &usize) -> Vec<usize> {
        if *n < 2 { vec![] } else { vec![n - 1, n - 2] }
    }

    fn compute(&self, _n: &usize, deps: Vec<u64>) -> u64 {
        if deps.is_empty() { 1 } else { deps[0] + deps[1] }
    }
}

/// Diamond: 0 depends on 1 and 2, both depend on 3
struct Diamond {
    computed: Rc<Cell<u32>>,
}

impl DpProblem<usize, i64> for Diamond {
    fn deps(&self, n: &usize) -> Vec<usize> {
        match *n {
            0 => vec![1, 2],
            1 | 2 => vec![3],
            _ => vec![],
        }
    }

    fn compute(&self, n: &usize, deps: Vec<i64>) -> i64 {
        self.computed.set(self.computed.get() + 1);
        match *n {
            0 => deps[0] + deps[1],
            1 => deps[0] * 2,
            2 => deps[0] * 3,
            _ => 5,
        }
    }
}

#[test]
fn test_linear_chain() {
    let cache = DpCache::with_problem(VecBackend::new(), Tilings);
    assert_eq!(cache.get(&0), 1);
    assert_eq!(cache.get(&1), 1);
    assert_eq!(cache.get(&10), 89);
    assert_eq!(cache.get(&50), 20_365_011_074);
}

#[test]
fn test_shared_dependency_computed_once() {
    let computed = Rc::new(Cell::new(0));
    let cache = DpCache::with_problem(
        VecBackend::new(),
        Diamond {
            computed: Rc::clone(&computed),
        },
    );

    assert_eq!(cache.get(&0), 25);
    assert_eq!(computed.get(), 4);
    assert_eq!(cache.get(&0), 25);
    assert_eq!(cache.get(&2), 15);
    assert_eq!(computed.get(), 4);
}

#[test]
fn test_vec_backend_get_or_insert() {
    let mut backend = VecBackend::new();
    assert_eq!(backend.get(&3), None);
    assert_eq!(*backend.get_or_insert(3, || 'a'), 'a');
    assert_eq!(*backend.get_or_insert(3, || 'b'), 'a');
    assert_eq!(backend.get(&3), Some(&'a'));
    assert_eq!(backend.get(&1), None);
}

#[test]
fn test_hashmap_backend_get_or_insert() {
    let mut backend = HashMapBackend::new();
    assert!(backend.is_empty());
    assert_eq!(*backend.get_or_insert("x", || 1), 1);
    assert_eq!(*backend.get_or_insert("x", || 2), 1);
    assert_eq!(backend.get(&"y"), None);
    assert_eq!(backend.len(), 1);
}

#[test]
fn test_tuple_indices_with_hashmap() {
    /// Lattice paths from (0, 0) to (r, c)
    struct Lattice;

    impl DpProblem<(u32, u32), u64> for Lattice {
        fn deps(&self, &(r, c): &(u32, u32)) -> Vec<(u32, u32)> {
            let mut deps = Vec::new();
            if r > 0 {
                deps.push((r - 1, c));
            }
            if c > 0 {
                deps.push((r, c - 1));
            }
            deps
        }

        fn compute(&self, _pos: &(u32, u32), deps: Vec<u64>) -> u64 {
            if deps.is_empty() { 1 } else { deps.iter().sum() }
        }
    }

    let cache = DpCache::with_problem(HashMapBackend::new(), Lattice);
    assert_eq!(cache.get(&(4, 4)), 70);
    assert_eq!(cache.into_backend().len(), 25);
}

proptest! {
    /// Query order never changes the answers.
    #[test]
    fn prop_order_independent(queries in prop::collection::vec(0usize..60, 1..20)) {
        let fresh = |n: usize| DpCache::with_problem(VecBackend::new(), Tilings).get(&n);
        let shared = DpCache::with_problem(VecBackend::new(), Tilings);
        for n in queries {
            prop_assert_eq!(shared.get(&n), fresh(n));
        }
    }
}
