use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::dp_cache::{DpCache, DpProblem, VecBackend};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 19, tags = ["dp"])]
pub struct Solver;

/// Arrangements of the design suffix starting at an offset.
struct Arrangements<'a> {
    towels: &'a [&'a str],
    design: &'a str,
}

impl DpProblem<usize, u64> for Arrangements<'_> {
    fn deps(&self, &offset: &usize) -> Vec<usize> {
        let rest = &self.design[offset..];
        self.towels
            .iter()
            .filter(|towel| rest.starts_with(*towel))
            .map(|towel| offset + towel.len())
            .collect()
    }

    fn compute(&self, &offset: &usize, deps: Vec<u64>) -> u64 {
        if offset == self.design.len() {
            1
        } else {
            deps.iter().sum()
        }
    }
}

fn arrangements(towels: &[&str], design: &str) -> u64 {
    let cache = DpCache::with_problem(
        VecBackend::with_capacity(design.len() + 1),
        Arrangements { towels, design },
    );
    cache.get(&0)
}

#[derive(Debug)]
pub struct SharedData<'a> {
    towels: Vec<&'a str>,
    designs: Vec<&'a str>,
    counts: Option<Vec<u64>>,
}

impl SharedData<'_> {
    fn counts(&mut self) -> &[u64] {
        let (towels, designs) = (&self.towels, &self.designs);
        self.counts
            .get_or_insert_with(|| designs.iter().map(|d| arrangements(towels, d)).collect())
    }
}

fn parse_onsen(input: &str) -> anyhow::Result<SharedData<'_>> {
    let (towels, designs) = input
        .trim()
        .split_once("\n\n")
        .ok_or_else(|| anyhow!("expected towel patterns, a blank line, then designs"))?;
    let towels: Vec<&str> = towels
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect();
    if towels.is_empty() {
        return Err(anyhow!("no towel patterns"));
    }
    let designs = designs.lines().map(str::trim).filter(|d| !d.is_empty()).collect();
    Ok(SharedData {
        towels,
        designs,
        counts: None,
    })
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_onsen(input).map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.counts().iter().filter(|&&n| n > 0).count().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.counts().iter().sum::<u64>().to_string())
    }
}
