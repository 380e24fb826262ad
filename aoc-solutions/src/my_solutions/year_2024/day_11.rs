use anyhow::{Context, anyhow};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::dp_cache::{DpCache, DpProblem, HashMapBackend};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 11, tags = ["dp"])]
pub struct Solver;

/// Stone count produced by one stone after a number of blinks.
/// Index is `(engraving, blinks remaining)`.
struct Blinks;

impl DpProblem<(u64, u8), u64> for Blinks {
    fn deps(&self, &(stone, blinks): &(u64, u8)) -> Vec<(u64, u8)> {
        if blinks == 0 {
            return vec![];
        }
        let next = blinks - 1;
        if stone == 0 {
            return vec![(1, next)];
        }
        let digits = stone.ilog10() + 1;
        if digits % 2 == 0 {
            let half = 10u64.pow(digits / 2);
            vec![(stone / half, next), (stone % half, next)]
        } else {
            vec![(stone * 2024, next)]
        }
    }

    fn compute(&self, _index: &(u64, u8), deps: Vec<u64>) -> u64 {
        if deps.is_empty() { 1 } else { deps.iter().sum() }
    }
}

pub struct SharedData {
    stones: Vec<u64>,
    cache: DpCache<(u64, u8), u64, HashMapBackend<(u64, u8), u64>, Blinks>,
}

impl SharedData {
    fn count_after(&self, blinks: u8) -> u64 {
        self.stones
            .iter()
            .map(|&stone| self.cache.get(&(stone, blinks)))
            .sum()
    }
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let stones = input
            .split_whitespace()
            .map(|w| w.parse().with_context(|| format!("bad stone {w:?}")))
            .collect::<anyhow::Result<Vec<u64>>>()
            .and_then(|stones| {
                if stones.is_empty() {
                    Err(anyhow!("no stones"))
                } else {
                    Ok(stones)
                }
            })
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))?;
        Ok(SharedData {
            stones,
            cache: DpCache::with_problem(HashMapBackend::new(), Blinks),
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.count_after(25).to_string())
    }
}

// Shares the cache filled by part 1
impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.count_after(75).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    #[test]
    fn test_few_blinks() {
        let shared = Solver::parse("125 17").unwrap();
        assert_eq!(shared.count_after(1), 3);
        assert_eq!(shared.count_after(6), 22);
    }

    #[test]
    fn test_sample() {
        let mut shared = Solver::parse("125 17\n").unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "55312");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "65601038650482");
    }

    #[test]
    fn test_rules() {
        assert_eq!(Blinks.deps(&(0, 3)), vec![(1, 2)]);
        assert_eq!(Blinks.deps(&(1000, 1)), vec![(10, 0), (0, 0)]);
        assert_eq!(Blinks.deps(&(1, 1)), vec![(2024, 0)]);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(Solver::parse("1 x").is_err());
        assert!(Solver::parse("  ").is_err());
    }
}
