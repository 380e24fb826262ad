use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse::parse_lines;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 22, tags = ["simulation"])]
pub struct Solver;

pub const SECRETS_PER_DAY: usize = 2000;

const PRUNE: u64 = (1 << 24) - 1;
/// Price changes lie in -9..=9
const CHANGE_RANGE: usize = 19;
const WINDOWS: usize = CHANGE_RANGE.pow(4);

pub fn next_secret(mut secret: u64) -> u64 {
    secret = (secret ^ (secret << 6)) & PRUNE;
    secret = (secret ^ (secret >> 5)) & PRUNE;
    (secret ^ (secret << 11)) & PRUNE
}

fn secrets(seed: u64) -> impl Iterator<Item = u64> {
    std::iter::successors(Some(seed), |&s| Some(next_secret(s))).take(SECRETS_PER_DAY + 1)
}

/// Bananas each 4-change window would earn, summed over all buyers. A buyer
/// sells at the first occurrence of the window only.
fn window_totals(seeds: &[u64]) -> Vec<u32> {
    let mut totals = vec![0u32; WINDOWS];
    // last buyer (1-based) that has seen each window
    let mut seen_by = vec![0usize; WINDOWS];

    for (buyer, &seed) in seeds.iter().enumerate() {
        let buyer = buyer + 1;
        let mut window = 0usize;
        let mut previous: Option<u64> = None;
        for (i, price) in secrets(seed).map(|s| s % 10).enumerate() {
            if let Some(prev) = previous {
                let change = (price + 9 - prev) as usize;
                window = (window * CHANGE_RANGE + change) % WINDOWS;
                if i >= 4 && seen_by[window] != buyer {
                    seen_by[window] = buyer;
                    totals[window] += price as u32;
                }
            }
            previous = Some(price);
        }
    }
    totals
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<u64>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input, |line| Ok(line.parse()?))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let sum: u64 = shared
            .iter()
            .filter_map(|&seed| secrets(seed).last())
            .sum();
        Ok(sum.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        window_totals(shared)
            .into_iter()
            .max()
            .map(|best| best.to_string())
            .ok_or_else(|| SolveError::NoSolution("no buyers".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    #[test]
    fn test_secret_sequence() {
        let first: Vec<u64> = secrets(123).skip(1).take(3).collect();
        assert_eq!(first, vec![15887950, 16495136, 527345]);
    }

    #[test]
    fn test_sample_part_1() {
        let mut shared = Solver::parse("1\n10\n100\n2024\n").unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "37327623");
    }

    #[test]
    fn test_sample_part_2() {
        let mut shared = Solver::parse("1\n2\n3\n2024\n").unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "23");
    }

    #[test]
    fn test_first_occurrence_only() {
        // -2,1,-1,3 for buyer 2 sells at 7
        let totals = window_totals(&[2]);
        let window = [-2i64, 1, -1, 3]
            .iter()
            .fold(0usize, |w, &c| w * CHANGE_RANGE + (c + 9) as usize);
        assert_eq!(totals[window], 7);
    }

    #[test]
    fn test_rejects_non_numbers() {
        assert!(Solver::parse("12\nabc\n").is_err());
    }
}
