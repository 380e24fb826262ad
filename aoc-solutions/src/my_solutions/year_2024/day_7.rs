use anyhow::{Context, anyhow};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse::parse_lines;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 7, tags = ["search"])]
pub struct Solver;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Equation {
    target: u64,
    operands: Vec<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    Add,
    Mul,
    Concat,
}

impl Operator {
    /// The left operand that combines with `rhs` into `result`, if any.
    fn undo(self, result: u64, rhs: u64) -> Option<u64> {
        match self {
            Operator::Add => result.checked_sub(rhs),
            Operator::Mul => (rhs != 0 && result % rhs == 0).then(|| result / rhs),
            Operator::Concat => {
                let shift = 10u64.checked_pow(rhs.checked_ilog10().unwrap_or(0) + 1)?;
                (result % shift == rhs).then(|| result / shift)
            }
        }
    }
}

impl Equation {
    /// Whether some assignment of `operators`, evaluated left to right,
    /// produces the target. Works backwards from the target so each
    /// operator can be ruled out early.
    fn solvable(&self, operators: &[Operator]) -> bool {
        fn go(result: u64, operands: &[u64], operators: &[Operator]) -> bool {
            match operands {
                [] => false,
                [first] => *first == result,
                [rest @ .., last] => operators
                    .iter()
                    .filter_map(|op| op.undo(result, *last))
                    .any(|previous| go(previous, rest, operators)),
            }
        }
        go(self.target, &self.operands, operators)
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Equation>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input, |line| {
            let (target, operands) = line
                .split_once(':')
                .ok_or_else(|| anyhow!("missing ':' separator"))?;
            let operands = operands
                .split_whitespace()
                .map(|w| w.parse().with_context(|| format!("bad operand {w:?}")))
                .collect::<anyhow::Result<Vec<u64>>>()?;
            if operands.is_empty() {
                return Err(anyhow!("equation has no operands"));
            }
            Ok(Equation {
                target: target.trim().parse().context("bad target")?,
                operands,
            })
        })
    }
}

fn calibration(equations: &[Equation], operators: &[Operator]) -> u64 {
    equations
        .iter()
        .filter(|eq| eq.solvable(operators))
        .map(|eq| eq.target)
        .sum()
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(calibration(shared, &[Operator::Add, Operator::Mul]).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(calibration(shared, &[Operator::Add, Operator::Mul, Operator::Concat]).to_string())
    }
}
