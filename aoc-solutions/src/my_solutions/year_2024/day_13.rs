use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::Vec2;
use crate::utils::parse::fixed_integers;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 13, tags = ["math"])]
pub struct Solver;

const PRIZE_OFFSET: i64 = 10_000_000_000_000;
const PART_1_PRESS_LIMIT: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Machine {
    button_a: Vec2,
    button_b: Vec2,
    prize: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Presses {
    a: i64,
    b: i64,
}

impl Presses {
    pub fn tokens(self) -> i64 {
        self.a * 3 + self.b
    }
}

impl Machine {
    /// Unique non-negative integer press counts reaching `prize + offset`.
    /// `None` when the buttons are parallel or the solution isn't integral.
    pub fn presses(&self, offset: i64) -> Option<Presses> {
        let (a, b) = (self.button_a, self.button_b);
        let prize = self.prize + Vec2::new(offset, offset);

        let det = a.x * b.y - a.y * b.x;
        if det == 0 {
            return None;
        }
        let a_num = prize.x * b.y - prize.y * b.x;
        let b_num = a.x * prize.y - a.y * prize.x;
        if a_num % det != 0 || b_num % det != 0 {
            return None;
        }
        let presses = Presses {
            a: a_num / det,
            b: b_num / det,
        };
        (presses.a >= 0 && presses.b >= 0).then_some(presses)
    }
}

fn parse_machine(block: &str) -> anyhow::Result<Machine> {
    let mut lines = block.lines().map(str::trim);
    let mut field = |prefix: &str| -> anyhow::Result<Vec2> {
        let line = lines
            .next()
            .ok_or_else(|| anyhow!("missing {prefix:?} line"))?;
        let rest = line
            .strip_prefix(prefix)
            .ok_or_else(|| anyhow!("expected {prefix:?}, found {line:?}"))?;
        let [x, y] = fixed_integers(rest)?;
        Ok(Vec2::new(x, y))
    };
    Ok(Machine {
        button_a: field("Button A:")?,
        button_b: field("Button B:")?,
        prize: field("Prize:")?,
    })
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Machine>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .trim()
            .split("\n\n")
            .enumerate()
            .map(|(i, block)| {
                parse_machine(block)
                    .map_err(|e| ParseError::InvalidFormat(format!("(machine {}) {}", i + 1, e)))
            })
            .collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let tokens: i64 = shared
            .iter()
            .filter_map(|m| m.presses(0))
            .filter(|p| p.a <= PART_1_PRESS_LIMIT && p.b <= PART_1_PRESS_LIMIT)
            .map(Presses::tokens)
            .sum();
        Ok(tokens.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let tokens: i64 = shared
            .iter()
            .filter_map(|m| m.presses(PRIZE_OFFSET))
            .map(Presses::tokens)
            .sum();
        Ok(tokens.to_string())
    }
}
