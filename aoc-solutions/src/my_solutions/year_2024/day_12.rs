use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::Grid;
use crate::utils::region::{Region, regions};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 12, tags = ["grid"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Vec<Region<char>>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let garden = Grid::parse(input.trim_start(), |pos, c| {
            if c.is_ascii_alphabetic() {
                Ok(c)
            } else {
                Err(ParseError::InvalidFormat(format!(
                    "plot {pos} has non-letter label {c:?}"
                )))
            }
        })?;
        Ok(regions(&garden))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let price: usize = shared.iter().map(|r| r.area() * r.perimeter).sum();
        Ok(price.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let price: usize = shared.iter().map(|r| r.area() * r.sides).sum();
        Ok(price.to_string())
    }
}
