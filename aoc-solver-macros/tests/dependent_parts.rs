use aoc_solver::{AocParser, AocSolver, ParseError, PartSolver, SolveError, Solver};

#[derive(Debug)]
struct SharedData {
    numbers: Vec<i64>,
    sorted: Option<Vec<i64>>,
}

#[derive(AocSolver)]
#[aoc_solver(max_parts = 3)]
struct MedianSolver;

impl AocParser for MedianSolver {
    type SharedData<'a> = SharedData;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let numbers = input
            .split_whitespace()
            .map(|w| {
                w.parse()
                    .map_err(|_| ParseError::InvalidFormat(format!("not an integer: {w}")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(SharedData {
            numbers,
            sorted: None,
        })
    }
}

// Part 1 sorts once and leaves the result for part 2
impl PartSolver<1> for MedianSolver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut sorted = shared.numbers.clone();
        sorted.sort_unstable();
        let min = sorted
            .first()
            .copied()
            .ok_or_else(|| SolveError::NoSolution("empty input".into()))?;
        shared.sorted = Some(sorted);
        Ok(min.to_string())
    }
}

impl PartSolver<2> for MedianSolver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let sorted = shared
            .sorted
            .as_ref()
            .ok_or_else(|| SolveError::SolveFailed("part 1 has not run".into()))?;
        Ok(sorted[sorted.len() / 2].to_string())
    }
}

impl PartSolver<3> for MedianSolver {
    fn solve(_shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Err(SolveError::PartNotImplemented(3))
    }
}

#[test]
fn test_parts_share_state() {
    let mut shared = MedianSolver::parse("9 1 5 3 7").unwrap();
    assert_eq!(MedianSolver::solve_part(&mut shared, 1).unwrap(), "1");
    assert_eq!(MedianSolver::solve_part(&mut shared, 2).unwrap(), "5");
}

#[test]
fn test_part_two_without_part_one_fails() {
    let mut shared = MedianSolver::parse("9 1 5").unwrap();
    assert!(matches!(
        MedianSolver::solve_part(&mut shared, 2),
        Err(SolveError::SolveFailed(_))
    ));
}

#[test]
fn test_errors_propagate_from_part_solvers() {
    let mut shared = MedianSolver::parse("").unwrap();
    assert!(matches!(
        MedianSolver::solve_part(&mut shared, 1),
        Err(SolveError::NoSolution(_))
    ));
    assert!(matches!(
        MedianSolver::solve_part(&mut shared, 3),
        Err(SolveError::PartNotImplemented(3))
    ));
}

#[test]
fn test_parts_beyond_max_are_not_dispatched() {
    let mut shared = MedianSolver::parse("1").unwrap();
    assert_eq!(MedianSolver::PARTS, 3);
    assert!(matches!(
        MedianSolver::solve_part(&mut shared, 4),
        Err(SolveError::PartNotImplemented(4))
    ));
    assert!(matches!(
        MedianSolver::solve_part(&mut shared, 0),
        Err(SolveError::PartNotImplemented(0))
    ));
}
