use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::{Dir, Grid, Vec2};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 15, tags = ["grid", "simulation"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tile {
    Wall,
    Empty,
    Box,
    /// Left half of a double-width box
    BoxLeft,
    BoxRight,
}

impl Tile {
    fn symbol(self) -> char {
        match self {
            Tile::Wall => '#',
            Tile::Empty => '.',
            Tile::Box => 'O',
            Tile::BoxLeft => '[',
            Tile::BoxRight => ']',
        }
    }
}

/// Warehouse floor with the robot kept apart from the tiles, so its cell
/// reads as empty.
#[derive(Debug, Clone)]
pub struct Warehouse {
    tiles: Grid<Tile>,
    robot: Vec2,
}

impl Warehouse {
    /// The same floor with every tile doubled in width.
    fn widen(&self) -> Self {
        let tiles = Grid::from_fn(self.tiles.width() * 2, self.tiles.height(), |pos| {
            match self.tiles[Vec2::new(pos.x / 2, pos.y)] {
                Tile::Box if pos.x % 2 == 0 => Tile::BoxLeft,
                Tile::Box => Tile::BoxRight,
                tile => tile,
            }
        });
        Self {
            tiles,
            robot: Vec2::new(self.robot.x * 2, self.robot.y),
        }
    }

    /// Move the robot one step, pushing every box in the way. Nothing moves
    /// if any pushed box would hit a wall.
    fn step(&mut self, dir: Dir) -> bool {
        let vertical = matches!(dir, Dir::North | Dir::South);
        // cells that move, the robot first, then boxes layer by layer
        let mut movers = vec![self.robot];
        let mut next = 0;
        while let Some(&pos) = movers.get(next) {
            next += 1;
            let ahead = pos + dir.offset();
            let pushed: &[Vec2] = match self.tiles.get(ahead) {
                None | Some(Tile::Wall) => return false,
                Some(Tile::Empty) => &[],
                Some(Tile::BoxLeft) if vertical => &[ahead, ahead + Dir::East.offset()],
                Some(Tile::BoxRight) if vertical => &[ahead, ahead + Dir::West.offset()],
                Some(_) => &[ahead],
            };
            for &cell in pushed {
                if !movers.contains(&cell) {
                    movers.push(cell);
                }
            }
        }

        let boxes: Vec<(Vec2, Tile)> = movers[1..]
            .iter()
            .map(|&pos| (pos, self.tiles.set(pos, Tile::Empty).unwrap_or(Tile::Empty)))
            .collect();
        for (pos, tile) in boxes {
            self.tiles.set(pos + dir.offset(), tile);
        }
        self.robot += dir.offset();
        true
    }

    /// Sum of `100 * y + x` over every box, measured at its left edge.
    fn gps_sum(&self) -> i64 {
        self.tiles
            .iter()
            .filter(|&(_, &tile)| matches!(tile, Tile::Box | Tile::BoxLeft))
            .map(|(pos, _)| 100 * pos.y + pos.x)
            .sum()
    }

    fn render(&self) -> String {
        let mut symbols = self.tiles.map(|&tile| tile.symbol());
        symbols.set(self.robot, '@');
        symbols.render(|&c| c)
    }
}

#[derive(Debug)]
pub struct SharedData {
    warehouse: Warehouse,
    moves: Vec<Dir>,
}

impl SharedData {
    fn simulate(&self, mut warehouse: Warehouse) -> Warehouse {
        for &dir in &self.moves {
            warehouse.step(dir);
        }
        warehouse
    }
}

fn parse_warehouse(text: &str) -> Result<Warehouse, ParseError> {
    let mut robot = None;
    let tiles = Grid::parse(text, |pos, c| match c {
        '#' => Ok(Tile::Wall),
        '.' => Ok(Tile::Empty),
        'O' => Ok(Tile::Box),
        '@' => match robot.replace(pos) {
            None => Ok(Tile::Empty),
            Some(first) => Err(ParseError::InvalidFormat(format!(
                "second robot at {pos}, first at {first}"
            ))),
        },
        other => Err(ParseError::InvalidFormat(format!("unexpected '{other}' at {pos}"))),
    })?;
    let robot = robot.ok_or_else(|| ParseError::MissingData("no robot '@'".to_string()))?;
    Ok(Warehouse { tiles, robot })
}

fn parse_moves(text: &str) -> Result<Vec<Dir>, ParseError> {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            '^' => Ok(Dir::North),
            '>' => Ok(Dir::East),
            'v' => Ok(Dir::South),
            '<' => Ok(Dir::West),
            other => Err(ParseError::InvalidFormat(format!("unexpected move '{other}'"))),
        })
        .collect()
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let (map, moves) = input.trim_start().split_once("\n\n").ok_or_else(|| {
            ParseError::MissingData("expected the map, a blank line, then moves".to_string())
        })?;
        Ok(SharedData {
            warehouse: parse_warehouse(map)?,
            moves: parse_moves(moves)?,
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let end = shared.simulate(shared.warehouse.clone());
        Ok(end.gps_sum().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let end = shared.simulate(shared.warehouse.widen());
        Ok(end.gps_sum().to_string())
    }
}
