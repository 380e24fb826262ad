//! Rectangular grids addressed by signed 2D coordinates.
//!
//! A [`Grid`] is a `width × height` array stored row-major: `(x, y)` lives at
//! `y * width + x`. Every access through a [`Vec2`] is bounds-checked and an
//! out-of-range coordinate is reported as `None`, never as a wrapped index.

use std::fmt;
use std::ops::{Add, AddAssign, Index, IndexMut, Mul, Sub};

use aoc_solver::ParseError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Vec2 {
    pub x: i64,
    pub y: i64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2::new(0, 0);

    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// `|x| + |y|`
    pub fn manhattan(self) -> i64 {
        self.x.abs() + self.y.abs()
    }

    /// Component-wise Euclidean remainder, always inside `0..bounds`.
    pub fn rem_euclid(self, bounds: Vec2) -> Vec2 {
        Vec2::new(self.x.rem_euclid(bounds.x), self.y.rem_euclid(bounds.y))
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<i64> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: i64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// One of the four axis-aligned directions, y grows southwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dir {
    North,
    East,
    South,
    West,
}

impl Dir {
    /// All directions in clockwise order starting north
    pub const ALL: [Dir; 4] = [Dir::North, Dir::East, Dir::South, Dir::West];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn offset(self) -> Vec2 {
        match self {
            Dir::North => Vec2::new(0, -1),
            Dir::East => Vec2::new(1, 0),
            Dir::South => Vec2::new(0, 1),
            Dir::West => Vec2::new(-1, 0),
        }
    }

    pub const fn clockwise(self) -> Dir {
        Self::ALL[(self.index() + 1) % 4]
    }

    pub const fn counter_clockwise(self) -> Dir {
        Self::ALL[(self.index() + 3) % 4]
    }

    pub const fn opposite(self) -> Dir {
        Self::ALL[(self.index() + 2) % 4]
    }
}

/// Set of [`Dir`]s packed into the low four bits of a byte.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DirSet(u8);

impl DirSet {
    pub const EMPTY: DirSet = DirSet(0);
    pub const ALL: DirSet = DirSet(0b1111);

    const fn bit(dir: Dir) -> u8 {
        1 << dir.index()
    }

    /// Returns `true` if `dir` wasn't in the set yet.
    pub fn insert(&mut self, dir: Dir) -> bool {
        let was_absent = !self.contains(dir);
        self.0 |= Self::bit(dir);
        was_absent
    }

    /// Returns `true` if `dir` was in the set.
    pub fn remove(&mut self, dir: Dir) -> bool {
        let was_present = self.contains(dir);
        self.0 &= !Self::bit(dir);
        was_present
    }

    pub const fn contains(self, dir: Dir) -> bool {
        self.0 & Self::bit(dir) != 0
    }

    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Dir> {
        Dir::ALL.into_iter().filter(move |&dir| self.contains(dir))
    }
}

impl FromIterator<Dir> for DirSet {
    fn from_iter<I: IntoIterator<Item = Dir>>(iter: I) -> Self {
        let mut set = DirSet::EMPTY;
        for dir in iter {
            set.insert(dir);
        }
        set
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T> Grid<T> {
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(Vec2) -> T) -> Self {
        let cells = (0..width * height)
            .map(|i| f(Vec2::new((i % width) as i64, (i / width) as i64)))
            .collect();
        Self {
            width,
            height,
            cells,
        }
    }

    /// Parse a block of equally long lines, stopping at the first blank line.
    ///
    /// `decode` turns each character into a cell and may reject it. A row
    /// whose length differs from the first row is an error, as is an empty
    /// block.
    pub fn parse(
        text: &str,
        mut decode: impl FnMut(Vec2, char) -> Result<T, ParseError>,
    ) -> Result<Self, ParseError> {
        let mut width = None;
        let mut height = 0;
        let mut cells = Vec::new();

        for (y, line) in text.lines().take_while(|l| !l.is_empty()).enumerate() {
            let row_start = cells.len();
            for (x, c) in line.chars().enumerate() {
                cells.push(decode(Vec2::new(x as i64, y as i64), c)?);
            }
            let row_width = cells.len() - row_start;
            match width {
                None => width = Some(row_width),
                Some(w) if w != row_width => {
                    return Err(ParseError::InvalidFormat(format!(
                        "grid row {} has width {}, expected {}",
                        y + 1,
                        row_width,
                        w
                    )));
                }
                Some(_) => {}
            }
            height += 1;
        }

        let width = width.ok_or_else(|| ParseError::MissingData("empty grid".to_string()))?;
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as i64, self.height as i64)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn in_bounds(&self, pos: Vec2) -> bool {
        (0..self.width as i64).contains(&pos.x) && (0..self.height as i64).contains(&pos.y)
    }

    /// Linear index of `pos`, `None` outside the grid.
    pub fn index_of(&self, pos: Vec2) -> Option<usize> {
        self.in_bounds(pos)
            .then(|| pos.y as usize * self.width + pos.x as usize)
    }

    pub fn position_of(&self, index: usize) -> Vec2 {
        Vec2::new((index % self.width) as i64, (index / self.width) as i64)
    }

    pub fn get(&self, pos: Vec2) -> Option<&T> {
        self.index_of(pos).map(|i| &self.cells[i])
    }

    pub fn get_mut(&mut self, pos: Vec2) -> Option<&mut T> {
        self.index_of(pos).map(|i| &mut self.cells[i])
    }

    /// Replace the cell at `pos`, returning the old value (`None` outside the grid).
    pub fn set(&mut self, pos: Vec2, value: T) -> Option<T> {
        self.get_mut(pos).map(|cell| std::mem::replace(cell, value))
    }

    /// The four orthogonal neighbours of `pos` with the direction leading to
    /// each. Not filtered: callers decide what bounds and contents allow.
    pub fn neighbors(&self, pos: Vec2) -> impl Iterator<Item = (Vec2, Dir)> + use<T> {
        Dir::ALL.into_iter().map(move |dir| (pos + dir.offset(), dir))
    }

    /// Row-major positions
    pub fn positions(&self) -> impl Iterator<Item = Vec2> + '_ {
        (0..self.cells.len()).map(|i| self.position_of(i))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Vec2, &T)> {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, cell)| (self.position_of(i), cell))
    }

    /// First position, in row-major order, whose cell satisfies `pred`.
    pub fn find(&self, mut pred: impl FnMut(&T) -> bool) -> Option<Vec2> {
        self.cells
            .iter()
            .position(|cell| pred(cell))
            .map(|i| self.position_of(i))
    }

    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            width: self.width,
            height: self.height,
            cells: self.cells.iter().map(f).collect(),
        }
    }

    /// Render one character per cell, every row terminated by `\n`.
    pub fn render(&self, mut encode: impl FnMut(&T) -> char) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in self.cells.chunks(self.width.max(1)) {
            out.extend(row.iter().map(&mut encode));
            out.push('\n');
        }
        out
    }
}

impl<T: Clone> Grid<T> {
    pub fn new(width: usize, height: usize, fill: T) -> Self {
        Self {
            width,
            height,
            cells: vec![fill; width * height],
        }
    }

    pub fn fill(&mut self, value: T) {
        self.cells.fill(value);
    }
}

impl<T> Index<Vec2> for Grid<T> {
    type Output = T;

    fn index(&self, pos: Vec2) -> &T {
        match self.get(pos) {
            Some(cell) => cell,
            None => panic!("{pos} is outside a {}x{} grid", self.width, self.height),
        }
    }
}

impl<T> IndexMut<Vec2> for Grid<T> {
    fn index_mut(&mut self, pos: Vec2) -> &mut T {
        let (width, height) = (self.width, self.height);
        match self.get_mut(pos) {
            Some(cell) => cell,
            None => panic!("{pos} is outside a {width}x{height} grid"),
        }
    }
}

/// Parse a grid of `#` walls and open cells, recording the positions of the
/// `S` and `E` markers. Any other character is an error.
pub fn parse_walls(text: &str) -> Result<(Grid<bool>, Vec2, Vec2), ParseError> {
    let mut start = None;
    let mut end = None;
    let walls = Grid::parse(text, |pos, c| match c {
        '#' => Ok(true),
        '.' => Ok(false),
        'S' => {
            start = Some(pos);
            Ok(false)
        }
        'E' => {
            end = Some(pos);
            Ok(false)
        }
        other => Err(ParseError::InvalidFormat(format!(
            "unexpected map character {other:?} at {pos}"
        ))),
    })?;
    let start = start.ok_or_else(|| ParseError::MissingData("no start marker 'S'".into()))?;
    let end = end.ok_or_else(|| ParseError::MissingData("no end marker 'E'".into()))?;
    Ok((walls, start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn chars(text: &str) -> Grid<char> {
        Grid::parse(text, |_, c| Ok(c)).unwrap()
    }

    #[test]
    fn test_parse_dimensions_and_access() {
        let grid = chars("abc\ndef\n\nignored\n");
        assert_eq!((grid.width(), grid.height()), (3, 2));
        assert_eq!(grid.get(Vec2::new(2, 1)), Some(&'f'));
        assert_eq!(grid[Vec2::new(0, 1)], 'd');
        assert_eq!(grid.index_of(Vec2::new(1, 1)), Some(4));
        assert_eq!(grid.position_of(4), Vec2::new(1, 1));
    }

    #[test]
    fn test_out_of_bounds_is_none() {
        let grid = chars("ab\ncd");
        for pos in [
            Vec2::new(-1, 0),
            Vec2::new(0, -1),
            Vec2::new(2, 0),
            Vec2::new(0, 2),
        ] {
            assert_eq!(grid.get(pos), None);
            assert_eq!(grid.index_of(pos), None);
        }
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = Grid::parse("abc\nde\n", |_, c| Ok(c)).unwrap_err();
        assert!(matches!(err, ParseError::InvalidFormat(_)));
    }

    #[test]
    fn test_empty_grid_rejected() {
        let err = Grid::parse("", |_, c| Ok(c)).unwrap_err();
        assert!(matches!(err, ParseError::MissingData(_)));
    }

    #[test]
    fn test_neighbors_unfiltered() {
        let grid = chars("ab\ncd");
        let around: Vec<_> = grid.neighbors(Vec2::ZERO).collect();
        assert_eq!(
            around,
            vec![
                (Vec2::new(0, -1), Dir::North),
                (Vec2::new(1, 0), Dir::East),
                (Vec2::new(0, 1), Dir::South),
                (Vec2::new(-1, 0), Dir::West),
            ]
        );
        assert_eq!(around.iter().filter(|(p, _)| grid.in_bounds(*p)).count(), 2);
    }

    #[test]
    fn test_set_and_find() {
        let mut grid = Grid::new(3, 2, 0u8);
        assert_eq!(grid.set(Vec2::new(2, 1), 7), Some(0));
        assert_eq!(grid.set(Vec2::new(3, 1), 7), None);
        assert_eq!(grid.find(|&v| v == 7), Some(Vec2::new(2, 1)));
    }

    #[test]
    fn test_dir_rotation() {
        for dir in Dir::ALL {
            assert_eq!(dir.clockwise().counter_clockwise(), dir);
            assert_eq!(dir.clockwise().clockwise(), dir.opposite());
            assert_eq!(dir.offset() + dir.opposite().offset(), Vec2::ZERO);
        }
        assert_eq!(Dir::North.clockwise(), Dir::East);
        assert_eq!(Dir::North.counter_clockwise(), Dir::West);
    }

    #[test]
    fn test_dir_set() {
        let mut set = DirSet::EMPTY;
        assert!(set.insert(Dir::South));
        assert!(!set.insert(Dir::South));
        set.insert(Dir::North);
        assert_eq!(set.len(), 2);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![Dir::North, Dir::South]);
        assert!(set.remove(Dir::North));
        assert!(!set.contains(Dir::North));
        assert_eq!(Dir::ALL.into_iter().collect::<DirSet>(), DirSet::ALL);
    }

    #[test]
    fn test_parse_walls_markers() {
        let (walls, start, end) = parse_walls("#####\n#S.E#\n#####").unwrap();
        assert_eq!((start, end), (Vec2::new(1, 1), Vec2::new(3, 1)));
        assert!(walls[Vec2::ZERO]);
        assert!(!walls[start]);
        assert!(parse_walls("#.#\n#E#").is_err());
    }

    #[test]
    fn test_vec2_arithmetic() {
        assert_eq!(Vec2::new(-1, 8).rem_euclid(Vec2::new(11, 7)), Vec2::new(10, 1));
        let (from, to) = (Vec2::new(2, -3), Vec2::new(-1, 1));
        assert_eq!((to - from).manhattan(), 7);
        let mut pos = from;
        pos += Dir::South.offset() * 4;
        assert_eq!(pos, Vec2::new(2, 1));
    }

    proptest! {
        /// Parsing a rectangular block and rendering it cell by cell gives the text back.
        #[test]
        fn prop_parse_render_round_trip(
            (width, rows) in (1usize..10).prop_flat_map(|w| {
                (Just(w), prop::collection::vec(prop::collection::vec(prop::sample::select(vec!['#', '.', 'S', 'E', 'x']), w), 1..10))
            })
        ) {
            let text: String = rows
                .iter()
                .map(|row| row.iter().collect::<String>() + "\n")
                .collect();
            let grid = chars(&text);
            prop_assert_eq!(grid.width(), width);
            prop_assert_eq!(grid.height(), rows.len());
            for (pos, &c) in grid.iter() {
                prop_assert_eq!(c, rows[pos.y as usize][pos.x as usize]);
            }
            prop_assert_eq!(grid.render(|&c| c), text);
        }
    }
}
