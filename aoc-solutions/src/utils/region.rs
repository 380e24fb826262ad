//! Connected regions of equal cells.

use rustc_hash::FxHashSet;

use super::grid::{Dir, Grid, Vec2};

/// A maximal 4-connected set of cells sharing one label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region<T> {
    pub label: T,
    pub cells: Vec<Vec2>,
    /// Unit edges between a region cell and a non-region cell or the outside
    pub perimeter: usize,
    /// Maximal straight runs of boundary edges
    pub sides: usize,
}

impl<T> Region<T> {
    pub fn area(&self) -> usize {
        self.cells.len()
    }
}

/// Partition `grid` into regions, discovered in row-major order of their
/// first cell. Uses an explicit stack, so region size is not limited by
/// recursion depth.
pub fn regions<T: Copy + Eq>(grid: &Grid<T>) -> Vec<Region<T>> {
    let mut visited = vec![false; grid.len()];
    let mut found = Vec::new();
    let mut stack = Vec::new();
    let mut boundary = FxHashSet::default();

    for seed in 0..grid.len() {
        if visited[seed] {
            continue;
        }
        visited[seed] = true;
        let seed_pos = grid.position_of(seed);
        let label = grid[seed_pos];

        let mut cells = Vec::new();
        boundary.clear();
        stack.push(seed_pos);

        while let Some(pos) = stack.pop() {
            cells.push(pos);
            for (next, dir) in grid.neighbors(pos) {
                match grid.index_of(next) {
                    Some(i) if grid.cells()[i] == label => {
                        if !visited[i] {
                            visited[i] = true;
                            stack.push(next);
                        }
                    }
                    _ => {
                        boundary.insert((pos, dir));
                    }
                }
            }
        }

        let sides = boundary
            .iter()
            .filter(|&&(pos, dir)| !continues_side(&boundary, pos, dir))
            .count();
        found.push(Region {
            label,
            cells,
            perimeter: boundary.len(),
            sides,
        });
    }
    found
}

/// Whether the boundary edge `(pos, dir)` extends one that belongs to the
/// neighbouring cell along the side, so only one edge per side counts.
fn continues_side(boundary: &FxHashSet<(Vec2, Dir)>, pos: Vec2, dir: Dir) -> bool {
    boundary.contains(&(pos + dir.clockwise().offset(), dir))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(text: &str) -> Grid<char> {
        Grid::parse(text, |_, c| Ok(c)).unwrap()
    }

    #[test]
    fn test_single_square() {
        let found = regions(&labels("AAA\nAAA\nAAA"));
        assert_eq!(found.len(), 1);
        let region = &found[0];
        assert_eq!((region.area(), region.perimeter, region.sides), (9, 12, 4));
    }

    #[test]
    fn test_labels_in_discovery_order() {
        let found = regions(&labels("AAAA\nBBCD\nBBCC\nEEEC"));
        let summary: Vec<_> = found
            .iter()
            .map(|r| (r.label, r.area(), r.perimeter, r.sides))
            .collect();
        assert_eq!(
            summary,
            vec![
                ('A', 4, 10, 4),
                ('B', 4, 8, 4),
                ('C', 4, 10, 8),
                ('D', 1, 4, 4),
                ('E', 3, 8, 4),
            ]
        );
    }

    #[test]
    fn test_same_label_disconnected() {
        let found = regions(&labels("OOOOO\nOXOXO\nOOOOO\nOXOXO\nOOOOO"));
        assert_eq!(found.len(), 5);
        let outer = &found[0];
        assert_eq!((outer.label, outer.area(), outer.perimeter), ('O', 21, 36));
        assert!(found[1..].iter().all(|r| r.label == 'X' && r.area() == 1));
    }

    #[test]
    fn test_large_region_no_recursion_limit() {
        let grid = Grid::new(400, 400, 0u8);
        let found = regions(&grid);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].area(), 160_000);
        assert_eq!(found[0].perimeter, 1600);
        assert_eq!(found[0].sides, 4);
    }
}
