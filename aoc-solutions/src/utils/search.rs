//! Least-cost search over weighted state graphs.
//!
//! [`Dijkstra`] keeps, for every reached state, its best known cost and the
//! full set of predecessors that achieve it. Once a search has settled the
//! goals, all minimal paths can be recovered from those predecessor sets, not
//! only one of them.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt::Debug;

use rustc_hash::FxHashSet;

use super::grid::{Dir, Grid, Vec2};

pub type Cost = u64;

/// A graph the search can walk.
///
/// States are mapped onto a dense index range so per-state bookkeeping can
/// live in flat vectors. Edge weights must be non-negative, which `Cost`
/// enforces.
pub trait SearchSpace {
    type State: Copy + Eq + Debug;

    /// Exclusive upper bound of [`SearchSpace::index`].
    fn state_count(&self) -> usize;

    /// Dense index of `state`, `None` for states outside the space.
    fn index(&self, state: Self::State) -> Option<usize>;

    /// Grid cell a state occupies.
    fn position(&self, state: Self::State) -> Vec2;

    /// Append the outgoing `(neighbour, weight)` edges of `state`.
    fn edges(&self, state: Self::State, out: &mut Vec<(Self::State, Cost)>);
}

#[derive(Debug, Clone)]
struct Node<T> {
    explored: bool,
    cost: Option<Cost>,
    predecessors: Vec<T>,
}

impl<T> Default for Node<T> {
    fn default() -> Self {
        Self {
            explored: false,
            cost: None,
            predecessors: Vec::new(),
        }
    }
}

/// Frontier entry. Ordered so the max-heap pops the lowest cost first and,
/// between equal costs, the entry pushed first.
#[derive(Debug)]
struct Frontier<T> {
    cost: Cost,
    seq: u64,
    state: T,
}

impl<T> PartialEq for Frontier<T> {
    fn eq(&self, other: &Self) -> bool {
        (self.cost, self.seq) == (other.cost, other.seq)
    }
}

impl<T> Eq for Frontier<T> {}

impl<T> PartialOrd for Frontier<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Frontier<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Dijkstra search that records every tied predecessor.
///
/// Stale frontier entries are skipped lazily when popped instead of being
/// removed when a state's cost drops.
///
/// ```
/// use aoc_solutions::utils::grid::{Grid, Vec2};
/// use aoc_solutions::utils::search::{Dijkstra, WalkSpace};
///
/// let walls = Grid::new(3, 3, false);
/// let space = WalkSpace::new(&walls);
/// let mut search = Dijkstra::new(&space, Vec2::new(0, 0));
/// search.run();
/// assert_eq!(search.cost(Vec2::new(2, 2)), Some(4));
/// ```
pub struct Dijkstra<'s, S: SearchSpace> {
    space: &'s S,
    nodes: Vec<Node<S::State>>,
    frontier: BinaryHeap<Frontier<S::State>>,
    seq: u64,
    scratch: Vec<(S::State, Cost)>,
}

impl<'s, S: SearchSpace> Dijkstra<'s, S> {
    pub fn new(space: &'s S, start: S::State) -> Self {
        let mut search = Self {
            space,
            nodes: Vec::new(),
            frontier: BinaryHeap::new(),
            seq: 0,
            scratch: Vec::new(),
        };
        search.initialize(start);
        search
    }

    /// Forget all progress and restart from `start` at cost 0. A start
    /// outside the space leaves nothing to search.
    pub fn initialize(&mut self, start: S::State) {
        self.nodes.clear();
        self.nodes
            .resize_with(self.space.state_count(), Node::default);
        self.frontier.clear();
        self.seq = 0;

        if let Some(node) = self.node_mut(start) {
            node.cost = Some(0);
            self.push(start, 0);
        }
    }

    fn node(&self, state: S::State) -> Option<&Node<S::State>> {
        self.space.index(state).and_then(|i| self.nodes.get(i))
    }

    fn node_mut(&mut self, state: S::State) -> Option<&mut Node<S::State>> {
        self.space.index(state).and_then(|i| self.nodes.get_mut(i))
    }

    fn push(&mut self, state: S::State, cost: Cost) {
        self.frontier.push(Frontier {
            cost,
            seq: self.seq,
            state,
        });
        self.seq += 1;
    }

    /// Settle the cheapest unexplored frontier state and relax its edges.
    /// Returns the settled state, `None` once the frontier is exhausted.
    fn settle_next(&mut self) -> Option<S::State> {
        let (current, current_cost) = loop {
            let entry = self.frontier.pop()?;
            if self
                .node(entry.state)
                .is_some_and(|node| !node.explored && node.cost == Some(entry.cost))
            {
                break (entry.state, entry.cost);
            }
        };

        let mut edges = std::mem::take(&mut self.scratch);
        edges.clear();
        self.space.edges(current, &mut edges);

        for &(next, weight) in &edges {
            let candidate = current_cost + weight;
            let Some(node) = self.node_mut(next) else {
                continue;
            };
            match node.cost {
                Some(known) if candidate > known => {}
                Some(known) if candidate == known => {
                    if !node.predecessors.contains(&current) {
                        node.predecessors.push(current);
                    }
                }
                _ => {
                    debug_assert!(!node.explored, "explored cost of {next:?} decreased");
                    node.cost = Some(candidate);
                    node.predecessors.clear();
                    node.predecessors.push(current);
                    self.push(next, candidate);
                }
            }
        }

        self.scratch = edges;
        if let Some(node) = self.node_mut(current) {
            node.explored = true;
        }
        Some(current)
    }

    /// Advance by one settled state. Returns `false` when nothing is left.
    pub fn step(&mut self) -> bool {
        self.settle_next().is_some()
    }

    /// Search until the frontier is empty.
    pub fn run(&mut self) {
        while self.step() {}
    }

    /// Search until a state matching `is_goal` is settled and return it with
    /// its cost. Predecessor sets of states settled so far are complete for
    /// positive edge weights.
    pub fn run_until(&mut self, mut is_goal: impl FnMut(S::State) -> bool) -> Option<(S::State, Cost)> {
        while let Some(state) = self.settle_next() {
            if is_goal(state) {
                return self.cost(state).map(|cost| (state, cost));
            }
        }
        None
    }

    /// Best known cost of `state`, `None` if unreached or outside the space.
    pub fn cost(&self, state: S::State) -> Option<Cost> {
        self.node(state).and_then(|node| node.cost)
    }

    pub fn is_explored(&self, state: S::State) -> bool {
        self.node(state).is_some_and(|node| node.explored)
    }

    pub fn predecessors(&self, state: S::State) -> &[S::State] {
        self.node(state)
            .map(|node| node.predecessors.as_slice())
            .unwrap_or(&[])
    }

    /// Lowest cost among `goals`, `None` if none was reached.
    pub fn min_cost(&self, goals: impl IntoIterator<Item = S::State>) -> Option<Cost> {
        goals.into_iter().filter_map(|g| self.cost(g)).min()
    }

    /// Every grid cell lying on at least one minimal-cost path from the start
    /// to the cheapest of `goals`. Empty when no goal was reached.
    pub fn minimal_path_cells(&self, goals: impl IntoIterator<Item = S::State>) -> FxHashSet<Vec2> {
        let goals: Vec<_> = goals.into_iter().collect();
        let mut cells = FxHashSet::default();
        let Some(best) = self.min_cost(goals.iter().copied()) else {
            return cells;
        };

        let mut visited = vec![false; self.space.state_count()];
        let mut stack: Vec<_> = goals
            .into_iter()
            .filter(|&g| self.cost(g) == Some(best))
            .collect();

        while let Some(state) = stack.pop() {
            let Some(index) = self.space.index(state) else {
                continue;
            };
            if std::mem::replace(&mut visited[index], true) {
                continue;
            }
            cells.insert(self.space.position(state));
            stack.extend_from_slice(&self.nodes[index].predecessors);
        }
        cells
    }

    /// One minimal path from the start to `goal`, following the first
    /// recorded predecessor of each state.
    pub fn path_to(&self, goal: S::State) -> Option<Vec<S::State>> {
        self.cost(goal)?;
        let mut visited = vec![false; self.space.state_count()];
        visited[self.space.index(goal)?] = true;
        let mut path = vec![goal];
        let mut current = goal;
        while let Some(&previous) = self.predecessors(current).first() {
            let Some(index) = self.space.index(previous) else {
                break;
            };
            if std::mem::replace(&mut visited[index], true) {
                break;
            }
            path.push(previous);
            current = previous;
        }
        path.reverse();
        Some(path)
    }
}

/// Position-only walk over a wall grid (`true` = blocked), unit cost per step.
pub struct WalkSpace<'g> {
    walls: &'g Grid<bool>,
}

impl<'g> WalkSpace<'g> {
    pub fn new(walls: &'g Grid<bool>) -> Self {
        Self { walls }
    }

    fn open(&self, pos: Vec2) -> bool {
        self.walls.get(pos) == Some(&false)
    }
}

impl SearchSpace for WalkSpace<'_> {
    type State = Vec2;

    fn state_count(&self) -> usize {
        self.walls.len()
    }

    fn index(&self, state: Vec2) -> Option<usize> {
        self.walls.index_of(state)
    }

    fn position(&self, state: Vec2) -> Vec2 {
        state
    }

    fn edges(&self, state: Vec2, out: &mut Vec<(Vec2, Cost)>) {
        out.extend(
            self.walls
                .neighbors(state)
                .filter(|&(next, _)| self.open(next))
                .map(|(next, _)| (next, 1)),
        );
    }
}

/// Walk over a wall grid where the state includes the facing direction.
/// Moving forward costs `move_cost`, a quarter turn in place costs
/// `turn_cost`.
pub struct FacingSpace<'g> {
    walls: &'g Grid<bool>,
    move_cost: Cost,
    turn_cost: Cost,
}

impl<'g> FacingSpace<'g> {
    pub fn new(walls: &'g Grid<bool>, move_cost: Cost, turn_cost: Cost) -> Self {
        Self {
            walls,
            move_cost,
            turn_cost,
        }
    }

    /// The four facings at `pos`, for goals where arrival direction is free.
    pub fn all_facings(pos: Vec2) -> impl Iterator<Item = (Vec2, Dir)> + Clone {
        Dir::ALL.into_iter().map(move |dir| (pos, dir))
    }
}

impl SearchSpace for FacingSpace<'_> {
    type State = (Vec2, Dir);

    fn state_count(&self) -> usize {
        self.walls.len() * 4
    }

    fn index(&self, (pos, dir): (Vec2, Dir)) -> Option<usize> {
        self.walls.index_of(pos).map(|cell| cell * 4 + dir.index())
    }

    fn position(&self, (pos, _): (Vec2, Dir)) -> Vec2 {
        pos
    }

    fn edges(&self, (pos, dir): (Vec2, Dir), out: &mut Vec<((Vec2, Dir), Cost)>) {
        let ahead = pos + dir.offset();
        if self.walls.get(ahead) == Some(&false) {
            out.push(((ahead, dir), self.move_cost));
        }
        out.push(((pos, dir.clockwise()), self.turn_cost));
        out.push(((pos, dir.counter_clockwise()), self.turn_cost));
    }
}
