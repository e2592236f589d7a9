use std::collections::VecDeque;

use pathviz_core::{Grid, Point};

use crate::error::SearchError;
use crate::heuristic::{Metric, Movement};
use crate::open_set::OpenSet;
use crate::record::Nodes;
use crate::strategy::{self, Expansion, Status, StrategyKind};

/// State of one search: the strategy, its endpoints, the per-cell records
/// and whichever frontier the strategy uses.
#[derive(Debug)]
pub(crate) struct Session {
    pub(crate) kind: StrategyKind,
    pub(crate) movement: Movement,
    pub(crate) metric: Metric,
    pub(crate) start: usize,
    pub(crate) goal: usize,
    pub(crate) nodes: Nodes,
    pub(crate) open: OpenSet,
    pub(crate) queue: VecDeque<usize>,
    pub(crate) status: Status,
    pub(crate) iterations: u32,
    pub(crate) path: Vec<Point>,
    // shared scratch buffer for neighbor queries
    pub(crate) nbuf: Vec<Point>,
}

/// Buffers recycled from a finished session.
#[derive(Debug, Default)]
pub(crate) struct Scratch {
    pub(crate) nodes: Nodes,
    pub(crate) open: OpenSet,
    pub(crate) queue: VecDeque<usize>,
    pub(crate) nbuf: Vec<Point>,
}

impl Session {
    /// Create a session with reset records and a seeded frontier.
    pub(crate) fn begin(
        grid: &Grid,
        kind: StrategyKind,
        movement: Movement,
        start: usize,
        goal: usize,
        scratch: Scratch,
    ) -> Self {
        let Scratch {
            mut nodes,
            mut open,
            mut queue,
            nbuf,
        } = scratch;
        nodes.reset(grid.len());
        open.clear();
        queue.clear();

        let mut s = Self {
            kind,
            movement,
            metric: movement.metric(),
            start,
            goal,
            nodes,
            open,
            queue,
            status: Status::Running,
            iterations: 0,
            path: Vec::new(),
            nbuf,
        };
        strategy::start(kind, &mut s, grid);
        s
    }

    pub(crate) fn into_scratch(self) -> Scratch {
        Scratch {
            nodes: self.nodes,
            open: self.open,
            queue: self.queue,
            nbuf: self.nbuf,
        }
    }

    /// Run one expansion. Terminal sessions are left untouched.
    pub(crate) fn advance(&mut self, grid: &Grid) -> Result<Status, SearchError> {
        if self.status.is_terminal() {
            return Ok(self.status);
        }
        self.iterations += 1;
        self.status = match strategy::expand(self.kind, self, grid) {
            Expansion::Continue => Status::Running,
            Expansion::Found => {
                self.path = self.reconstruct(grid, self.goal)?;
                Status::Found
            }
            Expansion::Exhausted => Status::Failed,
        };
        Ok(self.status)
    }

    /// Walk parent links from `from` back to the start.
    ///
    /// The result reads start to `from`, both included.
    pub(crate) fn reconstruct(&self, grid: &Grid, from: usize) -> Result<Vec<Point>, SearchError> {
        let mut path = Vec::new();
        let mut ci = from;
        loop {
            path.push(grid.point(ci));
            if ci == self.start {
                break;
            }
            // A chain longer than the grid must contain a cycle.
            if path.len() > self.nodes.len() {
                return Err(SearchError::BrokenChain { at: grid.point(ci) });
            }
            match self.nodes[ci].parent {
                Some(p) => ci = p,
                None => return Err(SearchError::BrokenChain { at: grid.point(ci) }),
            }
        }
        path.reverse();
        Ok(path)
    }

    // -----------------------------------------------------------------------
    // Helpers shared by the strategies
    // -----------------------------------------------------------------------

    /// Cost of moving straight from cell `a` to cell `b`.
    #[inline]
    pub(crate) fn cost(&self, grid: &Grid, a: usize, b: usize) -> f64 {
        self.metric.distance(grid.point(a), grid.point(b))
    }

    /// Estimated remaining cost from cell `i` to the goal.
    #[inline]
    pub(crate) fn estimate(&self, grid: &Grid, i: usize) -> f64 {
        self.cost(grid, i, self.goal)
    }

    /// Fill the scratch buffer with the walkable neighbours of cell `i`.
    /// Take it with `std::mem::take` and hand it back when done.
    pub(crate) fn load_neighbors(&mut self, grid: &Grid, i: usize) -> Vec<Point> {
        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        grid.traversable_neighbors(grid.point(i), self.movement.diagonals(), &mut nbuf);
        nbuf
    }

    /// Pop the live open-set entry with the lowest `f`.
    pub(crate) fn pop_lowest_f(&mut self) -> Option<usize> {
        let nodes = &self.nodes;
        self.open
            .pop_live(|i, score| nodes[i].opened && !nodes[i].closed && nodes[i].f == score)
    }
}
