use pathviz_core::Point;

/// Per-cell search bookkeeping, one per grid position, owned by a session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Node {
    pub(crate) g: f64,
    pub(crate) f: f64,
    pub(crate) parent: Option<usize>,
    pub(crate) opened: bool,
    pub(crate) closed: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: f64::INFINITY,
            f: f64::INFINITY,
            parent: None,
            opened: false,
            closed: false,
        }
    }
}

/// Flat array of [`Node`]s indexed like the grid.
#[derive(Debug, Default)]
pub(crate) struct Nodes {
    nodes: Vec<Node>,
}

impl Nodes {
    /// Reset every record to its defaults, resizing to `len` cells.
    /// The allocation is kept between sessions.
    pub(crate) fn reset(&mut self, len: usize) {
        self.nodes.clear();
        self.nodes.resize(len, Node::default());
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }
}

impl std::ops::Index<usize> for Nodes {
    type Output = Node;
    #[inline]
    fn index(&self, i: usize) -> &Node {
        &self.nodes[i]
    }
}

impl std::ops::IndexMut<usize> for Nodes {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut Node {
        &mut self.nodes[i]
    }
}

/// Read-only view of one cell's search state, for visualization.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellRecord {
    /// Best known cost from the start; infinite if unreached.
    pub g: f64,
    /// `g` plus the goal estimate (just `g` for Dijkstra and BFS).
    pub f: f64,
    /// The preceding cell on the best known path.
    pub parent: Option<Point>,
    pub opened: bool,
    pub closed: bool,
}

impl CellRecord {
    /// Whether the search has assigned this cell a finite cost.
    #[inline]
    pub fn reached(&self) -> bool {
        self.g.is_finite()
    }
}
