//! Strategy selection and the shared session state machine.

use std::fmt;
use std::str::FromStr;

use pathviz_core::Grid;

use crate::session::Session;
use crate::{astar, bfs, dijkstra, theta};

/// The search algorithm driving a session.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StrategyKind {
    /// Best-first on `f = g + h`.
    #[default]
    AStar,
    /// Best-first on `g`, with every cell seeded into the open set.
    Dijkstra,
    /// First-in first-out expansion, ignoring costs.
    BreadthFirst,
    /// A* that relaxes through the parent of the expanded cell whenever it
    /// has line of sight. Paths only come out shorter than grid paths under
    /// [`Movement::AnyAngle`](crate::Movement::AnyAngle).
    ThetaStar,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 4] = [
        Self::AStar,
        Self::Dijkstra,
        Self::BreadthFirst,
        Self::ThetaStar,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::AStar => "A*",
            Self::Dijkstra => "Dijkstra",
            Self::BreadthFirst => "Breadth-first",
            Self::ThetaStar => "Theta*",
        }
    }

    /// The next strategy in [`ALL`](Self::ALL), wrapping around.
    pub fn next(self) -> Self {
        match self {
            Self::AStar => Self::Dijkstra,
            Self::Dijkstra => Self::BreadthFirst,
            Self::BreadthFirst => Self::ThetaStar,
            Self::ThetaStar => Self::AStar,
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when parsing an unknown [`StrategyKind`] name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStrategyError(pub String);

impl fmt::Display for ParseStrategyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown algorithm \u{201c}{}\u{201d} (expected astar, dijkstra, bfs or theta)",
            self.0
        )
    }
}

impl std::error::Error for ParseStrategyError {}

impl FromStr for StrategyKind {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "a*" | "astar" | "a-star" => Ok(Self::AStar),
            "dijkstra" => Ok(Self::Dijkstra),
            "bfs" | "breadth-first" | "breadth_first" => Ok(Self::BreadthFirst),
            "theta" | "theta*" | "thetastar" | "theta-star" => Ok(Self::ThetaStar),
            _ => Err(ParseStrategyError(s.to_string())),
        }
    }
}

/// Where a session stands.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    Running,
    /// The end cell was popped; the path is available.
    Found,
    /// The frontier ran out without reaching the end cell.
    Failed,
}

impl Status {
    #[inline]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Running)
    }
}

/// Result of a single expansion.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Expansion {
    Continue,
    Found,
    Exhausted,
}

/// Seed the frontier for `kind`.
pub(crate) fn start(kind: StrategyKind, s: &mut Session, grid: &Grid) {
    match kind {
        StrategyKind::AStar => astar::start(s, grid),
        StrategyKind::Dijkstra => dijkstra::start(s, grid),
        StrategyKind::BreadthFirst => bfs::start(s, grid),
        StrategyKind::ThetaStar => theta::start(s, grid),
    }
}

/// Pop one cell and expand its neighbours.
pub(crate) fn expand(kind: StrategyKind, s: &mut Session, grid: &Grid) -> Expansion {
    match kind {
        StrategyKind::AStar => astar::expand(s, grid),
        StrategyKind::Dijkstra => dijkstra::expand(s, grid),
        StrategyKind::BreadthFirst => bfs::expand(s, grid),
        StrategyKind::ThetaStar => theta::expand(s, grid),
    }
}
