//! Distance functions and the movement modes that select them.
//!
//! A search uses one [`Metric`] for both the cost of an edge and the
//! estimate of the remaining distance to the goal; mixing the two would
//! break the optimality of A* and Dijkstra.

use std::fmt;
use std::str::FromStr;

use pathviz_core::Point;

/// Manhattan (L1) distance between two points.
#[inline]
pub fn manhattan(a: Point, b: Point) -> f64 {
    ((a.x - b.x).abs() + (a.y - b.y).abs()) as f64
}

/// Chebyshev (L∞) distance: uniform-cost 8-directional movement.
#[inline]
pub fn diagonal(a: Point, b: Point) -> f64 {
    (a.x - b.x).abs().max((a.y - b.y).abs()) as f64
}

/// Euclidean (L2) distance.
#[inline]
pub fn euclidean(a: Point, b: Point) -> f64 {
    let dx = (a.x - b.x) as f64;
    let dy = (a.y - b.y) as f64;
    dx.hypot(dy)
}

/// One of the three distance functions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Metric {
    Manhattan,
    Diagonal,
    Euclidean,
}

impl Metric {
    #[inline]
    pub fn distance(self, a: Point, b: Point) -> f64 {
        match self {
            Self::Manhattan => manhattan(a, b),
            Self::Diagonal => diagonal(a, b),
            Self::Euclidean => euclidean(a, b),
        }
    }
}

/// How a search may move between cells.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Movement {
    /// North, east, south and west only; Manhattan costs.
    #[default]
    FourWay,
    /// All eight neighbours at uniform cost; diagonal (Chebyshev) costs.
    EightWay,
    /// All eight neighbours with true geometric lengths; Euclidean costs.
    AnyAngle,
}

impl Movement {
    pub const ALL: [Movement; 3] = [Self::FourWay, Self::EightWay, Self::AnyAngle];

    /// Whether diagonal neighbours are enumerated.
    #[inline]
    pub const fn diagonals(self) -> bool {
        !matches!(self, Self::FourWay)
    }

    /// The metric used for edge costs and goal estimates.
    #[inline]
    pub const fn metric(self) -> Metric {
        match self {
            Self::FourWay => Metric::Manhattan,
            Self::EightWay => Metric::Diagonal,
            Self::AnyAngle => Metric::Euclidean,
        }
    }

    /// The next mode in [`ALL`](Self::ALL), wrapping around.
    pub fn next(self) -> Self {
        match self {
            Self::FourWay => Self::EightWay,
            Self::EightWay => Self::AnyAngle,
            Self::AnyAngle => Self::FourWay,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::FourWay => "4-way",
            Self::EightWay => "8-way",
            Self::AnyAngle => "any-angle",
        }
    }
}

impl fmt::Display for Movement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when parsing an unknown [`Movement`] name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseMovementError(pub String);

impl fmt::Display for ParseMovementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown movement mode \u{201c}{}\u{201d} (expected 4-way, 8-way or any-angle)",
            self.0
        )
    }
}

impl std::error::Error for ParseMovementError {}

impl FromStr for Movement {
    type Err = ParseMovementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "4" | "4-way" | "four-way" | "cardinal" => Ok(Self::FourWay),
            "8" | "8-way" | "eight-way" | "diagonal" => Ok(Self::EightWay),
            "any" | "any-angle" | "euclidean" => Ok(Self::AnyAngle),
            _ => Err(ParseMovementError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn distances() {
        let a = Point::new(1, 1);
        let b = Point::new(4, 5);
        assert_eq!(manhattan(a, b), 7.0);
        assert_eq!(diagonal(a, b), 4.0);
        assert!((euclidean(a, b) - 5.0).abs() < EPSILON);
        assert_eq!(manhattan(a, a), 0.0);
    }

    #[test]
    fn diagonal_never_exceeds_euclidean_for_neighbours() {
        let c = Point::new(3, 3);
        for dy in -1..=1 {
            for dx in -1..=1 {
                let n = c.shift(dx, dy);
                assert!(diagonal(c, n) <= euclidean(c, n) + EPSILON);
                assert!(euclidean(c, n) <= manhattan(c, n) + EPSILON);
            }
        }
    }

    #[test]
    fn movement_selects_metric() {
        assert_eq!(Movement::FourWay.metric(), Metric::Manhattan);
        assert_eq!(Movement::EightWay.metric(), Metric::Diagonal);
        assert_eq!(Movement::AnyAngle.metric(), Metric::Euclidean);
        assert!(!Movement::FourWay.diagonals());
        assert!(Movement::AnyAngle.diagonals());
    }

    #[test]
    fn metric_ignores_pair_geometry() {
        // A non-adjacent diagonal pair keeps its configured metric.
        let a = Point::new(0, 0);
        let b = Point::new(3, 3);
        assert_eq!(Metric::Diagonal.distance(a, b), 3.0);
        assert_eq!(Metric::Manhattan.distance(a, b), 6.0);
    }

    #[test]
    fn parse_movement() {
        assert_eq!("8-way".parse::<Movement>(), Ok(Movement::EightWay));
        assert_eq!("Any-Angle".parse::<Movement>(), Ok(Movement::AnyAngle));
        assert!("hex".parse::<Movement>().is_err());
        for m in Movement::ALL {
            assert_eq!(m.label().parse::<Movement>(), Ok(m));
        }
    }
}
