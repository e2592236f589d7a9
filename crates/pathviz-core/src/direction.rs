//! The eight compass directions and their fixed enumeration order.

use crate::geom::Point;

/// A compass direction between adjacent cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    North,
    East,
    South,
    West,
    NorthEast,
    SouthEast,
    SouthWest,
    NorthWest,
}

impl Direction {
    /// Cardinal directions in neighbour order.
    pub const CARDINAL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// All directions in neighbour order: cardinals first, then diagonals
    /// clockwise from north-east.
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
        Direction::NorthEast,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::NorthWest,
    ];

    /// Unit offset of this direction.
    #[inline]
    pub const fn offset(self) -> Point {
        match self {
            Self::North => Point::new(0, -1),
            Self::East => Point::new(1, 0),
            Self::South => Point::new(0, 1),
            Self::West => Point::new(-1, 0),
            Self::NorthEast => Point::new(1, -1),
            Self::SouthEast => Point::new(1, 1),
            Self::SouthWest => Point::new(-1, 1),
            Self::NorthWest => Point::new(-1, -1),
        }
    }

    #[inline]
    pub const fn is_diagonal(self) -> bool {
        matches!(
            self,
            Self::NorthEast | Self::SouthEast | Self::SouthWest | Self::NorthWest
        )
    }

    /// Direction from `from` towards `to`, following the sign of each axis.
    ///
    /// Works for any pair of distinct points, which is what Theta* parent
    /// links need; returns `None` when the points coincide.
    pub fn between(from: Point, to: Point) -> Option<Direction> {
        let d = to - from;
        let dir = match (d.x.signum(), d.y.signum()) {
            (0, -1) => Self::North,
            (1, 0) => Self::East,
            (0, 1) => Self::South,
            (-1, 0) => Self::West,
            (1, -1) => Self::NorthEast,
            (1, 1) => Self::SouthEast,
            (-1, 1) => Self::SouthWest,
            (-1, -1) => Self::NorthWest,
            _ => return None,
        };
        Some(dir)
    }

    /// An arrow glyph pointing in this direction.
    pub const fn arrow(self) -> char {
        match self {
            Self::North => '↑',
            Self::East => '→',
            Self::South => '↓',
            Self::West => '←',
            Self::NorthEast => '↗',
            Self::SouthEast => '↘',
            Self::SouthWest => '↙',
            Self::NorthWest => '↖',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_round_trip_through_between() {
        let origin = Point::new(5, 5);
        for dir in Direction::ALL {
            assert_eq!(Direction::between(origin, origin + dir.offset()), Some(dir));
        }
        assert_eq!(Direction::between(origin, origin), None);
    }

    #[test]
    fn north_points_up_the_screen() {
        assert_eq!(Direction::North.offset(), Point::new(0, -1));
        assert_eq!(
            Direction::between(Point::new(0, 0), Point::new(3, -7)),
            Some(Direction::NorthEast)
        );
    }

    #[test]
    fn cardinal_prefix_of_all() {
        assert_eq!(&Direction::ALL[..4], &Direction::CARDINAL[..]);
        assert!(Direction::ALL[4..].iter().all(|d| d.is_diagonal()));
    }
}
