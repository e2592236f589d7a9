use std::fmt;

use crate::cell::CellKind;
use crate::geom::Point;

/// Errors reported by [`Grid`](crate::Grid) queries and constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// A position outside the grid was queried or mutated.
    OutOfRange { pos: Point, width: i32, height: i32 },
    /// Grid dimensions must both be positive.
    InvalidSize { width: i32, height: i32 },
    /// The map text has no rows.
    EmptyMap,
    /// A map row has a different width from the first row.
    InconsistentWidth { row: i32, expected: i32, found: i32 },
    /// A character outside the map alphabet was found.
    InvalidChar { ch: char, pos: Point },
    /// The map marks more than one Start or End cell.
    DuplicateMarker { kind: CellKind, pos: Point },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { pos, width, height } => {
                write!(f, "position {pos} is outside the {width}x{height} grid")
            }
            Self::InvalidSize { width, height } => {
                write!(f, "invalid grid size {width}x{height}")
            }
            Self::EmptyMap => f.write_str("map contains no rows"),
            Self::InconsistentWidth {
                row,
                expected,
                found,
            } => write!(
                f,
                "map row {row} has width {found}, expected {expected}"
            ),
            Self::InvalidChar { ch, pos } => {
                write!(f, "map contains invalid character \u{201c}{ch}\u{201d} at {pos}")
            }
            Self::DuplicateMarker { kind, pos } => {
                write!(f, "map has a second {kind:?} marker at {pos}")
            }
        }
    }
}

impl std::error::Error for GridError {}
