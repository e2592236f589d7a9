//! The [`Cell`] type: a grid position with its semantic [`CellKind`].

use crate::geom::Point;

/// What a grid cell currently represents.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellKind {
    #[default]
    Open,
    Wall,
    Start,
    End,
    /// Part of the most recently found path.
    Pathway,
}

impl CellKind {
    /// Every kind except [`Wall`](CellKind::Wall) can be walked over.
    #[inline]
    pub const fn is_traversable(self) -> bool {
        !matches!(self, Self::Wall)
    }

    /// Map glyph used by [`Grid::parse`](crate::Grid::parse) and `Display`.
    pub const fn to_char(self) -> char {
        match self {
            Self::Open => '.',
            Self::Wall => '#',
            Self::Start => 'S',
            Self::End => 'E',
            Self::Pathway => '*',
        }
    }

    pub const fn from_char(ch: char) -> Option<Self> {
        match ch {
            '.' => Some(Self::Open),
            '#' => Some(Self::Wall),
            'S' => Some(Self::Start),
            'E' => Some(Self::End),
            '*' => Some(Self::Pathway),
            _ => None,
        }
    }
}

/// A snapshot of one grid cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub pos: Point,
    pub kind: CellKind,
}

impl Cell {
    #[inline]
    pub const fn is_traversable(self) -> bool {
        self.kind.is_traversable()
    }
}
