use std::fmt;

use pathviz_core::{GridError, Point};

use crate::strategy::Status;

/// Why a [`find_path`](crate::SearchEngine::find_path) call was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidArgument {
    /// The grid has no Start cell.
    MissingStart,
    /// The grid has no End cell.
    MissingEnd,
    /// Start and end are the same cell.
    SameEndpoints(Point),
    /// An endpoint is a wall.
    Untraversable(Point),
}

impl fmt::Display for InvalidArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingStart => f.write_str("no start cell is set"),
            Self::MissingEnd => f.write_str("no end cell is set"),
            Self::SameEndpoints(p) => write!(f, "start and end are both {p}"),
            Self::Untraversable(p) => write!(f, "endpoint {p} is a wall"),
        }
    }
}

/// Errors reported by the [`SearchEngine`](crate::SearchEngine).
#[derive(Debug, Clone, PartialEq)]
pub enum SearchError {
    /// A malformed search request; nothing was changed.
    InvalidArguments(InvalidArgument),
    /// A position outside the grid.
    OutOfRange(GridError),
    /// A parent chain stopped short of the start or looped. The session
    /// that produced it is discarded.
    BrokenChain { at: Point },
    /// The handle belongs to a session that was replaced or abandoned.
    StaleSession,
    /// The path was requested from a session that has not found one.
    PathUnavailable(Status),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArguments(why) => write!(f, "invalid search arguments: {why}"),
            Self::OutOfRange(e) => e.fmt(f),
            Self::BrokenChain { at } => {
                write!(f, "parent chain broken at {at} before reaching the start")
            }
            Self::StaleSession => f.write_str("search session is no longer active"),
            Self::PathUnavailable(status) => {
                write!(f, "no path available (search status: {status:?})")
            }
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::OutOfRange(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for SearchError {
    fn from(e: GridError) -> Self {
        Self::OutOfRange(e)
    }
}
