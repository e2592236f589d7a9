use std::fmt;
use std::io;
use std::path::PathBuf;

use pathviz_core::GridError;
use pathviz_search::SearchError;

/// Errors surfaced by the `pathviz` binary.
#[derive(Debug)]
pub enum AppError {
    /// Reading a map file failed.
    ReadMap { path: PathBuf, source: io::Error },
    /// A map file did not parse, or a grid could not be built.
    Grid(GridError),
    Search(SearchError),
    /// Terminal setup, input or output failed.
    Terminal(io::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadMap { path, source } => {
                write!(f, "cannot read map {}: {source}", path.display())
            }
            Self::Grid(e) => write!(f, "invalid grid: {e}"),
            Self::Search(e) => write!(f, "search error: {e}"),
            Self::Terminal(e) => write!(f, "terminal error: {e}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ReadMap { source, .. } => Some(source),
            Self::Grid(e) => Some(e),
            Self::Search(e) => Some(e),
            Self::Terminal(e) => Some(e),
        }
    }
}

impl From<GridError> for AppError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

impl From<SearchError> for AppError {
    fn from(e: SearchError) -> Self {
        Self::Search(e)
    }
}

impl From<io::Error> for AppError {
    fn from(e: io::Error) -> Self {
        Self::Terminal(e)
    }
}
