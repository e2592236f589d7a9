//! **pathviz-core**: grid topology for the pathviz search visualizer.
//!
//! This crate provides the geometry primitives, cell kinds and the
//! fixed-size [`Grid`] that the search strategies in `pathviz-search`
//! query: existence, traversability, neighbour enumeration and
//! line-of-sight.

pub mod cell;
pub mod direction;
pub mod error;
pub mod geom;
pub mod grid;

pub use cell::{Cell, CellKind};
pub use direction::Direction;
pub use error::GridError;
pub use geom::{Point, Range};
pub use grid::Grid;
