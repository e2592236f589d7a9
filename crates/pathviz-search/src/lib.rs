//! **pathviz-search**: incremental path searches over a [`pathviz_core::Grid`].
//!
//! Four strategies share one stepping interface:
//!
//! - [`StrategyKind::AStar`]: best-first on `g + h`.
//! - [`StrategyKind::Dijkstra`]: uniform cost, every cell seeded up front.
//! - [`StrategyKind::BreadthFirst`]: FIFO frontier, fewest moves.
//! - [`StrategyKind::ThetaStar`]: A* with line-of-sight parent shortcuts.
//!
//! A [`SearchEngine`] owns the grid and runs one session at a time. Each
//! call to [`SearchEngine::step`] expands a single cell, so a front-end can
//! animate the search while inspecting per-cell state through
//! [`SearchEngine::record`].

mod astar;
mod bfs;
mod dijkstra;
mod open_set;
mod record;
mod session;
mod theta;

pub mod engine;
pub mod error;
pub mod heuristic;
pub mod observer;
pub mod strategy;

pub use engine::{SearchConfig, SearchEngine, SessionHandle};
pub use error::{InvalidArgument, SearchError};
pub use heuristic::{Metric, Movement, ParseMovementError, diagonal, euclidean, manhattan};
pub use observer::{SearchEvent, SearchObserver, SearchSummary};
pub use record::CellRecord;
pub use strategy::{ParseStrategyError, Status, StrategyKind};
