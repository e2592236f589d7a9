//! Visualizer settings and the starting grid they describe.

use std::path::PathBuf;
use std::time::Duration;

use pathviz_core::{CellKind, Grid, Point};
use pathviz_search::{Movement, StrategyKind};

use crate::error::AppError;

/// Smallest allowed grid side.
pub const MIN_SIZE: i32 = 2;
/// Largest allowed grid side.
pub const MAX_SIZE: i32 = 128;

/// Clamp a requested grid side into `MIN_SIZE..=MAX_SIZE`.
pub fn clamp_size(n: i32) -> i32 {
    n.clamp(MIN_SIZE, MAX_SIZE)
}

/// Settings for a visualizer run.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub width: i32,
    pub height: i32,
    /// Start marker placed on a fresh grid.
    pub start: Point,
    /// End marker placed on a fresh grid.
    pub end: Point,
    /// Load the grid from this map file instead of building a fresh one.
    pub map: Option<PathBuf>,
    pub algorithm: StrategyKind,
    pub movement: Movement,
    /// Delay between animation steps.
    pub interval: Duration,
    /// Seed for the wall scatterer; random when unset.
    pub seed: Option<u64>,
    /// Share of cells turned into walls by the scatterer.
    pub wall_density: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 15,
            height: 15,
            start: Point::new(2, 2),
            end: Point::new(14, 14),
            map: None,
            algorithm: StrategyKind::default(),
            movement: Movement::default(),
            interval: Duration::from_millis(5),
            seed: None,
            wall_density: 0.3,
        }
    }
}

impl Config {
    /// Build the starting grid: the map file if one is set, otherwise a
    /// fresh open grid with the Start and End markers placed.
    ///
    /// Sizes are clamped. Markers that fall outside a smaller grid are
    /// pulled inside it; if both land on the same cell the End moves to
    /// the opposite corner.
    pub fn build_grid(&self) -> Result<Grid, AppError> {
        if let Some(path) = &self.map {
            let text = std::fs::read_to_string(path).map_err(|source| AppError::ReadMap {
                path: path.clone(),
                source,
            })?;
            return Ok(Grid::parse(&text)?);
        }

        let (w, h) = (clamp_size(self.width), clamp_size(self.height));
        let mut grid = Grid::new(w, h)?;
        let inside = |p: Point| Point::new(p.x.clamp(0, w - 1), p.y.clamp(0, h - 1));
        let start = inside(self.start);
        let mut end = inside(self.end);
        if end == start {
            end = Point::new(w - 1 - start.x, h - 1 - start.y);
            if end == start {
                end = Point::new((start.x + 1) % w, start.y);
            }
        }
        grid.set_kind(start, CellKind::Start)?;
        grid.set_kind(end, CellKind::End)?;
        Ok(grid)
    }
}
