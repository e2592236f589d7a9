//! Random wall placement.

use pathviz_core::{CellKind, Grid};
use rand::{Rng, RngExt};

/// Re-roll every Open, Wall or Pathway cell as a wall with probability
/// `density`, the rest becoming Open. Start and End cells are left alone.
/// Returns the number of walls placed.
pub fn scatter_walls(grid: &mut Grid, density: f64, rng: &mut impl Rng) -> usize {
    let density = if density.is_nan() { 0.0 } else { density.clamp(0.0, 1.0) };
    let mut walls = 0;
    for p in grid.bounds() {
        if matches!(grid.kind(p), Some(CellKind::Start | CellKind::End) | None) {
            continue;
        }
        let kind = if rng.random_bool(density) {
            CellKind::Wall
        } else {
            CellKind::Open
        };
        if grid.set_kind(p, kind).is_ok() && kind == CellKind::Wall {
            walls += 1;
        }
    }
    walls
}
