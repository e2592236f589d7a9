//! Headless solving for the `solve` subcommand.

use std::fmt;

use pathviz_core::Grid;
use pathviz_search::{
    Movement, SearchConfig, SearchEngine, SearchObserver, SearchSummary, Status, StrategyKind,
};

use crate::error::AppError;

/// Outcome of [`solve_grid`].
#[derive(Debug, Clone, PartialEq)]
pub struct SolveReport {
    pub strategy: StrategyKind,
    pub movement: Movement,
    pub status: Status,
    pub iterations: u32,
    pub path_len: usize,
    pub cost: f64,
    /// The grid after the search, pathway cells marked.
    pub map: String,
}

impl fmt::Display for SolveReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.map)?;
        match self.status {
            Status::Found => write!(
                f,
                "{} ({}): path of {} cells, cost {:.2}, after {} iterations",
                self.strategy, self.movement, self.path_len, self.cost, self.iterations
            ),
            _ => write!(
                f,
                "{} ({}): no path after {} iterations",
                self.strategy, self.movement, self.iterations
            ),
        }
    }
}

#[derive(Default)]
struct Capture(Option<SearchSummary>);

impl SearchObserver for Capture {
    fn finished(&mut self, summary: &SearchSummary) {
        self.0 = Some(summary.clone());
    }
}

/// Search between the grid's Start and End cells and report the result.
/// An unreachable End is a report, not an error.
pub fn solve_grid(
    grid: Grid,
    strategy: StrategyKind,
    movement: Movement,
) -> Result<SolveReport, AppError> {
    let mut engine = SearchEngine::new(grid, SearchConfig { movement });
    let handle = engine.find_marked_path(strategy)?;
    let mut capture = Capture::default();
    let status = engine.solve(handle, &mut capture)?;
    let (path_len, cost) = capture
        .0
        .map_or((0, 0.0), |summary| (summary.path_len, summary.cost));
    Ok(SolveReport {
        strategy,
        movement,
        status,
        iterations: engine.iteration_count(handle)?,
        path_len,
        cost,
        map: engine.grid().to_string(),
    })
}
