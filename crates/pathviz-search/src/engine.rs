//! The [`SearchEngine`]: owner of the grid and of the single active session.

use pathviz_core::{CellKind, Grid, GridError, Point};

use crate::error::{InvalidArgument, SearchError};
use crate::heuristic::Movement;
use crate::observer::{SearchObserver, SearchSummary};
use crate::record::CellRecord;
use crate::session::{Scratch, Session};
use crate::strategy::{Status, StrategyKind};

/// Settings applied to every session started after they are set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    pub movement: Movement,
}

/// Identifies one session started by [`SearchEngine::find_path`].
///
/// A handle goes stale as soon as another search starts or the grid is
/// borrowed mutably.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionHandle {
    generation: u32,
}

/// Runs incremental searches over an owned [`Grid`].
///
/// At most one session is active at a time. The caller drives it with
/// [`step`](Self::step), either once per animation tick or in a tight loop
/// ([`solve`](Self::solve)). Per-cell buffers are reused between sessions.
#[derive(Debug)]
pub struct SearchEngine {
    grid: Grid,
    config: SearchConfig,
    session: Option<Session>,
    scratch: Scratch,
    generation: u32,
}

impl SearchEngine {
    pub fn new(grid: Grid, config: SearchConfig) -> Self {
        Self {
            grid,
            config,
            session: None,
            scratch: Scratch::default(),
            generation: 0,
        }
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Mutable access to the grid. Abandons the active session, since its
    /// records no longer describe the grid.
    pub fn grid_mut(&mut self) -> &mut Grid {
        self.abandon();
        &mut self.grid
    }

    pub fn into_grid(self) -> Grid {
        self.grid
    }

    #[inline]
    pub fn config(&self) -> SearchConfig {
        self.config
    }

    /// Takes effect at the next [`find_path`](Self::find_path).
    pub fn set_config(&mut self, config: SearchConfig) {
        self.config = config;
    }

    /// Drop the active session, if any.
    pub fn abandon(&mut self) {
        if let Some(session) = self.session.take() {
            log::debug!(
                "abandoning {} search after {} iterations",
                session.kind,
                session.iterations
            );
            self.scratch = session.into_scratch();
        }
    }

    // -----------------------------------------------------------------------
    // Starting a search
    // -----------------------------------------------------------------------

    /// Start a search from `start` to `end`, replacing any active session.
    ///
    /// The request is validated before anything changes: both endpoints must
    /// exist, differ and be traversable. Pathway cells left over from an
    /// earlier search are then turned back into open cells.
    pub fn find_path(
        &mut self,
        start: Point,
        end: Point,
        kind: StrategyKind,
    ) -> Result<SessionHandle, SearchError> {
        let si = self.index_of(start)?;
        let gi = self.index_of(end)?;
        if start == end {
            return Err(SearchError::InvalidArguments(InvalidArgument::SameEndpoints(start)));
        }
        for p in [start, end] {
            if !self.grid.is_traversable(p) {
                return Err(SearchError::InvalidArguments(InvalidArgument::Untraversable(p)));
            }
        }

        self.abandon();
        self.grid.clear_pathway();
        self.generation = self.generation.wrapping_add(1);

        let scratch = std::mem::take(&mut self.scratch);
        let movement = self.config.movement;
        self.session = Some(Session::begin(&self.grid, kind, movement, si, gi, scratch));

        log::debug!("starting {kind} search {start} -> {end} ({movement})");
        Ok(SessionHandle {
            generation: self.generation,
        })
    }

    /// Start a search between the grid's Start and End cells.
    pub fn find_marked_path(&mut self, kind: StrategyKind) -> Result<SessionHandle, SearchError> {
        let start = self
            .grid
            .start()
            .ok_or(SearchError::InvalidArguments(InvalidArgument::MissingStart))?;
        let end = self
            .grid
            .end()
            .ok_or(SearchError::InvalidArguments(InvalidArgument::MissingEnd))?;
        self.find_path(start, end, kind)
    }

    // -----------------------------------------------------------------------
    // Driving a search
    // -----------------------------------------------------------------------

    /// Perform one expansion of the session.
    ///
    /// On the step that finds the end cell, interior path cells become
    /// [`CellKind::Pathway`] (the endpoints keep their kinds) and
    /// `observer` hears about each of them, then about the summary. Once
    /// terminal, further calls return the same status and change nothing.
    pub fn step<O: SearchObserver + ?Sized>(
        &mut self,
        handle: SessionHandle,
        observer: &mut O,
    ) -> Result<Status, SearchError> {
        if handle.generation != self.generation {
            return Err(SearchError::StaleSession);
        }
        let Some(session) = self.session.as_mut() else {
            return Err(SearchError::StaleSession);
        };
        if session.status.is_terminal() {
            return Ok(session.status);
        }

        let status = match session.advance(&self.grid) {
            Ok(status) => status,
            Err(e) => {
                log::error!("{} search aborted: {e}", session.kind);
                self.abandon();
                return Err(e);
            }
        };
        if !status.is_terminal() {
            return Ok(status);
        }

        if status == Status::Found {
            let interior = session.path.len().saturating_sub(1);
            for &p in session.path.iter().take(interior).skip(1) {
                // Markers crossed by an unmarked search keep their kind.
                if matches!(self.grid.kind(p), Some(CellKind::Start | CellKind::End)) {
                    continue;
                }
                self.grid.set_kind(p, CellKind::Pathway)?;
                observer.pathway_cell(p);
            }
        }

        let cost = session
            .path
            .windows(2)
            .map(|w| session.metric.distance(w[0], w[1]))
            .sum();
        let summary = SearchSummary {
            strategy: session.kind,
            status,
            iterations: session.iterations,
            path_len: session.path.len(),
            cost,
        };
        log::info!(
            "{} search {:?} after {} iterations (path of {} cells)",
            summary.strategy,
            summary.status,
            summary.iterations,
            summary.path_len
        );
        observer.finished(&summary);
        Ok(status)
    }

    /// Step until the session is terminal.
    pub fn solve<O: SearchObserver + ?Sized>(
        &mut self,
        handle: SessionHandle,
        observer: &mut O,
    ) -> Result<Status, SearchError> {
        loop {
            let status = self.step(handle, observer)?;
            if status.is_terminal() {
                return Ok(status);
            }
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    fn index_of(&self, p: Point) -> Result<usize, SearchError> {
        self.grid.index(p).ok_or(SearchError::OutOfRange(GridError::OutOfRange {
            pos: p,
            width: self.grid.width(),
            height: self.grid.height(),
        }))
    }

    fn session(&self, handle: SessionHandle) -> Result<&Session, SearchError> {
        if handle.generation != self.generation {
            return Err(SearchError::StaleSession);
        }
        self.session.as_ref().ok_or(SearchError::StaleSession)
    }

    /// Whether `handle` names the active session.
    pub fn is_active(&self, handle: SessionHandle) -> bool {
        self.session(handle).is_ok()
    }

    pub fn status(&self, handle: SessionHandle) -> Result<Status, SearchError> {
        Ok(self.session(handle)?.status)
    }

    pub fn strategy(&self, handle: SessionHandle) -> Result<StrategyKind, SearchError> {
        Ok(self.session(handle)?.kind)
    }

    /// Steps taken so far; terminal repeats are not counted.
    pub fn iteration_count(&self, handle: SessionHandle) -> Result<u32, SearchError> {
        Ok(self.session(handle)?.iterations)
    }

    /// The found path, start to end inclusive.
    pub fn get_path(&self, handle: SessionHandle) -> Result<&[Point], SearchError> {
        let session = self.session(handle)?;
        match session.status {
            Status::Found => Ok(&session.path),
            other => Err(SearchError::PathUnavailable(other)),
        }
    }

    /// Follow the active session's parent links from `end` back to its
    /// start, returning the cells start to `end` inclusive.
    pub fn reconstruct_path(&self, end: Point) -> Result<Vec<Point>, SearchError> {
        let session = self.session.as_ref().ok_or(SearchError::StaleSession)?;
        session.reconstruct(&self.grid, self.index_of(end)?)
    }

    /// Search state of the cell at `p` in the active session.
    pub fn record(&self, p: Point) -> Option<CellRecord> {
        let session = self.session.as_ref()?;
        let node = session.nodes[self.grid.index(p)?];
        Some(CellRecord {
            g: node.g,
            f: node.f,
            parent: node.parent.map(|i| self.grid.point(i)),
            opened: node.opened,
            closed: node.closed,
        })
    }

    /// Cells currently waiting in the frontier (open set or FIFO queue).
    pub fn frontier_len(&self) -> usize {
        self.session.as_ref().map_or(0, |s| match s.kind {
            StrategyKind::BreadthFirst => s.queue.len(),
            _ => s.open.len(),
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::observer::SearchEvent;
    use crate::heuristic::manhattan;

    /// Solve between the grid's markers, or corner to corner when unmarked.
    pub(crate) fn run(grid: Grid, kind: StrategyKind, movement: Movement) -> (Status, Vec<Point>, u32) {
        let start = grid.start().unwrap_or(Point::new(0, 0));
        let end = grid
            .end()
            .unwrap_or(Point::new(grid.width() - 1, grid.height() - 1));
        let mut engine = SearchEngine::new(grid, SearchConfig { movement });
        let h = engine.find_path(start, end, kind).unwrap();
        let status = engine.solve(h, &mut ()).unwrap();
        let path = engine.get_path(h).map(<[Point]>::to_vec).unwrap_or_default();
        (status, path, engine.iteration_count(h).unwrap())
    }

    fn wall_row(grid: &mut Grid, y: i32, gap: Option<i32>) {
        for x in 0..grid.width() {
            if Some(x) != gap {
                grid.set_kind(Point::new(x, y), CellKind::Wall).unwrap();
            }
        }
    }

    #[test]
    fn five_by_five_corner_to_corner() {
        for kind in StrategyKind::ALL {
            let grid = Grid::new(5, 5).unwrap();
            let (status, path, iterations) = run(grid.clone(), kind, Movement::FourWay);
            assert_eq!(status, Status::Found, "{kind}");
            assert!(iterations <= 25, "{kind}: {iterations}");
            assert_eq!(path.first(), Some(&Point::new(0, 0)));
            assert_eq!(path.last(), Some(&Point::new(4, 4)));
            assert!(path.iter().all(|&p| grid.is_traversable(p)));
            if kind != StrategyKind::ThetaStar {
                assert_eq!(path.len(), 9, "{kind}");
            }
        }
    }

    #[test]
    fn path_length_matches_manhattan_on_open_grid() {
        let kinds = [
            StrategyKind::AStar,
            StrategyKind::Dijkstra,
            StrategyKind::BreadthFirst,
        ];
        let grid = Grid::new(6, 4).unwrap();
        let pairs = [
            (Point::new(0, 0), Point::new(5, 3)),
            (Point::new(5, 0), Point::new(0, 3)),
            (Point::new(2, 1), Point::new(3, 1)),
            (Point::new(4, 3), Point::new(1, 0)),
        ];
        for kind in kinds {
            for (start, end) in pairs {
                let mut engine = SearchEngine::new(grid.clone(), SearchConfig::default());
                let h = engine.find_path(start, end, kind).unwrap();
                assert_eq!(engine.solve(h, &mut ()).unwrap(), Status::Found);
                let path = engine.get_path(h).unwrap();
                assert_eq!((path.len() - 1) as f64, manhattan(start, end), "{kind}");
                for w in path.windows(2) {
                    assert_eq!(manhattan(w[0], w[1]), 1.0, "{kind}: {} -> {}", w[0], w[1]);
                }
            }
        }
    }

    #[test]
    fn gap_in_wall_row_is_used() {
        for kind in StrategyKind::ALL {
            let mut grid = Grid::new(5, 5).unwrap();
            wall_row(&mut grid, 2, Some(2));
            let (status, path, _) = run(grid.clone(), kind, Movement::FourWay);
            assert_eq!(status, Status::Found, "{kind}");
            if kind == StrategyKind::ThetaStar {
                // Waypoints may skip the gap, but every leg stays visible.
                assert!(path.windows(2).all(|w| grid.line_of_sight(w[0], w[1])));
            } else {
                assert!(path.contains(&Point::new(2, 2)), "{kind}: {path:?}");
            }
        }
    }

    #[test]
    fn solid_wall_row_fails_every_strategy() {
        for movement in Movement::ALL {
            for kind in StrategyKind::ALL {
                let mut grid = Grid::new(5, 5).unwrap();
                wall_row(&mut grid, 2, None);
                let mut engine = SearchEngine::new(grid, SearchConfig { movement });
                let h = engine
                    .find_path(Point::new(0, 0), Point::new(4, 4), kind)
                    .unwrap();
                let mut events = Vec::new();
                assert_eq!(engine.solve(h, &mut events).unwrap(), Status::Failed);
                assert!(matches!(
                    engine.get_path(h),
                    Err(SearchError::PathUnavailable(Status::Failed))
                ));
                assert_eq!(events.len(), 1);
                assert!(matches!(
                    &events[0],
                    SearchEvent::Finished(SearchSummary {
                        status: Status::Failed,
                        path_len: 0,
                        ..
                    })
                ));
            }
        }
    }

    #[test]
    fn stepping_after_terminal_changes_nothing() {
        for kind in StrategyKind::ALL {
            let grid = Grid::new(4, 4).unwrap();
            let mut engine = SearchEngine::new(grid, SearchConfig::default());
            let h = engine
                .find_path(Point::new(0, 0), Point::new(3, 2), kind)
                .unwrap();
            engine.solve(h, &mut ()).unwrap();
            let path = engine.get_path(h).unwrap().to_vec();
            let iterations = engine.iteration_count(h).unwrap();
            let records: Vec<_> = engine
                .grid()
                .bounds()
                .iter()
                .map(|p| engine.record(p))
                .collect();
            let map = engine.grid().to_string();

            let mut events = Vec::new();
            for _ in 0..3 {
                assert_eq!(engine.step(h, &mut events).unwrap(), Status::Found);
            }
            assert!(events.is_empty());
            assert_eq!(engine.get_path(h).unwrap(), path.as_slice());
            assert_eq!(engine.iteration_count(h).unwrap(), iterations);
            let after: Vec<_> = engine
                .grid()
                .bounds()
                .iter()
                .map(|p| engine.record(p))
                .collect();
            assert_eq!(records, after);
            assert_eq!(engine.grid().to_string(), map);
        }
    }

    #[test]
    fn iteration_count_grows_once_per_step() {
        let grid = Grid::new(5, 5).unwrap();
        let mut engine = SearchEngine::new(grid, SearchConfig::default());
        let h = engine
            .find_path(Point::new(0, 0), Point::new(4, 4), StrategyKind::AStar)
            .unwrap();
        assert_eq!(engine.iteration_count(h).unwrap(), 0);
        assert_eq!(engine.status(h).unwrap(), Status::Running);
        let mut steps = 0;
        while engine.step(h, &mut ()).unwrap() == Status::Running {
            steps += 1;
            assert_eq!(engine.iteration_count(h).unwrap(), steps);
        }
        assert_eq!(engine.iteration_count(h).unwrap(), steps + 1);
    }

    #[test]
    fn found_path_marks_interior_cells() {
        let grid = Grid::parse("S...E").unwrap();
        let mut engine = SearchEngine::new(grid, SearchConfig::default());
        let h = engine.find_marked_path(StrategyKind::AStar).unwrap();
        let mut events = Vec::new();
        assert_eq!(engine.solve(h, &mut events).unwrap(), Status::Found);
        assert_eq!(engine.grid().to_string(), "S***E");
        assert_eq!(
            &events[..3],
            &[
                SearchEvent::Pathway(Point::new(1, 0)),
                SearchEvent::Pathway(Point::new(2, 0)),
                SearchEvent::Pathway(Point::new(3, 0)),
            ]
        );
        let SearchEvent::Finished(summary) = &events[3] else {
            panic!("expected a summary, got {:?}", events[3]);
        };
        assert_eq!(summary.path_len, 5);
        assert_eq!(summary.cost, 4.0);
        assert_eq!(events.len(), 4);

        // A new search clears the previous pathway first.
        let h2 = engine.find_marked_path(StrategyKind::BreadthFirst).unwrap();
        assert_eq!(engine.grid().to_string(), "S...E");
        assert!(!engine.is_active(h));
        assert!(engine.is_active(h2));
    }

    #[test]
    fn found_path_through_a_marker_keeps_it() {
        let grid = Grid::parse("..S..\n....E").unwrap();
        let mut engine = SearchEngine::new(grid, SearchConfig::default());
        let h = engine
            .find_path(Point::new(0, 0), Point::new(4, 0), StrategyKind::AStar)
            .unwrap();
        let mut events = Vec::new();
        assert_eq!(engine.solve(h, &mut events).unwrap(), Status::Found);
        assert_eq!(engine.get_path(h).unwrap().len(), 5);
        assert_eq!(engine.grid().to_string(), ".*S*.\n....E");
        assert_eq!(engine.grid().start(), Some(Point::new(2, 0)));
        assert_eq!(engine.grid().end(), Some(Point::new(4, 1)));
        let marked: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                SearchEvent::Pathway(p) => Some(*p),
                _ => None,
            })
            .collect();
        assert_eq!(marked, [Point::new(1, 0), Point::new(3, 0)]);
    }

    #[test]
    fn invalid_requests_change_nothing() {
        let mut grid = Grid::parse("S*#\n..E").unwrap();
        grid.set_kind(Point::new(0, 1), CellKind::Wall).unwrap();
        let mut engine = SearchEngine::new(grid, SearchConfig::default());
        let before = engine.grid().to_string();

        let err = engine
            .find_path(Point::new(1, 1), Point::new(1, 1), StrategyKind::AStar)
            .unwrap_err();
        assert_eq!(
            err,
            SearchError::InvalidArguments(InvalidArgument::SameEndpoints(Point::new(1, 1)))
        );
        let err = engine
            .find_path(Point::new(0, 0), Point::new(2, 0), StrategyKind::AStar)
            .unwrap_err();
        assert_eq!(
            err,
            SearchError::InvalidArguments(InvalidArgument::Untraversable(Point::new(2, 0)))
        );
        assert!(matches!(
            engine.find_path(Point::new(0, 0), Point::new(3, 0), StrategyKind::AStar),
            Err(SearchError::OutOfRange(_))
        ));
        assert_eq!(engine.grid().to_string(), before);
        assert!(engine.record(Point::new(0, 0)).is_none());
    }

    #[test]
    fn missing_markers_are_invalid() {
        let mut engine = SearchEngine::new(Grid::new(3, 3).unwrap(), SearchConfig::default());
        assert_eq!(
            engine.find_marked_path(StrategyKind::AStar),
            Err(SearchError::InvalidArguments(InvalidArgument::MissingStart))
        );
        engine
            .grid_mut()
            .set_kind(Point::new(0, 0), CellKind::Start)
            .unwrap();
        assert_eq!(
            engine.find_marked_path(StrategyKind::AStar),
            Err(SearchError::InvalidArguments(InvalidArgument::MissingEnd))
        );
    }

    #[test]
    fn editing_the_grid_abandons_the_session() {
        let mut engine = SearchEngine::new(Grid::new(4, 4).unwrap(), SearchConfig::default());
        let h = engine
            .find_path(Point::new(0, 0), Point::new(3, 3), StrategyKind::Dijkstra)
            .unwrap();
        engine.step(h, &mut ()).unwrap();
        engine
            .grid_mut()
            .set_kind(Point::new(1, 1), CellKind::Wall)
            .unwrap();
        assert_eq!(engine.step(h, &mut ()), Err(SearchError::StaleSession));
        assert_eq!(engine.iteration_count(h), Err(SearchError::StaleSession));
        assert!(engine.record(Point::new(0, 0)).is_none());
    }

    #[test]
    fn get_path_requires_found() {
        let mut engine = SearchEngine::new(Grid::new(4, 4).unwrap(), SearchConfig::default());
        let h = engine
            .find_path(Point::new(0, 0), Point::new(3, 3), StrategyKind::AStar)
            .unwrap();
        assert_eq!(
            engine.get_path(h),
            Err(SearchError::PathUnavailable(Status::Running))
        );
    }

    #[test]
    fn reconstruct_mid_search_and_broken_chain() {
        let mut engine = SearchEngine::new(Grid::new(5, 1).unwrap(), SearchConfig::default());
        let h = engine
            .find_path(Point::new(0, 0), Point::new(4, 0), StrategyKind::BreadthFirst)
            .unwrap();
        engine.step(h, &mut ()).unwrap();
        engine.step(h, &mut ()).unwrap();
        assert_eq!(
            engine.reconstruct_path(Point::new(2, 0)).unwrap(),
            vec![Point::new(0, 0), Point::new(1, 0), Point::new(2, 0)]
        );
        assert_eq!(
            engine.reconstruct_path(Point::new(4, 0)),
            Err(SearchError::BrokenChain {
                at: Point::new(4, 0)
            })
        );
        assert!(matches!(
            engine.reconstruct_path(Point::new(9, 0)),
            Err(SearchError::OutOfRange(_))
        ));
    }

    #[test]
    fn paths_are_connected_per_topology() {
        let text = "\
S.#.....
..#.##..
..#..#..
.....#.E";
        for movement in Movement::ALL {
            for kind in StrategyKind::ALL {
                let grid = Grid::parse(text).unwrap();
                let (status, path, _) = run(grid.clone(), kind, movement);
                assert_eq!(status, Status::Found, "{kind} {movement}");
                for w in path.windows(2) {
                    if kind == StrategyKind::ThetaStar {
                        assert!(grid.line_of_sight(w[0], w[1]), "{kind} {movement}");
                    } else {
                        let mut nbuf = Vec::new();
                        grid.traversable_neighbors(w[0], movement.diagonals(), &mut nbuf);
                        assert!(nbuf.contains(&w[1]), "{kind} {movement}: {} -> {}", w[0], w[1]);
                    }
                }
            }
        }
    }

    #[test]
    fn movement_change_applies_to_next_search() {
        let mut engine = SearchEngine::new(Grid::new(4, 4).unwrap(), SearchConfig::default());
        engine.set_config(SearchConfig {
            movement: Movement::EightWay,
        });
        let h = engine
            .find_path(Point::new(0, 0), Point::new(3, 3), StrategyKind::BreadthFirst)
            .unwrap();
        engine.solve(h, &mut ()).unwrap();
        assert_eq!(engine.get_path(h).unwrap().len(), 4);
        assert_eq!(engine.strategy(h).unwrap(), StrategyKind::BreadthFirst);
    }
}
