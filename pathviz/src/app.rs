//! Elm-style model of the visualizer: [`Visualizer::update`] folds input
//! into the state, [`Visualizer::draw`] renders it into a [`Screen`].

use pathviz_core::{CellKind, Direction, Grid, Point};
use pathviz_search::{
    InvalidArgument, SearchConfig, SearchEngine, SearchError, SearchObserver, SearchSummary,
    SessionHandle, Status, StrategyKind,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::colors::*;
use crate::config::Config;
use crate::error::AppError;
use crate::log::{LogStyle, MessageLog};
use crate::msg::{Effect, Key, MouseAction, Msg};
use crate::scatter::scatter_walls;
use crate::screen::{Glyph, Screen, Style};

/// Screen row of the status bar.
pub const STATUS_Y: i32 = 0;
/// Screen offset of the grid's (0, 0) cell.
pub const MAP_ORIGIN: Point = Point::new(0, 1);
/// Narrowest screen the visualizer draws.
pub const MIN_WIDTH: i32 = 82;

const HELP_LINE: &str =
    "hjkl:move w:wall s/e:ends ⏎:run f:solve tab:algo m:moves r:walls c/x:clear q:quit";

const MISSING_ENDS: &str = "Path ends need to be set before a path can be found.";

/// Turns search notifications into log messages.
struct LogObserver<'a> {
    log: &'a mut MessageLog,
}

impl SearchObserver for LogObserver<'_> {
    fn finished(&mut self, summary: &SearchSummary) {
        match summary.status {
            Status::Found => self.log.push(
                &format!(
                    "{} pathfinding completed after {} iterations ({} cells).",
                    summary.strategy, summary.iterations, summary.path_len
                ),
                LogStyle::Confirm,
            ),
            _ => self.log.error(&format!(
                "Unable to find a valid pathway using {}, after {} iterations.",
                summary.strategy, summary.iterations
            )),
        }
    }
}

/// The visualizer model.
pub struct Visualizer {
    engine: SearchEngine,
    algorithm: StrategyKind,
    cursor: Point,
    handle: Option<SessionHandle>,
    animating: bool,
    log: MessageLog,
    rng: StdRng,
    wall_density: f64,
}

impl Visualizer {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        Ok(Self::with_grid(config.build_grid()?, config))
    }

    /// Start from `grid` instead of the one `config` describes.
    pub fn with_grid(grid: Grid, config: &Config) -> Self {
        let cursor = grid.start().unwrap_or(Point::ZERO);
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        let mut log = MessageLog::new();
        log.log(&format!(
            "{}x{} grid, {} with {} moves.",
            grid.width(),
            grid.height(),
            config.algorithm,
            config.movement
        ));
        Self {
            engine: SearchEngine::new(
                grid,
                SearchConfig {
                    movement: config.movement,
                },
            ),
            algorithm: config.algorithm,
            cursor,
            handle: None,
            animating: false,
            log,
            rng,
            wall_density: config.wall_density,
        }
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        self.engine.grid()
    }

    #[inline]
    pub fn engine(&self) -> &SearchEngine {
        &self.engine
    }

    #[inline]
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    #[inline]
    pub fn algorithm(&self) -> StrategyKind {
        self.algorithm
    }

    #[inline]
    pub fn message_log(&self) -> &MessageLog {
        &self.log
    }

    /// Whether a search is stepping on each [`Msg::Tick`].
    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// Status of the current session, if one is alive.
    pub fn status(&self) -> Option<Status> {
        self.handle.and_then(|h| self.engine.status(h).ok())
    }

    /// Screen size needed to draw the full model.
    pub fn screen_size(&self) -> (i32, i32) {
        let grid = self.engine.grid();
        let width = (MAP_ORIGIN.x + grid.width()).max(MIN_WIDTH);
        // status, map, gap, log, help
        let height = MAP_ORIGIN.y + grid.height() + 1 + MessageLog::LINES as i32 + 1;
        (width, height)
    }

    // -------------------------------------------------------------------
    // Update
    // -------------------------------------------------------------------

    pub fn update(&mut self, msg: Msg) -> Option<Effect> {
        match msg {
            Msg::Init | Msg::Screen { .. } => None,
            Msg::Tick => {
                self.tick();
                None
            }
            Msg::KeyDown { key, ctrl } => self.handle_key(key, ctrl),
            Msg::Mouse { action, pos, ctrl } => {
                self.handle_mouse(action, pos, ctrl);
                None
            }
        }
    }

    fn handle_key(&mut self, key: Key, ctrl: bool) -> Option<Effect> {
        let (dx, dy) = match key {
            Key::ArrowUp | Key::Char('k') => (0, -1),
            Key::ArrowDown | Key::Char('j') => (0, 1),
            Key::ArrowLeft | Key::Char('h') => (-1, 0),
            Key::ArrowRight | Key::Char('l') => (1, 0),
            Key::Char('c') if ctrl => return Some(Effect::End),
            Key::Char('q') | Key::Escape => return Some(Effect::End),
            Key::Char('w') => {
                let kind = match self.grid().kind(self.cursor) {
                    Some(CellKind::Wall) => CellKind::Open,
                    _ => CellKind::Wall,
                };
                self.paint(self.cursor, kind);
                return None;
            }
            Key::Char('o') | Key::Backspace => {
                self.paint(self.cursor, CellKind::Open);
                return None;
            }
            Key::Char('s') => {
                self.paint(self.cursor, CellKind::Start);
                return None;
            }
            Key::Char('e') => {
                self.paint(self.cursor, CellKind::End);
                return None;
            }
            Key::Enter | Key::Char(' ') => {
                self.animating = self.begin_search().is_some();
                return None;
            }
            Key::Char('f') => {
                self.solve_now();
                return None;
            }
            Key::Tab => {
                self.algorithm = self.algorithm.next();
                self.log.log(&format!("Algorithm: {}.", self.algorithm));
                return None;
            }
            Key::Char('m') => {
                let movement = self.engine.config().movement.next();
                self.engine.set_config(SearchConfig { movement });
                self.log.log(&format!("Movement: {movement}."));
                return None;
            }
            Key::Char('c') => {
                self.abandon_search();
                self.engine.grid_mut().clear_pathway();
                self.log.log("Pathway cleared.");
                return None;
            }
            Key::Char('x') => {
                self.abandon_search();
                self.engine.grid_mut().clear_keeping_markers();
                self.log.log("Grid cleared.");
                return None;
            }
            Key::Char('r') => {
                self.abandon_search();
                let walls =
                    scatter_walls(self.engine.grid_mut(), self.wall_density, &mut self.rng);
                self.log.log(&format!("Scattered {walls} walls."));
                return None;
            }
            _ => return None,
        };
        self.move_cursor(dx, dy);
        None
    }

    fn handle_mouse(&mut self, action: MouseAction, pos: Point, ctrl: bool) {
        let p = pos - MAP_ORIGIN;
        if !self.grid().exists(p) {
            return;
        }
        self.cursor = p;
        let kind = match (action, ctrl) {
            (MouseAction::Main, false) => CellKind::Open,
            (MouseAction::Main, true) => CellKind::Start,
            (MouseAction::Secondary, false) => CellKind::Wall,
            (MouseAction::Secondary, true) => CellKind::End,
            (MouseAction::Release | MouseAction::Move, _) => return,
        };
        self.paint(p, kind);
    }

    fn move_cursor(&mut self, dx: i32, dy: i32) {
        let p = self.cursor.shift(dx, dy);
        if self.grid().exists(p) {
            self.cursor = p;
        }
    }

    /// Drop the session before an edit; a running one is reported.
    fn abandon_search(&mut self) {
        if self.handle.take().is_some() && self.animating {
            self.log.log("Search abandoned.");
        }
        self.animating = false;
    }

    fn paint(&mut self, p: Point, kind: CellKind) {
        if self.grid().kind(p) == Some(kind) {
            return;
        }
        self.abandon_search();
        if let Err(e) = self.engine.grid_mut().set_kind(p, kind) {
            self.log.error(&e.to_string());
        }
    }

    fn begin_search(&mut self) -> Option<SessionHandle> {
        self.animating = false;
        match self.engine.find_marked_path(self.algorithm) {
            Ok(h) => {
                self.handle = Some(h);
                self.log.log(&format!("Starting {} path find...", self.algorithm));
                Some(h)
            }
            Err(SearchError::InvalidArguments(
                InvalidArgument::MissingStart | InvalidArgument::MissingEnd,
            )) => {
                self.log.error(MISSING_ENDS);
                None
            }
            Err(e) => {
                self.log.error(&e.to_string());
                None
            }
        }
    }

    fn solve_now(&mut self) {
        let Some(h) = self.begin_search() else {
            return;
        };
        let mut observer = LogObserver { log: &mut self.log };
        if let Err(e) = self.engine.solve(h, &mut observer) {
            self.log.error(&e.to_string());
            self.handle = None;
        }
    }

    fn tick(&mut self) {
        if !self.animating {
            return;
        }
        let Some(h) = self.handle else {
            self.animating = false;
            return;
        };
        let mut observer = LogObserver { log: &mut self.log };
        match self.engine.step(h, &mut observer) {
            Ok(status) => self.animating = !status.is_terminal(),
            Err(e) => {
                self.log.error(&e.to_string());
                self.handle = None;
                self.animating = false;
            }
        }
    }

    // -------------------------------------------------------------------
    // Draw
    // -------------------------------------------------------------------

    pub fn draw(&self, screen: &mut Screen) {
        screen.fill(Glyph::default());
        self.draw_status(screen);
        self.draw_map(screen);
        self.draw_log(screen);
        let help_y = screen.height() - 1;
        screen.print(
            Point::new(0, help_y),
            HELP_LINE,
            Style::default().with_fg(FG_DIM),
        );
    }

    fn draw_status(&self, screen: &mut Screen) {
        let movement = self.engine.config().movement;
        let state = match self.handle {
            Some(h) => {
                let status = self.engine.status(h).map_or("stale", |s| match s {
                    Status::Running => "running",
                    Status::Found => "found",
                    Status::Failed => "failed",
                });
                let iterations = self.engine.iteration_count(h).unwrap_or(0);
                format!("{status}, {iterations} iterations")
            }
            None => "idle".to_string(),
        };
        let mut text = format!(
            "{} | {} | {} | {}",
            self.algorithm, movement, state, self.cursor
        );
        if let Some(r) = self.engine.record(self.cursor).filter(|r| r.reached()) {
            text.push_str(&format!(" g={:.2} f={:.2}", r.g, r.f));
        }
        screen.print(
            Point::new(0, STATUS_Y),
            &text,
            Style::default().with_fg(FG_EMPH).with_bold(),
        );
    }

    fn draw_map(&self, screen: &mut Screen) {
        for cell in self.grid().iter() {
            let (ch, fg) = match cell.kind {
                CellKind::Open => ('.', OPEN_FG),
                CellKind::Wall => ('#', WALL_FG),
                CellKind::Start => ('S', START_FG),
                CellKind::End => ('E', END_FG),
                CellKind::Pathway => ('*', PATH_FG),
            };
            let mut glyph = Glyph::new(ch, Style::default().with_fg(fg));
            if let Some(r) = self.engine.record(cell.pos) {
                if r.closed {
                    glyph.style = glyph.style.with_bg(CLOSED_BG);
                } else if r.opened {
                    glyph.style = glyph.style.with_bg(OPEN_SET_BG);
                }
            }
            if cell.pos == self.cursor {
                glyph.style = glyph.style.with_reverse();
                let parent = self.engine.record(cell.pos).and_then(|r| r.parent);
                if let Some(dir) = parent.and_then(|q| Direction::between(cell.pos, q)) {
                    glyph.ch = dir.arrow();
                }
            }
            screen.set(MAP_ORIGIN + cell.pos, glyph);
        }
    }

    fn draw_log(&self, screen: &mut Screen) {
        let top = MAP_ORIGIN.y + self.grid().height() + 1;
        for (i, entry) in self.log.entries().iter().enumerate() {
            let fg = match entry.style {
                LogStyle::Normal => FG,
                LogStyle::Confirm => CONFIRM,
                LogStyle::Error => ERROR,
            };
            screen.print(
                Point::new(0, top + i as i32),
                &entry.display(),
                Style::default().with_fg(fg),
            );
        }
    }
}
