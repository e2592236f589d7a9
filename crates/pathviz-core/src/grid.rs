//! The [`Grid`] type: a fixed-size rectangle of [`CellKind`]s.
//!
//! Topology is immutable once created: editing a cell changes its kind,
//! never the set of cells. The grid tracks the unique Start and End cells
//! so that at most one of each exists at any time.

use std::fmt;

use crate::cell::{Cell, CellKind};
use crate::direction::Direction;
use crate::error::GridError;
use crate::geom::{Point, Range};

/// A rectangular grid of cells with origin (0, 0).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    bounds: Range,
    kinds: Vec<CellKind>,
    start: Option<Point>,
    end: Option<Point>,
}

impl Grid {
    /// Create a `width` x `height` grid with every cell open.
    pub fn new(width: i32, height: i32) -> Result<Self, GridError> {
        if width <= 0 || height <= 0 {
            return Err(GridError::InvalidSize { width, height });
        }
        let bounds = Range::new(0, 0, width, height);
        Ok(Self {
            bounds,
            kinds: vec![CellKind::Open; bounds.len()],
            start: None,
            end: None,
        })
    }

    /// Parse a map where each line is a row of `.`, `#`, `S`, `E` or `*`.
    ///
    /// Trailing whitespace and blank lines are ignored.
    pub fn parse(text: &str) -> Result<Self, GridError> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim_end)
            .filter(|l| !l.is_empty())
            .collect();
        let Some(first) = rows.first() else {
            return Err(GridError::EmptyMap);
        };
        let width = first.chars().count() as i32;
        let mut grid = Self::new(width, rows.len() as i32)?;

        for (y, row) in rows.iter().enumerate() {
            let y = y as i32;
            let found = row.chars().count() as i32;
            if found != width {
                return Err(GridError::InconsistentWidth {
                    row: y,
                    expected: width,
                    found,
                });
            }
            for (x, ch) in row.chars().enumerate() {
                let pos = Point::new(x as i32, y);
                let kind = CellKind::from_char(ch).ok_or(GridError::InvalidChar { ch, pos })?;
                let taken = match kind {
                    CellKind::Start => grid.start.is_some(),
                    CellKind::End => grid.end.is_some(),
                    _ => false,
                };
                if taken {
                    return Err(GridError::DuplicateMarker { kind, pos });
                }
                grid.set_kind(pos, kind)?;
            }
        }
        Ok(grid)
    }

    // -----------------------------------------------------------------------
    // Dimensions and indexing
    // -----------------------------------------------------------------------

    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Whether `p` names a cell of this grid.
    #[inline]
    pub fn exists(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    /// Row-major flat index of `p`, or `None` if out of range.
    #[inline]
    pub fn index(&self, p: Point) -> Option<usize> {
        if !self.exists(p) {
            return None;
        }
        Some(p.y as usize * self.width() as usize + p.x as usize)
    }

    /// Inverse of [`index`](Self::index).
    #[inline]
    pub fn point(&self, idx: usize) -> Point {
        let w = self.width() as usize;
        Point::new((idx % w) as i32, (idx / w) as i32)
    }

    fn out_of_range(&self, pos: Point) -> GridError {
        GridError::OutOfRange {
            pos,
            width: self.width(),
            height: self.height(),
        }
    }

    // -----------------------------------------------------------------------
    // Cell queries and mutation
    // -----------------------------------------------------------------------

    /// Kind of the cell at `p`, or `None` if out of range.
    #[inline]
    pub fn kind(&self, p: Point) -> Option<CellKind> {
        self.index(p).map(|i| self.kinds[i])
    }

    /// The cell at `p`.
    pub fn cell_at(&self, p: Point) -> Result<Cell, GridError> {
        self.kind(p)
            .map(|kind| Cell { pos: p, kind })
            .ok_or_else(|| self.out_of_range(p))
    }

    /// Whether `p` exists and is not a wall.
    #[inline]
    pub fn is_traversable(&self, p: Point) -> bool {
        self.kind(p).is_some_and(CellKind::is_traversable)
    }

    /// Change the kind of the cell at `p`.
    ///
    /// Setting a Start (or End) demotes the previous Start (or End) cell to
    /// Open. Overwriting the current Start or End with anything else drops
    /// that marker.
    pub fn set_kind(&mut self, p: Point, kind: CellKind) -> Result<(), GridError> {
        let i = self.index(p).ok_or_else(|| self.out_of_range(p))?;
        let prev = self.kinds[i];
        if prev == kind {
            return Ok(());
        }
        match prev {
            CellKind::Start => self.start = None,
            CellKind::End => self.end = None,
            _ => {}
        }
        let displaced = match kind {
            CellKind::Start => self.start.replace(p),
            CellKind::End => self.end.replace(p),
            _ => None,
        };
        if let Some(old) = displaced.and_then(|old| self.index(old)) {
            self.kinds[old] = CellKind::Open;
        }
        self.kinds[i] = kind;
        Ok(())
    }

    /// Position of the Start cell, if one is set.
    #[inline]
    pub fn start(&self) -> Option<Point> {
        self.start
    }

    /// Position of the End cell, if one is set.
    #[inline]
    pub fn end(&self) -> Option<Point> {
        self.end
    }

    /// Turn every Pathway cell back into an Open cell.
    pub fn clear_pathway(&mut self) {
        for k in self.kinds.iter_mut() {
            if *k == CellKind::Pathway {
                *k = CellKind::Open;
            }
        }
    }

    /// Reset every cell to Open and drop both markers.
    pub fn clear(&mut self) {
        self.kinds.fill(CellKind::Open);
        self.start = None;
        self.end = None;
    }

    /// Reset every cell except the Start and End markers to Open.
    pub fn clear_keeping_markers(&mut self) {
        for k in self.kinds.iter_mut() {
            if !matches!(k, CellKind::Start | CellKind::End) {
                *k = CellKind::Open;
            }
        }
    }

    /// Number of cells of the given kind.
    pub fn count(&self, kind: CellKind) -> usize {
        self.kinds.iter().filter(|&&k| k == kind).count()
    }

    /// Row-major iterator over all cells.
    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.bounds
            .iter()
            .zip(self.kinds.iter())
            .map(|(pos, &kind)| Cell { pos, kind })
    }

    // -----------------------------------------------------------------------
    // Topology
    // -----------------------------------------------------------------------

    /// Append the existing neighbours of `p` into `buf`, in the fixed order
    /// N, E, S, W and then (with `diagonals`) NE, SE, SW, NW.
    /// The caller clears `buf` before calling.
    pub fn neighbors(&self, p: Point, diagonals: bool, buf: &mut Vec<Point>) {
        let dirs: &[Direction] = if diagonals {
            &Direction::ALL
        } else {
            &Direction::CARDINAL
        };
        for dir in dirs {
            let n = p + dir.offset();
            if self.exists(n) {
                buf.push(n);
            }
        }
    }

    /// Like [`neighbors`](Self::neighbors) but skipping walls.
    pub fn traversable_neighbors(&self, p: Point, diagonals: bool, buf: &mut Vec<Point>) {
        let from = buf.len();
        self.neighbors(p, diagonals, buf);
        let mut keep = from;
        for i in from..buf.len() {
            if self.is_traversable(buf[i]) {
                buf[keep] = buf[i];
                keep += 1;
            }
        }
        buf.truncate(keep);
    }

    /// Whether the segment between the centres of `a` and `b` crosses no wall.
    ///
    /// Every cell the segment touches is tested. When the segment passes
    /// exactly through a cell corner, both cells sharing that corner must be
    /// open. Out-of-range endpoints have no line of sight.
    pub fn line_of_sight(&self, a: Point, b: Point) -> bool {
        if !self.exists(a) || !self.exists(b) {
            return false;
        }
        let dx = (b.x - a.x).abs();
        let dy = (b.y - a.y).abs();
        let sx = (b.x - a.x).signum();
        let sy = (b.y - a.y).signum();
        let (mut x, mut y) = (a.x, a.y);
        let mut error = dx - dy;
        let mut remaining = 1 + dx + dy;

        while remaining > 0 {
            if !self.is_traversable(Point::new(x, y)) {
                return false;
            }
            if error > 0 {
                x += sx;
                error -= 2 * dy;
            } else if error < 0 {
                y += sy;
                error += 2 * dx;
            } else {
                if remaining > 1
                    && (!self.is_traversable(Point::new(x + sx, y))
                        || !self.is_traversable(Point::new(x, y + sy)))
                {
                    return false;
                }
                x += sx;
                y += sy;
                error += 2 * dx - 2 * dy;
                remaining -= 1;
            }
            remaining -= 1;
        }
        true
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.kinds.chunks(self.width() as usize).enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            for k in row {
                write!(f, "{}", k.to_char())?;
            }
        }
        Ok(())
    }
}
