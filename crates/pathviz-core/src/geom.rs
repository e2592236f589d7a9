//! Cell coordinates ([`Point`]) and rectangular areas of cells ([`Range`]).

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Sub};

/// Column/row coordinates of one cell. Rows count downwards from the top,
/// so moving "up" decrements `y`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// The top-left cell.
    pub const ZERO: Point = Point::new(0, 0);

    #[inline]
    pub const fn new(x: i32, y: i32) -> Point {
        Point { x, y }
    }

    /// The cell `dx` columns and `dy` rows away.
    #[inline]
    pub const fn shift(self, dx: i32, dy: i32) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }

    /// True for the eight cells touching `self` by an edge or a corner.
    pub fn is_adjacent(self, other: Point) -> bool {
        let (dx, dy) = ((other.x - self.x).abs(), (other.y - self.y).abs());
        dx.max(dy) == 1
    }
}

/// Cells sort by row first, the same order they have in a grid buffer.
impl Ord for Point {
    fn cmp(&self, other: &Point) -> Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Point) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        self.shift(rhs.x, rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        self.shift(-rhs.x, -rhs.y)
    }
}

/// The cells with `min.x <= x < max.x` and `min.y <= y < max.y`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    pub min: Point,
    pub max: Point,
}

impl Range {
    /// Builds the range spanned by corners `(x0, y0)` and `(x1, y1)`, in
    /// either order.
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Range {
        let (left, right) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        let (top, bottom) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
        Range {
            min: Point::new(left, top),
            max: Point::new(right, bottom),
        }
    }

    /// Width and height packed into a point.
    pub fn size(self) -> Point {
        Point::new(self.width(), self.height())
    }

    pub fn width(self) -> i32 {
        self.max.x - self.min.x
    }

    pub fn height(self) -> i32 {
        self.max.y - self.min.y
    }

    /// Number of cells covered.
    pub fn len(self) -> usize {
        let w = usize::try_from(self.width()).unwrap_or(0);
        let h = usize::try_from(self.height()).unwrap_or(0);
        w * h
    }

    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    pub fn contains(self, p: Point) -> bool {
        (self.min.x..self.max.x).contains(&p.x) && (self.min.y..self.max.y).contains(&p.y)
    }

    /// Visits every cell, row by row.
    pub fn iter(self) -> RangeIter {
        RangeIter {
            range: self,
            next: 0,
            end: self.len(),
        }
    }
}

impl IntoIterator for Range {
    type Item = Point;
    type IntoIter = RangeIter;

    fn into_iter(self) -> RangeIter {
        self.iter()
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.min, self.max)
    }
}

/// Iterator returned by [`Range::iter`].
#[derive(Clone, Debug)]
pub struct RangeIter {
    range: Range,
    next: usize,
    end: usize,
}

impl RangeIter {
    fn point_at(&self, i: usize) -> Point {
        // `i < len`, so the width is positive and both offsets fit in i32.
        let w = self.range.width() as usize;
        self.range.min.shift((i % w) as i32, (i / w) as i32)
    }
}

impl Iterator for RangeIter {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.next >= self.end {
            return None;
        }
        let p = self.point_at(self.next);
        self.next += 1;
        Some(p)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.end - self.next;
        (left, Some(left))
    }
}

impl DoubleEndedIterator for RangeIter {
    fn next_back(&mut self) -> Option<Point> {
        if self.next >= self.end {
            return None;
        }
        self.end -= 1;
        Some(self.point_at(self.end))
    }
}

impl ExactSizeIterator for RangeIter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shifting_and_offsets() {
        let p = Point::new(4, 1);
        assert_eq!(p.shift(-4, 2), Point::new(0, 3));
        assert_eq!(p + Point::new(1, 1), Point::new(5, 2));
        assert_eq!(p - Point::new(4, 1), Point::ZERO);
    }

    #[test]
    fn neighbours_touch_by_edge_or_corner() {
        let c = Point::new(5, 5);
        assert!(c.is_adjacent(Point::new(4, 4)));
        assert!(c.is_adjacent(Point::new(5, 6)));
        assert!(!c.is_adjacent(c));
        assert!(!c.is_adjacent(Point::new(7, 5)));
    }

    #[test]
    fn corners_in_any_order() {
        let r = Range::new(3, 2, 0, 0);
        assert_eq!(r.min, Point::ZERO);
        assert_eq!(r.size(), Point::new(3, 2));
        assert_eq!(r.len(), 6);
        assert!(r.contains(Point::new(2, 1)));
        assert!(!r.contains(Point::new(3, 1)));
        assert!(!r.contains(Point::new(1, -1)));
    }

    #[test]
    fn cells_come_out_row_by_row() {
        let r = Range::new(1, 1, 3, 3);
        let cells: Vec<Point> = r.into_iter().collect();
        assert_eq!(
            cells,
            [
                Point::new(1, 1),
                Point::new(2, 1),
                Point::new(1, 2),
                Point::new(2, 2)
            ]
        );
        assert!(cells.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(r.iter().rev().next(), Some(Point::new(2, 2)));
        assert_eq!(r.iter().len(), 4);
    }

    #[test]
    fn degenerate_range_is_empty() {
        let r = Range::new(2, 0, 2, 7);
        assert!(r.is_empty());
        assert_eq!(r.len(), 0);
        assert_eq!(r.iter().next(), None);
    }
}
