//! Off-screen character buffer: [`Color`], [`Style`], [`Glyph`] and
//! [`Screen`], plus the diff used to redraw only what changed.

use pathviz_core::{Point, Range};

/// A cell colour. `Default` leaves the terminal's own colour in place.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Color {
    #[default]
    Default,
    Rgb(u8, u8, u8),
}

impl Color {
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Color {
        Color::Rgb(r, g, b)
    }
}

/// Colours and attributes of a glyph. Built with chained `with_*` calls
/// starting from `Style::default()`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Style {
    pub fg: Color,
    pub bg: Color,
    pub bold: bool,
    pub reverse: bool,
}

impl Style {
    pub const fn with_fg(self, fg: Color) -> Style {
        Style { fg, ..self }
    }

    pub const fn with_bg(self, bg: Color) -> Style {
        Style { bg, ..self }
    }

    pub const fn with_bold(self) -> Style {
        Style { bold: true, ..self }
    }

    pub const fn with_reverse(self) -> Style {
        Style {
            reverse: true,
            ..self
        }
    }
}

/// One screen position: a character and its style.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Glyph {
    pub ch: char,
    pub style: Style,
}

impl Glyph {
    pub const fn new(ch: char, style: Style) -> Glyph {
        Glyph { ch, style }
    }
}

impl Default for Glyph {
    fn default() -> Glyph {
        Glyph::new(' ', Style::default())
    }
}

/// A fixed-size buffer of glyphs. Writes outside the buffer are ignored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Screen {
    bounds: Range,
    glyphs: Vec<Glyph>,
}

impl Screen {
    /// A blank buffer. Negative sizes give an empty one.
    pub fn new(width: i32, height: i32) -> Screen {
        let bounds = Range::new(0, 0, width.max(0), height.max(0));
        let glyphs = vec![Glyph::default(); bounds.len()];
        Screen { bounds, glyphs }
    }

    pub fn bounds(&self) -> Range {
        self.bounds
    }

    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    fn index(&self, p: Point) -> Option<usize> {
        self.bounds
            .contains(p)
            .then(|| (p.y * self.width() + p.x) as usize)
    }

    /// The glyph at `p`, or a blank glyph outside the buffer.
    pub fn at(&self, p: Point) -> Glyph {
        self.index(p).map(|i| self.glyphs[i]).unwrap_or_default()
    }

    pub fn set(&mut self, p: Point, glyph: Glyph) {
        if let Some(i) = self.index(p) {
            self.glyphs[i] = glyph;
        }
    }

    pub fn fill(&mut self, glyph: Glyph) {
        self.glyphs.fill(glyph);
    }

    /// Write `text` left to right from `at`, clipped to the buffer's width.
    /// Returns the number of characters written.
    pub fn print(&mut self, at: Point, text: &str, style: Style) -> usize {
        let mut written = 0;
        let mut p = at;
        for ch in text.chars() {
            let Some(i) = self.index(p) else { break };
            self.glyphs[i] = Glyph::new(ch, style);
            written += 1;
            p.x += 1;
        }
        written
    }

    /// Text of row `y` with trailing blanks removed.
    pub fn row_text(&self, y: i32) -> String {
        let row: String = (0..self.width())
            .map(|x| self.at(Point::new(x, y)).ch)
            .collect();
        row.trim_end().to_string()
    }
}

/// A glyph that changed between two frames.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Change {
    pub pos: Point,
    pub glyph: Glyph,
}

/// Positions where `curr` differs from `prev`, in row-major order. A size
/// change reports every position of `curr`.
pub fn diff(prev: &Screen, curr: &Screen) -> Vec<Change> {
    let resized = prev.bounds != curr.bounds;
    curr.bounds
        .iter()
        .filter_map(|pos| {
            let glyph = curr.at(pos);
            (resized || prev.at(pos) != glyph).then_some(Change { pos, glyph })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_builders_stack() {
        let s = Style::default()
            .with_fg(Color::from_rgb(1, 2, 3))
            .with_reverse();
        assert_eq!(s.fg, Color::Rgb(1, 2, 3));
        assert_eq!(s.bg, Color::Default);
        assert!(s.reverse && !s.bold);
    }

    #[test]
    fn out_of_bounds_is_ignored() {
        let mut s = Screen::new(3, 2);
        s.set(Point::new(5, 5), Glyph::new('X', Style::default()));
        assert_eq!(s.at(Point::new(5, 5)), Glyph::default());
        assert_eq!(s.at(Point::new(-1, 0)), Glyph::default());
    }

    #[test]
    fn print_clips_to_width() {
        let mut s = Screen::new(4, 1);
        assert_eq!(s.print(Point::new(1, 0), "hello", Style::default()), 3);
        assert_eq!(s.row_text(0), " hel");
    }

    #[test]
    fn diff_reports_changed_glyphs_only() {
        let prev = Screen::new(3, 3);
        let mut curr = prev.clone();
        assert!(diff(&prev, &curr).is_empty());
        curr.set(Point::new(2, 1), Glyph::new('#', Style::default()));
        curr.set(Point::new(0, 2), Glyph::new('.', Style::default().with_bold()));
        let changes = diff(&prev, &curr);
        let positions: Vec<_> = changes.iter().map(|c| c.pos).collect();
        assert_eq!(positions, vec![Point::new(2, 1), Point::new(0, 2)]);
        assert!(changes[1].glyph.style.bold);
    }

    #[test]
    fn diff_after_resize_is_full() {
        let prev = Screen::new(2, 2);
        let curr = Screen::new(3, 2);
        assert_eq!(diff(&prev, &curr).len(), 6);
    }
}
