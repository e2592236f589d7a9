//! Colour palette for a dark terminal background.

use crate::screen::Color;

// -- Cells --

pub const OPEN_FG: Color = Color::from_rgb(110, 115, 125);
pub const WALL_FG: Color = Color::from_rgb(150, 155, 170);
pub const START_FG: Color = Color::from_rgb(80, 200, 80);
pub const END_FG: Color = Color::from_rgb(255, 85, 85);
pub const PATH_FG: Color = Color::from_rgb(220, 200, 60);

// -- Search tints --

/// Background of cells waiting in the frontier.
pub const OPEN_SET_BG: Color = Color::from_rgb(30, 60, 45);
/// Background of cells already expanded.
pub const CLOSED_BG: Color = Color::from_rgb(40, 42, 70);

// -- Text --

pub const FG: Color = Color::Default;
pub const FG_DIM: Color = Color::from_rgb(98, 100, 106);
pub const FG_EMPH: Color = Color::from_rgb(248, 248, 242);
pub const CONFIRM: Color = Color::from_rgb(80, 210, 210);
pub const ERROR: Color = Color::from_rgb(255, 85, 85);
