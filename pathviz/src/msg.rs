//! Input events delivered to the [`Visualizer`](crate::app::Visualizer).

use pathviz_core::Point;

/// A keyboard key.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Escape,
    Enter,
    Tab,
    Backspace,
    /// A printable character, space included.
    Char(char),
}

/// A mouse action.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MouseAction {
    /// Primary (left) button pressed or dragged.
    Main,
    /// Secondary (right) button pressed or dragged.
    Secondary,
    /// Button released.
    Release,
    /// Mouse moved with no button held.
    Move,
}

/// An input message.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Msg {
    /// Sent once when the loop starts.
    Init,
    KeyDown { key: Key, ctrl: bool },
    /// A mouse event at terminal column/row `pos`.
    Mouse {
        action: MouseAction,
        pos: Point,
        ctrl: bool,
    },
    /// The animation interval elapsed.
    Tick,
    /// The terminal was resized.
    Screen { width: i32, height: i32 },
}

impl Msg {
    /// A key press with no modifiers.
    pub fn key(key: Key) -> Self {
        Self::KeyDown { key, ctrl: false }
    }
}

/// A side effect requested by [`Visualizer::update`](crate::app::Visualizer::update).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Leave the event loop.
    End,
}
