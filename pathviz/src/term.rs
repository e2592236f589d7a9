//! Crossterm terminal driver and the visualizer's event loop.

use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind},
    queue,
    style::{Attribute, Color as CtColor, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use pathviz_core::Point;

use crate::app::Visualizer;
use crate::error::AppError;
use crate::msg::{Effect, Key, MouseAction, Msg};
use crate::screen::{Change, Color, Screen, diff};

/// Poll timeout while no search is animating.
const IDLE_POLL: Duration = Duration::from_millis(100);

/// Maps a [`Color`] to a [`crossterm::style::Color`].
fn to_ct_color(c: Color) -> CtColor {
    match c {
        Color::Default => CtColor::Reset,
        Color::Rgb(r, g, b) => CtColor::Rgb { r, g, b },
    }
}

/// Maps a crossterm [`KeyCode`] to a [`Key`].
fn to_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Backspace | KeyCode::Delete => Some(Key::Backspace),
        KeyCode::Tab => Some(Key::Tab),
        KeyCode::Up => Some(Key::ArrowUp),
        KeyCode::Down => Some(Key::ArrowDown),
        KeyCode::Left => Some(Key::ArrowLeft),
        KeyCode::Right => Some(Key::ArrowRight),
        _ => None,
    }
}

fn to_msg(ev: Event) -> Option<Msg> {
    match ev {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press | KeyEventKind::Repeat,
            ..
        }) => to_key(code).map(|key| Msg::KeyDown {
            key,
            ctrl: modifiers.contains(KeyModifiers::CONTROL),
        }),
        Event::Mouse(me) => {
            let action = match me.kind {
                MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left) => {
                    MouseAction::Main
                }
                MouseEventKind::Down(MouseButton::Right)
                | MouseEventKind::Drag(MouseButton::Right) => MouseAction::Secondary,
                MouseEventKind::Up(_) => MouseAction::Release,
                MouseEventKind::Moved => MouseAction::Move,
                _ => return None,
            };
            Some(Msg::Mouse {
                action,
                pos: Point::new(me.column as i32, me.row as i32),
                ctrl: me.modifiers.contains(KeyModifiers::CONTROL),
            })
        }
        Event::Resize(w, h) => Some(Msg::Screen {
            width: w as i32,
            height: h as i32,
        }),
        _ => None,
    }
}

/// Raw-mode crossterm output on the alternate screen, with mouse capture.
pub struct Terminal {
    out: Stdout,
}

impl Terminal {
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        queue!(
            self.out,
            terminal::EnterAlternateScreen,
            event::EnableMouseCapture,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        self.out.flush()
    }

    /// Wait up to `timeout` for input, then drain whatever else is queued.
    pub fn poll(&mut self, timeout: Duration) -> io::Result<Vec<Msg>> {
        let mut msgs = Vec::new();
        if !event::poll(timeout)? {
            return Ok(msgs);
        }
        loop {
            msgs.extend(to_msg(event::read()?));
            if !event::poll(Duration::ZERO)? {
                return Ok(msgs);
            }
        }
    }

    pub fn clear(&mut self) -> io::Result<()> {
        queue!(self.out, terminal::Clear(ClearType::All))?;
        self.out.flush()
    }

    /// Write changed glyphs to the terminal.
    pub fn flush(&mut self, changes: &[Change]) -> io::Result<()> {
        for c in changes {
            let style = c.glyph.style;
            queue!(
                self.out,
                cursor::MoveTo(c.pos.x as u16, c.pos.y as u16),
                SetForegroundColor(to_ct_color(style.fg)),
                SetBackgroundColor(to_ct_color(style.bg))
            )?;
            if style.bold {
                queue!(self.out, SetAttribute(Attribute::Bold))?;
            }
            if style.reverse {
                queue!(self.out, SetAttribute(Attribute::Reverse))?;
            }
            queue!(self.out, Print(c.glyph.ch))?;
            if style.bold || style.reverse {
                queue!(self.out, SetAttribute(Attribute::Reset))?;
            }
        }
        self.out.flush()
    }

    /// Restore the terminal. Errors are ignored: this runs on the way out.
    pub fn close(&mut self) {
        let _ = queue!(
            self.out,
            event::DisableMouseCapture,
            SetAttribute(Attribute::Reset),
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = self.out.flush();
        let _ = terminal::disable_raw_mode();
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

/// Run `model` in the terminal until it asks to quit. One [`Msg::Tick`] is
/// delivered per `interval` while a search animates.
pub fn run(model: &mut Visualizer, interval: Duration) -> Result<(), AppError> {
    let mut term = Terminal::new();
    term.init()?;
    let result = event_loop(model, &mut term, interval);
    term.close();
    result
}

fn event_loop(
    model: &mut Visualizer,
    term: &mut Terminal,
    interval: Duration,
) -> Result<(), AppError> {
    let (w, h) = model.screen_size();
    let mut prev = Screen::new(w, h);
    let mut curr = Screen::new(w, h);
    model.update(Msg::Init);
    let mut dirty = true;
    let mut last_tick = Instant::now();

    loop {
        if dirty {
            let (w, h) = model.screen_size();
            if (w, h) != (curr.width(), curr.height()) {
                curr = Screen::new(w, h);
            }
            model.draw(&mut curr);
            term.flush(&diff(&prev, &curr))?;
            prev.clone_from(&curr);
            dirty = false;
        }

        let timeout = if model.is_animating() {
            interval.saturating_sub(last_tick.elapsed())
        } else {
            IDLE_POLL
        };
        for msg in term.poll(timeout)? {
            if let Msg::Screen { .. } = msg {
                term.clear()?;
                prev = Screen::new(0, 0);
            }
            if model.update(msg) == Some(Effect::End) {
                log::debug!("quit requested");
                return Ok(());
            }
            dirty = true;
        }

        if model.is_animating() && last_tick.elapsed() >= interval {
            last_tick = Instant::now();
            model.update(Msg::Tick);
            dirty = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, MouseEvent};

    #[test]
    fn colour_mapping() {
        assert_eq!(to_ct_color(Color::Default), CtColor::Reset);
        assert_eq!(
            to_ct_color(Color::from_rgb(1, 2, 3)),
            CtColor::Rgb { r: 1, g: 2, b: 3 }
        );
    }

    #[test]
    fn key_presses_become_messages() {
        let press = |code, modifiers| {
            Event::Key(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press,
                state: KeyEventState::NONE,
            })
        };
        assert_eq!(
            to_msg(press(KeyCode::Char('w'), KeyModifiers::NONE)),
            Some(Msg::key(Key::Char('w')))
        );
        assert_eq!(
            to_msg(press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Msg::KeyDown {
                key: Key::Char('c'),
                ctrl: true
            })
        );
        assert_eq!(to_msg(press(KeyCode::F(1), KeyModifiers::NONE)), None);

        let release = Event::Key(KeyEvent {
            code: KeyCode::Enter,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert_eq!(to_msg(release), None);
    }

    #[test]
    fn mouse_drags_paint() {
        let ev = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Drag(MouseButton::Right),
            column: 4,
            row: 2,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(
            to_msg(ev),
            Some(Msg::Mouse {
                action: MouseAction::Secondary,
                pos: Point::new(4, 2),
                ctrl: false
            })
        );
    }
}
