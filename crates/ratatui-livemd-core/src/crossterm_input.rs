//! Conversions from `crossterm` events into [`crate::input`] events.
//!
//! Events with no counterpart (focus changes, resizes, key releases, media keys) convert to
//! `Err(Unsupported)` so callers can skip them with `let Ok(ev) = ... else { continue };`.

use crate::input::InputEvent;
use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::input::KeyModifiers;
use crate::input::MouseButton;
use crate::input::MouseEvent;
use crate::input::MouseEventKind;
use crossterm::event as ct;

/// Marker error for crossterm events that have no backend-agnostic representation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Unsupported;

impl TryFrom<ct::Event> for InputEvent {
    type Error = Unsupported;

    fn try_from(ev: ct::Event) -> Result<Self, Self::Error> {
        match ev {
            ct::Event::Key(key) if key.kind == ct::KeyEventKind::Press => {
                KeyEvent::try_from(key).map(InputEvent::Key)
            }
            ct::Event::Paste(s) => Ok(InputEvent::Paste(s)),
            ct::Event::Mouse(m) => MouseEvent::try_from(m).map(InputEvent::Mouse),
            _ => Err(Unsupported),
        }
    }
}

impl TryFrom<ct::KeyEvent> for KeyEvent {
    type Error = Unsupported;

    fn try_from(key: ct::KeyEvent) -> Result<Self, Self::Error> {
        let code = match key.code {
            ct::KeyCode::Char(c) => KeyCode::Char(c),
            ct::KeyCode::Enter => KeyCode::Enter,
            ct::KeyCode::Backspace => KeyCode::Backspace,
            ct::KeyCode::Delete => KeyCode::Delete,
            ct::KeyCode::Tab => KeyCode::Tab,
            ct::KeyCode::Esc => KeyCode::Esc,
            ct::KeyCode::Left => KeyCode::Left,
            ct::KeyCode::Right => KeyCode::Right,
            ct::KeyCode::Up => KeyCode::Up,
            ct::KeyCode::Down => KeyCode::Down,
            ct::KeyCode::Home => KeyCode::Home,
            ct::KeyCode::End => KeyCode::End,
            ct::KeyCode::PageUp => KeyCode::PageUp,
            ct::KeyCode::PageDown => KeyCode::PageDown,
            _ => return Err(Unsupported),
        };
        Ok(KeyEvent::new(code).with_modifiers(modifiers(key.modifiers)))
    }
}

impl TryFrom<ct::MouseEvent> for MouseEvent {
    type Error = Unsupported;

    fn try_from(m: ct::MouseEvent) -> Result<Self, Self::Error> {
        let kind = match m.kind {
            ct::MouseEventKind::Down(b) => MouseEventKind::Down(button(b)),
            ct::MouseEventKind::Drag(b) => MouseEventKind::Drag(button(b)),
            ct::MouseEventKind::Up(b) => MouseEventKind::Up(button(b)),
            ct::MouseEventKind::ScrollUp => MouseEventKind::ScrollUp,
            ct::MouseEventKind::ScrollDown => MouseEventKind::ScrollDown,
            _ => return Err(Unsupported),
        };
        Ok(MouseEvent::new(m.column, m.row, kind).with_modifiers(modifiers(m.modifiers)))
    }
}

fn modifiers(m: ct::KeyModifiers) -> KeyModifiers {
    KeyModifiers {
        shift: m.contains(ct::KeyModifiers::SHIFT),
        ctrl: m.contains(ct::KeyModifiers::CONTROL),
        alt: m.contains(ct::KeyModifiers::ALT),
    }
}

fn button(b: ct::MouseButton) -> MouseButton {
    match b {
        ct::MouseButton::Left => MouseButton::Left,
        ct::MouseButton::Right => MouseButton::Right,
        ct::MouseButton::Middle => MouseButton::Middle,
    }
}
