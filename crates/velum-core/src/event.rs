#![forbid(unsafe_code)]

//! Canonical input/event types.
//!
//! Hosts translate their native window events into these before handing them
//! to the overlay engine. Only the subset the engine reacts to is modelled:
//! keys (escape dismissal), pointer presses (outside-click dismissal), and
//! client-area resizes.
//!
//! # Design Notes
//!
//! - Pointer coordinates are relative to the window's client area.
//! - `KeyEventKind` defaults to `Press` when the host cannot distinguish it.
//! - `Modifiers` use bitflags for easy combination.

use bitflags::bitflags;

/// Canonical input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A keyboard event.
    Key(KeyEvent),

    /// A pointer event.
    Mouse(MouseEvent),

    /// The window's client area was resized.
    Resize {
        /// New client width in pixels.
        width: u32,
        /// New client height in pixels.
        height: u32,
    },
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,

    /// The type of key event (press, repeat, or release).
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Create a new key event with default modifiers and Press kind.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Create a key event with a specific kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Check if this is an unmodified escape press.
    #[must_use]
    pub fn is_escape_press(&self) -> bool {
        self.code == KeyCode::Escape
            && self.kind == KeyEventKind::Press
            && self.modifiers == Modifiers::NONE
    }
}

/// Key codes for keyboard events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Escape,
    /// Any other key, passed through untouched.
    Char(char),
}

/// The type of key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Key was pressed (default when not distinguishable).
    #[default]
    Press,

    /// Key is being held (repeat event).
    Repeat,

    /// Key was released.
    Release,
}

bitflags! {
    /// Modifier keys that can be held during an input event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// A pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    /// The type of pointer event.
    pub kind: MouseEventKind,
    /// X coordinate in the client area.
    pub x: i32,
    /// Y coordinate in the client area.
    pub y: i32,
    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl MouseEvent {
    /// Create a new pointer event.
    #[must_use]
    pub const fn new(kind: MouseEventKind, x: i32, y: i32) -> Self {
        Self {
            kind,
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    /// Create a pointer event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Get the position as a tuple.
    #[must_use]
    pub const fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// Check if this is a primary-button press.
    #[must_use]
    pub const fn is_primary_press(&self) -> bool {
        matches!(self.kind, MouseEventKind::Down(MouseButton::Left))
    }
}

/// The type of pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseEventKind {
    /// Button pressed down.
    Down(MouseButton),
    /// Button released.
    Up(MouseButton),
    /// Pointer moved.
    Moved,
}

/// Pointer button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_escape_is_escape_press() {
        assert!(KeyEvent::new(KeyCode::Escape).is_escape_press());
    }

    #[test]
    fn escape_release_is_not_a_press() {
        let event = KeyEvent::new(KeyCode::Escape).with_kind(KeyEventKind::Release);
        assert!(!event.is_escape_press());
    }

    #[test]
    fn modified_escape_is_ignored() {
        let event = KeyEvent::new(KeyCode::Escape).with_modifiers(Modifiers::CTRL);
        assert!(!event.is_escape_press());
    }

    #[test]
    fn primary_press_detection() {
        let left = MouseEvent::new(MouseEventKind::Down(MouseButton::Left), 1, 2);
        let right = MouseEvent::new(MouseEventKind::Down(MouseButton::Right), 1, 2);
        let up = MouseEvent::new(MouseEventKind::Up(MouseButton::Left), 1, 2);
        assert!(left.is_primary_press());
        assert!(!right.is_primary_press());
        assert!(!up.is_primary_press());
        assert_eq!(left.position(), (1, 2));
    }

    #[test]
    fn modifiers_default_is_none() {
        assert_eq!(Modifiers::default(), Modifiers::NONE);
        let combo = Modifiers::CTRL | Modifiers::SHIFT;
        assert!(combo.contains(Modifiers::CTRL));
        assert!(!combo.contains(Modifiers::ALT));
    }
}
