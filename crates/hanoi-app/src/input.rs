//! Renderer-agnostic keyboard input.

use hanoi_core::TowerId;

/// Keyboard input abstraction.
///
/// Only the digit shortcuts carry meaning: `1`, `2` and `3` click towers
/// 0, 1 and 2 while a session is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Printable character.
    Char(char),
    /// Any key without a printable form.
    Other,
}

impl KeyInput {
    /// Parse a DOM-style key name (`"1"`, `"a"`, `"Escape"`).
    pub fn from_key(key: &str) -> Self {
        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::Char(c),
            _ => Self::Other,
        }
    }

    /// Tower clicked by this key, if it is a shortcut.
    pub fn tower_shortcut(self) -> Option<TowerId> {
        match self {
            Self::Char('1') => Some(TowerId::SOURCE),
            Self::Char('2') => Some(TowerId::AUXILIARY),
            Self::Char('3') => Some(TowerId::TARGET),
            _ => None,
        }
    }
}
