//! Host-independent input events

use std::ops::BitOr;

use glam::Vec2;

/// Bitmask of held pointer buttons (DOM `MouseEvent.buttons` layout)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PointerButtons(u8);

impl PointerButtons {
    /// No button held
    pub const NONE: Self = Self(0);
    /// Primary (usually left) button
    pub const PRIMARY: Self = Self(1);
    /// Secondary (usually right) button
    pub const SECONDARY: Self = Self(2);
    /// Auxiliary (usually middle) button
    pub const MIDDLE: Self = Self(4);

    /// Build from a raw bitmask
    pub fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// Raw bitmask
    pub fn bits(&self) -> u8 {
        self.0
    }

    /// True when every button in `other` is held
    pub fn contains(&self, other: Self) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }
}

impl BitOr for PointerButtons {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// An input event delivered by the host, in screen pixels (origin top-left)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A button went down inside the viewport
    PointerDown {
        /// Pointer position
        pos: Vec2,
        /// Buttons held after the press
        buttons: PointerButtons,
    },
    /// The pointer moved
    PointerMove {
        /// Pointer position
        pos: Vec2,
        /// Buttons currently held
        buttons: PointerButtons,
    },
    /// All buttons released
    PointerUp,
    /// Scroll wheel; positive moves away from the target
    Wheel {
        /// Signed scroll amount
        delta_y: f32,
    },
    /// A click that was not a drag
    Click {
        /// Pointer position
        pos: Vec2,
    },
    /// The viewport changed size
    Resize {
        /// New width in pixels
        width: f32,
        /// New height in pixels
        height: f32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_mask() {
        let both = PointerButtons::PRIMARY | PointerButtons::SECONDARY;
        assert!(both.contains(PointerButtons::PRIMARY));
        assert!(both.contains(PointerButtons::SECONDARY));
        assert!(!both.contains(PointerButtons::MIDDLE));
        assert!(!both.contains(PointerButtons::NONE));
        assert_eq!(both.bits(), 3);
        assert_eq!(PointerButtons::from_bits(2), PointerButtons::SECONDARY);
    }
}
