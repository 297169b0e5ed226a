//! Button and touch input abstraction.

use embedded_graphics::prelude::Point;

/// Navigation buttons shared by every frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Left,
    Right,
    Up,
    Down,
    Confirm,
    Back,
}

/// Input events.
///
/// `Tap` carries display coordinates; the story player and the feed
/// strip resolve taps against their own zones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Press(Button),
    Tap(Point),
}
