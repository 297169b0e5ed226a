//! Activity pattern for screen-based navigation.
//!
//! Each screen implements this trait to handle its own lifecycle,
//! input processing, and rendering. Time-driven screens additionally
//! expose an inherent `tick` method; the trait stays input/render only.

use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};

use crate::input::InputEvent;

/// Result of handling an input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityResult {
    /// Event consumed, stay on current activity
    Consumed,
    /// Event consumed, request navigation back
    NavigateBack,
    /// Event not handled, propagate to parent
    Ignored,
}

pub trait Activity {
    /// Called when the activity becomes visible
    fn on_enter(&mut self);

    /// Called when the activity is being replaced
    fn on_exit(&mut self);

    /// Handle input event.
    ///
    /// `now_ms` is the host's monotonic clock; activities with timed
    /// behavior restart their deadlines from it.
    fn handle_input(&mut self, event: InputEvent, now_ms: u64) -> ActivityResult;

    /// Render the activity to the display.
    fn render<D: DrawTarget<Color = BinaryColor>>(&self, display: &mut D) -> Result<(), D::Error>;
}
