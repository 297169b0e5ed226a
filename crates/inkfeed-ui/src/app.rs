//! Application shell around the feed screen.
//!
//! Frontends construct one `App`, forward input events and a
//! monotonic millisecond clock, and render when asked to. The unix
//! base time only seeds the demo fixture and relative-age labels.

extern crate alloc;

use alloc::vec::Vec;

use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};

use crate::feed_activity::FeedActivity;
use crate::input::InputEvent;
use crate::post::{sample_posts, Post};
use crate::story::{sample_story_groups, StoryGroup};
use crate::ui::{Activity, ActivityResult};

pub struct App {
    feed: FeedActivity,
}

impl App {
    /// Create an app with the built-in demo content.
    pub fn new(now_unix_s: u64) -> Self {
        Self::with_content(
            sample_story_groups(now_unix_s),
            sample_posts(now_unix_s),
            now_unix_s,
        )
    }

    /// Create an app with caller-provided content.
    pub fn with_content(groups: Vec<StoryGroup>, posts: Vec<Post>, now_unix_s: u64) -> Self {
        let mut feed = FeedActivity::new(groups, posts, now_unix_s);
        feed.on_enter();
        Self { feed }
    }

    /// Create an app seeded from the system clock.
    #[cfg(feature = "std")]
    pub fn new_from_system_time() -> Self {
        let now_unix_s = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self::new(now_unix_s)
    }

    /// Handle input event. Returns true if a redraw is needed.
    pub fn handle_input(&mut self, event: InputEvent, now_ms: u64) -> bool {
        match self.feed.handle_input(event, now_ms) {
            ActivityResult::Consumed => true,
            // The feed is the only screen; "back" has nowhere to go.
            ActivityResult::NavigateBack | ActivityResult::Ignored => false,
        }
    }

    /// Advance timed behavior. Returns true if a redraw is needed.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        self.feed.tick(now_ms)
    }

    /// Render the current screen.
    pub fn render<D: DrawTarget<Color = BinaryColor>>(
        &self,
        display: &mut D,
    ) -> Result<(), D::Error> {
        self.feed.render(display)
    }

    /// Access the feed for assertions and monitoring.
    pub fn feed(&self) -> &FeedActivity {
        &self.feed
    }
}
