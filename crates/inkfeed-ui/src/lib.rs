//! Shared UI library for the Inkfeed stories client.
//! Works on the desktop SDL simulator, WASM, and alloc-only targets.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![cfg_attr(
    not(test),
    deny(
        clippy::expect_used,
        clippy::panic,
        clippy::todo,
        clippy::unimplemented,
        clippy::unreachable,
        clippy::unwrap_used
    )
)]

extern crate alloc;

pub mod app;
pub mod feed_activity;
pub mod input;
pub mod post;
pub mod relative_time;
pub mod story;
pub mod story_carousel;
pub mod story_player;
pub mod test_display;
pub mod ui;

pub use app::App;
pub use feed_activity::{FeedActivity, FeedFocus};
pub use input::{Button, InputEvent};
pub use post::{sample_posts, Comment, Post};
pub use relative_time::relative_age_label;
pub use story::{sample_story_groups, StoryGroup, StoryItem};
pub use story_carousel::StoryCarousel;
pub use story_player::{
    GroupBoundary, PlayerRequest, StoryPlayer, TickResult, STORY_DURATION_MS,
};
pub use test_display::TestDisplay;

/// UI display dimensions (portrait mode).
/// Same panel geometry as the target handheld: 480x800 pixels.
pub const DISPLAY_WIDTH: u32 = 480;
pub const DISPLAY_HEIGHT: u32 = 800;
