//! Theme system with metrics for consistent UI spacing and sizing.
//!
//! ## Semantic Font API
//!
//! All UI code should use exactly three font functions:
//! - `ui_font_title()` — headers, screen titles (largest)
//! - `ui_font_body()`  — primary content text (medium)
//! - `ui_font_small()` — secondary/meta text, captions (smallest)

use embedded_graphics::mono_font::{ascii, MonoFont};

/// Title/header font — for screen titles and the player's handle line.
pub fn ui_font_title() -> &'static MonoFont<'static> {
    &ascii::FONT_9X18_BOLD
}

/// Body font — primary content text and list items.
pub fn ui_font_body() -> &'static MonoFont<'static> {
    &ascii::FONT_7X13
}

/// Small font — secondary text, captions, metadata.
pub fn ui_font_small() -> &'static MonoFont<'static> {
    &ascii::FONT_6X10
}

/// Character width for the title font.
pub fn ui_font_title_char_width() -> i32 {
    ui_font_title().character_size.width as i32
}

/// Character width for the body font.
pub fn ui_font_body_char_width() -> i32 {
    ui_font_body().character_size.width as i32
}

/// Character width for the small font.
pub fn ui_font_small_char_width() -> i32 {
    ui_font_small().character_size.width as i32
}

// ── Layout constants ────────────────────────────────────────────────
//
// Single source of truth for every pixel offset in the UI.
// Change a value here → it changes on every screen.

/// Layout constants for the 480×800 portrait panel.
pub mod layout {
    /// Side margin (left/right padding from screen edge).
    pub const MARGIN: i32 = 20;

    /// Inner padding within cards and overlays.
    pub const INNER_PAD: i32 = 10;

    // ── Feed header ─────────────────────────────────────────────────

    /// Header bar height (title + separator line area).
    pub const HEADER_H: i32 = 40;

    /// Y baseline for title text in the header.
    pub const HEADER_TEXT_Y: i32 = 28;

    /// Y position of the separator line below the header.
    pub const HEADER_SEP_Y: i32 = 42;

    /// Separator line thickness.
    pub const SEP_THICKNESS: u32 = 1;

    // ── Spacing ─────────────────────────────────────────────────────

    /// Small gap (between tight elements).
    pub const GAP_SM: i32 = 8;

    /// Medium gap (section separators, strip-to-list).
    pub const GAP_MD: i32 = 18;

    // ── Story strip ─────────────────────────────────────────────────

    /// Total height of the horizontal story strip (avatars + handles).
    pub const STRIP_H: i32 = 100;

    /// Story avatar diameter in the strip.
    pub const STRIP_AVATAR_D: u32 = 56;

    /// Horizontal pitch from one strip slot to the next.
    pub const STRIP_SLOT_W: i32 = 74;

    /// Y offset from strip top to the avatar circle's top edge.
    pub const STRIP_AVATAR_Y: i32 = 6;

    /// Y baseline for the handle label under each avatar.
    pub const STRIP_LABEL_Y: i32 = 88;

    /// Max characters of a handle shown under a strip avatar.
    pub const STRIP_LABEL_CHARS: usize = 10;

    // ── Post cards ──────────────────────────────────────────────────

    /// Height of one post card in the feed list.
    pub const POST_CARD_H: i32 = 128;

    /// Post image placeholder edge length (square, left side of card).
    pub const POST_THUMB: u32 = 96;

    /// Y-offset for the author line within a card (from card top).
    pub const POST_AUTHOR_Y: i32 = 22;

    /// Y-offset for the first caption line within a card.
    pub const POST_CAPTION_Y: i32 = 40;

    /// Caption lines shown per card before clipping.
    pub const POST_CAPTION_LINES: i32 = 3;

    /// Y-offset for the likes/comments/age meta line.
    pub const POST_META_Y: i32 = 112;

    // ── Story player ────────────────────────────────────────────────

    /// Outer margin of the segmented progress bar.
    pub const SEGMENT_MARGIN: i32 = 8;

    /// Y position of the segmented progress bar.
    pub const SEGMENT_BAR_Y: i32 = 8;

    /// Height of one progress segment.
    pub const SEGMENT_H: u32 = 6;

    /// Gap between adjacent progress segments.
    pub const SEGMENT_GAP: i32 = 4;

    /// Height of the tap band along the top edge that scrubs to a
    /// segment instead of navigating.
    pub const SEGMENT_TAP_H: i32 = 28;

    /// Square tap zone in the top-right corner that closes the player.
    pub const CLOSE_ZONE: i32 = 88;

    /// Y of the player header row (avatar + handle + age).
    pub const PLAYER_HEADER_Y: i32 = 34;

    /// Player header avatar diameter.
    pub const PLAYER_AVATAR_D: u32 = 36;

    /// Y where the story image area starts.
    pub const PLAYER_IMAGE_Y: i32 = 88;

    /// Footer band height reserved for control hints.
    pub const PLAYER_FOOTER_H: i32 = 36;

    /// Hatch pitch of the image placeholder pattern.
    pub const PLACEHOLDER_HATCH: i32 = 24;

    // ── Derived helpers ─────────────────────────────────────────────

    /// Y where feed content starts (below header + separator + gap).
    pub const fn content_start_y() -> i32 {
        HEADER_SEP_Y + GAP_SM
    }
}

/// UI spacing and sizing metrics (in pixels)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeMetrics {
    /// Header height for the feed title bar
    pub header_height: u32,
    /// Horizontal padding for side margins
    pub side_padding: u32,
    /// Height of each post card in the feed
    pub list_item_height: u32,
    /// Base spacing unit for margins and gaps
    pub spacing: u32,
}

impl ThemeMetrics {
    /// Usable content width after side padding
    pub const fn content_width(&self, display_width: u32) -> u32 {
        display_width.saturating_sub(self.side_padding * 2)
    }

    /// How many post cards fit below the header and story strip.
    pub const fn visible_posts(&self, display_height: u32) -> usize {
        let top = layout::content_start_y() + layout::STRIP_H + layout::GAP_MD;
        let available = display_height as i32 - top;
        if available <= 0 {
            0
        } else {
            (available / (self.list_item_height as i32 + layout::GAP_SM)) as usize
        }
    }
}

impl Default for ThemeMetrics {
    fn default() -> Self {
        Self {
            header_height: layout::HEADER_H as u32,
            side_padding: layout::MARGIN as u32,
            list_item_height: layout::POST_CARD_H as u32,
            spacing: layout::GAP_MD as u32,
        }
    }
}

/// Complete theme definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Theme {
    pub metrics: ThemeMetrics,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_values() {
        let m = ThemeMetrics::default();
        assert_eq!(m.header_height, layout::HEADER_H as u32);
        assert_eq!(m.side_padding, layout::MARGIN as u32);
        assert_eq!(m.list_item_height, layout::POST_CARD_H as u32);
    }

    #[test]
    fn content_dimensions() {
        let m = ThemeMetrics::default();
        assert_eq!(m.content_width(480), 480 - 2 * layout::MARGIN as u32);
    }

    #[test]
    fn visible_posts_count() {
        let m = ThemeMetrics::default();
        // 800 - (42 + 8 + 100 + 18) = 632; 632 / (128 + 8) = 4
        assert_eq!(m.visible_posts(800), 4);
    }
}
