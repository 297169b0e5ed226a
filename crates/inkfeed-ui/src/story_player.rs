//! Ephemeral story playback.
//!
//! Auto-advancing timed slides with a segmented progress bar, manual
//! scrubbing, and group-boundary navigation intents. The player owns
//! all playback state for exactly one group; it is constructed fresh
//! every time a group opens and dropped when it closes, so no timing
//! state can ever leak across groups.
//!
//! The host loop is the clock: it calls `tick(now_ms)` on a fixed
//! cadence and threads the same monotonic clock through input
//! handling. Elapsed progress is always recomputed from wall time, so
//! scheduling jitter moves the bar smoothly instead of stuttering.

extern crate alloc;

use alloc::format;
use alloc::string::String;

use embedded_graphics::{
    mono_font::MonoTextStyle,
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{Line, PrimitiveStyle, Rectangle},
    text::Text,
};

use crate::input::{Button, InputEvent};
use crate::relative_time::relative_age_label;
use crate::story::StoryGroup;
use crate::ui::components::{Avatar, ProgressBar};
use crate::ui::theme::{
    layout, ui_font_small, ui_font_small_char_width, ui_font_title, ui_font_title_char_width,
};

/// Wall-clock duration one story item stays on screen.
pub const STORY_DURATION_MS: u64 = 5_000;

/// Distinct fill widths the active segment can show. Ticks that stay
/// within one slot do not request a redraw.
const PROGRESS_SLOTS: u64 = 64;

/// Whether a tick changed anything worth redrawing.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TickResult {
    NoRender,
    RenderRequested,
}

/// Which group transitions the parent carousel can satisfy.
///
/// Absence of a flag means the player must not request that
/// transition: retreat on the first group's first item is a no-op, and
/// advancing past the last group's last item closes instead.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct GroupBoundary {
    pub has_previous: bool,
    pub has_next: bool,
}

/// Navigation intent the player hands back to its carousel.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PlayerRequest {
    Close,
    NextGroup,
    PreviousGroup,
}

pub struct StoryPlayer {
    group: StoryGroup,
    boundary: GroupBoundary,
    base_unix_s: u64,
    current_index: usize,
    started_at_ms: u64,
    last_seen_ms: u64,
    age_label: String,
    last_progress_slot: Option<u64>,
    pending_request: Option<PlayerRequest>,
}

impl StoryPlayer {
    /// Start playback of `group` at its first item.
    ///
    /// An empty group is a caller bug in the data layer; it is refused
    /// here rather than recovered from.
    pub fn new(
        group: StoryGroup,
        boundary: GroupBoundary,
        base_unix_s: u64,
        now_ms: u64,
    ) -> Option<Self> {
        if group.items.is_empty() {
            log::warn!(
                "refusing to play empty story group '{}'",
                group.owner_handle
            );
            return None;
        }

        let mut player = Self {
            group,
            boundary,
            base_unix_s,
            current_index: 0,
            started_at_ms: now_ms,
            last_seen_ms: now_ms,
            age_label: String::new(),
            last_progress_slot: None,
            pending_request: None,
        };
        player.refresh_age_label(now_ms);
        Some(player)
    }

    pub fn group(&self) -> &StoryGroup {
        &self.group
    }

    pub fn boundary(&self) -> GroupBoundary {
        self.boundary
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Relative-age label of the current item; recomputed only when the
    /// current item changes.
    pub fn age_label(&self) -> &str {
        &self.age_label
    }

    /// Normalized [0, 1] progress of the current item toward
    /// auto-advance, recomputed from wall time.
    pub fn elapsed_fraction(&self, now_ms: u64) -> f32 {
        let elapsed = now_ms
            .saturating_sub(self.started_at_ms)
            .min(STORY_DURATION_MS);
        elapsed as f32 / STORY_DURATION_MS as f32
    }

    /// Visual completion of progress segment `index`: full before the
    /// current item, elapsed fraction on it, empty after it.
    pub fn segment_fraction(&self, index: usize, now_ms: u64) -> f32 {
        if index < self.current_index {
            1.0
        } else if index == self.current_index {
            self.elapsed_fraction(now_ms)
        } else {
            0.0
        }
    }

    /// Take the pending navigation intent, if any.
    pub fn take_request(&mut self) -> Option<PlayerRequest> {
        self.pending_request.take()
    }

    /// Advance the cooperative clock. Auto-advances when the current
    /// item's duration has fully elapsed.
    pub fn tick(&mut self, now_ms: u64) -> TickResult {
        self.last_seen_ms = now_ms;

        if now_ms.saturating_sub(self.started_at_ms) >= STORY_DURATION_MS {
            self.advance(now_ms);
            return TickResult::RenderRequested;
        }

        let slot =
            now_ms.saturating_sub(self.started_at_ms) * PROGRESS_SLOTS / STORY_DURATION_MS;
        if self.last_progress_slot != Some(slot) {
            self.last_progress_slot = Some(slot);
            TickResult::RenderRequested
        } else {
            TickResult::NoRender
        }
    }

    /// Next item, or a `NextGroup`/`Close` intent on the last one.
    pub fn advance(&mut self, now_ms: u64) {
        if self.current_index + 1 < self.group.items.len() {
            self.set_current(self.current_index + 1, now_ms);
        } else if self.boundary.has_next {
            self.pending_request = Some(PlayerRequest::NextGroup);
        } else {
            self.pending_request = Some(PlayerRequest::Close);
        }
    }

    /// Previous item, or a `PreviousGroup` intent on the first one.
    /// Without a previous group this is a no-op, never a close.
    pub fn retreat(&mut self, now_ms: u64) {
        if self.current_index > 0 {
            self.set_current(self.current_index - 1, now_ms);
        } else if self.boundary.has_previous {
            self.pending_request = Some(PlayerRequest::PreviousGroup);
        }
    }

    /// Jump straight to a segment, clamped to the group. Stays within
    /// the current group regardless of direction.
    pub fn scrub_to(&mut self, index: usize, now_ms: u64) {
        let clamped = index.min(self.group.items.len() - 1);
        self.set_current(clamped, now_ms);
    }

    /// Ask the carousel to close the player.
    pub fn request_close(&mut self) {
        self.pending_request = Some(PlayerRequest::Close);
    }

    /// Every index change restarts the item timer; there is no resume
    /// of partial progress.
    fn set_current(&mut self, index: usize, now_ms: u64) {
        self.current_index = index;
        self.started_at_ms = now_ms;
        self.last_seen_ms = now_ms;
        self.last_progress_slot = None;
        self.refresh_age_label(now_ms);
    }

    fn refresh_age_label(&mut self, now_ms: u64) {
        let wall_s = self.base_unix_s + now_ms / 1_000;
        if let Some(item) = self.group.items.get(self.current_index) {
            self.age_label = relative_age_label(item.posted_at, wall_s);
        }
    }

    /// Handle an input event; returns true when a redraw is needed.
    pub fn handle_input(&mut self, event: InputEvent, now_ms: u64) -> bool {
        self.last_seen_ms = now_ms;
        match event {
            InputEvent::Press(Button::Right) | InputEvent::Press(Button::Confirm) => {
                self.advance(now_ms);
                true
            }
            InputEvent::Press(Button::Left) => {
                self.retreat(now_ms);
                true
            }
            InputEvent::Press(Button::Down) => {
                if self.boundary.has_next {
                    self.pending_request = Some(PlayerRequest::NextGroup);
                    true
                } else {
                    false
                }
            }
            InputEvent::Press(Button::Up) => {
                if self.boundary.has_previous {
                    self.pending_request = Some(PlayerRequest::PreviousGroup);
                    true
                } else {
                    false
                }
            }
            InputEvent::Press(Button::Back) => {
                self.request_close();
                true
            }
            InputEvent::Tap(point) => self.handle_tap(point, now_ms),
        }
    }

    /// Tap zones, top to bottom: segment strip scrubs, top-right corner
    /// closes, then screen halves retreat/advance.
    fn handle_tap(&mut self, point: Point, now_ms: u64) -> bool {
        let width = crate::DISPLAY_WIDTH as i32;

        if point.y < layout::SEGMENT_TAP_H {
            self.scrub_to(self.segment_index_at(point.x), now_ms);
            return true;
        }

        if point.y < layout::SEGMENT_TAP_H + layout::CLOSE_ZONE
            && point.x >= width - layout::CLOSE_ZONE
        {
            self.request_close();
            return true;
        }

        if point.x < width / 2 {
            self.retreat(now_ms);
        } else {
            self.advance(now_ms);
        }
        true
    }

    fn segment_count(&self) -> usize {
        self.group.items.len()
    }

    /// Width of one progress segment for the current group.
    fn segment_width(&self) -> i32 {
        let count = self.segment_count() as i32;
        let total = crate::DISPLAY_WIDTH as i32
            - 2 * layout::SEGMENT_MARGIN
            - layout::SEGMENT_GAP * (count - 1);
        (total / count).max(1)
    }

    /// Map a tap x coordinate to the progress segment under it.
    fn segment_index_at(&self, x: i32) -> usize {
        let pitch = self.segment_width() + layout::SEGMENT_GAP;
        let rel = (x - layout::SEGMENT_MARGIN).max(0);
        ((rel / pitch) as usize).min(self.segment_count() - 1)
    }

    /// Render the full-screen player. White-on-black like the source
    /// material; progress reflects the clock as of the last tick.
    pub fn render<D: DrawTarget<Color = BinaryColor>>(
        &self,
        display: &mut D,
    ) -> Result<(), D::Error> {
        display.clear(BinaryColor::On)?;

        self.render_segments(display)?;
        self.render_header(display)?;
        self.render_image_placeholder(display)?;
        self.render_footer(display)?;

        Ok(())
    }

    fn render_segments<D: DrawTarget<Color = BinaryColor>>(
        &self,
        display: &mut D,
    ) -> Result<(), D::Error> {
        let seg_width = self.segment_width();
        for index in 0..self.segment_count() {
            let x = layout::SEGMENT_MARGIN
                + index as i32 * (seg_width + layout::SEGMENT_GAP);
            ProgressBar::new(
                x,
                layout::SEGMENT_BAR_Y,
                seg_width as u32,
                layout::SEGMENT_H,
                self.segment_fraction(index, self.last_seen_ms),
            )
            .render(display, BinaryColor::Off)?;
        }
        Ok(())
    }

    fn render_header<D: DrawTarget<Color = BinaryColor>>(
        &self,
        display: &mut D,
    ) -> Result<(), D::Error> {
        let width = display.bounding_box().size.width as i32;

        let avatar_r = (layout::PLAYER_AVATAR_D / 2) as i32;
        Avatar::new(
            Point::new(layout::MARGIN + avatar_r, layout::PLAYER_HEADER_Y + avatar_r),
            layout::PLAYER_AVATAR_D,
            self.group.initial(),
        )
        .render(display, BinaryColor::Off)?;

        let text_x = layout::MARGIN + layout::PLAYER_AVATAR_D as i32 + layout::INNER_PAD;
        let text_y = layout::PLAYER_HEADER_Y + avatar_r + 5;
        let handle_style = MonoTextStyle::new(ui_font_title(), BinaryColor::Off);
        Text::new(
            &self.group.owner_handle,
            Point::new(text_x, text_y),
            handle_style,
        )
        .draw(display)?;

        let age_x =
            text_x + self.group.owner_handle.len() as i32 * ui_font_title_char_width() + 12;
        let age_style = MonoTextStyle::new(ui_font_small(), BinaryColor::Off);
        Text::new(&self.age_label, Point::new(age_x, text_y), age_style).draw(display)?;

        // Close glyph in the top-right tap zone.
        let cx = width - layout::CLOSE_ZONE / 2;
        let cy = layout::SEGMENT_TAP_H + layout::CLOSE_ZONE / 2 - 14;
        let stroke = PrimitiveStyle::with_stroke(BinaryColor::Off, 2);
        Line::new(Point::new(cx - 8, cy - 8), Point::new(cx + 8, cy + 8))
            .into_styled(stroke)
            .draw(display)?;
        Line::new(Point::new(cx + 8, cy - 8), Point::new(cx - 8, cy + 8))
            .into_styled(stroke)
            .draw(display)?;

        Ok(())
    }

    fn render_image_placeholder<D: DrawTarget<Color = BinaryColor>>(
        &self,
        display: &mut D,
    ) -> Result<(), D::Error> {
        let size = display.bounding_box().size;
        let left = layout::MARGIN;
        let right = size.width as i32 - layout::MARGIN;
        let top = layout::PLAYER_IMAGE_Y;
        let bottom = size.height as i32 - layout::PLAYER_FOOTER_H - layout::GAP_SM;
        let height = bottom - top;

        Rectangle::new(
            Point::new(left, top),
            Size::new((right - left) as u32, height as u32),
        )
        .into_styled(PrimitiveStyle::with_stroke(BinaryColor::Off, 1))
        .draw(display)?;

        // Diagonal hatch pattern standing in for the story image.
        let stroke = PrimitiveStyle::with_stroke(BinaryColor::Off, 1);
        let mut x0 = left + layout::PLACEHOLDER_HATCH;
        while x0 < right + height {
            let (start, end) = clip_diagonal(x0, left, right, top, bottom);
            Line::new(start, end).into_styled(stroke).draw(display)?;
            x0 += layout::PLACEHOLDER_HATCH;
        }

        if let Some(item) = self.group.items.get(self.current_index) {
            let label = format!(
                "{}  ({}/{})",
                item.image_ref,
                self.current_index + 1,
                self.group.items.len()
            );
            let label_w = label.len() as i32 * ui_font_small_char_width();
            let label_x = (size.width as i32 - label_w) / 2;
            let label_y = top + height / 2;

            // Knock out a quiet window behind the label.
            Rectangle::new(
                Point::new(label_x - layout::GAP_SM, label_y - 14),
                Size::new((label_w + 2 * layout::GAP_SM) as u32, 22),
            )
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(display)?;

            let style = MonoTextStyle::new(ui_font_small(), BinaryColor::Off);
            Text::new(&label, Point::new(label_x, label_y), style).draw(display)?;
        }

        Ok(())
    }

    fn render_footer<D: DrawTarget<Color = BinaryColor>>(
        &self,
        display: &mut D,
    ) -> Result<(), D::Error> {
        let size = display.bounding_box().size;
        let hint = "Left/Right: Prev/Next  Up/Down: Switch user  Back: Close";
        let hint_w = hint.len() as i32 * ui_font_small_char_width();
        let x = (size.width as i32 - hint_w) / 2;
        let y = size.height as i32 - layout::PLAYER_FOOTER_H / 2;
        let style = MonoTextStyle::new(ui_font_small(), BinaryColor::Off);
        Text::new(hint, Point::new(x, y), style).draw(display)?;
        Ok(())
    }
}

/// Clip a slope -1 diagonal starting at (x0, top) to the placeholder
/// rectangle.
fn clip_diagonal(x0: i32, left: i32, right: i32, top: i32, bottom: i32) -> (Point, Point) {
    // Along the line, y = top + (x0 - x).
    let start_x = x0.min(right);
    let start_y = top + (x0 - start_x);
    let end_x = (x0 - (bottom - top)).max(left);
    let end_y = top + (x0 - end_x);
    (Point::new(start_x, start_y), Point::new(end_x, end_y))
}
