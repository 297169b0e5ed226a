//! Story carousel: the horizontal strip of story groups and the
//! lifecycle of the player opened from it.
//!
//! The carousel owns the group list and the selection; the player owns
//! playback. Exactly one player exists while a group is open, and it
//! is rebuilt from scratch on every group transition — playback state
//! never survives a group change, and dropping the player is what
//! cancels its clock.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use embedded_graphics::{
    mono_font::MonoTextStyle, pixelcolor::BinaryColor, prelude::*, text::Text,
};

use crate::input::InputEvent;
use crate::story::StoryGroup;
use crate::story_player::{GroupBoundary, PlayerRequest, StoryPlayer, TickResult};
use crate::ui::components::Avatar;
use crate::ui::theme::{layout, ui_font_small, ui_font_small_char_width};

pub struct StoryCarousel {
    groups: Vec<StoryGroup>,
    base_unix_s: u64,
    cursor: usize,
    strip_offset: usize,
    open_group: Option<usize>,
    player: Option<StoryPlayer>,
}

impl StoryCarousel {
    pub fn new(groups: Vec<StoryGroup>, base_unix_s: u64) -> Self {
        Self {
            groups,
            base_unix_s,
            cursor: 0,
            strip_offset: 0,
            open_group: None,
            player: None,
        }
    }

    pub fn groups(&self) -> &[StoryGroup] {
        &self.groups
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_open(&self) -> bool {
        self.open_group.is_some()
    }

    pub fn open_index(&self) -> Option<usize> {
        self.open_group
    }

    pub fn player(&self) -> Option<&StoryPlayer> {
        self.player.as_ref()
    }

    /// Strip slots that fit between the side margins.
    fn visible_slots() -> usize {
        ((crate::DISPLAY_WIDTH as i32 - 2 * layout::MARGIN) / layout::STRIP_SLOT_W) as usize
    }

    /// Move the strip cursor right.
    pub fn select_next(&mut self) {
        if self.cursor + 1 < self.groups.len() {
            self.cursor += 1;
            self.ensure_cursor_visible();
        }
    }

    /// Move the strip cursor left.
    pub fn select_prev(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.ensure_cursor_visible();
        }
    }

    fn ensure_cursor_visible(&mut self) {
        let visible = Self::visible_slots();
        if self.cursor < self.strip_offset {
            self.strip_offset = self.cursor;
        } else if self.cursor >= self.strip_offset + visible {
            self.strip_offset = self.cursor.saturating_sub(visible - 1);
        }
    }

    /// Strip slot under a tap x coordinate, if any.
    pub fn slot_index_at(&self, x: i32) -> Option<usize> {
        if x < layout::MARGIN {
            return None;
        }
        let slot = ((x - layout::MARGIN) / layout::STRIP_SLOT_W) as usize;
        if slot >= Self::visible_slots() {
            return None;
        }
        let index = self.strip_offset + slot;
        (index < self.groups.len()).then_some(index)
    }

    /// Open the group at `index` with a fresh player.
    ///
    /// Out-of-range indices and empty groups are caller bugs in the
    /// data layer: warn and refuse instead of entering the player.
    pub fn open(&mut self, index: usize, now_ms: u64) {
        let Some(group) = self.groups.get(index) else {
            log::warn!(
                "story group index {} out of range ({} groups)",
                index,
                self.groups.len()
            );
            return;
        };
        let group = group.clone();

        let boundary = GroupBoundary {
            has_previous: index > 0,
            has_next: index + 1 < self.groups.len(),
        };
        match StoryPlayer::new(group, boundary, self.base_unix_s, now_ms) {
            Some(player) => {
                log::info!("opening stories of '{}'", player.group().owner_handle);
                self.open_group = Some(index);
                self.player = Some(player);
                self.cursor = index;
                self.ensure_cursor_visible();
            }
            None => self.close(),
        }
    }

    /// Close the player. Idempotent; safe to call in any state.
    pub fn close(&mut self) {
        // Dropping the player discards its playback clock with it; no
        // pending advance can reach the next group.
        self.player = None;
        self.open_group = None;
    }

    /// Open the next group, or close after the last one.
    pub fn advance_group(&mut self, now_ms: u64) {
        let Some(index) = self.open_group else {
            log::warn!("advance_group called with no open group");
            return;
        };
        if index + 1 < self.groups.len() {
            self.open(index + 1, now_ms);
        } else {
            self.close();
        }
    }

    /// Open the previous group. No-op at the first group.
    pub fn retreat_group(&mut self, now_ms: u64) {
        if let Some(index) = self.open_group {
            if index > 0 {
                self.open(index - 1, now_ms);
            }
        }
    }

    /// Drive the open player's clock. Returns what the player reported;
    /// any group-boundary intent is applied before returning.
    pub fn tick(&mut self, now_ms: u64) -> TickResult {
        let Some(player) = self.player.as_mut() else {
            return TickResult::NoRender;
        };
        let result = player.tick(now_ms);
        self.service_player_request(now_ms);
        result
    }

    /// Forward input to the open player and apply any resulting
    /// navigation intent. Precondition: a group is open.
    pub fn handle_player_input(&mut self, event: InputEvent, now_ms: u64) -> bool {
        let Some(player) = self.player.as_mut() else {
            log::warn!("player input with no open group");
            return false;
        };
        let redraw = player.handle_input(event, now_ms);
        self.service_player_request(now_ms);
        redraw
    }

    fn service_player_request(&mut self, now_ms: u64) {
        let Some(request) = self.player.as_mut().and_then(StoryPlayer::take_request) else {
            return;
        };
        match request {
            PlayerRequest::Close => self.close(),
            PlayerRequest::NextGroup => self.advance_group(now_ms),
            PlayerRequest::PreviousGroup => self.retreat_group(now_ms),
        }
    }

    /// Render the open player full-screen.
    pub fn render_player<D: DrawTarget<Color = BinaryColor>>(
        &self,
        display: &mut D,
    ) -> Result<(), D::Error> {
        if let Some(player) = &self.player {
            player.render(display)?;
        }
        Ok(())
    }

    /// Render the horizontal avatar strip starting at `top`. The
    /// cursor slot is double-ringed while the strip has focus.
    pub fn render_strip<D: DrawTarget<Color = BinaryColor>>(
        &self,
        display: &mut D,
        top: i32,
        focused: bool,
    ) -> Result<(), D::Error> {
        let label_style = MonoTextStyle::new(ui_font_small(), BinaryColor::On);
        let radius = (layout::STRIP_AVATAR_D / 2) as i32;

        for (slot, group) in self
            .groups
            .iter()
            .skip(self.strip_offset)
            .take(Self::visible_slots())
            .enumerate()
        {
            let index = self.strip_offset + slot;
            let slot_x = layout::MARGIN + slot as i32 * layout::STRIP_SLOT_W;
            let center = Point::new(
                slot_x + layout::STRIP_SLOT_W / 2,
                top + layout::STRIP_AVATAR_Y + radius,
            );

            Avatar::new(center, layout::STRIP_AVATAR_D, group.initial())
                .ringed(focused && index == self.cursor)
                .render(display, BinaryColor::On)?;

            let label: String = group
                .owner_handle
                .chars()
                .take(layout::STRIP_LABEL_CHARS)
                .collect();
            let label_x = center.x - (label.len() as i32 * ui_font_small_char_width()) / 2;
            Text::new(
                &label,
                Point::new(label_x, top + layout::STRIP_LABEL_Y),
                label_style,
            )
            .draw(display)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Button;
    use crate::story::{sample_story_groups, StoryItem};
    use crate::story_player::STORY_DURATION_MS;
    use crate::test_display::TestDisplay;

    const BASE_S: u64 = 1_700_000_000;

    fn carousel() -> StoryCarousel {
        StoryCarousel::new(sample_story_groups(BASE_S), BASE_S)
    }

    #[test]
    fn starts_closed() {
        let c = carousel();
        assert!(!c.is_open());
        assert!(c.player().is_none());
        assert_eq!(c.cursor(), 0);
    }

    #[test]
    fn open_sets_selection_and_builds_player() {
        let mut c = carousel();
        c.open(1, 0);
        assert_eq!(c.open_index(), Some(1));
        let player = c.player().unwrap();
        assert_eq!(player.group().owner_handle, "john_doe");
        assert_eq!(player.current_index(), 0);
        assert!(player.boundary().has_previous);
        assert!(player.boundary().has_next);
    }

    #[test]
    fn boundary_flags_at_the_ends() {
        let mut c = carousel();
        c.open(0, 0);
        assert!(!c.player().unwrap().boundary().has_previous);

        let last = c.groups().len() - 1;
        c.open(last, 0);
        assert!(!c.player().unwrap().boundary().has_next);
    }

    #[test]
    fn open_out_of_range_is_refused() {
        let mut c = carousel();
        c.open(99, 0);
        assert!(!c.is_open());
    }

    #[test]
    fn open_empty_group_is_refused() {
        let mut groups = sample_story_groups(BASE_S);
        groups[0].items.clear();
        let mut c = StoryCarousel::new(groups, BASE_S);
        c.open(0, 0);
        assert!(!c.is_open());
        assert!(c.player().is_none());
    }

    #[test]
    fn close_is_idempotent() {
        let mut c = carousel();
        c.close();
        assert!(!c.is_open());

        c.open(0, 0);
        c.close();
        c.close();
        assert!(!c.is_open());
    }

    #[test]
    fn advance_group_walks_forward_then_closes() {
        let mut c = carousel();
        let last = c.groups().len() - 1;
        c.open(last - 1, 0);

        c.advance_group(100);
        assert_eq!(c.open_index(), Some(last));

        c.advance_group(200);
        assert!(!c.is_open());
    }

    #[test]
    fn retreat_group_is_noop_at_first_group() {
        let mut c = carousel();
        c.open(0, 0);
        c.retreat_group(100);
        assert_eq!(c.open_index(), Some(0));
    }

    #[test]
    fn group_transition_discards_playback_state() {
        let mut c = carousel();
        c.open(0, 0);
        // Partially play the first group's first item, then advance past
        // its last item via input.
        c.tick(2_500);
        c.handle_player_input(InputEvent::Press(Button::Right), 2_500);
        c.handle_player_input(InputEvent::Press(Button::Right), 3_000);
        assert_eq!(c.open_index(), Some(1));

        let player = c.player().unwrap();
        assert_eq!(player.current_index(), 0);
        assert_eq!(player.elapsed_fraction(3_000), 0.0);
    }

    #[test]
    fn reopening_after_close_starts_fresh() {
        let mut c = carousel();
        c.open(0, 0);
        c.tick(2_500);
        c.close();

        c.open(3, 6_000);
        let player = c.player().unwrap();
        assert_eq!(player.current_index(), 0);
        assert_eq!(player.elapsed_fraction(6_000), 0.0);
        // A tick right after opening must not fire the stale deadline.
        c.tick(6_100);
        assert_eq!(c.player().unwrap().current_index(), 0);
    }

    #[test]
    fn autoplay_chains_across_groups_and_closes_at_the_end() {
        let mut groups = sample_story_groups(BASE_S);
        groups.truncate(3); // 2 + 3 + 1 items
        let mut c = StoryCarousel::new(groups, BASE_S);
        c.open(0, 0);

        let mut now = 0;
        for _ in 0..6 {
            now += STORY_DURATION_MS;
            c.tick(now);
        }
        assert!(!c.is_open());
    }

    #[test]
    fn player_close_request_closes_carousel() {
        let mut c = carousel();
        c.open(2, 0);
        c.handle_player_input(InputEvent::Press(Button::Back), 100);
        assert!(!c.is_open());
    }

    #[test]
    fn strip_cursor_clamps_and_scrolls() {
        let mut c = carousel();
        c.select_prev();
        assert_eq!(c.cursor(), 0);

        for _ in 0..20 {
            c.select_next();
        }
        assert_eq!(c.cursor(), c.groups().len() - 1);
    }

    #[test]
    fn strip_tap_resolves_slots() {
        let c = carousel();
        assert_eq!(c.slot_index_at(layout::MARGIN + 10), Some(0));
        assert_eq!(
            c.slot_index_at(layout::MARGIN + layout::STRIP_SLOT_W + 10),
            Some(1)
        );
        assert_eq!(c.slot_index_at(5), None);
    }

    #[test]
    fn strip_render_smoke_test() {
        let c = carousel();
        let mut display = TestDisplay::default_size();
        assert!(c.render_strip(&mut display, 50, true).is_ok());
    }

    #[test]
    fn one_item_groups_play_like_any_other() {
        let groups = alloc::vec![StoryGroup {
            owner_handle: alloc::string::String::from("solo"),
            owner_avatar_ref: alloc::string::String::from("avatars/9.png"),
            items: alloc::vec![StoryItem {
                id: 99,
                image_ref: alloc::string::String::from("stories/99.jpg"),
                posted_at: BASE_S - 60,
            }],
        }];
        let mut c = StoryCarousel::new(groups, BASE_S);
        c.open(0, 0);
        c.tick(STORY_DURATION_MS);
        // Single group: nothing after it, so the timeout closes.
        assert!(!c.is_open());
    }
}
