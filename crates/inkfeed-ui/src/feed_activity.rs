//! Feed screen: story strip on top, scrollable photo posts below.
//!
//! Hosts the story carousel. While a player is open it covers the
//! whole screen and receives all input; the feed resumes untouched
//! when it closes.

extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use embedded_graphics::{
    mono_font::{MonoTextStyle, MonoTextStyleBuilder},
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{Line, PrimitiveStyle, Rectangle},
    text::Text,
};
use embedded_text::{style::TextBoxStyleBuilder, TextBox};

use crate::input::{Button, InputEvent};
use crate::post::Post;
use crate::relative_time::relative_age_label;
use crate::story::StoryGroup;
use crate::story_carousel::StoryCarousel;
use crate::story_player::TickResult;
use crate::ui::components::Header;
use crate::ui::theme::{layout, ui_font_body, ui_font_small, Theme};
use crate::ui::{Activity, ActivityResult};

/// Which part of the feed screen has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedFocus {
    Stories,
    Posts,
}

pub struct FeedActivity {
    carousel: StoryCarousel,
    posts: Vec<Post>,
    base_unix_s: u64,
    last_seen_ms: u64,
    theme: Theme,
    focus: FeedFocus,
    post_cursor: usize,
    scroll_offset: usize,
    visible_count: usize,
    status_message: Option<String>,
}

impl FeedActivity {
    pub fn new(groups: Vec<StoryGroup>, posts: Vec<Post>, base_unix_s: u64) -> Self {
        let theme = Theme::default();
        let visible_count = theme.metrics.visible_posts(crate::DISPLAY_HEIGHT).max(1);

        Self {
            carousel: StoryCarousel::new(groups, base_unix_s),
            posts,
            base_unix_s,
            last_seen_ms: 0,
            theme,
            focus: FeedFocus::Stories,
            post_cursor: 0,
            scroll_offset: 0,
            visible_count,
            status_message: None,
        }
    }

    pub fn carousel(&self) -> &StoryCarousel {
        &self.carousel
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn focus(&self) -> FeedFocus {
        self.focus
    }

    pub fn post_cursor(&self) -> usize {
        self.post_cursor
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    /// Drive timed behavior; returns true when a redraw is needed.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        self.last_seen_ms = now_ms;
        self.carousel.tick(now_ms) == TickResult::RenderRequested
    }

    fn wall_s(&self) -> u64 {
        self.base_unix_s + self.last_seen_ms / 1_000
    }

    fn posts_top(&self) -> i32 {
        layout::content_start_y() + layout::STRIP_H + layout::GAP_MD
    }

    fn post_pitch(&self) -> i32 {
        self.theme.metrics.list_item_height as i32 + layout::GAP_SM
    }

    fn ensure_post_visible(&mut self) {
        if self.post_cursor < self.scroll_offset {
            self.scroll_offset = self.post_cursor;
        } else if self.post_cursor >= self.scroll_offset + self.visible_count {
            self.scroll_offset = self.post_cursor.saturating_sub(self.visible_count - 1);
        }
    }

    fn toggle_like_at(&mut self, index: usize) {
        if let Some(post) = self.posts.get_mut(index) {
            post.toggle_like();
            self.status_message = Some(if post.liked {
                format!("Liked photo by {}", post.author_handle)
            } else {
                format!("Removed like from {}", post.author_handle)
            });
        }
    }

    fn handle_stories_input(&mut self, event: InputEvent, now_ms: u64) -> ActivityResult {
        match event {
            InputEvent::Press(Button::Left) => {
                self.carousel.select_prev();
                ActivityResult::Consumed
            }
            InputEvent::Press(Button::Right) => {
                self.carousel.select_next();
                ActivityResult::Consumed
            }
            InputEvent::Press(Button::Confirm) => {
                let cursor = self.carousel.cursor();
                self.carousel.open(cursor, now_ms);
                ActivityResult::Consumed
            }
            InputEvent::Press(Button::Down) => {
                if !self.posts.is_empty() {
                    self.focus = FeedFocus::Posts;
                }
                ActivityResult::Consumed
            }
            InputEvent::Press(Button::Back) => ActivityResult::NavigateBack,
            InputEvent::Press(Button::Up) => ActivityResult::Ignored,
            InputEvent::Tap(point) => self.handle_tap(point, now_ms),
        }
    }

    fn handle_posts_input(&mut self, event: InputEvent, now_ms: u64) -> ActivityResult {
        match event {
            InputEvent::Press(Button::Up) => {
                if self.post_cursor == 0 {
                    self.focus = FeedFocus::Stories;
                } else {
                    self.post_cursor -= 1;
                    self.ensure_post_visible();
                }
                ActivityResult::Consumed
            }
            InputEvent::Press(Button::Down) => {
                if self.post_cursor + 1 < self.posts.len() {
                    self.post_cursor += 1;
                    self.ensure_post_visible();
                }
                ActivityResult::Consumed
            }
            InputEvent::Press(Button::Confirm) => {
                self.toggle_like_at(self.post_cursor);
                ActivityResult::Consumed
            }
            InputEvent::Press(Button::Back) => {
                self.focus = FeedFocus::Stories;
                ActivityResult::Consumed
            }
            InputEvent::Press(Button::Left) | InputEvent::Press(Button::Right) => {
                ActivityResult::Ignored
            }
            InputEvent::Tap(point) => self.handle_tap(point, now_ms),
        }
    }

    fn handle_tap(&mut self, point: Point, now_ms: u64) -> ActivityResult {
        let strip_top = layout::content_start_y();
        if point.y >= strip_top && point.y < strip_top + layout::STRIP_H {
            if let Some(index) = self.carousel.slot_index_at(point.x) {
                self.focus = FeedFocus::Stories;
                self.carousel.open(index, now_ms);
            }
            return ActivityResult::Consumed;
        }

        let posts_top = self.posts_top();
        if point.y >= posts_top {
            let slot = ((point.y - posts_top) / self.post_pitch()) as usize;
            let index = self.scroll_offset + slot;
            if index < self.posts.len() {
                self.focus = FeedFocus::Posts;
                self.post_cursor = index;
                self.toggle_like_at(index);
                // Liking via tap should keep its own status line.
                return ActivityResult::Consumed;
            }
        }

        ActivityResult::Consumed
    }

    fn render_post_card<D: DrawTarget<Color = BinaryColor>>(
        &self,
        display: &mut D,
        post: &Post,
        y: i32,
        selected: bool,
    ) -> Result<(), D::Error> {
        let x = self.theme.metrics.side_padding as i32;
        let width = self
            .theme
            .metrics
            .content_width(display.bounding_box().size.width);
        let height = self.theme.metrics.list_item_height;

        Rectangle::new(Point::new(x, y), Size::new(width, height))
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(display)?;
        if selected {
            Rectangle::new(Point::new(x, y), Size::new(4, height))
                .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
                .draw(display)?;
        }

        // Photo placeholder: outlined square with a diagonal cross.
        let thumb = layout::POST_THUMB;
        let thumb_x = x + layout::INNER_PAD;
        let thumb_y = y + (height as i32 - thumb as i32) / 2;
        Rectangle::new(Point::new(thumb_x, thumb_y), Size::new(thumb, thumb))
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(display)?;
        let stroke = PrimitiveStyle::with_stroke(BinaryColor::On, 1);
        Line::new(
            Point::new(thumb_x, thumb_y),
            Point::new(thumb_x + thumb as i32 - 1, thumb_y + thumb as i32 - 1),
        )
        .into_styled(stroke)
        .draw(display)?;
        Line::new(
            Point::new(thumb_x + thumb as i32 - 1, thumb_y),
            Point::new(thumb_x, thumb_y + thumb as i32 - 1),
        )
        .into_styled(stroke)
        .draw(display)?;

        let text_x = thumb_x + thumb as i32 + layout::INNER_PAD;
        let text_width = (x + width as i32 - layout::INNER_PAD - text_x).max(0) as u32;

        let author_style = MonoTextStyleBuilder::new()
            .font(ui_font_body())
            .text_color(BinaryColor::On)
            .build();
        Text::new(
            &post.author_handle,
            Point::new(text_x, y + layout::POST_AUTHOR_Y),
            author_style,
        )
        .draw(display)?;

        let caption_style = MonoTextStyle::new(ui_font_small(), BinaryColor::On);
        let caption_height =
            (layout::POST_CAPTION_LINES * ui_font_small().character_size.height as i32) as u32;
        let caption_bounds = Rectangle::new(
            Point::new(text_x, y + layout::POST_CAPTION_Y),
            Size::new(text_width, caption_height),
        );
        TextBox::with_textbox_style(
            &post.caption,
            caption_bounds,
            caption_style,
            TextBoxStyleBuilder::new().build(),
        )
        .draw(display)?;

        let mut meta = format!(
            "{} likes | {} comments | {}",
            post.likes,
            post.comments.len(),
            relative_age_label(post.posted_at, self.wall_s()),
        );
        if post.liked {
            meta = format!("Liked | {}", meta);
        }
        let meta_style = MonoTextStyle::new(ui_font_small(), BinaryColor::On);
        Text::new(&meta, Point::new(text_x, y + layout::POST_META_Y), meta_style)
            .draw(display)?;

        Ok(())
    }

    fn render_status_message<D: DrawTarget<Color = BinaryColor>>(
        &self,
        display: &mut D,
    ) -> Result<(), D::Error> {
        let Some(message) = &self.status_message else {
            return Ok(());
        };

        let width = display.bounding_box().size.width;
        let y = display.bounding_box().size.height as i32 - 18;
        Rectangle::new(Point::new(0, y), Size::new(width, 18))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(display)?;

        let style = MonoTextStyle::new(ui_font_small(), BinaryColor::Off);
        Text::new(message, Point::new(layout::GAP_SM, y + 12), style).draw(display)?;

        Ok(())
    }
}

impl Activity for FeedActivity {
    fn on_enter(&mut self) {
        self.status_message = None;
    }

    fn on_exit(&mut self) {
        self.carousel.close();
        self.status_message = None;
    }

    fn handle_input(&mut self, event: InputEvent, now_ms: u64) -> ActivityResult {
        self.last_seen_ms = now_ms;

        if self.carousel.is_open() {
            self.carousel.handle_player_input(event, now_ms);
            return ActivityResult::Consumed;
        }

        let had_status = self.status_message.take();
        let result = match self.focus {
            FeedFocus::Stories => self.handle_stories_input(event, now_ms),
            FeedFocus::Posts => self.handle_posts_input(event, now_ms),
        };
        if result == ActivityResult::Ignored {
            self.status_message = had_status;
        }
        result
    }

    fn render<D: DrawTarget<Color = BinaryColor>>(&self, display: &mut D) -> Result<(), D::Error> {
        if self.carousel.is_open() {
            return self.carousel.render_player(display);
        }

        display.clear(BinaryColor::Off)?;
        Header::new("Inkfeed").render(display, &self.theme)?;

        self.carousel.render_strip(
            display,
            layout::content_start_y(),
            self.focus == FeedFocus::Stories,
        )?;

        let posts_top = self.posts_top();
        for (slot, post) in self
            .posts
            .iter()
            .skip(self.scroll_offset)
            .take(self.visible_count)
            .enumerate()
        {
            let index = self.scroll_offset + slot;
            let y = posts_top + slot as i32 * self.post_pitch();
            let selected = self.focus == FeedFocus::Posts && index == self.post_cursor;
            self.render_post_card(display, post, y, selected)?;
        }

        self.render_status_message(display)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::post::sample_posts;
    use crate::story::sample_story_groups;
    use crate::test_display::TestDisplay;

    const BASE_S: u64 = 1_700_000_000;

    fn feed() -> FeedActivity {
        FeedActivity::new(sample_story_groups(BASE_S), sample_posts(BASE_S), BASE_S)
    }

    #[test]
    fn starts_focused_on_stories() {
        let f = feed();
        assert_eq!(f.focus(), FeedFocus::Stories);
        assert!(!f.carousel().is_open());
    }

    #[test]
    fn confirm_on_strip_opens_selected_group() {
        let mut f = feed();
        f.handle_input(InputEvent::Press(Button::Right), 0);
        f.handle_input(InputEvent::Press(Button::Confirm), 0);
        assert_eq!(f.carousel().open_index(), Some(1));
    }

    #[test]
    fn input_is_forwarded_to_open_player() {
        let mut f = feed();
        f.handle_input(InputEvent::Press(Button::Confirm), 0);
        assert!(f.carousel().is_open());

        f.handle_input(InputEvent::Press(Button::Back), 100);
        assert!(!f.carousel().is_open());
        // Focus returns to the strip untouched.
        assert_eq!(f.focus(), FeedFocus::Stories);
    }

    #[test]
    fn focus_traverses_strip_and_posts() {
        let mut f = feed();
        f.handle_input(InputEvent::Press(Button::Down), 0);
        assert_eq!(f.focus(), FeedFocus::Posts);
        assert_eq!(f.post_cursor(), 0);

        f.handle_input(InputEvent::Press(Button::Down), 0);
        assert_eq!(f.post_cursor(), 1);

        f.handle_input(InputEvent::Press(Button::Up), 0);
        f.handle_input(InputEvent::Press(Button::Up), 0);
        assert_eq!(f.focus(), FeedFocus::Stories);
    }

    #[test]
    fn confirm_toggles_like_with_status() {
        let mut f = feed();
        f.handle_input(InputEvent::Press(Button::Down), 0);
        let before = f.posts()[0].likes;

        f.handle_input(InputEvent::Press(Button::Confirm), 0);
        assert!(f.posts()[0].liked);
        assert_eq!(f.posts()[0].likes, before + 1);
        assert_eq!(f.status_message(), Some("Liked photo by demo"));

        f.handle_input(InputEvent::Press(Button::Confirm), 0);
        assert!(!f.posts()[0].liked);
        assert_eq!(f.posts()[0].likes, before);
    }

    #[test]
    fn tick_drives_open_player() {
        let mut f = feed();
        f.handle_input(InputEvent::Press(Button::Confirm), 0);
        assert!(f.tick(100));
        let index_before = f.carousel().player().unwrap().current_index();
        f.tick(crate::STORY_DURATION_MS);
        assert_ne!(
            f.carousel().player().unwrap().current_index(),
            index_before
        );
    }

    #[test]
    fn tick_without_open_player_is_quiet() {
        let mut f = feed();
        assert!(!f.tick(1_000));
    }

    #[test]
    fn strip_tap_opens_group() {
        let mut f = feed();
        let y = layout::content_start_y() + 10;
        f.handle_input(InputEvent::Tap(Point::new(layout::MARGIN + 5, y)), 0);
        assert_eq!(f.carousel().open_index(), Some(0));
    }

    #[test]
    fn post_tap_likes_that_post() {
        let mut f = feed();
        let posts_top = f.posts_top();
        let pitch = f.post_pitch();
        f.handle_input(
            InputEvent::Tap(Point::new(100, posts_top + pitch + 10)),
            0,
        );
        assert_eq!(f.focus(), FeedFocus::Posts);
        assert_eq!(f.post_cursor(), 1);
        assert!(f.posts()[1].liked);
    }

    #[test]
    fn render_feed_smoke_test() {
        let f = feed();
        let mut display = TestDisplay::default_size();
        assert!(f.render(&mut display).is_ok());
    }

    #[test]
    fn render_player_overlay_smoke_test() {
        let mut f = feed();
        f.handle_input(InputEvent::Press(Button::Confirm), 0);
        f.tick(2_500);
        let mut display = TestDisplay::default_size();
        assert!(f.render(&mut display).is_ok());
    }
}
