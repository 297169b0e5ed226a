//! UI components for 1-bit displays.
//!
//! Components are designed for high contrast rendering:
//! black/white only, no animations, clear focus states.

extern crate alloc;

use alloc::string::String;

use embedded_graphics::{
    mono_font::MonoTextStyle,
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{Circle, PrimitiveStyle, Rectangle},
    text::Text,
};

use crate::ui::theme::{layout, ui_font_body, ui_font_title, Theme};

/// Screen header with a title and separator line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub title: String,
}

impl Header {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    /// Render the header at the top of the display.
    pub fn render<D: DrawTarget<Color = BinaryColor>>(
        &self,
        display: &mut D,
        theme: &Theme,
    ) -> Result<(), D::Error> {
        let width = display.bounding_box().size.width;
        let style = MonoTextStyle::new(ui_font_title(), BinaryColor::On);
        Text::new(
            &self.title,
            Point::new(theme.metrics.side_padding as i32, layout::HEADER_TEXT_Y),
            style,
        )
        .draw(display)?;

        Rectangle::new(
            Point::new(0, layout::HEADER_SEP_Y),
            Size::new(width, layout::SEP_THICKNESS),
        )
        .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
        .draw(display)?;

        Ok(())
    }
}

/// Circular avatar stand-in: an outlined disc with the owner's initial.
///
/// `ringed` draws the double outline used for unopened story rings and
/// the focused strip slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Avatar {
    pub center: Point,
    pub diameter: u32,
    pub initial: char,
    pub ringed: bool,
}

impl Avatar {
    pub fn new(center: Point, diameter: u32, initial: char) -> Self {
        Self {
            center,
            diameter,
            initial: initial.to_ascii_uppercase(),
            ringed: false,
        }
    }

    pub fn ringed(mut self, ringed: bool) -> Self {
        self.ringed = ringed;
        self
    }

    /// Render with the given foreground color (On for light screens,
    /// Off on the player's inverted background).
    pub fn render<D: DrawTarget<Color = BinaryColor>>(
        &self,
        display: &mut D,
        color: BinaryColor,
    ) -> Result<(), D::Error> {
        let radius = (self.diameter / 2) as i32;
        let top_left = Point::new(self.center.x - radius, self.center.y - radius);

        Circle::new(top_left, self.diameter)
            .into_styled(PrimitiveStyle::with_stroke(color, 1))
            .draw(display)?;

        if self.ringed {
            Circle::new(top_left - Point::new(3, 3), self.diameter + 6)
                .into_styled(PrimitiveStyle::with_stroke(color, 2))
                .draw(display)?;
        }

        let font = ui_font_body();
        let glyph = self.initial;
        let mut buf = [0u8; 4];
        let text = glyph.encode_utf8(&mut buf);
        let style = MonoTextStyle::new(font, color);
        Text::new(
            text,
            Point::new(
                self.center.x - (font.character_size.width as i32) / 2,
                self.center.y + (font.character_size.height as i32) / 2 - 2,
            ),
            style,
        )
        .draw(display)?;

        Ok(())
    }
}

/// Thin outlined progress bar with proportional fill.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressBar {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub fraction: f32,
}

impl ProgressBar {
    pub fn new(x: i32, y: i32, width: u32, height: u32, fraction: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            fraction: fraction.clamp(0.0, 1.0),
        }
    }

    /// Render outline plus fill in the given foreground color.
    pub fn render<D: DrawTarget<Color = BinaryColor>>(
        &self,
        display: &mut D,
        color: BinaryColor,
    ) -> Result<(), D::Error> {
        Rectangle::new(Point::new(self.x, self.y), Size::new(self.width, self.height))
            .into_styled(PrimitiveStyle::with_stroke(color, 1))
            .draw(display)?;

        let fill_width = ((self.width as f32) * self.fraction) as u32;
        if fill_width > 0 {
            Rectangle::new(
                Point::new(self.x, self.y),
                Size::new(fill_width.min(self.width), self.height),
            )
            .into_styled(PrimitiveStyle::with_fill(color))
            .draw(display)?;
        }

        Ok(())
    }
}
