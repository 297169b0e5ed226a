//! Test display that allows pixel overdraw.
//!
//! `MockDisplay` from embedded-graphics panics when a pixel is drawn
//! twice, which doesn't work for screens that clear backgrounds then
//! draw on top. This simple framebuffer allows overdraw and exposes
//! pixel accessors for render assertions and screenshot export.

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;

use embedded_graphics::{pixelcolor::BinaryColor, prelude::*, primitives::Rectangle};

/// Simple framebuffer display for tests that allows overdraw.
pub struct TestDisplay {
    pixels: Vec<BinaryColor>,
    width: u32,
    height: u32,
}

impl TestDisplay {
    /// Create a new test display with the given dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![BinaryColor::Off; (width * height) as usize],
            width,
            height,
        }
    }

    /// Create a display matching the Inkfeed panel (480x800).
    pub fn default_size() -> Self {
        Self::new(crate::DISPLAY_WIDTH, crate::DISPLAY_HEIGHT)
    }

    /// Display dimensions as (width, height).
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Row-major iterator over the framebuffer.
    pub fn pixels(&self) -> impl Iterator<Item = BinaryColor> + '_ {
        self.pixels.iter().copied()
    }

    /// Color at (x, y), or None outside the framebuffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<BinaryColor> {
        if x < self.width && y < self.height {
            Some(self.pixels[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    /// Count pixels of `color` inside `region` (clipped to the display).
    pub fn count_in(&self, region: Rectangle, color: BinaryColor) -> usize {
        let mut count = 0;
        for point in region.points() {
            if point.x >= 0 && point.y >= 0 {
                if let Some(c) = self.pixel(point.x as u32, point.y as u32) {
                    if c == color {
                        count += 1;
                    }
                }
            }
        }
        count
    }
}

impl DrawTarget for TestDisplay {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            if coord.x >= 0
                && coord.y >= 0
                && (coord.x as u32) < self.width
                && (coord.y as u32) < self.height
            {
                let idx = (coord.y as u32 * self.width + coord.x as u32) as usize;
                self.pixels[idx] = color;
            }
        }
        Ok(())
    }
}

impl OriginDimensions for TestDisplay {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::primitives::PrimitiveStyle;

    #[test]
    fn test_display_allows_overdraw() {
        let mut display = TestDisplay::new(10, 10);

        Rectangle::new(Point::new(0, 0), Size::new(10, 10))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::Off))
            .draw(&mut display)
            .unwrap();

        Rectangle::new(Point::new(0, 0), Size::new(5, 5))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut display)
            .unwrap();
    }

    #[test]
    fn test_display_default_size() {
        let display = TestDisplay::default_size();
        assert_eq!(display.size(), Size::new(480, 800));
    }

    #[test]
    fn count_in_clips_to_display() {
        let mut display = TestDisplay::new(10, 10);
        Rectangle::new(Point::new(0, 0), Size::new(10, 10))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut display)
            .unwrap();

        let region = Rectangle::new(Point::new(5, 5), Size::new(20, 20));
        assert_eq!(display.count_in(region, BinaryColor::On), 25);
    }
}
