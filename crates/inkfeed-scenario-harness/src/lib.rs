//! Host-side scenario test harness for scripted UI flows.
//!
//! Couples an app, a framebuffer display, and a simulated playback
//! clock. Flows script button presses and taps, fast-forward time at
//! the host tick cadence, and assert on app state or pixels.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::Point;
use inkfeed_ui::{App, Button, InputEvent, TestDisplay};
use png::{BitDepth, ColorType, Encoder};

/// Clock step used when fast-forwarding, matching the desktop
/// simulator's loop cadence closely enough to catch deadline bugs.
const TICK_STEP_MS: u64 = 50;

pub struct ScenarioHarness {
    app: App,
    display: TestDisplay,
    now_ms: u64,
}

impl ScenarioHarness {
    /// Construct a harness around a caller-provided app.
    pub fn new(app: App) -> Self {
        Self {
            app,
            display: TestDisplay::default_size(),
            now_ms: 0,
        }
    }

    /// Construct a harness with the built-in demo content.
    pub fn with_demo_content(base_unix_s: u64) -> Self {
        Self::new(App::new(base_unix_s))
    }

    /// Current simulated monotonic clock.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Simulate a button press at the current clock.
    pub fn press(&mut self, button: Button) -> bool {
        self.app.handle_input(InputEvent::Press(button), self.now_ms)
    }

    /// Simulate a tap at display coordinates at the current clock.
    pub fn tap(&mut self, x: i32, y: i32) -> bool {
        self.app
            .handle_input(InputEvent::Tap(Point::new(x, y)), self.now_ms)
    }

    /// Fast-forward the playback clock, ticking at the host cadence so
    /// auto-advance deadlines fire exactly as they would live.
    pub fn advance_ms(&mut self, ms: u64) -> bool {
        let target = self.now_ms + ms;
        let mut redraw = false;
        while self.now_ms < target {
            self.now_ms = (self.now_ms + TICK_STEP_MS).min(target);
            redraw |= self.app.tick(self.now_ms);
        }
        redraw
    }

    /// Render the current UI screen.
    pub fn render(&mut self) {
        self.app
            .render(&mut self.display)
            .expect("scenario render should succeed");
    }

    /// Access the app for assertions.
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Access the display for render assertions.
    pub fn display(&self) -> &TestDisplay {
        &self.display
    }

    /// Save the current framebuffer to a PNG (white = Off, black = On).
    pub fn save_screenshot_png(&self, path: impl AsRef<Path>) -> Result<(), String> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }

        let (width, height) = self.display.dimensions();
        let mut data = Vec::with_capacity((width * height) as usize);
        for pixel in self.display.pixels() {
            let value = match pixel {
                BinaryColor::On => 0u8,
                BinaryColor::Off => 255u8,
            };
            data.push(value);
        }

        let file = File::create(path).map_err(|e| e.to_string())?;
        let writer = BufWriter::new(file);
        let mut encoder = Encoder::new(writer, width, height);
        encoder.set_color(ColorType::Grayscale);
        encoder.set_depth(BitDepth::Eight);
        let mut png_writer = encoder.write_header().map_err(|e| e.to_string())?;
        png_writer
            .write_image_data(&data)
            .map_err(|e| e.to_string())
    }
}
