//! Desktop SDL simulator for Inkfeed.
//!
//! Runs the feed + story player UI in a window, driving the
//! cooperative playback clock from the host's monotonic time.

use std::thread;
use std::time::{Duration, Instant};

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{
    sdl2::Keycode, OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window,
};
use inkfeed_ui::{App, Button, InputEvent, DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// Host loop cadence. Manual input is always drained before the tick,
/// so user intent preempts the autoplay clock.
const TICK_INTERVAL_MS: u64 = 33;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let output_settings = OutputSettingsBuilder::new().scale(1).build();
    let mut display: SimulatorDisplay<BinaryColor> =
        SimulatorDisplay::new(Size::new(DISPLAY_WIDTH, DISPLAY_HEIGHT));
    let mut window = Window::new("Inkfeed", &output_settings);

    let mut app = App::new_from_system_time();
    let started = Instant::now();

    // Initial render
    app.render(&mut display)?;
    window.update(&display);

    println!("Inkfeed Simulator");
    println!("Controls:");
    println!("  Arrow Keys / WASD - Navigate");
    println!("  Enter / Space     - Open story / Like post");
    println!("  Backspace         - Back / Close player");
    println!("  Mouse             - Tap (scrub segments, screen halves)");
    println!("  Escape            - Quit");

    loop {
        let now_ms = started.elapsed().as_millis() as u64;
        let mut redraw = false;

        let events = window.events().collect::<Vec<_>>();
        for event in events {
            match event {
                SimulatorEvent::Quit => {
                    return Ok(());
                }
                SimulatorEvent::KeyDown { keycode, .. } => {
                    if keycode == Keycode::Escape {
                        return Ok(());
                    }
                    if let Some(btn) = keycode_to_button(keycode) {
                        redraw |= app.handle_input(InputEvent::Press(btn), now_ms);
                    }
                }
                SimulatorEvent::MouseButtonDown { point, .. } => {
                    redraw |= app.handle_input(InputEvent::Tap(point), now_ms);
                }
                _ => {}
            }
        }

        redraw |= app.tick(now_ms);

        if redraw {
            app.render(&mut display)?;
            window.update(&display);
        }

        thread::sleep(Duration::from_millis(TICK_INTERVAL_MS));
    }
}

fn keycode_to_button(keycode: Keycode) -> Option<Button> {
    match keycode {
        Keycode::Left | Keycode::A => Some(Button::Left),
        Keycode::Right | Keycode::D => Some(Button::Right),
        Keycode::Up | Keycode::W => Some(Button::Up),
        Keycode::Down | Keycode::S => Some(Button::Down),
        Keycode::Return | Keycode::Space => Some(Button::Confirm),
        Keycode::Backspace => Some(Button::Back),
        _ => None,
    }
}
