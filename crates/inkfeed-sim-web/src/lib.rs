//! WASM browser simulator for Inkfeed.

use std::cell::RefCell;
use std::rc::Rc;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics_web_simulator::{
    display::WebSimulatorDisplay, output_settings::OutputSettingsBuilder,
};
use inkfeed_ui::{App, Button, InputEvent, DISPLAY_HEIGHT, DISPLAY_WIDTH};
use wasm_bindgen::prelude::*;
use web_sys::Performance;

/// Fixed fixture epoch. The demo content is aged relative to whatever
/// base it is built from and the playback clock is monotonic, so the
/// browser needs no wall clock.
const DEMO_EPOCH_S: u64 = 1_700_000_000;

/// Playback clock cadence in the browser.
const TICK_INTERVAL_MS: i32 = 50;

struct State {
    app: App,
    display: WebSimulatorDisplay<BinaryColor>,
    perf: Performance,
}

impl State {
    fn now_ms(&self) -> u64 {
        self.perf.now() as u64
    }

    fn render(&mut self) {
        self.app.render(&mut self.display).unwrap();
        self.display.flush().unwrap();
    }

    fn on_key(&mut self, btn: Button) {
        let now_ms = self.now_ms();
        if self.app.handle_input(InputEvent::Press(btn), now_ms) {
            self.render();
        }
    }

    fn on_tick(&mut self) {
        let now_ms = self.now_ms();
        if self.app.tick(now_ms) {
            self.render();
        }
    }
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let window = web_sys::window().unwrap();
    let document = window.document().unwrap();
    let container = document.get_element_by_id("display-container").unwrap();
    let perf = window.performance().unwrap();

    let output_settings = OutputSettingsBuilder::new().scale(1).build();
    let display = WebSimulatorDisplay::new(
        (DISPLAY_WIDTH, DISPLAY_HEIGHT),
        &output_settings,
        Some(&container),
    );

    let state = Rc::new(RefCell::new(State {
        app: App::new(DEMO_EPOCH_S),
        display,
        perf,
    }));
    state.borrow_mut().render();

    // Keyboard handler
    let state_clone = state.clone();
    let closure = Closure::wrap(Box::new(move |e: web_sys::KeyboardEvent| {
        if let Some(btn) = key_to_button(&e.key()) {
            e.prevent_default();
            state_clone.borrow_mut().on_key(btn);
        }
    }) as Box<dyn FnMut(_)>);
    window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
    closure.forget();

    // Playback clock
    let state_clone = state.clone();
    let tick = Closure::wrap(Box::new(move || {
        state_clone.borrow_mut().on_tick();
    }) as Box<dyn FnMut()>);
    window.set_interval_with_callback_and_timeout_and_arguments_0(
        tick.as_ref().unchecked_ref(),
        TICK_INTERVAL_MS,
    )?;
    tick.forget();

    Ok(())
}

fn key_to_button(key: &str) -> Option<Button> {
    match key {
        "ArrowLeft" | "a" => Some(Button::Left),
        "ArrowRight" | "d" => Some(Button::Right),
        "ArrowUp" | "w" => Some(Button::Up),
        "ArrowDown" | "s" => Some(Button::Down),
        "Enter" | " " => Some(Button::Confirm),
        "Backspace" | "Escape" => Some(Button::Back),
        _ => None,
    }
}
