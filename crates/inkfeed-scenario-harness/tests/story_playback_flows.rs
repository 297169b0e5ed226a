//! End-to-end story playback flows.
//!
//! Scripts the full open → autoplay → group-chain → close lifecycle
//! against the demo content, the way a user would drive it.

use inkfeed_scenario_harness::ScenarioHarness;
use inkfeed_ui::{Button, STORY_DURATION_MS};

const BASE_S: u64 = 1_700_000_000;

/// Demo fixture: 8 groups holding 13 items in total.
const DEMO_ITEM_COUNT: u64 = 13;

#[test]
fn autoplay_chains_through_every_group_then_closes() {
    let mut h = ScenarioHarness::with_demo_content(BASE_S);
    h.press(Button::Confirm);
    assert_eq!(h.app().feed().carousel().open_index(), Some(0));

    // Let every item in every group play out fully.
    h.advance_ms(DEMO_ITEM_COUNT * STORY_DURATION_MS);
    h.advance_ms(200);
    assert!(!h.app().feed().carousel().is_open());
}

#[test]
fn partial_playback_survives_nothing_across_group_hops() {
    let mut h = ScenarioHarness::with_demo_content(BASE_S);
    h.press(Button::Confirm);

    // Play half of the first item, then skip through the rest of the
    // group manually.
    h.advance_ms(2_500);
    h.press(Button::Right);
    h.press(Button::Right);

    let carousel = h.app().feed().carousel();
    assert_eq!(carousel.open_index(), Some(1));
    let player = carousel.player().unwrap();
    assert_eq!(player.current_index(), 0);
    assert_eq!(player.elapsed_fraction(h.now_ms()), 0.0);
}

#[test]
fn close_mid_playback_then_reopen_starts_fresh() {
    let mut h = ScenarioHarness::with_demo_content(BASE_S);
    h.press(Button::Confirm);
    h.advance_ms(3_000);
    h.press(Button::Back);
    assert!(!h.app().feed().carousel().is_open());

    // Linger, then open a different group; no stale deadline may fire.
    h.advance_ms(4_000);
    h.press(Button::Right);
    h.press(Button::Right);
    h.press(Button::Confirm);

    let carousel = h.app().feed().carousel();
    assert_eq!(carousel.open_index(), Some(2));
    assert_eq!(carousel.player().unwrap().current_index(), 0);

    h.advance_ms(STORY_DURATION_MS - 100);
    let carousel = h.app().feed().carousel();
    // Group 2 has a single item; just under its deadline it must still
    // be open and untouched by the earlier session's clock.
    assert_eq!(carousel.open_index(), Some(2));
    assert_eq!(carousel.player().unwrap().current_index(), 0);
}

#[test]
fn retreat_at_the_very_start_is_a_noop() {
    let mut h = ScenarioHarness::with_demo_content(BASE_S);
    h.press(Button::Confirm);

    h.press(Button::Left);
    let carousel = h.app().feed().carousel();
    assert_eq!(carousel.open_index(), Some(0));
    assert_eq!(carousel.player().unwrap().current_index(), 0);
}

#[test]
fn retreating_across_a_group_boundary_reopens_the_previous_group() {
    let mut h = ScenarioHarness::with_demo_content(BASE_S);
    h.press(Button::Right);
    h.press(Button::Confirm);
    assert_eq!(h.app().feed().carousel().open_index(), Some(1));

    h.press(Button::Left);
    assert_eq!(h.app().feed().carousel().open_index(), Some(0));
}

#[test]
fn scrubbing_by_tap_jumps_within_the_group() {
    let mut h = ScenarioHarness::with_demo_content(BASE_S);
    h.press(Button::Right); // john_doe, 3 items
    h.press(Button::Confirm);

    h.tap(430, 10); // far-right progress segment
    let player = h.app().feed().carousel().player().unwrap();
    assert_eq!(player.current_index(), 2);
    assert_eq!(player.segment_fraction(0, h.now_ms()), 1.0);
    assert_eq!(player.segment_fraction(1, h.now_ms()), 1.0);

    h.tap(40, 10); // far-left segment, backward scrub
    let player = h.app().feed().carousel().player().unwrap();
    assert_eq!(player.current_index(), 0);
    // Still in the same group either way.
    assert_eq!(h.app().feed().carousel().open_index(), Some(1));
}

#[test]
fn tap_halves_navigate_and_corner_closes() {
    let mut h = ScenarioHarness::with_demo_content(BASE_S);
    h.press(Button::Right);
    h.press(Button::Confirm);

    h.tap(400, 400); // right half: advance
    assert_eq!(
        h.app().feed().carousel().player().unwrap().current_index(),
        1
    );

    h.tap(80, 400); // left half: retreat
    assert_eq!(
        h.app().feed().carousel().player().unwrap().current_index(),
        0
    );

    h.tap(460, 70); // top-right corner: close
    assert!(!h.app().feed().carousel().is_open());
}

#[test]
fn switching_users_respects_the_ends_of_the_carousel() {
    let mut h = ScenarioHarness::with_demo_content(BASE_S);
    h.press(Button::Confirm);

    // First group: no previous user to switch to.
    h.press(Button::Up);
    assert_eq!(h.app().feed().carousel().open_index(), Some(0));

    h.press(Button::Down);
    assert_eq!(h.app().feed().carousel().open_index(), Some(1));

    h.press(Button::Up);
    assert_eq!(h.app().feed().carousel().open_index(), Some(0));
}

#[test]
fn player_screenshot() {
    let mut h = ScenarioHarness::with_demo_content(BASE_S);
    h.press(Button::Right);
    h.press(Button::Confirm);
    h.advance_ms(2_500);

    h.render();
    h.save_screenshot_png("screenshots/story_player.png")
        .expect("Failed to save story player screenshot");
}
