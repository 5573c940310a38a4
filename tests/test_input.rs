use std::sync::mpsc;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use space_shooter::entities::{HorizontalIntent, TickInput};
use space_shooter::input::*;

fn key(code: KeyCode, kind: KeyEventKind) -> Event {
    Event::Key(KeyEvent::new_with_kind(code, KeyModifiers::NONE, kind))
}

fn press(code: KeyCode) -> Event {
    key(code, KeyEventKind::Press)
}

fn release(code: KeyCode) -> Event {
    key(code, KeyEventKind::Release)
}

fn observe(tracker: &mut InputTracker, event: Event, frame: u64) -> Vec<InputEvent> {
    let mut events = Vec::new();
    tracker.observe(&event, frame, &mut events);
    events
}

// ── movement ──────────────────────────────────────────────────────────────────

#[test]
fn no_keys_means_no_movement() {
    let tracker = InputTracker::new(false);
    assert_eq!(tracker.intent(10), HorizontalIntent::None);
}

#[test]
fn arrows_and_letters_both_steer() {
    let mut tracker = InputTracker::new(false);
    observe(&mut tracker, press(KeyCode::Left), 1);
    assert_eq!(tracker.intent(1), HorizontalIntent::Left);

    let mut tracker = InputTracker::new(false);
    observe(&mut tracker, press(KeyCode::Char('D')), 1);
    assert_eq!(tracker.intent(1), HorizontalIntent::Right);
}

#[test]
fn right_wins_when_both_held() {
    let mut tracker = InputTracker::new(false);
    observe(&mut tracker, press(KeyCode::Right), 1);
    observe(&mut tracker, press(KeyCode::Char('a')), 1);
    assert_eq!(tracker.intent(1), HorizontalIntent::Right);
}

#[test]
fn held_key_expires_after_hold_window() {
    let mut tracker = InputTracker::new(false);
    observe(&mut tracker, press(KeyCode::Left), 1);
    assert_eq!(tracker.intent(1 + HOLD_WINDOW), HorizontalIntent::Left);
    assert_eq!(tracker.intent(2 + HOLD_WINDOW), HorizontalIntent::None);
}

#[test]
fn released_keys_stay_held_until_release() {
    let mut tracker = InputTracker::new(true);
    observe(&mut tracker, press(KeyCode::Left), 1);
    // no repeat yet: the OS initial repeat delay outlasts the hold window
    assert_eq!(tracker.intent(1 + 3 * HOLD_WINDOW), HorizontalIntent::Left);
    observe(&mut tracker, release(KeyCode::Left), 2 + 3 * HOLD_WINDOW);
    assert_eq!(tracker.intent(2 + 3 * HOLD_WINDOW), HorizontalIntent::None);
}

#[test]
fn repeat_keeps_key_held() {
    let mut tracker = InputTracker::new(true);
    observe(&mut tracker, press(KeyCode::Left), 1);
    observe(&mut tracker, key(KeyCode::Left, KeyEventKind::Repeat), 1 + HOLD_WINDOW);
    assert_eq!(tracker.intent(1 + 2 * HOLD_WINDOW), HorizontalIntent::Left);
}

#[test]
fn release_drops_key_immediately() {
    let mut tracker = InputTracker::new(true);
    observe(&mut tracker, press(KeyCode::Right), 1);
    let events = observe(&mut tracker, release(KeyCode::Right), 2);
    assert_eq!(events, vec![InputEvent::KeyReleased]);
    assert_eq!(tracker.intent(2), HorizontalIntent::None);
}

// ── fire ──────────────────────────────────────────────────────────────────────

#[test]
fn space_press_fires_once_per_hold() {
    let mut tracker = InputTracker::new(false);
    assert_eq!(observe(&mut tracker, press(KeyCode::Char(' ')), 1), vec![InputEvent::Fire]);
    // auto-repeat on a classic terminal shows up as more presses
    assert!(observe(&mut tracker, press(KeyCode::Char(' ')), 2).is_empty());
    assert!(observe(&mut tracker, press(KeyCode::Char(' ')), 3).is_empty());
}

#[test]
fn auto_repeat_after_initial_delay_is_not_a_new_press() {
    let mut tracker = InputTracker::new(false);
    let mut events = Vec::new();
    // first repeat lands ~500 ms after the press, then every ~33 ms
    for frame in [1, 31, 33, 35, 37] {
        tracker.observe(&press(KeyCode::Char(' ')), frame, &mut events);
    }
    assert_eq!(events, vec![InputEvent::Fire, InputEvent::KeyReleased]);
}

#[test]
fn press_after_repeat_window_is_fresh_again() {
    let mut tracker = InputTracker::new(false);
    observe(&mut tracker, press(KeyCode::Char(' ')), 1);
    assert_eq!(
        observe(&mut tracker, press(KeyCode::Char(' ')), 2 + REPEAT_WINDOW),
        vec![InputEvent::Fire, InputEvent::KeyReleased]
    );
}

#[test]
fn space_fires_again_after_release() {
    let mut tracker = InputTracker::new(true);
    observe(&mut tracker, press(KeyCode::Char(' ')), 1);
    observe(&mut tracker, release(KeyCode::Char(' ')), 2);
    assert_eq!(observe(&mut tracker, press(KeyCode::Char(' ')), 3), vec![InputEvent::Fire]);
}

// ── quit & acknowledgment ─────────────────────────────────────────────────────

#[test]
fn quit_keys() {
    let mut tracker = InputTracker::new(false);
    assert_eq!(observe(&mut tracker, press(KeyCode::Char('q')), 1), vec![InputEvent::Quit]);
    assert_eq!(observe(&mut tracker, press(KeyCode::Char('Q')), 1), vec![InputEvent::Quit]);
    assert_eq!(observe(&mut tracker, press(KeyCode::Esc), 1), vec![InputEvent::Quit]);

    let ctrl_c = Event::Key(KeyEvent::new_with_kind(
        KeyCode::Char('c'),
        KeyModifiers::CONTROL,
        KeyEventKind::Press,
    ));
    assert_eq!(observe(&mut tracker, ctrl_c, 1), vec![InputEvent::Quit]);
}

#[test]
fn fresh_press_acknowledges_without_release_events() {
    let mut tracker = InputTracker::new(false);
    assert_eq!(
        observe(&mut tracker, press(KeyCode::Enter), 1),
        vec![InputEvent::KeyReleased]
    );
    assert_eq!(
        observe(&mut tracker, press(KeyCode::Char(' ')), 1),
        vec![InputEvent::Fire, InputEvent::KeyReleased]
    );
}

#[test]
fn press_does_not_acknowledge_with_release_events() {
    let mut tracker = InputTracker::new(true);
    assert!(observe(&mut tracker, press(KeyCode::Enter), 1).is_empty());
}

#[test]
fn non_key_events_are_ignored() {
    let mut tracker = InputTracker::new(false);
    assert!(observe(&mut tracker, Event::FocusGained, 1).is_empty());
    assert!(observe(&mut tracker, Event::Resize(80, 24), 1).is_empty());
}

// ── poll & fold ───────────────────────────────────────────────────────────────

#[test]
fn poll_drains_channel_and_ends_with_intent() {
    let (tx, rx) = mpsc::channel();
    tx.send(press(KeyCode::Left)).unwrap();
    tx.send(press(KeyCode::Char(' '))).unwrap();

    let mut tracker = InputTracker::new(true);
    let events = tracker.poll(&rx, 5);

    assert_eq!(
        events,
        vec![InputEvent::Fire, InputEvent::Move(HorizontalIntent::Left)]
    );
    assert!(rx.try_recv().is_err());
}

#[test]
fn fold_counts_fires_and_keeps_last_intent() {
    let input = fold(&[
        InputEvent::Fire,
        InputEvent::Move(HorizontalIntent::Left),
        InputEvent::Fire,
        InputEvent::Move(HorizontalIntent::Right),
    ]);
    assert_eq!(
        input,
        TickInput {
            intent: HorizontalIntent::Right,
            fire: 2,
            acknowledge: false,
            quit: false,
        }
    );
}

#[test]
fn fold_flags_quit_and_acknowledge() {
    let input = fold(&[InputEvent::KeyReleased, InputEvent::Quit]);
    assert!(input.quit);
    assert!(input.acknowledge);
    assert_eq!(fold(&[]), TickInput::default());
}
