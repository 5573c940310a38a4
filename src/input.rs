//! Terminal keys → per-tick game input.
//!
//! Instead of acting on each key event as it arrives, the tracker records
//! the loop frame of the last press/repeat for every key.  Each frame the
//! keys that are still "fresh" (within `HOLD_WINDOW` frames) decide the
//! movement intent, so Space and a direction can be held together.
//!
//! Works on two classes of terminal:
//! * **Keyboard-enhancement capable** (kitty protocol): proper `Press` /
//!   `Repeat` / `Release` events, keys stay held until released.
//! * **Classic terminals**: only `Press` events (OS key repeat shows up as
//!   repeated presses).  Keys expire after `HOLD_WINDOW` frames of silence,
//!   and a press only counts as new after `REPEAT_WINDOW` frames of silence.

use std::collections::HashMap;
use std::sync::mpsc::Receiver;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::entities::{HorizontalIntent, TickInput};

/// A key counts as held if its last press/repeat arrived within this many
/// frames.  OS key repeat runs at ≥ 15 Hz, so 8 frames @ 60 FPS (≈133 ms)
/// is always refreshed before it expires.
pub const HOLD_WINDOW: u64 = 8;

/// Without release events, a press within this many frames of the key's
/// previous press is auto-repeat.  Covers the OS initial repeat delay
/// (typically 250–600 ms).
pub const REPEAT_WINDOW: u64 = 40;

const LEFT_KEYS: [KeyCode; 2] = [KeyCode::Left, KeyCode::Char('a')];
const RIGHT_KEYS: [KeyCode; 2] = [KeyCode::Right, KeyCode::Char('d')];
const FIRE_KEY: KeyCode = KeyCode::Char(' ');

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    Move(HorizontalIntent),
    Fire,
    KeyReleased,
}

pub struct InputTracker {
    /// Each held key → the frame it was last seen (press or repeat).
    key_frame: HashMap<KeyCode, u64>,
    /// Whether the terminal reports key releases.
    release_events: bool,
}

impl InputTracker {
    pub fn new(release_events: bool) -> Self {
        InputTracker {
            key_frame: HashMap::new(),
            release_events,
        }
    }

    /// Seen within `window` frames of `frame`.  With release events a key
    /// is tracked until it is released, whatever the window.
    fn seen_within(&self, key: &KeyCode, frame: u64, window: u64) -> bool {
        match self.key_frame.get(key) {
            Some(_) if self.release_events => true,
            Some(&last) => frame.saturating_sub(last) <= window,
            None => false,
        }
    }

    fn is_held(&self, key: &KeyCode, frame: u64) -> bool {
        self.seen_within(key, frame, HOLD_WINDOW)
    }

    fn any_held(&self, keys: &[KeyCode], frame: u64) -> bool {
        keys.iter().any(|k| self.is_held(k, frame))
    }

    /// Feed one terminal event seen during `frame`, appending whatever
    /// discrete events it produces.
    pub fn observe(&mut self, event: &Event, frame: u64, events: &mut Vec<InputEvent>) {
        let Event::Key(KeyEvent { code, kind, modifiers, .. }) = event else {
            return;
        };
        let code = normalize(*code);

        match kind {
            KeyEventKind::Press => {
                if is_quit(&code, modifiers) {
                    events.push(InputEvent::Quit);
                    return;
                }
                // Auto-repeat arrives as a stream of presses on classic
                // terminals; only the first one of a hold is fresh.
                let fresh = !self.seen_within(&code, frame, REPEAT_WINDOW);
                self.key_frame.insert(code, frame);
                if !fresh {
                    return;
                }
                if code == FIRE_KEY {
                    events.push(InputEvent::Fire);
                }
                if !self.release_events {
                    events.push(InputEvent::KeyReleased);
                }
            }
            KeyEventKind::Repeat => {
                self.key_frame.insert(code, frame);
            }
            KeyEventKind::Release => {
                self.key_frame.remove(&code);
                events.push(InputEvent::KeyReleased);
            }
        }
    }

    /// Movement implied by the keys held during `frame`.  Right wins when
    /// both directions are down.
    pub fn intent(&self, frame: u64) -> HorizontalIntent {
        if self.any_held(&RIGHT_KEYS, frame) {
            HorizontalIntent::Right
        } else if self.any_held(&LEFT_KEYS, frame) {
            HorizontalIntent::Left
        } else {
            HorizontalIntent::None
        }
    }

    /// Drain all pending terminal events without blocking, closing the list
    /// with this frame's movement intent.
    pub fn poll(&mut self, rx: &Receiver<Event>, frame: u64) -> Vec<InputEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            self.observe(&event, frame, &mut events);
        }
        events.push(InputEvent::Move(self.intent(frame)));
        events
    }
}

/// Collapse one frame's events into the input for a single tick.  The last
/// movement intent wins; fire presses are counted, not merged.
pub fn fold(events: &[InputEvent]) -> TickInput {
    let mut input = TickInput::default();
    for event in events {
        match event {
            InputEvent::Quit => input.quit = true,
            InputEvent::Move(intent) => input.intent = *intent,
            InputEvent::Fire => input.fire += 1,
            InputEvent::KeyReleased => input.acknowledge = true,
        }
    }
    input
}

fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

fn is_quit(code: &KeyCode, modifiers: &KeyModifiers) -> bool {
    match code {
        KeyCode::Esc | KeyCode::Char('q') => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_lowercases_letters_only() {
        assert_eq!(normalize(KeyCode::Char('A')), KeyCode::Char('a'));
        assert_eq!(normalize(KeyCode::Char(' ')), KeyCode::Char(' '));
        assert_eq!(normalize(KeyCode::Left), KeyCode::Left);
    }

    #[test]
    fn plain_c_is_not_quit() {
        assert!(!is_quit(&KeyCode::Char('c'), &KeyModifiers::NONE));
        assert!(is_quit(&KeyCode::Char('c'), &KeyModifiers::CONTROL));
    }
}
