//! Collaborators the simulation talks to but does not own: a monotonic
//! clock, an audio cue player and a renderer.

use std::thread;
use std::time::{Duration, Instant};

use crate::entities::{Cue, Snapshot};

// ── Clock ─────────────────────────────────────────────────────────────────────

pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin.  Never goes backwards.
    fn now_ms(&self) -> u64;
}

/// Wall-independent clock backed by `Instant`.
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        MonotonicClock { origin: Instant::now() }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Fixed-rate pacing: sleeps out whatever is left of each tick.
pub struct FramePacer {
    period: Duration,
    frame_start: Instant,
}

impl FramePacer {
    pub fn new(period: Duration) -> Self {
        FramePacer {
            period,
            frame_start: Instant::now(),
        }
    }

    /// Block until one period has passed since the previous call.
    pub fn wait(&mut self) {
        let elapsed = self.frame_start.elapsed();
        if elapsed < self.period {
            thread::sleep(self.period - elapsed);
        }
        self.frame_start = Instant::now();
    }
}

// ── Audio ─────────────────────────────────────────────────────────────────────

/// Fire-and-forget cue playback.  Implementations swallow their own failures.
pub trait CuePlayer {
    fn play(&mut self, cue: Cue);
}

/// Discards every cue.
pub struct SilentCues;

impl CuePlayer for SilentCues {
    fn play(&mut self, _cue: Cue) {}
}

/// Terminals have no mixer, so cues are written to the log instead.
pub struct LoggedCues;

impl CuePlayer for LoggedCues {
    fn play(&mut self, cue: Cue) {
        log::trace!("cue: {:?}", cue);
    }
}

// ── Rendering ─────────────────────────────────────────────────────────────────

pub trait Renderer {
    fn present(&mut self, snapshot: &Snapshot) -> std::io::Result<()>;
}

/// Renders nothing.  Handy for headless simulation.
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn present(&mut self, _snapshot: &Snapshot) -> std::io::Result<()> {
        Ok(())
    }
}
