//! Looping starfield drawn behind the play field.
//!
//! The sequence is generated once up front and then replayed forever:
//! running off the end of it simply restarts at the first frame.

use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Star {
    pub x: i32,
    pub y: i32,
    pub bright: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BackgroundFrame {
    pub stars: Vec<Star>,
}

pub struct Background {
    frames: Vec<BackgroundFrame>,
    cursor: usize,
}

impl Background {
    pub fn from_frames(frames: Vec<BackgroundFrame>) -> Self {
        Background { frames, cursor: 0 }
    }

    /// `frame_count` frames of `star_count` stars drifting down a
    /// `width`×`height` field.  Every star covers a whole number of screen
    /// heights over the sequence, so the last frame leads straight back into
    /// the first.
    pub fn starfield(
        rng: &mut impl Rng,
        width: i32,
        height: i32,
        star_count: usize,
        frame_count: usize,
    ) -> Self {
        if width <= 0 || height <= 0 || frame_count == 0 {
            return Background::from_frames(Vec::new());
        }

        // (x, starting y, screen heights travelled per loop)
        let seeds: Vec<(i32, i32, i64)> = (0..star_count)
            .map(|_| {
                (
                    rng.gen_range(0..width),
                    rng.gen_range(0..height),
                    rng.gen_range(1..=3),
                )
            })
            .collect();

        let frames = (0..frame_count as i64)
            .map(|f| BackgroundFrame {
                stars: seeds
                    .iter()
                    .map(|&(x, y0, laps)| {
                        let travelled = laps * height as i64 * f / frame_count as i64;
                        Star {
                            x,
                            y: ((y0 as i64 + travelled) % height as i64) as i32,
                            // nearest layer
                            bright: laps == 3,
                        }
                    })
                    .collect(),
            })
            .collect();

        Background::from_frames(frames)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Next frame of the loop, restarting from the beginning once the
    /// sequence is exhausted.  `None` only for an empty sequence.
    pub fn next_frame(&mut self) -> Option<&BackgroundFrame> {
        if self.frames.is_empty() {
            return None;
        }
        if self.cursor >= self.frames.len() {
            self.cursor = 0;
        }
        let index = self.cursor;
        self.cursor += 1;
        self.frames.get(index)
    }
}
