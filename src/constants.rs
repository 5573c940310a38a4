//! Fixed tunables.  Every length is in world units (the 1200×900 play
//! field), every speed in world units per tick.

use std::time::Duration;

// ── Screen ────────────────────────────────────────────────────────────────────

pub const SCREEN_WIDTH: i32 = 1200;
pub const SCREEN_HEIGHT: i32 = 900;

// ── Timing ────────────────────────────────────────────────────────────────────

pub const TICKS_PER_SECOND: u32 = 60;
pub const TICK: Duration = Duration::from_micros(1_000_000 / TICKS_PER_SECOND as u64);

// ── Player ────────────────────────────────────────────────────────────────────

pub const PLAYER_WIDTH: i32 = 80;
pub const PLAYER_HEIGHT: i32 = 60;
/// Gap between the ship's bottom edge and the bottom of the screen.
pub const PLAYER_BOTTOM_MARGIN: i32 = 10;
pub const PLAYER_SPEED: i32 = 5;
pub const PLAYER_START_LIVES: u32 = 3;

// ── Enemies ───────────────────────────────────────────────────────────────────

pub const ENEMY_WIDTH: i32 = 60;
pub const ENEMY_HEIGHT: i32 = 40;
pub const ENEMY_SPAWN_Y_MIN: i32 = -100;
pub const ENEMY_SPAWN_Y_MAX: i32 = -40;
pub const ENEMY_VY_MIN: i32 = 1;
pub const ENEMY_VY_MAX: i32 = 2;
pub const ENEMY_VX_MIN: i32 = -2;
pub const ENEMY_VX_MAX: i32 = 2;
/// How far past the bottom edge an enemy's top may go before it respawns.
pub const ENEMY_BOTTOM_SLACK: i32 = 10;
/// How far past a side edge an enemy may drift before it respawns.
pub const ENEMY_SIDE_SLACK: i32 = 25;
pub const ENEMY_FIRE_COOLDOWN_MS: u64 = 2000;
pub const ENEMY_FLOOR: usize = 5;
pub const SCORE_PER_ENEMY: u32 = 10;

// ── Bullets ───────────────────────────────────────────────────────────────────

pub const PLAYER_BULLET_WIDTH: i32 = 16;
pub const PLAYER_BULLET_HEIGHT: i32 = 32;
pub const PLAYER_BULLET_SPEED: i32 = -10;
pub const ENEMY_BULLET_WIDTH: i32 = 8;
pub const ENEMY_BULLET_HEIGHT: i32 = 16;
pub const ENEMY_BULLET_SPEED: i32 = 5;

// ── Background ────────────────────────────────────────────────────────────────

pub const STAR_COUNT: usize = 90;
/// Length of the starfield loop (4 s at the tick rate).
pub const BACKGROUND_FRAMES: usize = 240;
