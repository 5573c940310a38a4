//! All game entity types — pure data, no logic beyond box geometry.

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned box in world units.  `x`/`y` is the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Rect { x, y, w, h }
    }

    /// Box of size `w`×`h` centred on `cx` with its bottom edge at `bottom`.
    pub fn from_center_bottom(cx: i32, bottom: i32, w: i32, h: i32) -> Self {
        Rect { x: cx - w / 2, y: bottom - h, w, h }
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn center_x(&self) -> i32 {
        self.x + self.w / 2
    }

    /// Strict overlap: boxes that only share an edge do not collide.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

// ── Input intent ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HorizontalIntent {
    Left,
    Right,
    #[default]
    None,
}

/// Everything the input layer asks of a single tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickInput {
    pub intent: HorizontalIntent,
    /// Number of discrete fire presses since the previous tick.
    pub fire: u32,
    /// A key was released (or freshly pressed on terminals that never
    /// report releases).  Leaves the title and game-over screens.
    pub acknowledge: bool,
    pub quit: bool,
}

// ── Session status ────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    /// Title screen, waiting for the first acknowledgment.
    Start,
    Playing,
    /// Lives ran out; waiting for acknowledgment before the reset.
    GameOver,
}

// ── Audio cues ────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cue {
    Shoot,
    Explosion,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulletOwner {
    Player,
    Enemy,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub rect: Rect,
    /// Signed vertical speed: negative travels up, positive travels down.
    pub vy: i32,
    pub owner: BulletOwner,
}

// ── Player & enemy ────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub rect: Rect,
    /// Overwritten from input every tick; never accumulates.
    pub vx: i32,
    pub lives: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub rect: Rect,
    pub vx: i32,
    pub vy: i32,
    /// Monotonic clock reading (ms) of the last shot, or of the spawn.
    pub last_shot_ms: u64,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The whole session.  The only owner of the entity collections; update and
/// collision routines borrow it mutably for the duration of a tick.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub player_bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<Bullet>,
    pub score: u32,
    /// Highest score seen during this run of the program.
    pub best_score: u32,
    pub status: GameStatus,
    pub frame: u64,
    pub width: i32,
    pub height: i32,
}

// ── Render snapshot ───────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpriteKind {
    Player,
    Enemy,
    PlayerBullet,
    EnemyBullet,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sprite {
    pub kind: SpriteKind,
    pub rect: Rect,
}

/// Everything a renderer needs for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub sprites: Vec<Sprite>,
    pub score: u32,
    pub best_score: u32,
    pub lives: u32,
    pub status: GameStatus,
    pub width: i32,
    pub height: i32,
}
