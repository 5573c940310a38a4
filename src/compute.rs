//! Game logic.
//!
//! Entity-level functions only touch the entity they are handed and report
//! anything else they want to happen (a new bullet) through their return
//! value.  Session-level functions borrow the whole `GameState` and apply
//! those intents.  All randomness comes through an injected `Rng`, so
//! callers control determinism (tests use a seeded RNG).

use rand::Rng;

use crate::constants::{
    ENEMY_BOTTOM_SLACK, ENEMY_BULLET_HEIGHT, ENEMY_BULLET_SPEED, ENEMY_BULLET_WIDTH,
    ENEMY_FIRE_COOLDOWN_MS, ENEMY_FLOOR, ENEMY_HEIGHT, ENEMY_SIDE_SLACK, ENEMY_SPAWN_Y_MAX,
    ENEMY_SPAWN_Y_MIN, ENEMY_VX_MAX, ENEMY_VX_MIN, ENEMY_VY_MAX, ENEMY_VY_MIN, ENEMY_WIDTH,
    PLAYER_BOTTOM_MARGIN, PLAYER_BULLET_HEIGHT, PLAYER_BULLET_SPEED, PLAYER_BULLET_WIDTH,
    PLAYER_HEIGHT, PLAYER_SPEED, PLAYER_START_LIVES, PLAYER_WIDTH, SCORE_PER_ENEMY,
};
use crate::entities::{
    Bullet, BulletOwner, Cue, Enemy, GameState, GameStatus, HorizontalIntent, Player, Rect,
    Snapshot, Sprite, SpriteKind, TickInput,
};
use crate::services::CuePlayer;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Fresh session on the title screen: full lives, no enemies yet.
pub fn init_state(width: i32, height: i32) -> GameState {
    GameState {
        player: Player {
            rect: Rect::from_center_bottom(
                width / 2,
                height - PLAYER_BOTTOM_MARGIN,
                PLAYER_WIDTH,
                PLAYER_HEIGHT,
            ),
            vx: 0,
            lives: PLAYER_START_LIVES,
        },
        enemies: Vec::new(),
        player_bullets: Vec::new(),
        enemy_bullets: Vec::new(),
        score: 0,
        best_score: 0,
        status: GameStatus::Start,
        frame: 0,
        width,
        height,
    }
}

/// Player-owned bullet centred on `cx` with its bottom edge at `bottom`.
pub fn player_bullet_at(cx: i32, bottom: i32) -> Bullet {
    Bullet {
        rect: Rect::from_center_bottom(cx, bottom, PLAYER_BULLET_WIDTH, PLAYER_BULLET_HEIGHT),
        vy: PLAYER_BULLET_SPEED,
        owner: BulletOwner::Player,
    }
}

/// Enemy-owned bullet centred on `cx` with its bottom edge at `bottom`.
pub fn enemy_bullet_at(cx: i32, bottom: i32) -> Bullet {
    Bullet {
        rect: Rect::from_center_bottom(cx, bottom, ENEMY_BULLET_WIDTH, ENEMY_BULLET_HEIGHT),
        vy: ENEMY_BULLET_SPEED,
        owner: BulletOwner::Enemy,
    }
}

// ── Player ───────────────────────────────────────────────────────────────────

pub fn set_horizontal_intent(player: &mut Player, intent: HorizontalIntent) {
    player.vx = match intent {
        HorizontalIntent::Left => -PLAYER_SPEED,
        HorizontalIntent::Right => PLAYER_SPEED,
        HorizontalIntent::None => 0,
    };
}

/// Move horizontally, keeping the whole ship on screen.
pub fn advance_player(player: &mut Player, width: i32) {
    let x = player.rect.x + player.vx;
    player.rect.x = x.min(width - player.rect.w).max(0);
}

/// A new bullet leaving the nose of the ship.  No cooldown here.
pub fn fire(player: &Player) -> Bullet {
    player_bullet_at(player.rect.center_x(), player.rect.top())
}

pub fn player_shoot(state: &mut GameState, cues: &mut impl CuePlayer) {
    state.player_bullets.push(fire(&state.player));
    cues.play(Cue::Shoot);
}

// ── Enemies ──────────────────────────────────────────────────────────────────

pub fn spawn_enemy(rng: &mut impl Rng, now_ms: u64, width: i32) -> Enemy {
    let mut enemy = Enemy {
        rect: Rect::new(0, 0, ENEMY_WIDTH, ENEMY_HEIGHT),
        vx: 0,
        vy: 0,
        last_shot_ms: now_ms,
    };
    respawn_enemy(&mut enemy, rng, width);
    enemy
}

/// Redraw position and velocity in place.  The fire timer is left alone.
pub fn respawn_enemy(enemy: &mut Enemy, rng: &mut impl Rng, width: i32) {
    enemy.rect.x = rng.gen_range(0..=(width - enemy.rect.w).max(0));
    enemy.rect.y = rng.gen_range(ENEMY_SPAWN_Y_MIN..=ENEMY_SPAWN_Y_MAX);
    enemy.vy = rng.gen_range(ENEMY_VY_MIN..=ENEMY_VY_MAX);
    enemy.vx = rng.gen_range(ENEMY_VX_MIN..=ENEMY_VX_MAX);
}

pub fn enemy_has_left_play_area(rect: &Rect, width: i32, height: i32) -> bool {
    rect.top() > height + ENEMY_BOTTOM_SLACK
        || rect.left() < -ENEMY_SIDE_SLACK
        || rect.right() > width + ENEMY_SIDE_SLACK
}

/// Move one enemy, respawning it above the screen if it drifted away, and
/// return the bullet it fires this tick, if any.
pub fn advance_enemy(
    enemy: &mut Enemy,
    now_ms: u64,
    rng: &mut impl Rng,
    width: i32,
    height: i32,
) -> Option<Bullet> {
    enemy.rect.y += enemy.vy;
    enemy.rect.x += enemy.vx;
    if enemy_has_left_play_area(&enemy.rect, width, height) {
        respawn_enemy(enemy, rng, width);
    }

    if now_ms.saturating_sub(enemy.last_shot_ms) > ENEMY_FIRE_COOLDOWN_MS {
        enemy.last_shot_ms = now_ms;
        Some(enemy_bullet_at(enemy.rect.center_x(), enemy.rect.bottom()))
    } else {
        None
    }
}

// ── Bullets ──────────────────────────────────────────────────────────────────

pub fn advance_bullet(bullet: &mut Bullet) {
    bullet.rect.y += bullet.vy;
}

/// Player bullets leave through the top, enemy bullets through the bottom.
pub fn bullet_has_exited(bullet: &Bullet, height: i32) -> bool {
    match bullet.owner {
        BulletOwner::Player => bullet.rect.bottom() < 0,
        BulletOwner::Enemy => bullet.rect.top() > height,
    }
}

fn advance_bullets(bullets: &mut Vec<Bullet>, height: i32) {
    for bullet in bullets.iter_mut() {
        advance_bullet(bullet);
    }
    bullets.retain(|b| !bullet_has_exited(b, height));
}

// ── Collision passes ─────────────────────────────────────────────────────────

/// Takes one life and enters `GameOver` on the crossing to zero.  Once the
/// session is over no further lives are taken, so a burst of hits in one
/// tick ends the game exactly once.
fn lose_life(state: &mut GameState) -> bool {
    if state.status != GameStatus::Playing || state.player.lives == 0 {
        return false;
    }
    state.player.lives -= 1;
    if state.player.lives == 0 {
        state.status = GameStatus::GameOver;
        log::info!("game over at frame {} with score {}", state.frame, state.score);
    }
    true
}

/// Pass A: every enemy touched by at least one player bullet is destroyed
/// along with the bullets touching it.  Each kill scores and is replaced.
/// Returns the number of enemies destroyed.
pub fn resolve_bullet_hits(
    state: &mut GameState,
    now_ms: u64,
    rng: &mut impl Rng,
    cues: &mut impl CuePlayer,
) -> u32 {
    let mut destroyed = 0;
    let mut survivors = Vec::with_capacity(state.enemies.len());
    for enemy in std::mem::take(&mut state.enemies) {
        let before = state.player_bullets.len();
        state.player_bullets.retain(|b| !b.rect.overlaps(&enemy.rect));
        if state.player_bullets.len() < before {
            destroyed += 1;
        } else {
            survivors.push(enemy);
        }
    }
    state.enemies = survivors;

    for _ in 0..destroyed {
        cues.play(Cue::Explosion);
        state.score += SCORE_PER_ENEMY;
        state.enemies.push(spawn_enemy(rng, now_ms, state.width));
    }
    state.best_score = state.best_score.max(state.score);
    if destroyed > 0 {
        log::debug!("{} enemies shot down, score {}", destroyed, state.score);
    }
    destroyed
}

/// Pass B: enemies that fly into the ship are destroyed, replaced, and cost
/// a life each.  Returns the number of lives taken.
pub fn resolve_ramming(
    state: &mut GameState,
    now_ms: u64,
    rng: &mut impl Rng,
    cues: &mut impl CuePlayer,
) -> u32 {
    let ship = state.player.rect;
    let (rammed, clear): (Vec<Enemy>, Vec<Enemy>) = std::mem::take(&mut state.enemies)
        .into_iter()
        .partition(|e| e.rect.overlaps(&ship));
    state.enemies = clear;

    let mut lives_lost = 0;
    for _ in &rammed {
        cues.play(Cue::Explosion);
        if lose_life(state) {
            lives_lost += 1;
        }
        state.enemies.push(spawn_enemy(rng, now_ms, state.width));
    }
    if !rammed.is_empty() {
        log::debug!("rammed by {} enemies, {} lives left", rammed.len(), state.player.lives);
    }
    lives_lost
}

/// Pass C: enemy bullets that reach the ship are destroyed and cost a life
/// each.  Returns the number of lives taken.
pub fn resolve_enemy_fire(state: &mut GameState, cues: &mut impl CuePlayer) -> u32 {
    let ship = state.player.rect;
    let before = state.enemy_bullets.len();
    state.enemy_bullets.retain(|b| !b.rect.overlaps(&ship));
    let hits = before - state.enemy_bullets.len();

    let mut lives_lost = 0;
    for _ in 0..hits {
        cues.play(Cue::Explosion);
        if lose_life(state) {
            lives_lost += 1;
        }
    }
    if hits > 0 {
        log::debug!("hit by {} enemy bullets, {} lives left", hits, state.player.lives);
    }
    lives_lost
}

/// Spawn enemies until the living count is back at the floor, all in one
/// tick so the floor holds from the first tick on.  Returns how many were
/// spawned.
pub fn maintain_enemy_floor(state: &mut GameState, now_ms: u64, rng: &mut impl Rng) -> usize {
    let mut spawned = 0;
    while state.enemies.len() < ENEMY_FLOOR {
        state.enemies.push(spawn_enemy(rng, now_ms, state.width));
        spawned += 1;
    }
    spawned
}

// ── Per-tick driver ──────────────────────────────────────────────────────────

/// What happened during one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub enemies_shot: u32,
    pub lives_lost: u32,
    /// The session crossed into `GameOver` during this tick.
    pub game_over: bool,
}

/// Advance the simulation by one tick.  Does nothing outside `Playing`.
///
/// Order is fixed: player, enemies, bullets, then collision passes A, B and
/// C, then the population floor.  Bullets fired by enemies this tick join
/// the set after the existing bullets have moved, so they can hit the ship
/// this tick but only start moving on the next one.
pub fn tick(
    state: &mut GameState,
    input: &TickInput,
    now_ms: u64,
    rng: &mut impl Rng,
    cues: &mut impl CuePlayer,
) -> TickReport {
    let mut report = TickReport::default();
    if state.status != GameStatus::Playing {
        return report;
    }
    state.frame += 1;
    let (width, height) = (state.width, state.height);

    // ── 1. Player ────────────────────────────────────────────────────────────
    set_horizontal_intent(&mut state.player, input.intent);
    advance_player(&mut state.player, width);
    for _ in 0..input.fire {
        player_shoot(state, cues);
    }

    // ── 2. Enemies ───────────────────────────────────────────────────────────
    let mut fresh_fire = Vec::new();
    for enemy in state.enemies.iter_mut() {
        if let Some(bullet) = advance_enemy(enemy, now_ms, &mut *rng, width, height) {
            fresh_fire.push(bullet);
        }
    }

    // ── 3. Bullets ───────────────────────────────────────────────────────────
    advance_bullets(&mut state.player_bullets, height);
    advance_bullets(&mut state.enemy_bullets, height);
    state.enemy_bullets.extend(fresh_fire);

    // ── 4–6. Collisions ──────────────────────────────────────────────────────
    report.enemies_shot = resolve_bullet_hits(state, now_ms, &mut *rng, cues);
    report.lives_lost += resolve_ramming(state, now_ms, &mut *rng, cues);
    report.lives_lost += resolve_enemy_fire(state, cues);
    report.game_over = state.status == GameStatus::GameOver;

    // ── 7. Population floor ──────────────────────────────────────────────────
    maintain_enemy_floor(state, now_ms, rng);

    report
}

// ── Screen transitions ───────────────────────────────────────────────────────

/// Leave the title or game-over screen.  Coming out of `GameOver` resets
/// score and lives; the field itself carries over.
pub fn acknowledge(state: &mut GameState) {
    match state.status {
        GameStatus::Start => {
            state.status = GameStatus::Playing;
            log::info!("session started");
        }
        GameStatus::GameOver => {
            state.score = 0;
            state.player.lives = PLAYER_START_LIVES;
            state.player.vx = 0;
            state.status = GameStatus::Playing;
            log::info!("play resumed after game over (best {})", state.best_score);
        }
        GameStatus::Playing => {}
    }
}

/// One loop iteration: tick while playing, otherwise wait for an
/// acknowledgment.
pub fn step(
    state: &mut GameState,
    input: &TickInput,
    now_ms: u64,
    rng: &mut impl Rng,
    cues: &mut impl CuePlayer,
) -> TickReport {
    match state.status {
        GameStatus::Playing => tick(state, input, now_ms, rng, cues),
        GameStatus::Start | GameStatus::GameOver => {
            if input.acknowledge {
                acknowledge(state);
            }
            TickReport::default()
        }
    }
}

// ── Render snapshot ──────────────────────────────────────────────────────────

pub fn snapshot(state: &GameState) -> Snapshot {
    let mut sprites = Vec::with_capacity(
        1 + state.enemies.len() + state.player_bullets.len() + state.enemy_bullets.len(),
    );
    sprites.extend(state.enemies.iter().map(|e| Sprite {
        kind: SpriteKind::Enemy,
        rect: e.rect,
    }));
    sprites.extend(
        state
            .player_bullets
            .iter()
            .chain(state.enemy_bullets.iter())
            .map(|b| Sprite {
                kind: match b.owner {
                    BulletOwner::Player => SpriteKind::PlayerBullet,
                    BulletOwner::Enemy => SpriteKind::EnemyBullet,
                },
                rect: b.rect,
            }),
    );
    sprites.push(Sprite {
        kind: SpriteKind::Player,
        rect: state.player.rect,
    });

    Snapshot {
        sprites,
        score: state.score,
        best_score: state.best_score,
        lives: state.player.lives,
        status: state.status,
        width: state.width,
        height: state.height,
    }
}
