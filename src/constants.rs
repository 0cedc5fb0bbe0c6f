//! Gameplay tuning.  Distances are arena units, times are milliseconds,
//! speeds are arena units per simulation tick.

// ── Geometry ─────────────────────────────────────────────────────────────────

/// Unit size that every hit radius is a fraction of.
pub const UNIT: f32 = 100.0;

/// Clamp margin for the player and spawn columns, and the wrap/prune margin
/// for enemies and bullets leaving the arena.
pub const MARGIN: f32 = UNIT / 2.0;

pub const DEFAULT_ARENA_WIDTH: f32 = 800.0;
pub const DEFAULT_ARENA_HEIGHT: f32 = 800.0;

/// Player spawns this far above the bottom edge.
pub const PLAYER_START_OFFSET: f32 = 120.0;

// ── Hit radii (fractions of UNIT) ────────────────────────────────────────────

pub const PLAYER_HIT: f32 = 0.15;
pub const ENEMY_HIT: f32 = 0.35;
pub const PLAYER_BULLET_HIT: f32 = 0.25;
pub const ENEMY_BULLET_HIT: f32 = 0.35;

// ── Speeds ───────────────────────────────────────────────────────────────────

pub const PLAYER_SPEED: f32 = 10.0;
pub const BULLET_SPEED: f32 = 7.0;
pub const ENEMY_DOWN_SPEED: f32 = 1.6;

/// Extra horizontal speed a boss gains when it enters phase 2.
pub const BOSS_ENRAGE_SPEED_BONUS: f32 = 2.0;

// ── Player ───────────────────────────────────────────────────────────────────

pub const MAX_HP: u32 = 3;
pub const SHOOT_DELAY: u64 = 400;

/// Bullets leave the ship this far above its centre.
pub const PLAYER_MUZZLE_OFFSET: f32 = 60.0;

pub const GUARD_MAX: f32 = 100.0;
pub const GUARD_HIT_COST: f32 = 35.0;
pub const GUARD_REGEN_PER_SEC: f32 = 22.0;
pub const GUARD_BREAK_COOLDOWN: u64 = 900;

pub const SHOTGUN_COST: f32 = 40.0;
pub const SHOTGUN_ANGLES: [f32; 5] = [-20.0, -10.0, 0.0, 10.0, 20.0];

// ── Enemies ──────────────────────────────────────────────────────────────────

pub const LINE_ROW_Y: f32 = 220.0;
pub const BOSS_ROW_Y: f32 = 160.0;
pub const ESCORT_ROW_Y: f32 = 280.0;

/// Enemy bullets leave the shooter this far below its centre.
pub const ENEMY_MUZZLE_OFFSET: f32 = 50.0;

pub const BOSS_SPREAD: [f32; 5] = [-30.0, -15.0, 0.0, 15.0, 30.0];
pub const BOSS_ENRAGED_SPREAD: [f32; 7] = [-45.0, -30.0, -15.0, 0.0, 15.0, 30.0, 45.0];
pub const HEAVY_SPREAD: [f32; 3] = [-10.0, 0.0, 10.0];
pub const GRUNT_SPREAD: [f32; 1] = [0.0];

pub const ENEMY_BASE_COOLDOWN: u64 = 1600;
pub const ENEMY_COOLDOWN_PER_WAVE: u64 = 150;
pub const ENRAGED_COOLDOWN_CUT: u64 = 650;
pub const ENRAGED_COOLDOWN_FLOOR: u64 = 700;

/// Poll interval of the fire timer while the session is paused or waiting.
pub const FIRE_POLL_INTERVAL: u64 = 120;

// ── Scoring & stages ─────────────────────────────────────────────────────────

pub const GRUNT_SCORE: u32 = 100;
pub const HEAVY_SCORE: u32 = 200;
pub const BOSS_SCORE: u32 = 1000;
pub const STAGE_CLEAR_BONUS: u32 = 500;

/// Window after a stage starts during which another clear is not evaluated.
pub const STAGE_LOCK: u64 = 220;

// ── Driver defaults ──────────────────────────────────────────────────────────

pub const DEFAULT_TICK_MS: u64 = 30;
pub const DEFAULT_STAR_COUNT: usize = 110;
pub const DEFAULT_SCORE_FILE: &str = "score.txt";
