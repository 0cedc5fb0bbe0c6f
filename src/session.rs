//! The top-level fixed-tick orchestrator.
//!
//! A `GameSession` is an explicit value owned by the driver loop.  Input
//! arrives as `Command`s (edge-triggered) and a `Movement` (held keys) passed
//! to `tick`; output leaves as queued `GameEvent`s and a read-only `Snapshot`.
//! All randomness comes through the injected RNG so callers control
//! determinism (tests use a seeded one).

use rand::Rng;
use tracing::{debug, info};

use crate::collision::{resolve_enemy_fire, resolve_player_fire};
use crate::constants::{PLAYER_SPEED, PLAYER_START_OFFSET, STAGE_CLEAR_BONUS};
use crate::enemy_fire::{EnemyFireController, FireGate};
use crate::entities::{Arena, BossPhase, Entity, IdAllocator};
use crate::events::{AudioCue, GameEvent, MusicCue, RemovalCause};
use crate::player::{HitOutcome, PlayerController};
use crate::projectiles::ProjectileSet;
use crate::starfield::{Starfield, IDLE_DRIFT};
use crate::wave::{EnemyWave, StageDirector, StagePlan};

// ── Inputs ────────────────────────────────────────────────────────────────────

/// Mutually exclusive session phases.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    WaitingToStart,
    Playing,
    Paused,
    GameOver,
}

/// Discrete, edge-triggered input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Start,
    TogglePause,
    /// Leave Paused without toggling.
    Resume,
    /// Back to the title from GameOver.
    Restart,
    FirePrimary,
    FireShotgun,
    GuardOn,
    GuardOff,
}

/// Directional keys currently held.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Movement {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl Movement {
    /// Per-tick displacement.  Diagonals are normalised so both components
    /// have equal magnitude and the total speed stays `PLAYER_SPEED`.
    pub fn displacement(&self) -> (f32, f32) {
        let sx = (self.right as i8 - self.left as i8) as f32;
        let sy = (self.down as i8 - self.up as i8) as f32;
        if sx != 0.0 && sy != 0.0 {
            let s = PLAYER_SPEED / std::f32::consts::SQRT_2;
            (sx * s, sy * s)
        } else {
            (sx * PLAYER_SPEED, sy * PLAYER_SPEED)
        }
    }
}

// ── Outputs ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BossStatus {
    pub hp: u32,
    pub max_hp: u32,
    pub phase: BossPhase,
}

/// Everything the HUD shows.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub phase: SessionPhase,
    pub stage: u32,
    pub score: u32,
    pub high_score: u32,
    pub player_hp: u32,
    pub guard: f32,
    pub guarding: bool,
    pub guard_cooldown: bool,
    pub boss: Option<BossStatus>,
}

// ── Session ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct GameSession {
    pub arena: Arena,
    pub phase: SessionPhase,
    /// Game clock in milliseconds.  Only advances while Playing.
    pub clock_ms: u64,
    pub score: u32,
    pub high_score: u32,
    pub player: PlayerController,
    pub wave: EnemyWave,
    pub stages: StageDirector,
    pub projectiles: ProjectileSet,
    pub fire: EnemyFireController,
    pub stars: Starfield,
    ids: IdAllocator,
    events: Vec<GameEvent>,
    star_count: usize,
}

impl GameSession {
    /// A fresh session on the title screen.
    pub fn new(arena: Arena, high_score: u32, star_count: usize, rng: &mut impl Rng) -> Self {
        let mut ids = IdAllocator::default();
        let player = spawn_player(&arena, 0, &mut ids);
        GameSession {
            arena,
            phase: SessionPhase::WaitingToStart,
            clock_ms: 0,
            score: 0,
            high_score,
            player,
            wave: EnemyWave::new(),
            stages: StageDirector::new(),
            projectiles: ProjectileSet::new(),
            fire: EnemyFireController::new(),
            stars: Starfield::new(star_count, &arena, rng),
            ids,
            events: Vec::new(),
            star_count,
        }
    }

    pub fn stage(&self) -> u32 {
        self.stages.stage()
    }

    /// Take every event queued since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            stage: self.stage(),
            score: self.score,
            high_score: self.high_score,
            player_hp: self.player.hp(),
            guard: self.player.guard,
            guarding: self.player.guarding,
            guard_cooldown: !self.player.guard_ready(self.clock_ms),
            boss: self.wave.boss().and_then(|b| {
                b.boss_phase().map(|phase| BossStatus {
                    hp: b.hp,
                    max_hp: b.max_hp,
                    phase,
                })
            }),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────────────

    /// Apply one discrete input.  Returns false when the command is not valid
    /// in the current phase or the action was refused.
    pub fn handle(&mut self, command: Command, rng: &mut impl Rng) -> bool {
        let now = self.clock_ms;
        match (self.phase, command) {
            (SessionPhase::WaitingToStart, Command::Start) => {
                self.start(rng);
                true
            }
            (SessionPhase::GameOver, Command::Restart) => {
                self.restart_to_title(rng);
                true
            }
            (SessionPhase::Playing, Command::TogglePause) => {
                self.phase = SessionPhase::Paused;
                self.events.push(GameEvent::Music(MusicCue::Pause));
                true
            }
            (SessionPhase::Paused, Command::TogglePause | Command::Resume) => {
                self.phase = SessionPhase::Playing;
                self.events.push(GameEvent::Music(MusicCue::Resume));
                true
            }
            (SessionPhase::Playing, Command::FirePrimary) => match self.player.fire_primary(now) {
                Some(bullet) => {
                    self.push_bullet(bullet);
                    true
                }
                None => false,
            },
            (SessionPhase::Playing, Command::FireShotgun) => {
                let bullets = self.player.fire_shotgun(now);
                if bullets.is_empty() {
                    return false;
                }
                self.events.push(GameEvent::Audio(AudioCue::Shotgun));
                for b in bullets {
                    self.push_bullet(b);
                }
                true
            }
            (SessionPhase::Playing, Command::GuardOn) => self.player.set_guard(true, now),
            (SessionPhase::Playing | SessionPhase::Paused, Command::GuardOff) => {
                let was_guarding = self.player.guarding;
                self.player.set_guard(false, now);
                was_guarding
            }
            _ => false,
        }
    }

    fn start(&mut self, rng: &mut impl Rng) {
        self.reset_world(rng);
        self.phase = SessionPhase::Playing;
        self.events.push(GameEvent::Music(MusicCue::Resume));
        info!(high_score = self.high_score, "session started");
        let plan = self.stages.plan();
        self.spawn_stage(plan, rng);
        self.fire.arm();
    }

    fn restart_to_title(&mut self, rng: &mut impl Rng) {
        self.reset_world(rng);
        self.phase = SessionPhase::WaitingToStart;
    }

    /// Clear every entity, respawn the player, and rewind score and stage.
    /// The fire timer is disarmed so no stale registration survives.
    fn reset_world(&mut self, rng: &mut impl Rng) {
        self.fire.disarm();

        let mut swept = self.wave.clear();
        swept.extend(self.projectiles.clear());
        if self.player.alive {
            swept.push(self.player.body.clone());
        }
        for e in swept {
            self.emit_removed(&e, RemovalCause::Reset);
        }

        self.score = 0;
        self.stages.reset();
        self.player = spawn_player(&self.arena, self.clock_ms, &mut self.ids);
        let body = self.player.body.clone();
        self.emit_spawned(&body);
        self.stars = Starfield::new(self.star_count, &self.arena, rng);
    }

    // ── Tick ─────────────────────────────────────────────────────────────────

    /// Advance the session by `dt_ms`.  The decoration always moves; the
    /// simulation only while Playing; the enemy fire timer in every phase
    /// under its own gate.
    pub fn tick(&mut self, dt_ms: u64, movement: Movement, rng: &mut impl Rng) {
        let drift = if self.phase == SessionPhase::Playing {
            1.0
        } else {
            IDLE_DRIFT
        };
        self.stars.update(drift, &self.arena, rng);

        if self.phase == SessionPhase::Playing {
            self.step(dt_ms, movement, rng);
        }

        let gate = match self.phase {
            SessionPhase::Playing => FireGate::Open,
            SessionPhase::Paused | SessionPhase::WaitingToStart => FireGate::Held,
            SessionPhase::GameOver => FireGate::Closed,
        };
        let volley = self
            .fire
            .advance(dt_ms, gate, self.stages.stage(), &self.wave, rng);
        for b in volley {
            self.push_bullet(b);
        }
    }

    fn step(&mut self, dt_ms: u64, movement: Movement, rng: &mut impl Rng) {
        self.clock_ms += dt_ms;
        let now = self.clock_ms;

        // ── 1. Player ────────────────────────────────────────────────────────
        let (dx, dy) = movement.displacement();
        if dx != 0.0 || dy != 0.0 {
            self.player.move_by(dx, dy, &self.arena);
        }
        self.player.regen_guard(now);

        // ── 2. Enemies ───────────────────────────────────────────────────────
        for id in self.wave.advance(&self.arena) {
            self.events.push(GameEvent::BossEnraged { id });
        }

        // ── 3. Bullets ───────────────────────────────────────────────────────
        for b in self.projectiles.advance(&self.arena) {
            self.emit_removed(&b, RemovalCause::OutOfBounds);
        }

        for hit in resolve_player_fire(&mut self.projectiles.player, &mut self.wave) {
            self.emit_removed(&hit.bullet, RemovalCause::Impact);
            if let Some(enemy) = hit.killed {
                self.emit_removed(&enemy, RemovalCause::Killed);
                self.events.push(GameEvent::Audio(AudioCue::Explode));
                self.score += enemy.kind.kill_score();
            }
        }

        if self.player.alive {
            for b in resolve_enemy_fire(&mut self.projectiles.enemy, &self.player.body) {
                self.emit_removed(&b, RemovalCause::Impact);
                self.player_hit(now);
            }
        }

        // ── 4. Stage clear ───────────────────────────────────────────────────
        if self.phase == SessionPhase::Playing && self.stages.clear_due(&self.wave, now) {
            self.score += STAGE_CLEAR_BONUS;
            self.events.push(GameEvent::StageCleared {
                stage: self.stages.stage(),
                bonus: STAGE_CLEAR_BONUS,
            });
            let plan = self.stages.advance(now);
            self.spawn_stage(plan, rng);
        }
    }

    fn player_hit(&mut self, now: u64) {
        match self.player.apply_hit(now) {
            HitOutcome::Ignored => {}
            HitOutcome::Absorbed { .. } | HitOutcome::Damaged => {
                self.events.push(GameEvent::Audio(AudioCue::Hit));
            }
            HitOutcome::Killed => {
                self.events.push(GameEvent::Audio(AudioCue::Hit));
                let body = self.player.body.clone();
                self.emit_removed(&body, RemovalCause::Killed);
                self.events.push(GameEvent::Audio(AudioCue::Explode));
                self.game_over();
            }
        }
    }

    fn game_over(&mut self) {
        self.phase = SessionPhase::GameOver;
        self.fire.disarm();
        if self.score > self.high_score {
            self.high_score = self.score;
            info!(score = self.score, "new high score");
            self.events.push(GameEvent::NewHighScore { score: self.score });
        }
        info!(score = self.score, stage = self.stage(), "game over");
        self.events.push(GameEvent::GameOver {
            score: self.score,
            high_score: self.high_score,
        });
    }

    // ── Spawning ─────────────────────────────────────────────────────────────

    fn spawn_stage(&mut self, plan: StagePlan, rng: &mut impl Rng) {
        for e in self.wave.clear() {
            self.emit_removed(&e, RemovalCause::Reset);
        }
        let spawned = plan.spawn(&self.arena, rng);
        self.wave.populate(spawned, &mut self.ids);
        for e in self.wave.enemies().to_vec() {
            self.emit_spawned(&e);
        }
        debug!(
            stage = plan.stage,
            pattern = ?plan.pattern,
            enemies = self.wave.len(),
            "stage started"
        );
        self.events.push(GameEvent::StageStarted { stage: plan.stage });
    }

    fn push_bullet(&mut self, bullet: Entity) {
        let (kind, x, y) = (bullet.kind, bullet.x, bullet.y);
        let id = self.projectiles.push(bullet, &mut self.ids);
        self.events.push(GameEvent::Spawned { id, kind, x, y });
    }

    fn emit_spawned(&mut self, e: &Entity) {
        self.events.push(GameEvent::Spawned {
            id: e.id,
            kind: e.kind,
            x: e.x,
            y: e.y,
        });
    }

    fn emit_removed(&mut self, e: &Entity, cause: RemovalCause) {
        self.events.push(GameEvent::Removed {
            id: e.id,
            kind: e.kind,
            x: e.x,
            y: e.y,
            cause,
        });
    }
}

fn spawn_player(arena: &Arena, now: u64, ids: &mut IdAllocator) -> PlayerController {
    let x = arena.clamp_x(arena.width / 2.0);
    let y = arena.clamp_y(arena.height - PLAYER_START_OFFSET);
    let mut player = PlayerController::new(x, y, now);
    player.body.id = ids.next();
    player
}
