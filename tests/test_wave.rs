use space_shooting::constants::*;
use space_shooting::entities::*;
use space_shooting::wave::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn arena() -> Arena {
    Arena::new(800.0, 800.0)
}

fn spawn_stage(stage: u32) -> Vec<Entity> {
    StagePlan::for_stage(stage).spawn(&arena(), &mut seeded_rng())
}

fn wave_of(enemies: Vec<Entity>) -> EnemyWave {
    let mut wave = EnemyWave::new();
    wave.populate(enemies, &mut IdAllocator::default());
    wave
}

// ── StagePlan ─────────────────────────────────────────────────────────────────

#[test]
fn patterns_cycle_every_three_stages() {
    let patterns: Vec<Pattern> = (1..=7).map(|s| StagePlan::for_stage(s).pattern).collect();
    assert_eq!(
        patterns,
        vec![
            Pattern::Line,
            Pattern::Patrol,
            Pattern::Boss,
            Pattern::Line,
            Pattern::Patrol,
            Pattern::Boss,
            Pattern::Line
        ]
    );
    assert_eq!(StagePlan::for_stage(3).wave, 0);
    assert_eq!(StagePlan::for_stage(4).wave, 1);
    assert_eq!(StagePlan::for_stage(9).wave, 2);
}

#[test]
fn stage_one_spawns_three_stationary_grunts() {
    let enemies = spawn_stage(1);
    assert_eq!(enemies.len(), 3);
    for e in &enemies {
        assert_eq!(e.kind, EntityKind::Grunt);
        assert_eq!(e.hp, 1);
        assert_eq!(e.vx, 0.0);
        assert_eq!(e.vy, ENEMY_DOWN_SPEED);
        assert_eq!(e.y, LINE_ROW_Y);
    }
    let xs: Vec<f32> = enemies.iter().map(|e| e.x).collect();
    assert_eq!(xs, vec![200.0, 400.0, 600.0]);
}

#[test]
fn later_line_stage_grows_the_row() {
    let enemies = spawn_stage(4);
    assert_eq!(enemies.len(), 4);
    assert!(enemies.iter().all(|e| e.kind == EntityKind::Grunt && e.vx == 0.0));
}

#[test]
fn patrol_alternates_grunts_and_faster_heavies() {
    let enemies = spawn_stage(2);
    assert_eq!(enemies.len(), 3);
    assert_eq!(enemies[0].kind, EntityKind::Grunt);
    assert_eq!(enemies[1].kind, EntityKind::Heavy);
    assert_eq!(enemies[2].kind, EntityKind::Grunt);
    assert_eq!(enemies[0].hp, 1);
    assert_eq!(enemies[1].hp, 2);
    assert_eq!(enemies[0].vx.abs(), 2.0);
    assert_eq!(enemies[1].vx.abs(), 3.0);
}

#[test]
fn boss_stage_has_centered_boss_and_escorts() {
    let enemies = spawn_stage(3);
    assert_eq!(enemies.len(), 3); // boss + 2 escorts
    let boss = &enemies[0];
    assert_eq!(boss.kind, EntityKind::Boss(BossPhase::One));
    assert_eq!(boss.hp, 6);
    assert_eq!(boss.vx.abs(), 1.0);
    assert_eq!((boss.x, boss.y), (400.0, BOSS_ROW_Y));
    for escort in &enemies[1..] {
        assert_eq!(escort.kind, EntityKind::Heavy);
        assert_eq!(escort.hp, 2);
        assert_eq!(escort.vx.abs(), 3.0);
        assert_eq!(escort.y, ESCORT_ROW_Y);
    }
}

#[test]
fn second_boss_stage_is_tougher() {
    let enemies = spawn_stage(6);
    assert_eq!(enemies[0].hp, 8);
    assert_eq!(enemies[0].vx.abs(), 2.0);
    assert_eq!(enemies.len(), 1 + 3);
    assert_eq!(enemies[1].vx.abs(), 4.0);
}

#[test]
fn spawn_columns_are_clamped_into_the_margin() {
    let narrow = Arena::new(150.0, 800.0);
    let enemies = StagePlan::for_stage(1).spawn(&narrow, &mut seeded_rng());
    for e in &enemies {
        assert!(e.x >= MARGIN && e.x <= narrow.width - MARGIN);
    }
}

// ── EnemyWave ─────────────────────────────────────────────────────────────────

#[test]
fn populate_assigns_distinct_ids() {
    let wave = wave_of(spawn_stage(2));
    let mut ids: Vec<EntityId> = wave.enemies().iter().map(|e| e.id).collect();
    ids.dedup();
    assert_eq!(ids.len(), 3);
    assert!(ids.iter().all(|id| *id != EntityId::UNASSIGNED));
}

#[test]
fn enemies_drift_down_every_tick() {
    let mut wave = wave_of(spawn_stage(1));
    wave.advance(&arena());
    for e in wave.enemies() {
        assert!((e.y - (LINE_ROW_Y + ENEMY_DOWN_SPEED)).abs() < 1e-4);
    }
}

#[test]
fn enemy_wraps_from_bottom_to_top() {
    let e = Entity::new(EntityKind::Grunt, 100.0, 850.0, 1).with_velocity(0.0, ENEMY_DOWN_SPEED);
    let mut wave = wave_of(vec![e]);
    wave.advance(&arena());
    assert_eq!(wave.len(), 1);
    assert_eq!(wave.enemies()[0].y, -MARGIN);
}

#[test]
fn enemy_wraps_horizontally_both_ways() {
    let right = Entity::new(EntityKind::Heavy, 849.0, 300.0, 2).with_velocity(3.0, 0.0);
    let left = Entity::new(EntityKind::Heavy, -49.0, 300.0, 2).with_velocity(-3.0, 0.0);
    let mut wave = wave_of(vec![right, left]);
    wave.advance(&arena());
    assert_eq!(wave.enemies()[0].x, -MARGIN);
    assert_eq!(wave.enemies()[1].x, 800.0 + MARGIN);
}

#[test]
fn damage_removes_only_at_zero_hp() {
    let heavy = Entity::new(EntityKind::Heavy, 100.0, 100.0, 2);
    let mut wave = wave_of(vec![heavy]);
    assert!(wave.damage(0).is_none());
    assert_eq!(wave.enemies()[0].hp, 1);
    let killed = wave.damage(0).expect("second hit kills");
    assert_eq!(killed.kind, EntityKind::Heavy);
    assert!(wave.is_empty());
    assert!(wave.damage(0).is_none());
}

// ── Boss phase ────────────────────────────────────────────────────────────────

#[test]
fn boss_enrages_at_half_hp_and_speeds_up() {
    let boss = Entity::new(EntityKind::Boss(BossPhase::One), 400.0, 160.0, 6)
        .with_velocity(-1.0, ENEMY_DOWN_SPEED);
    let mut wave = wave_of(vec![boss]);

    wave.damage(0);
    wave.damage(0);
    assert!(wave.advance(&arena()).is_empty()); // hp 4 > 3
    assert_eq!(wave.enemies()[0].boss_phase(), Some(BossPhase::One));

    wave.damage(0); // hp 3
    let enraged = wave.advance(&arena());
    assert_eq!(enraged, vec![wave.enemies()[0].id]);
    assert_eq!(wave.enemies()[0].boss_phase(), Some(BossPhase::Two));
    assert_eq!(wave.enemies()[0].vx, -3.0);
    assert!(wave.has_enraged_boss());
}

#[test]
fn boss_phase_never_reverts() {
    let mut boss = Entity::new(EntityKind::Boss(BossPhase::One), 400.0, 160.0, 6)
        .with_velocity(1.0, ENEMY_DOWN_SPEED);
    boss.hp = 3;
    let mut wave = wave_of(vec![boss]);
    assert_eq!(wave.advance(&arena()).len(), 1);
    for _ in 0..50 {
        assert!(wave.advance(&arena()).is_empty());
        assert_eq!(wave.enemies()[0].boss_phase(), Some(BossPhase::Two));
    }
    assert_eq!(wave.enemies()[0].vx, 3.0); // speed bonus applied once
}

// ── StageDirector ─────────────────────────────────────────────────────────────

#[test]
fn director_starts_at_stage_one_unlocked() {
    let d = StageDirector::new();
    assert_eq!(d.stage(), 1);
    assert!(!d.is_locked(0));
    assert!(d.clear_due(&EnemyWave::new(), 0));
}

#[test]
fn advance_increments_and_locks_briefly() {
    let mut d = StageDirector::new();
    let plan = d.advance(1000);
    assert_eq!(plan.stage, 2);
    assert_eq!(d.stage(), 2);
    let empty = EnemyWave::new();
    assert!(!d.clear_due(&empty, 1000 + STAGE_LOCK - 1));
    assert!(d.clear_due(&empty, 1000 + STAGE_LOCK));
}

#[test]
fn clear_not_due_while_enemies_remain() {
    let d = StageDirector::new();
    let wave = wave_of(spawn_stage(1));
    assert!(!d.clear_due(&wave, 10_000));
}

#[test]
fn reset_returns_to_stage_one() {
    let mut d = StageDirector::new();
    d.advance(0);
    d.advance(500);
    d.reset();
    assert_eq!(d.stage(), 1);
    assert!(!d.is_locked(0));
}
