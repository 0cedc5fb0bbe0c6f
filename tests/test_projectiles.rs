use space_shooting::collision::*;
use space_shooting::constants::*;
use space_shooting::entities::*;
use space_shooting::projectiles::*;
use space_shooting::wave::EnemyWave;

fn arena() -> Arena {
    Arena::new(800.0, 800.0)
}

fn wave_of(enemies: Vec<Entity>) -> EnemyWave {
    let mut wave = EnemyWave::new();
    wave.populate(enemies, &mut IdAllocator::default());
    wave
}

// ── ProjectileSet ─────────────────────────────────────────────────────────────

#[test]
fn push_files_bullets_by_owner() {
    let mut set = ProjectileSet::new();
    let mut ids = IdAllocator::default();
    let a = set.push(Entity::bullet(EntityKind::PlayerBullet, 0.0, 0.0, 0.0, BULLET_SPEED), &mut ids);
    let b = set.push(Entity::bullet(EntityKind::EnemyBullet, 0.0, 0.0, 0.0, BULLET_SPEED), &mut ids);
    assert_ne!(a, b);
    assert_eq!(set.player.len(), 1);
    assert_eq!(set.enemy.len(), 1);
    assert_eq!(set.player[0].id, a);
    assert_eq!(set.len(), 2);
}

#[test]
fn advance_moves_by_velocity() {
    let mut set = ProjectileSet::new();
    let mut ids = IdAllocator::default();
    set.push(Entity::bullet(EntityKind::PlayerBullet, 400.0, 600.0, 0.0, BULLET_SPEED), &mut ids);
    set.push(Entity::bullet(EntityKind::EnemyBullet, 400.0, 200.0, 0.0, BULLET_SPEED), &mut ids);
    assert!(set.advance(&arena()).is_empty());
    assert_eq!(set.player[0].y, 593.0);
    assert_eq!(set.enemy[0].y, 207.0);
}

#[test]
fn advance_prunes_only_past_the_margin() {
    let mut set = ProjectileSet::new();
    let mut ids = IdAllocator::default();
    // lands exactly on -MARGIN: kept
    set.push(Entity::bullet(EntityKind::PlayerBullet, 400.0, -43.0, 0.0, BULLET_SPEED), &mut ids);
    // lands at -52: pruned
    set.push(Entity::bullet(EntityKind::PlayerBullet, 400.0, -45.0, 0.0, BULLET_SPEED), &mut ids);
    // lands at 852: pruned
    set.push(Entity::bullet(EntityKind::EnemyBullet, 400.0, 845.0, 0.0, BULLET_SPEED), &mut ids);

    let pruned = set.advance(&arena());
    assert_eq!(pruned.len(), 2);
    assert_eq!(set.len(), 1);
    assert_eq!(set.player[0].y, -MARGIN);
}

#[test]
fn sideways_bullets_are_pruned_too() {
    let mut set = ProjectileSet::new();
    let mut ids = IdAllocator::default();
    let b = Entity::new(EntityKind::EnemyBullet, 848.0, 400.0, 1).with_velocity(5.0, 0.0);
    set.push(b, &mut ids);
    assert_eq!(set.advance(&arena()).len(), 1);
    assert!(set.is_empty());
}

#[test]
fn clear_returns_everything() {
    let mut set = ProjectileSet::new();
    let mut ids = IdAllocator::default();
    set.push(Entity::bullet(EntityKind::PlayerBullet, 0.0, 0.0, 0.0, 1.0), &mut ids);
    set.push(Entity::bullet(EntityKind::EnemyBullet, 0.0, 0.0, 0.0, 1.0), &mut ids);
    assert_eq!(set.clear().len(), 2);
    assert!(set.is_empty());
}

// ── Player fire ───────────────────────────────────────────────────────────────

#[test]
fn bullet_kills_one_hp_grunt() {
    let mut wave = wave_of(vec![Entity::new(EntityKind::Grunt, 200.0, 220.0, 1)]);
    let mut bullets = vec![Entity::new(EntityKind::PlayerBullet, 200.0, 240.0, 1)];
    let struck = resolve_player_fire(&mut bullets, &mut wave);

    assert_eq!(struck.len(), 1);
    let killed = struck[0].killed.as_ref().expect("grunt destroyed");
    assert_eq!(killed.kind.kill_score(), GRUNT_SCORE);
    assert!(bullets.is_empty());
    assert!(wave.is_empty());
}

#[test]
fn heavy_survives_first_hit() {
    let mut wave = wave_of(vec![Entity::new(EntityKind::Heavy, 200.0, 220.0, 2)]);
    let mut bullets = vec![Entity::new(EntityKind::PlayerBullet, 200.0, 240.0, 1)];
    let struck = resolve_player_fire(&mut bullets, &mut wave);
    assert_eq!(struck.len(), 1);
    assert!(struck[0].killed.is_none());
    assert_eq!(wave.enemies()[0].hp, 1);
}

#[test]
fn overlapping_enemies_only_first_takes_the_hit() {
    let mut wave = wave_of(vec![
        Entity::new(EntityKind::Heavy, 200.0, 220.0, 2),
        Entity::new(EntityKind::Heavy, 210.0, 220.0, 2),
    ]);
    let mut bullets = vec![Entity::new(EntityKind::PlayerBullet, 205.0, 230.0, 1)];
    resolve_player_fire(&mut bullets, &mut wave);
    assert_eq!(wave.enemies()[0].hp, 1);
    assert_eq!(wave.enemies()[1].hp, 2);
}

#[test]
fn each_bullet_resolves_independently() {
    let mut wave = wave_of(vec![Entity::new(EntityKind::Heavy, 200.0, 220.0, 2)]);
    let mut bullets = vec![
        Entity::new(EntityKind::PlayerBullet, 200.0, 240.0, 1),
        Entity::new(EntityKind::PlayerBullet, 600.0, 240.0, 1),
        Entity::new(EntityKind::PlayerBullet, 200.0, 250.0, 1),
    ];
    let struck = resolve_player_fire(&mut bullets, &mut wave);
    assert_eq!(struck.len(), 2);
    assert!(struck[1].killed.is_some());
    assert_eq!(bullets.len(), 1);
    assert_eq!(bullets[0].x, 600.0);
}

// ── Enemy fire ────────────────────────────────────────────────────────────────

#[test]
fn enemy_bullets_touching_player_are_removed() {
    let player = Entity::new(EntityKind::Player, 400.0, 680.0, 3);
    let mut bullets = vec![
        Entity::new(EntityKind::EnemyBullet, 400.0, 660.0, 1),
        Entity::new(EntityKind::EnemyBullet, 100.0, 100.0, 1),
        Entity::new(EntityKind::EnemyBullet, 420.0, 690.0, 1),
    ];
    let hits = resolve_enemy_fire(&mut bullets, &player);
    assert_eq!(hits.len(), 2);
    assert_eq!(bullets.len(), 1);
    assert_eq!(bullets[0].x, 100.0);
}
