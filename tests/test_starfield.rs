use space_shooting::entities::Arena;
use space_shooting::starfield::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

#[test]
fn stars_start_inside_the_arena() {
    let arena = Arena::new(800.0, 600.0);
    let field = Starfield::new(110, &arena, &mut seeded_rng());
    assert_eq!(field.stars.len(), 110);
    for s in &field.stars {
        assert!(s.x >= 0.0 && s.x <= 800.0);
        assert!(s.y >= 0.0 && s.y <= 600.0);
        assert!(s.speed > 0.0);
        assert!((1..=3).contains(&s.radius));
    }
}

#[test]
fn idle_drift_is_slower() {
    let arena = Arena::new(800.0, 600.0);
    let mut rng = seeded_rng();
    let mut field = Starfield::new(1, &arena, &mut rng);
    field.stars[0].y = 100.0;
    let speed = field.stars[0].speed;
    field.update(IDLE_DRIFT, &arena, &mut rng);
    assert!((field.stars[0].y - (100.0 + speed * IDLE_DRIFT)).abs() < 1e-4);
}

#[test]
fn stars_wrap_to_the_top() {
    let arena = Arena::new(800.0, 600.0);
    let mut rng = seeded_rng();
    let mut field = Starfield::new(1, &arena, &mut rng);
    field.stars[0].y = 605.9;
    field.stars[0].speed = 1.0;
    field.update(1.0, &arena, &mut rng);
    assert!(field.stars[0].y < 0.0);
}
