//! Property tests for the movement primitives and spawn relocation

use glam::Vec2;
use proptest::prelude::*;

use hungry_sharks::consts::{MAX_SIZE, MIN_SIZE, SIM_DT};
use hungry_sharks::sim::{BehaviorState, Character, nearest_wall_direction};

fn coord() -> impl Strategy<Value = f32> {
    -2000.0f32..2000.0
}

fn vec2() -> impl Strategy<Value = Vec2> {
    (coord(), coord()).prop_map(|(x, y)| Vec2::new(x, y))
}

fn ai(size: u32, pos: Vec2, vel: Vec2) -> Character {
    Character::ai(1, size, pos, vel, BehaviorState::Wander)
}

proptest! {
    #[test]
    fn update_pos_is_one_euler_step(
        pos in vec2(),
        vel in vec2(),
        dt in 0.001f32..2.0,
    ) {
        let mut c = ai(1, pos, vel);
        c.update_pos(dt);
        let expected = pos + vel * dt;
        prop_assert!((c.position() - expected).length() <= 1e-3 * (1.0 + expected.length()));
    }

    #[test]
    fn move_toward_point_closes_in_on_a_line(
        start in vec2(),
        target in vec2(),
        size in MIN_SIZE..=MAX_SIZE,
        steps in 1usize..40,
    ) {
        let initial = target - start;
        prop_assume!(initial.length() > 10.0);

        let mut c = ai(size, start, Vec2::ZERO);
        let mut last = initial.length();
        for _ in 0..steps {
            c.move_toward_point(target, false, SIM_DT);
            let remaining = target - c.position();
            prop_assert!(remaining.length() <= last + 1e-3);
            if remaining.length() > 10.0 {
                let drift = (remaining.normalize() - initial.normalize()).length();
                prop_assert!(drift < 1e-2, "heading drifted by {}", drift);
            }
            last = remaining.length();
        }
    }

    #[test]
    fn move_away_from_point_increases_distance(
        start in vec2(),
        threat in vec2(),
        size in MIN_SIZE..=MAX_SIZE,
    ) {
        prop_assume!(start.distance(threat) > 1.0);
        let mut c = ai(size, start, Vec2::ZERO);
        c.move_away_from_point(threat, SIM_DT);
        prop_assert!(c.position().distance(threat) > start.distance(threat));
        prop_assert!((c.velocity().length() - c.max_speed()).abs() < 1e-3);
    }

    #[test]
    fn bounce_keeps_speed(vel in vec2(), horizontal in any::<bool>()) {
        let wall = if horizontal { Vec2::X } else { Vec2::Y };
        let mut c = ai(3, Vec2::ZERO, vel);
        c.bounce(wall, SIM_DT);
        prop_assert!((c.velocity().length() - vel.length()).abs() <= 1e-3 * (1.0 + vel.length()));
        if horizontal {
            prop_assert_eq!(c.velocity().x, vel.x);
        } else {
            prop_assert_eq!(c.velocity().y, vel.y);
        }
    }

    #[test]
    fn relocate_clears_fov_or_leaves_alone(
        player in (0.0f32..1000.0, 0.0f32..1000.0),
        offset in vec2(),
        size in MIN_SIZE..=MAX_SIZE,
    ) {
        let player = Vec2::new(player.0, player.1);
        let spawn = player + offset;
        let mut aip = ai(size, spawn, Vec2::ZERO);
        let inside = player.distance(spawn) < aip.fov();

        aip.relocate(player, Vec2::new(1000.0, 1000.0));

        if inside {
            let p = aip.position();
            prop_assert!(player.distance(p) > aip.fov());
            prop_assert!((0.0..=1000.0).contains(&p.x) && (0.0..=1000.0).contains(&p.y));
        } else {
            prop_assert_eq!(aip.position(), spawn);
        }
    }

    #[test]
    fn nearest_wall_direction_is_canonical(x in 0.0f32..800.0, y in 0.0f32..600.0) {
        let dir = nearest_wall_direction(Vec2::new(x, y), Vec2::new(800.0, 600.0));
        prop_assert!(dir == Vec2::X || dir == Vec2::Y);
    }
}

#[test]
fn normalizing_zero_is_zero() {
    // Steering straight at the current spot must not produce NaN
    let mut c = ai(4, Vec2::new(50.0, 50.0), Vec2::new(3.0, 3.0));
    c.move_away_from_point(Vec2::new(50.0, 50.0), SIM_DT);
    assert_eq!(c.velocity(), Vec2::ZERO);
    assert_eq!(c.position(), Vec2::new(50.0, 50.0));
}
