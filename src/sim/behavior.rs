//! AI behavior states and the per-tick transition policy

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::character::Character;
use crate::consts::WALL_MARGIN;

/// Active steering mode of an AI character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BehaviorState {
    #[default]
    Wander,
    Attack,
    Flee,
    AvoidWalls,
}

impl BehaviorState {
    pub fn as_str(&self) -> &'static str {
        match self {
            BehaviorState::Wander => "wander",
            BehaviorState::Attack => "attack",
            BehaviorState::Flee => "flee",
            BehaviorState::AvoidWalls => "avoid-walls",
        }
    }
}

/// One of the four field boundaries (screen coordinates, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wall {
    Left,
    Right,
    Top,
    Bottom,
}

impl Wall {
    /// Lookup order; ties in the nearest-wall search resolve to the earlier wall
    pub const ALL: [Wall; 4] = [Wall::Left, Wall::Right, Wall::Top, Wall::Bottom];

    /// Distance from `pos` to this wall of a field spanning `0..bounds`
    pub fn distance(self, pos: Vec2, bounds: Vec2) -> f32 {
        match self {
            Wall::Left => pos.x,
            Wall::Right => bounds.x - pos.x,
            Wall::Top => pos.y,
            Wall::Bottom => bounds.y - pos.y,
        }
    }

    /// Canonical direction vector: vertical walls share (0, 1), horizontal walls (1, 0)
    pub fn direction(self) -> Vec2 {
        match self {
            Wall::Left | Wall::Right => Vec2::Y,
            Wall::Top | Wall::Bottom => Vec2::X,
        }
    }

    /// Sign `will_collide_with_wall(direction())` takes when moving toward this wall
    fn approach_sign(self) -> f32 {
        match self {
            Wall::Left | Wall::Bottom => -1.0,
            Wall::Right | Wall::Top => 1.0,
        }
    }

    /// Whether `character`'s velocity carries it toward this wall
    pub fn is_approached_by(self, character: &Character) -> bool {
        character.will_collide_with_wall(self.direction()) * self.approach_sign() > 0.0
    }
}

/// Distances to `[left, right, top, bottom]`
pub fn dist_to_walls(pos: Vec2, bounds: Vec2) -> [f32; 4] {
    Wall::ALL.map(|wall| wall.distance(pos, bounds))
}

/// Wall closest to `pos`
pub fn nearest_wall(pos: Vec2, bounds: Vec2) -> Wall {
    let mut best = Wall::Left;
    let mut best_dist = f32::INFINITY;
    for wall in Wall::ALL {
        let d = wall.distance(pos, bounds);
        if d < best_dist {
            best = wall;
            best_dist = d;
        }
    }
    best
}

/// Direction vector of the wall closest to `pos`
pub fn nearest_wall_direction(pos: Vec2, bounds: Vec2) -> Vec2 {
    nearest_wall(pos, bounds).direction()
}

/// Decide the behavior state for `ai` this tick
///
/// Precedence: an edge within [`WALL_MARGIN`] being approached, then the
/// player inside the fov (size decides attack or flee), then wandering.
/// Returns `None` when the current state should be kept (equal size in fov).
pub fn evaluate(ai: &Character, player: &Character, bounds: Vec2) -> Option<BehaviorState> {
    let pos = ai.position();
    let near_wall = Wall::ALL
        .into_iter()
        .any(|wall| wall.distance(pos, bounds) < WALL_MARGIN && wall.is_approached_by(ai));
    if near_wall {
        return Some(BehaviorState::AvoidWalls);
    }

    if pos.distance(player.position()) < ai.fov() {
        return match ai.size().cmp(&player.size()) {
            std::cmp::Ordering::Greater => Some(BehaviorState::Attack),
            std::cmp::Ordering::Less => Some(BehaviorState::Flee),
            // Same size: no interest either way. A leftover avoid-walls would
            // keep bouncing the AI off a wall it is no longer near.
            std::cmp::Ordering::Equal => match ai.behavior() {
                Some(BehaviorState::AvoidWalls) => Some(BehaviorState::Wander),
                _ => None,
            },
        };
    }

    Some(BehaviorState::Wander)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Vec2 = Vec2::new(1000.0, 1000.0);

    fn ai(size: u32, pos: Vec2, vel: Vec2) -> Character {
        Character::ai(1, size, pos, vel, BehaviorState::Wander)
    }

    fn player() -> Character {
        Character::player(0, 2, Vec2::new(500.0, 500.0))
    }

    #[test]
    fn test_avoid_walls_near_each_edge() {
        let cases = [
            (Vec2::new(20.0, 20.0), Vec2::new(-10.0, 0.0)),
            (Vec2::new(500.0, 990.0), Vec2::new(0.0, 10.0)),
            (Vec2::new(500.0, 20.0), Vec2::new(0.0, -10.0)),
            (Vec2::new(990.0, 500.0), Vec2::new(10.0, 0.0)),
        ];
        for (pos, vel) in cases {
            let state = evaluate(&ai(1, pos, vel), &player(), BOUNDS);
            assert_eq!(state, Some(BehaviorState::AvoidWalls), "pos {pos:?} vel {vel:?}");
        }
    }

    #[test]
    fn test_moving_away_from_wall_does_not_avoid() {
        let state = evaluate(
            &ai(1, Vec2::new(10.0, 500.0), Vec2::new(10.0, 0.0)),
            &player(),
            BOUNDS,
        );
        assert_eq!(state, Some(BehaviorState::Wander));
    }

    #[test]
    fn test_fov_decides_attack_flee_wander() {
        let p = player();
        assert_eq!(
            evaluate(&ai(5, Vec2::new(100.0, 100.0), Vec2::ZERO), &p, BOUNDS),
            Some(BehaviorState::Wander)
        );
        assert_eq!(
            evaluate(&ai(5, Vec2::new(480.0, 500.0), Vec2::ZERO), &p, BOUNDS),
            Some(BehaviorState::Attack)
        );
        assert_eq!(
            evaluate(&ai(1, Vec2::new(480.0, 500.0), Vec2::ZERO), &p, BOUNDS),
            Some(BehaviorState::Flee)
        );
    }

    #[test]
    fn test_equal_size_keeps_state() {
        let mut same = Character::ai(1, 2, Vec2::new(490.0, 500.0), Vec2::ZERO, BehaviorState::Flee);
        assert_eq!(evaluate(&same, &player(), BOUNDS), None);

        same.set_behavior(BehaviorState::AvoidWalls);
        assert_eq!(
            evaluate(&same, &player(), BOUNDS),
            Some(BehaviorState::Wander)
        );
    }

    #[test]
    fn test_nearest_wall_direction_two_cases() {
        let b = Vec2::new(800.0, 600.0);
        assert_eq!(nearest_wall(Vec2::new(5.0, 300.0), b), Wall::Left);
        assert_eq!(nearest_wall(Vec2::new(795.0, 300.0), b), Wall::Right);
        assert_eq!(nearest_wall(Vec2::new(400.0, 5.0), b), Wall::Top);
        assert_eq!(nearest_wall(Vec2::new(400.0, 595.0), b), Wall::Bottom);

        assert_eq!(nearest_wall_direction(Vec2::new(5.0, 300.0), b), Vec2::Y);
        assert_eq!(nearest_wall_direction(Vec2::new(795.0, 300.0), b), Vec2::Y);
        assert_eq!(nearest_wall_direction(Vec2::new(400.0, 5.0), b), Vec2::X);
        assert_eq!(nearest_wall_direction(Vec2::new(400.0, 595.0), b), Vec2::X);
    }

    #[test]
    fn test_dist_to_walls_order() {
        let d = dist_to_walls(Vec2::new(10.0, 20.0), Vec2::new(100.0, 200.0));
        assert_eq!(d, [10.0, 90.0, 20.0, 180.0]);
    }

    #[test]
    fn test_behavior_names() {
        assert_eq!(BehaviorState::AvoidWalls.as_str(), "avoid-walls");
        assert_eq!(BehaviorState::default(), BehaviorState::Wander);
    }
}
