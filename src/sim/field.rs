//! The playing field: owns every character and runs the per-tick update
//!
//! Each [`Field::update`] re-evaluates AI behavior states, then resolves the
//! player's collisions: smaller AIs are eaten and replaced, a larger AI ends
//! the game. Once the game has ended the field no longer changes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::behavior::{self, BehaviorState};
use super::character::Character;
use super::rng::{RandomSource, SimRng};
use crate::consts::*;
use crate::error::GameError;

/// Outcome of the session so far
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameEnd {
    /// Still playing
    #[default]
    None,
    Win,
    Lose,
}

impl GameEnd {
    pub fn is_over(&self) -> bool {
        !matches!(self, GameEnd::None)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameEnd::None => "",
            GameEnd::Win => "win",
            GameEnd::Lose => "lose",
        }
    }
}

/// Mutable view handed to the AI controller
///
/// Exposes the AI characters as a slice so their movement can be driven
/// without any way to add or remove members.
pub struct FieldParts<'a, R> {
    pub player: &'a Character,
    pub characters: &'a mut [Character],
    pub rng: &'a mut R,
    pub bounds: Vec2,
}

/// Read-only per-character data for renderers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterView {
    pub id: u32,
    pub is_player: bool,
    pub size: u32,
    pub position: Vec2,
    pub velocity: Vec2,
    pub growth_progress: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub behavior: Option<BehaviorState>,
}

impl From<&Character> for CharacterView {
    fn from(c: &Character) -> Self {
        Self {
            id: c.id(),
            is_player: c.is_player(),
            size: c.size(),
            position: c.position(),
            velocity: c.velocity(),
            growth_progress: c.growth_progress(),
            behavior: c.behavior(),
        }
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSnapshot {
    pub width: f32,
    pub height: f32,
    pub tick: u64,
    pub game_end: GameEnd,
    pub player: CharacterView,
    pub characters: Vec<CharacterView>,
}

/// The bounded play area and sole owner of the player and AI characters
#[derive(Debug, Clone)]
pub struct Field<R: RandomSource = SimRng> {
    width: f32,
    height: f32,
    player: Character,
    /// AI characters (order irrelevant, membership matters)
    characters: Vec<Character>,
    game_end: GameEnd,
    rng: R,
    tick_count: u64,
    /// Next entity ID (the player is 0)
    next_id: u32,
}

impl Field<SimRng> {
    /// Create a seeded field with `num_characters` AIs
    pub fn new(width: f32, height: f32, num_characters: usize, seed: u64) -> Result<Self, GameError> {
        Self::with_rng(width, height, num_characters, SimRng::new(seed))
    }
}

impl<R: RandomSource> Field<R> {
    /// Create a field drawing all randomness from `rng`
    pub fn with_rng(
        width: f32,
        height: f32,
        num_characters: usize,
        rng: R,
    ) -> Result<Self, GameError> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(width) || !valid(height) {
            return Err(GameError::InvalidDimensions { width, height });
        }

        let mut field = Self {
            width,
            height,
            player: Character::player(0, PLAYER_START_SIZE, Vec2::new(width / 2.0, height / 2.0)),
            characters: Vec::with_capacity(num_characters),
            game_end: GameEnd::None,
            rng,
            tick_count: 0,
            next_id: 1,
        };

        for _ in 0..num_characters {
            field.spawn_replacement();
        }

        log::info!(
            "Field {}x{}: player size {}, {} AI characters",
            width,
            height,
            field.player.size(),
            field.characters.len()
        );

        Ok(field)
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn bounds(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn player(&self) -> &Character {
        &self.player
    }

    /// The player, for steering; size only changes through eating
    pub fn player_mut(&mut self) -> &mut Character {
        &mut self.player
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    pub fn game_end(&self) -> GameEnd {
        self.game_end
    }

    /// Number of updates that have run
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Split borrows for the AI controller
    pub fn parts_mut(&mut self) -> FieldParts<'_, R> {
        let bounds = self.bounds();
        FieldParts {
            player: &self.player,
            characters: &mut self.characters,
            rng: &mut self.rng,
            bounds,
        }
    }

    /// Allocate a new entity ID
    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Build an AI of the given size at a random in-bounds position with a
    /// random heading; it is not added to the field
    pub fn new_ai(&mut self, size: u32) -> Character {
        let id = self.next_entity_id();
        let bounds = self.bounds();
        let pos = self.rng.point_in_rect(Vec2::ZERO, bounds);
        let heading = self.rng.unit_heading();
        let mut aip = Character::ai(id, size, pos, Vec2::ZERO, BehaviorState::Wander);
        aip.set_velocity(heading * aip.max_speed());
        aip
    }

    /// Add an AI to the field as is
    pub fn spawn_ai(&mut self, aip: Character) {
        if aip.is_player() {
            log::error!("refusing to spawn a second player (id {})", aip.id());
            return;
        }
        self.characters.push(aip);
    }

    /// Number of AIs larger than the player
    pub fn num_nemeses(&self) -> usize {
        let size = self.player.size();
        self.characters.iter().filter(|c| c.size() > size).count()
    }

    /// Pick a size for a freshly spawned AI
    ///
    /// Uniform over a band reaching [`SPAWN_BAND_BELOW`] under the player's
    /// size up to the player's size, or one above it while fewer than
    /// [`NEMESIS_CAP`] nemeses are on the field.
    pub fn spawn_size(&mut self) -> u32 {
        let player = self.player.size();
        let lo = player.saturating_sub(SPAWN_BAND_BELOW).max(MIN_SIZE);
        let hi = if self.num_nemeses() < NEMESIS_CAP {
            player + 1
        } else {
            player
        };
        let hi = hi.clamp(MIN_SIZE, MAX_SIZE);
        let lo = lo.min(hi);
        self.rng.range_inclusive(lo, hi)
    }

    /// Spawn a balanced AI, moved clear of the player if it landed in reach
    pub fn spawn_replacement(&mut self) -> u32 {
        let size = self.spawn_size();
        let mut aip = self.new_ai(size);
        aip.relocate(self.player.position(), self.bounds());
        let id = aip.id();
        log::debug!(
            "spawned ai {} size {} at ({:.1}, {:.1})",
            id,
            size,
            aip.position().x,
            aip.position().y
        );
        self.characters.push(aip);
        id
    }

    /// Distances from `character` to `[left, right, top, bottom]`
    pub fn dist_to_walls(&self, character: &Character) -> [f32; 4] {
        behavior::dist_to_walls(character.position(), self.bounds())
    }

    /// Direction vector of the wall nearest to `character`
    pub fn nearest_wall_direction(&self, character: &Character) -> Vec2 {
        behavior::nearest_wall_direction(character.position(), self.bounds())
    }

    /// Re-evaluate every AI's behavior state
    pub fn update_behaviors(&mut self) {
        let bounds = self.bounds();
        for aip in &mut self.characters {
            if let Some(state) = behavior::evaluate(aip, &self.player, bounds) {
                aip.set_behavior(state);
            }
        }
    }

    /// Whether `aip` is touching the player
    pub fn collides_with_player(&self, aip: &Character) -> bool {
        aip.position().distance(self.player.position()) < COLLISION_DISTANCE
    }

    /// Indices of the AIs touching the player, ascending
    pub fn player_collisions(&self) -> Vec<usize> {
        self.characters
            .iter()
            .enumerate()
            .filter(|(_, c)| self.collides_with_player(c))
            .map(|(i, _)| i)
            .collect()
    }

    /// Resolve the player's collisions, then check for a win
    ///
    /// Collisions are gathered before anything is removed. A larger AI ends
    /// the game and stops the pass; smaller AIs eaten before that still grow
    /// the player, leave the field, and are replaced once the pass is over.
    pub fn resolve_eating(&mut self) {
        if self.game_end.is_over() {
            return;
        }

        let mut eaten: Vec<usize> = Vec::new();
        for idx in self.player_collisions() {
            let aip_size = self.characters[idx].size();
            let player_size = self.player.size();
            match aip_size.cmp(&player_size) {
                std::cmp::Ordering::Greater => {
                    self.game_end = GameEnd::Lose;
                    log::info!(
                        "Player (size {}) eaten by ai {} (size {}) - game over",
                        player_size,
                        self.characters[idx].id(),
                        aip_size
                    );
                    break;
                }
                std::cmp::Ordering::Less => {
                    let meal = meal_growth(aip_size, player_size);
                    self.player.grow(meal);
                    log::debug!(
                        "player ate ai {} (size {}): +{:.1} growth, now size {} at {:.1}",
                        self.characters[idx].id(),
                        aip_size,
                        meal,
                        self.player.size(),
                        self.player.growth_progress()
                    );
                    eaten.push(idx);
                }
                std::cmp::Ordering::Equal => {}
            }
        }

        // Highest index first so the remaining indices stay valid
        for &idx in eaten.iter().rev() {
            self.characters.remove(idx);
        }
        for _ in 0..eaten.len() {
            self.spawn_replacement();
        }

        if !self.game_end.is_over() && self.player.size() > WIN_SIZE {
            self.game_end = GameEnd::Win;
            log::info!("Player reached size {} - win", self.player.size());
        }
    }

    /// Advance the field by one tick; a no-op once the game has ended
    pub fn update(&mut self) -> GameEnd {
        if self.game_end.is_over() {
            return self.game_end;
        }
        self.update_behaviors();
        self.resolve_eating();
        self.tick_count += 1;
        self.game_end
    }

    /// Read-only copy of the field for renderers
    pub fn snapshot(&self) -> FieldSnapshot {
        FieldSnapshot {
            width: self.width,
            height: self.height,
            tick: self.tick_count,
            game_end: self.game_end,
            player: CharacterView::from(&self.player),
            characters: self.characters.iter().map(CharacterView::from).collect(),
        }
    }
}

/// Growth a player of `player_size` gets from eating an AI of `aip_size`
pub fn meal_growth(aip_size: u32, player_size: u32) -> f32 {
    MEAL_GROWTH * aip_size as f32 / player_size.max(1) as f32
}
