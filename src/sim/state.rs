//! World state: the player, the bot and food populations, and the camera
//!
//! Only the simulation step mutates the populations. Every consumed bot or
//! food item is replaced within the same step, so population sizes never
//! change over a session.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use super::ai::Bot;
use super::entity::{Entity, EntityKind};
use crate::consts::PLAYER_COLOR;
use crate::tuning::Tuning;

/// Names handed to bots in seeding order; respawns inherit the old name
pub const BOT_NAMES: [&str; 20] = [
    "Alpha", "Beta", "Nova", "Rex", "Luna", "Titan", "Spark", "Echo", "Blaze", "Storm",
    "Shadow", "Frost", "Viper", "Phoenix", "Omega", "Zeus", "Atlas", "Orion", "Nebula", "Comet",
];

/// Colors for bots and food
pub const PALETTE: [&str; 10] = [
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#FFA07A", "#98D8C8", "#F7DC6F", "#BB8FCE", "#85C1E2",
    "#F8B739", "#52B788",
];

/// Current phase of a world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// The player was eaten; the world no longer ticks
    GameOver,
}

/// Complete world state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the world was created from
    pub seed: u64,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Entity,
    /// Bots in list order (prey selection depends on this order)
    pub bots: Vec<Bot>,
    pub food: Vec<Entity>,
    /// Top-left corner of the visible area in world units (view state only)
    pub camera: Vec2,
    /// Size of the visible area, as of the last tick
    pub viewport: Vec2,
    pub rng: Pcg32,
}

impl GameState {
    /// Create a freshly seeded world with default tuning
    pub fn new(seed: u64, player_name: &str) -> Self {
        Self::with_tuning(seed, player_name, Tuning::default())
    }

    /// Create a freshly seeded world
    pub fn with_tuning(seed: u64, player_name: &str, tuning: Tuning) -> Self {
        let center = Vec2::splat(tuning.world_size / 2.0);
        let player = Entity::new(
            EntityKind::Player,
            center,
            tuning.min_size,
            PLAYER_COLOR,
            player_name,
        );

        let mut state = Self {
            seed,
            phase: GamePhase::Playing,
            time_ticks: 0,
            player,
            bots: Vec::with_capacity(tuning.bot_count),
            food: Vec::with_capacity(tuning.food_count),
            camera: Vec2::ZERO,
            viewport: Vec2::ZERO,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
        };
        state.set_viewport(Vec2::ZERO);

        for i in 0..state.tuning.bot_count {
            let size = if i < state.tuning.big_bot_count {
                state.tuning.min_size * state.tuning.big_bot_size_factor
            } else {
                state.tuning.min_size
            };
            let name = BOT_NAMES[i % BOT_NAMES.len()];
            let bot = state.spawn_bot(name, size);
            state.bots.push(bot);
        }

        for _ in 0..state.tuning.food_count {
            let food = state.spawn_food();
            state.food.push(food);
        }

        log::info!(
            "World seeded ({}): {} bots, {} food, player '{}'",
            seed,
            state.bots.len(),
            state.food.len(),
            state.player.name
        );

        state
    }

    pub fn random_color(&mut self) -> &'static str {
        PALETTE[self.rng.random_range(0..PALETTE.len())]
    }

    /// Uniform point where a circle of `radius` fits entirely inside the world
    pub fn random_position(&mut self, radius: f32) -> Vec2 {
        let world = self.tuning.world_size;
        if radius * 2.0 >= world {
            return Vec2::splat(world / 2.0);
        }
        Vec2::new(
            self.rng.random_range(radius..world - radius),
            self.rng.random_range(radius..world - radius),
        )
    }

    /// New anonymous food particle at a random position
    pub fn spawn_food(&mut self) -> Entity {
        let size = self.tuning.food_size;
        let pos = self.random_position(size);
        let color = self.random_color();
        Entity::new(EntityKind::Food, pos, size, color, "")
    }

    /// New bot at a random position
    pub fn spawn_bot(&mut self, name: impl Into<String>, size: f32) -> Bot {
        let pos = self.random_position(size);
        let color = self.random_color();
        Bot::new(Entity::new(EntityKind::Bot, pos, size, color, name))
    }

    /// Replacement for a consumed bot: minimum size, same name
    pub fn respawn_bot(&mut self, name: impl Into<String>) -> Bot {
        self.spawn_bot(name, self.tuning.min_size)
    }

    /// Record the visible area and centre the camera on the player.
    ///
    /// Call before the first tick so screen-space input maps through the
    /// right camera.
    pub fn set_viewport(&mut self, viewport: Vec2) {
        self.viewport = viewport;
        self.camera = super::tick::camera_for(self.player.pos, viewport, self.tuning.world_size);
    }

    /// Player score: whole units of mass
    pub fn score(&self) -> u32 {
        self.player.mass().floor() as u32
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}
