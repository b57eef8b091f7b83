//! Blob Arena - a mass-collection arcade game
//!
//! Core modules:
//! - `sim`: Simulation core (entities, bot AI, collisions, frame tick)
//! - `session`: Start / game over / restart state machine
//! - `tuning`: Data-driven game balance
//! - `renderer`: Canvas 2D drawing (browser only)

#[cfg(target_arch = "wasm32")]
pub mod renderer;
pub mod session;
pub mod sim;
pub mod tuning;

pub use session::{GameOverSignal, Session, SessionPhase};
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Square world edge length (world units)
    pub const WORLD_SIZE: f32 = 4000.0;
    /// Background grid spacing (render only)
    pub const GRID_SIZE: f32 = 50.0;

    /// Populations
    pub const FOOD_COUNT: usize = 600;
    pub const BOT_COUNT: usize = 20;
    /// The first bots seeded start big to create early threats
    pub const BIG_BOT_COUNT: usize = 4;
    pub const BIG_BOT_SIZE_FACTOR: f32 = 3.0;

    /// Size floor for player and bots (respawn size)
    pub const MIN_SIZE: f32 = 35.0;
    pub const FOOD_SIZE: f32 = 5.0;
    /// Speed at MIN_SIZE, in world units per tick
    pub const MAX_SPEED: f32 = 2.5;

    /// Mass ratio an eater must strictly exceed
    pub const DOMINANCE_MARGIN: f32 = 1.2;
    /// Share of the victim's mass the eater gains
    pub const TRANSFER_EFFICIENCY: f32 = 0.8;
    /// Velocity multiplier applied every tick
    pub const FRICTION: f32 = 0.95;
    /// Steering is ignored when the target is closer than this
    pub const STEERING_DEAD_ZONE: f32 = 10.0;

    /// Bot AI
    pub const BOT_SPEED_FACTOR: f32 = 0.8;
    pub const THREAT_RADIUS: f32 = 200.0;
    pub const PREY_RADIUS: f32 = 250.0;
    pub const FORAGE_RADIUS: f32 = 300.0;
    pub const FLEE_DISTANCE: f32 = 500.0;
    pub const WANDER_COOLDOWN_TICKS: u32 = 120;

    /// Number of entries on the leaderboard
    pub const LEADERBOARD_SIZE: usize = 4;
    /// Screen distance a fully deflected joystick points away from the viewport centre
    pub const JOYSTICK_REACH: f32 = 100.0;

    pub const PLAYER_COLOR: &str = "#FF1744";
    /// Label used when the player leaves the name field blank
    pub const DEFAULT_PLAYER_NAME: &str = "Oyuncu";
}

/// Clamp a circle's centre so the whole circle stays inside a square world.
///
/// When the circle is wider than the world it is pinned to `radius`.
#[inline]
pub fn clamp_to_world(pos: Vec2, radius: f32, world_size: f32) -> Vec2 {
    let hi = world_size - radius;
    Vec2::new(pos.x.min(hi).max(radius), pos.y.min(hi).max(radius))
}

/// Unit direction and distance from `from` to `to`.
///
/// Returns `None` when the points coincide.
#[inline]
pub fn direction_to(from: Vec2, to: Vec2) -> Option<(Vec2, f32)> {
    let delta = to - from;
    let dist = delta.length();
    if dist > 0.0 {
        Some((delta / dist, dist))
    } else {
        None
    }
}
