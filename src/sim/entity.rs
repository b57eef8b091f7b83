//! Entity model shared by the player, bots and food
//!
//! An entity is a circle whose radius equals its size and whose mass is
//! `size²`. Mass is always derived, never stored.

use glam::Vec2;
use serde::Serialize;

use crate::consts::{DOMINANCE_MARGIN, FRICTION, TRANSFER_EFFICIENCY};
use crate::tuning::Tuning;
use crate::{clamp_to_world, direction_to};

/// Behavior tag, selects which steering rules drive an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EntityKind {
    /// Driven by input
    Player,
    /// Driven by the bot decision policy
    Bot,
    /// Inert, only ever consumed
    Food,
}

impl EntityKind {
    /// Multiplier applied to the base steering speed
    pub fn speed_factor(self, tuning: &Tuning) -> f32 {
        match self {
            EntityKind::Player => 1.0,
            EntityKind::Bot => tuning.bot_speed_factor,
            EntityKind::Food => 0.0,
        }
    }
}

/// True if something of `attacker_mass` may consume something of `victim_mass`
#[inline]
pub fn dominates(attacker_mass: f32, victim_mass: f32) -> bool {
    attacker_mass > victim_mass * DOMINANCE_MARGIN
}

/// Physical state shared by every entity
#[derive(Debug, Clone, Serialize)]
pub struct Entity {
    pub kind: EntityKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub color: &'static str,
    /// Display label, empty for food
    pub name: String,
}

impl Entity {
    pub fn new(
        kind: EntityKind,
        pos: Vec2,
        size: f32,
        color: &'static str,
        name: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            pos,
            vel: Vec2::ZERO,
            size,
            color,
            name: name.into(),
        }
    }

    #[inline]
    pub fn mass(&self) -> f32 {
        self.size * self.size
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.size
    }

    pub fn distance_to(&self, other: &Entity) -> f32 {
        self.pos.distance(other.pos)
    }

    /// Circle-circle overlap (touching is not a collision)
    pub fn collides_with(&self, other: &Entity) -> bool {
        self.distance_to(other) < self.radius() + other.radius()
    }

    pub fn can_eat(&self, other: &Entity) -> bool {
        dominates(self.mass(), other.mass())
    }

    /// Absorb `other`'s mass at the transfer efficiency.
    ///
    /// The caller removes and respawns `other`.
    pub fn consume(&mut self, other: &Entity) {
        self.size = (self.mass() + other.mass() * TRANSFER_EFFICIENCY).sqrt();
    }

    /// Move by velocity, clamp inside the world, then apply friction
    pub fn integrate(&mut self, world_size: f32) {
        self.pos += self.vel;
        self.clamp_to(world_size);
        self.vel *= FRICTION;
    }

    /// Push the entity back inside the world for its current radius
    pub fn clamp_to(&mut self, world_size: f32) {
        self.pos = clamp_to_world(self.pos, self.radius(), world_size);
    }

    /// Base speed for the current size: bigger entities are slower
    pub fn base_speed(&self, tuning: &Tuning) -> f32 {
        tuning.max_speed * (tuning.min_size / self.size)
    }

    /// Set velocity toward `target` at the size-scaled speed.
    ///
    /// Inside the dead zone the velocity is left alone so the entity coasts
    /// to rest instead of jittering around the target. Returns whether a new
    /// velocity was set.
    pub fn steer_toward(&mut self, target: Vec2, tuning: &Tuning) -> bool {
        match direction_to(self.pos, target) {
            Some((dir, dist)) if dist > tuning.dead_zone => {
                self.vel = dir * self.base_speed(tuning) * self.kind.speed_factor(tuning);
                true
            }
            _ => false,
        }
    }
}
