//! Bot decision policy
//!
//! Each tick a bot picks one target point, in strict priority order:
//! flee the nearest threat, chase prey, forage the nearest food, or wander.
//! The policy only reads the world; it returns a [`Decision`] that the tick
//! applies to the bot afterwards.

use glam::Vec2;
use rand::Rng;

use super::entity::Entity;
use crate::direction_to;
use crate::tuning::Tuning;

/// Which branch of the policy produced the current target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotGoal {
    Flee,
    Hunt,
    Forage,
    Wander,
}

/// Per-bot memory carried between ticks
#[derive(Debug, Clone, PartialEq)]
pub struct BotBrain {
    /// Point the bot is currently steering toward
    pub target: Vec2,
    /// Ticks left before a new wander destination may be picked
    pub wander_timer: u32,
}

impl BotBrain {
    pub fn new(start: Vec2) -> Self {
        Self {
            target: start,
            wander_timer: 0,
        }
    }
}

/// Outcome of one policy evaluation
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub goal: BotGoal,
    pub brain: BotBrain,
}

/// A bot: shared physical state plus its decision memory
#[derive(Debug, Clone)]
pub struct Bot {
    pub body: Entity,
    pub brain: BotBrain,
}

impl Bot {
    pub fn new(body: Entity) -> Self {
        let brain = BotBrain::new(body.pos);
        Self { body, brain }
    }

    /// Store the decision and steer toward its target
    pub fn apply(&mut self, decision: Decision, tuning: &Tuning) {
        self.brain = decision.brain;
        self.body.steer_toward(self.brain.target, tuning);
    }
}

/// Evaluate the policy for `bots[index]`
pub fn think<R: Rng>(
    bots: &[Bot],
    index: usize,
    player: &Entity,
    food: &[Entity],
    tuning: &Tuning,
    rng: &mut R,
) -> Decision {
    let me = &bots[index];
    let mut brain = me.brain.clone();
    brain.wander_timer = brain.wander_timer.saturating_sub(1);

    if let Some(threat) = nearest_threat(bots, index, player, tuning) {
        // Coincident centres give no escape direction; keep the old target
        if let Some((away, _)) = direction_to(threat, me.body.pos) {
            brain.target = me.body.pos + away * tuning.flee_distance;
        }
        return Decision {
            goal: BotGoal::Flee,
            brain,
        };
    }

    if let Some(prey) = find_prey(bots, index, player, tuning) {
        brain.target = prey;
        return Decision {
            goal: BotGoal::Hunt,
            brain,
        };
    }

    if let Some(snack) = nearest_food(&me.body, food, tuning.forage_radius) {
        brain.target = snack;
        return Decision {
            goal: BotGoal::Forage,
            brain,
        };
    }

    if brain.wander_timer == 0 {
        brain.target = Vec2::new(
            rng.random_range(0.0..tuning.world_size),
            rng.random_range(0.0..tuning.world_size),
        );
        brain.wander_timer = tuning.wander_cooldown_ticks;
    }
    Decision {
        goal: BotGoal::Wander,
        brain,
    }
}

/// Position of the closest entity within the threat radius that can eat this bot
fn nearest_threat(bots: &[Bot], index: usize, player: &Entity, tuning: &Tuning) -> Option<Vec2> {
    let me = &bots[index].body;
    let mut best: Option<(Vec2, f32)> = None;

    let candidates = bots
        .iter()
        .enumerate()
        .filter(|(j, _)| *j != index)
        .map(|(_, bot)| &bot.body)
        .chain(std::iter::once(player));

    for other in candidates {
        if !other.can_eat(me) {
            continue;
        }
        let dist = me.distance_to(other);
        if dist < tuning.threat_radius && best.is_none_or(|(_, d)| dist < d) {
            best = Some((other.pos, dist));
        }
    }

    best.map(|(pos, _)| pos)
}

/// First edible bot in list order, overridden by the player when it is edible too
fn find_prey(bots: &[Bot], index: usize, player: &Entity, tuning: &Tuning) -> Option<Vec2> {
    let me = &bots[index].body;
    let in_reach = |other: &Entity| me.can_eat(other) && me.distance_to(other) < tuning.prey_radius;

    if in_reach(player) {
        return Some(player.pos);
    }

    bots.iter()
        .enumerate()
        .find(|(j, bot)| *j != index && in_reach(&bot.body))
        .map(|(_, bot)| bot.body.pos)
}

fn nearest_food(me: &Entity, food: &[Entity], radius: f32) -> Option<Vec2> {
    let mut best: Option<(Vec2, f32)> = None;
    for f in food {
        let dist = me.distance_to(f);
        if dist < radius && best.is_none_or(|(_, d)| dist < d) {
            best = Some((f.pos, dist));
        }
    }
    best.map(|(pos, _)| pos)
}
