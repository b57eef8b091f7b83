//! Collision and consumption resolution
//!
//! Runs once per tick after every entity has moved, in a fixed order:
//! player vs food, bots vs food, player vs bots, bots vs bots. Each pass
//! scans first and applies removals and respawns afterwards, so indices stay
//! valid during the scan and a replacement is never revisited by the pass
//! that spawned it.

use serde::Serialize;

use super::entity::EntityKind;
use super::state::{GamePhase, GameState};

/// Something that happened during collision resolution
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    FoodEaten { eater: EntityKind },
    BotEaten { eater: String, victim: String },
    /// Terminal: the player lost a collision
    PlayerEaten { eater: String, final_mass: f32 },
}

/// Resolve every collision for this tick
pub fn resolve_collisions(state: &mut GameState) -> Vec<GameEvent> {
    let mut events = Vec::new();

    player_eats_food(state, &mut events);
    bots_eat_food(state, &mut events);
    if !player_meets_bots(state, &mut events) {
        return events;
    }
    bots_meet_bots(state, &mut events);

    events
}

/// The player eats every food particle it overlaps
fn player_eats_food(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let mut eaten = Vec::new();
    for i in (0..state.food.len()).rev() {
        if state.player.collides_with(&state.food[i]) {
            state.player.consume(&state.food[i]);
            eaten.push(i);
            events.push(GameEvent::FoodEaten {
                eater: EntityKind::Player,
            });
        }
    }

    if !eaten.is_empty() {
        state.player.clamp_to(state.tuning.world_size);
        replace_food(state, &eaten);
    }
}

/// Each bot eats at most one food particle per tick
fn bots_eat_food(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let world_size = state.tuning.world_size;
    let mut taken = vec![false; state.food.len()];
    let mut eaten = Vec::new();

    for bot in &mut state.bots {
        for i in (0..state.food.len()).rev() {
            if taken[i] || !bot.body.collides_with(&state.food[i]) {
                continue;
            }
            bot.body.consume(&state.food[i]);
            bot.body.clamp_to(world_size);
            taken[i] = true;
            eaten.push(i);
            events.push(GameEvent::FoodEaten {
                eater: EntityKind::Bot,
            });
            break;
        }
    }

    if !eaten.is_empty() {
        eaten.sort_unstable_by(|a, b| b.cmp(a));
        replace_food(state, &eaten);
    }
}

/// Player against every overlapping bot. Returns false if the player was eaten.
fn player_meets_bots(state: &mut GameState, events: &mut Vec<GameEvent>) -> bool {
    let mut victims = Vec::new();

    for i in (0..state.bots.len()).rev() {
        let bot = &state.bots[i].body;
        if !state.player.collides_with(bot) {
            continue;
        }

        if state.player.can_eat(bot) {
            state.player.consume(bot);
            victims.push(i);
            events.push(GameEvent::BotEaten {
                eater: state.player.name.clone(),
                victim: bot.name.clone(),
            });
        } else if bot.can_eat(&state.player) {
            let final_mass = state.player.mass();
            log::info!(
                "{} ate {} (mass {})",
                bot.name,
                state.player.name,
                final_mass.floor()
            );
            events.push(GameEvent::PlayerEaten {
                eater: bot.name.clone(),
                final_mass,
            });
            state.phase = GamePhase::GameOver;
            state.player.clamp_to(state.tuning.world_size);
            replace_bots(state, &victims);
            return false;
        }
    }

    if !victims.is_empty() {
        state.player.clamp_to(state.tuning.world_size);
        replace_bots(state, &victims);
    }
    true
}

/// Every unordered pair of bots present at the start of the pass is looked at
/// once. A bot eaten earlier in the pass takes no further part, and an eater's
/// growth counts for its later pairs.
fn bots_meet_bots(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let count = state.bots.len();
    let mut eaten = vec![false; count];
    let mut victims = Vec::new();

    for i in 0..count {
        if eaten[i] {
            continue;
        }
        for j in (i + 1)..count {
            if eaten[j] {
                continue;
            }
            let (head, tail) = state.bots.split_at_mut(j);
            let a = &mut head[i].body;
            let b = &mut tail[0].body;
            if !a.collides_with(b) {
                continue;
            }

            if a.can_eat(b) {
                a.consume(b);
                eaten[j] = true;
                victims.push(j);
                events.push(GameEvent::BotEaten {
                    eater: a.name.clone(),
                    victim: b.name.clone(),
                });
            } else if b.can_eat(a) {
                b.consume(a);
                eaten[i] = true;
                victims.push(i);
                events.push(GameEvent::BotEaten {
                    eater: b.name.clone(),
                    victim: a.name.clone(),
                });
                break;
            }
        }
    }

    if !victims.is_empty() {
        let world_size = state.tuning.world_size;
        for bot in &mut state.bots {
            bot.body.clamp_to(world_size);
        }
        replace_bots(state, &victims);
    }
}

/// Remove eaten food (indices in descending order) and append one new particle each
fn replace_food(state: &mut GameState, eaten: &[usize]) {
    for &i in eaten {
        state.food.remove(i);
    }
    for _ in eaten {
        let food = state.spawn_food();
        state.food.push(food);
    }
}

/// Remove eaten bots and append their replacements in the order they were eaten
fn replace_bots(state: &mut GameState, victims: &[usize]) {
    let names: Vec<String> = victims
        .iter()
        .map(|&i| state.bots[i].body.name.clone())
        .collect();

    let mut order = victims.to_vec();
    order.sort_unstable_by(|a, b| b.cmp(a));
    for i in order {
        state.bots.remove(i);
    }

    for name in names {
        log::debug!("{} respawned", name);
        let bot = state.respawn_bot(name);
        state.bots.push(bot);
    }
}
