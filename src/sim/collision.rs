//! Collision resolution
//!
//! Runs after everything has moved for the tick. Each projectile is consumed
//! by at most one hit, and resolution stops as soon as the run reaches a
//! terminal phase.

use super::state::{GameEvent, GamePhase, GameState};

/// Projectiles against the player (enemy shots) and the target (player shots)
pub fn resolve_projectile_hits(state: &mut GameState) {
    let tuning = &state.tuning;
    let mut i = 0;

    while i < state.hazards.projectiles.len() {
        let (bounds, tag) = {
            let p = &state.hazards.projectiles[i];
            (p.bounds, p.tag)
        };

        if !tag.is_player_origin() {
            if bounds.intersects(&state.player.bounds) {
                state.hazards.projectiles.remove(i);
                let dead = state.player.take_damage(tuning.projectile_damage);
                log::debug!("Player hit! health={}", state.player.health);
                state.events.push(GameEvent::PlayerHit {
                    damage: tuning.projectile_damage,
                    health: state.player.health,
                });
                if dead {
                    defeat_player(state);
                    return;
                }
                continue;
            }
        } else if let Some(target) = state
            .targets
            .iter_mut()
            .find(|t| t.alive && t.bounds.intersects(&bounds))
        {
            state.hazards.projectiles.remove(i);
            let killed = target.take_damage(1);
            state.score += tuning.hit_score;
            state.events.push(GameEvent::TargetHit {
                health: target.health,
            });
            log::debug!("Target hit! health={}", target.health);

            // Bonus is checked before the dead target leaves the collision set
            if target.health == 0 {
                state.score += tuning.defeat_bonus;
            }
            if killed {
                state.targets.retain(|t| t.alive);
                if state.targets.is_empty() {
                    state.phase = GamePhase::TargetDefeated;
                    state.events.push(GameEvent::TargetDefeated);
                    log::info!("Target defeated! score={}", state.score);
                    return;
                }
            }
            continue;
        }

        i += 1;
    }
}

/// Armed beams against the player
pub fn resolve_beam_hits(state: &mut GameState) {
    let damage = state.tuning.beam_damage;
    let mut i = 0;

    while i < state.hazards.beams.len() {
        let beam = &state.hazards.beams[i];
        if beam.active && beam.bounds.intersects(&state.player.bounds) {
            state.hazards.beams.remove(i);
            let dead = state.player.take_damage(damage);
            log::debug!("Player hit by beam! health={}", state.player.health);
            state.events.push(GameEvent::PlayerHit {
                damage,
                health: state.player.health,
            });
            if dead {
                defeat_player(state);
                return;
            }
            continue;
        }
        i += 1;
    }
}

fn defeat_player(state: &mut GameState) {
    state.phase = GamePhase::PlayerDefeated;
    state.events.push(GameEvent::PlayerDefeated);
    log::info!("Player defeated at tick {} (score {})", state.time_ticks, state.score);
}
