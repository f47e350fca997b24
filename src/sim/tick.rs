//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. Order within a
//! tick is fixed: attack-tick events, player movement, player attack,
//! cooldown, motion of every hazard, then collision resolution.

use glam::Vec2;

use super::beam::BeamPhase;
use super::collision::{resolve_beam_hits, resolve_projectile_hits};
use super::director::{AttackOutcome, BeamRoll};
use super::state::{DirectionTag, GameEvent, GameState};

/// Held-key state for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Fire (space)
    pub attack: bool,
    /// Window close; the shell stops looping, `tick` ignores it
    pub quit: bool,
}

/// Advance the game state by one fixed step at absolute time `now_ms`
///
/// `now_ms` must not go backwards between calls. Once the run has reached a
/// terminal phase this is a no-op.
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: u64) {
    if state.phase.is_terminal() {
        return;
    }

    state.time_ticks += 1;
    state.now_ms = now_ms;

    fire_attack_ticks(state, now_ms);
    move_player(state, input);

    // Player attack
    if input.attack && state.player.can_attack {
        let bounds = state.player.bounds;
        let origin = Vec2::new(bounds.center().x, bounds.min.y);
        state.hazards.spawn_projectile(
            origin,
            state.tuning.sprites.player_shot,
            Vec2::new(0.0, -state.tuning.player_shot_speed),
            DirectionTag::Up,
        );
        state.player.can_attack = false;
        state.player.last_attack_ms = now_ms;
        state.events.push(GameEvent::PlayerAttacked);
    }

    // Reset attack cooldown
    if !state.player.can_attack
        && now_ms.saturating_sub(state.player.last_attack_ms) > state.tuning.attack_cooldown_ms
    {
        state.player.can_attack = true;
    }

    // Update projectiles and beams
    let (width, height) = (state.tuning.width, state.tuning.height);
    for projectile in &mut state.hazards.projectiles {
        projectile.advance();
    }
    state
        .hazards
        .projectiles
        .retain(|p| !p.is_out_of_bounds(width, height));
    state
        .hazards
        .beams
        .retain_mut(|beam| beam.update(now_ms) != BeamPhase::Expired);

    resolve_projectile_hits(state);
    if state.phase.is_terminal() {
        return;
    }
    resolve_beam_hits(state);
}

/// Deliver every attack-tick event due by `now_ms`
fn fire_attack_ticks(state: &mut GameState, now_ms: u64) {
    let interval = state.tuning.attack_interval_ms;

    while now_ms.saturating_sub(state.last_attack_tick_ms) >= interval {
        state.last_attack_tick_ms += interval;

        let player_box = state.player.bounds;
        let outcome = state.director.on_attack_tick(
            &mut state.hazards,
            &player_box,
            &state.tuning,
            &mut state.rng,
            now_ms,
        );

        if let AttackOutcome::Wave(report) = outcome {
            log::info!(
                "Wave spawned at tick {}: gap at x={}, {} bones",
                state.time_ticks,
                report.gap_x,
                report.bones
            );
            state.events.push(GameEvent::WaveSpawned {
                gap_x: report.gap_x,
                bones: report.bones,
            });
            match report.beam {
                BeamRoll::Spawned { band, cleared, .. } => {
                    log::info!("Beam spawned in {:?} band, cleared {} attacks", band, cleared.len());
                    state.events.push(GameEvent::BeamSpawned { band });
                }
                BeamRoll::Skipped { band } => {
                    state.events.push(GameEvent::BeamSkipped { band });
                }
                BeamRoll::NotRolled => {}
            }
        }
    }
}

/// Four-way movement, clamped per axis to the playfield
fn move_player(state: &mut GameState, input: &TickInput) {
    let speed = state.player.speed;
    let mut delta = Vec2::ZERO;
    if input.left {
        delta.x -= speed;
    }
    if input.right {
        delta.x += speed;
    }
    if input.up {
        delta.y -= speed;
    }
    if input.down {
        delta.y += speed;
    }
    if delta == Vec2::ZERO {
        return;
    }

    let player = &mut state.player;
    player.bounds.translate(delta);
    player.bounds = player
        .bounds
        .clamp_within(state.tuning.width, state.tuning.height);
}
