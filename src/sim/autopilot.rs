//! Demo autopilot
//!
//! Produces held-key input from the current state so the game can run
//! unattended (headless runs, attract mode). Not part of the simulation: it
//! only reads state and never touches the RNG.

use glam::Vec2;

use super::geometry::Aabb;
use super::state::{DirectionTag, GameState};
use super::tick::TickInput;

/// Ticks of motion to look ahead when judging a projectile as a threat
const LOOKAHEAD_TICKS: f32 = 12.0;
/// Extra room kept around the player when judging threats
const THREAT_MARGIN: f32 = 8.0;
/// Dead zone for steering so the player doesn't jitter around a goal
const STEER_DEADBAND: f32 = 6.0;

/// Decide which keys to hold this tick
pub fn autopilot_input(state: &GameState) -> TickInput {
    let player = state.player.bounds;
    let center = player.center();
    let tuning = &state.tuning;

    // Default goal: sit under the boss near the start row
    let mut goal = Vec2::new(
        state
            .targets
            .first()
            .map(|t| t.bounds.center().x)
            .unwrap_or(center.x),
        tuning.height - tuning.player_start_y_offset,
    );

    if let Some(gap_x) = wave_gap_center(state) {
        goal.x = gap_x;
    } else if let Some(threat) = nearest_threat(state, &player) {
        // Sidestep away from the incoming shot
        goal.x = if threat.x < center.x {
            center.x + tuning.player_speed * 4.0
        } else {
            center.x - tuning.player_speed * 4.0
        };
    }

    // Get out of any beam band, armed or not
    if let Some(beam) = state
        .hazards
        .beams
        .iter()
        .find(|b| b.bounds.intersects(&player))
    {
        let half = player.size().y / 2.0;
        let above = beam.bounds.min.y - half - THREAT_MARGIN;
        let below = beam.bounds.max.y + half + THREAT_MARGIN;
        let fits_above = above - half >= 0.0;
        let fits_below = below + half <= tuning.height;
        goal.y = match (fits_above, fits_below) {
            (true, false) => above,
            (false, true) => below,
            _ if (center.y - above).abs() <= (below - center.y).abs() => above,
            _ => below,
        };
    }

    let mut input = TickInput {
        attack: true,
        ..Default::default()
    };
    steer(&mut input, center, goal);
    input
}

fn steer(input: &mut TickInput, from: Vec2, to: Vec2) {
    let d = to - from;
    input.left = d.x < -STEER_DEADBAND;
    input.right = d.x > STEER_DEADBAND;
    input.up = d.y < -STEER_DEADBAND;
    input.down = d.y > STEER_DEADBAND;
}

/// Center of the widest opening in the current bone wave, if one is rising
fn wave_gap_center(state: &GameState) -> Option<f32> {
    let mut xs: Vec<f32> = state
        .hazards
        .projectiles
        .iter()
        .filter(|p| p.tag == DirectionTag::Down && p.bounds.min.y > state.player.bounds.min.y - 200.0)
        .map(|p| p.bounds.center().x)
        .collect();
    if xs.is_empty() {
        return None;
    }
    xs.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mut edges = Vec::with_capacity(xs.len() + 2);
    edges.push(0.0);
    edges.extend(xs);
    edges.push(state.tuning.width);

    edges
        .windows(2)
        .max_by(|a, b| {
            (a[1] - a[0])
                .partial_cmp(&(b[1] - b[0]))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|w| (w[0] + w[1]) / 2.0)
}

/// Center of the closest enemy shot that will reach the player soon
fn nearest_threat(state: &GameState, player: &Aabb) -> Option<Vec2> {
    let zone = player.deflate(-THREAT_MARGIN);
    state
        .hazards
        .projectiles
        .iter()
        .filter(|p| !p.tag.is_player_origin())
        .filter(|p| {
            let mut future = p.bounds;
            future.translate(p.vel * LOOKAHEAD_TICKS);
            let swept = Aabb::new(p.bounds.min.min(future.min), p.bounds.max.max(future.max));
            swept.intersects(&zone)
        })
        .map(|p| p.bounds.center())
        .min_by(|a, b| {
            let c = player.center();
            a.distance_squared(c)
                .partial_cmp(&b.distance_squared(c))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::beam::BeamBand;
    use crate::sim::tick::tick;

    #[test]
    fn test_idle_board_aims_at_target() {
        let mut state = GameState::new(3);
        state.player.bounds.translate(Vec2::new(-200.0, 0.0));
        let input = autopilot_input(&state);
        assert!(input.attack);
        assert!(input.right);
        assert!(!input.left);
    }

    #[test]
    fn test_heads_for_wave_gap() {
        let mut state = GameState::new(3);
        let bone = state.tuning.sprites.wave_bone;
        // Bones everywhere except around x=100
        for i in 5..20 {
            let x = i as f32 * 40.0 + 20.0;
            state
                .hazards
                .spawn_projectile(Vec2::new(x, 600.0), bone, Vec2::new(0.0, -5.0), DirectionTag::Down);
        }
        let input = autopilot_input(&state);
        assert!(input.left);
    }

    #[test]
    fn test_leaves_beam_band() {
        let mut state = GameState::new(3);
        let tuning = state.tuning.clone();
        state.player.bounds = Aabb::from_center(Vec2::new(400.0, 520.0), tuning.sprites.player);
        state.hazards.spawn_beam(BeamBand::Bottom, &tuning, 0);
        let input = autopilot_input(&state);
        // No room under the bottom band, so it must climb
        assert!(input.up);
    }

    #[test]
    fn test_autopilot_run_stays_deterministic() {
        let mut a = GameState::new(11);
        let mut b = GameState::new(11);
        for t in 1..=600u64 {
            let ia = autopilot_input(&a);
            let ib = autopilot_input(&b);
            assert_eq!(ia, ib);
            tick(&mut a, &ia, t * 16);
            tick(&mut b, &ib, t * 16);
        }
        assert_eq!(a.score, b.score);
        assert!(a.score > 0);
    }
}
