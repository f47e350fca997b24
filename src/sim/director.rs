//! Attack pattern scheduling
//!
//! On every attack tick the director fires one simple aimed-at-nothing shot
//! from the top of the playfield. After `attack_limit` of those it launches a
//! wave instead: a row of bones rising from the bottom edge with one gap to
//! dodge through, sometimes backed by a beam across one of three bands.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::beam::BeamBand;
use super::geometry::Aabb;
use super::state::{DirectionTag, Hazards};
use crate::tuning::Tuning;

/// Counter that alternates simple attacks and waves
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttackDirector {
    /// Simple attacks fired since the last wave
    pub attack_count: u32,
    /// Simple attacks before a wave is summoned
    pub attack_limit: u32,
}

/// Result of the beam roll that closes a wave
#[derive(Debug, Clone, PartialEq)]
pub enum BeamRoll {
    /// The chance roll failed
    NotRolled,
    /// A beam went up and the oldest projectiles were cleared
    Spawned { band: BeamBand, beam_id: u32, cleared: Vec<u32> },
    /// The beam would have covered the player and was dropped
    Skipped { band: BeamBand },
}

/// What a wave put on the field
#[derive(Debug, Clone, PartialEq)]
pub struct WaveReport {
    /// Left edge of the dodge corridor
    pub gap_x: f32,
    pub bones: usize,
    pub beam: BeamRoll,
}

/// What one attack tick produced
#[derive(Debug, Clone, PartialEq)]
pub enum AttackOutcome {
    Simple { id: u32, tag: DirectionTag },
    Wave(WaveReport),
}

impl AttackDirector {
    pub fn new(attack_limit: u32) -> Self {
        Self {
            attack_count: 0,
            attack_limit,
        }
    }

    /// Handle one attack-tick event
    pub fn on_attack_tick<R: Rng + ?Sized>(
        &mut self,
        hazards: &mut Hazards,
        player_box: &Aabb,
        tuning: &Tuning,
        rng: &mut R,
        now_ms: u64,
    ) -> AttackOutcome {
        if self.attack_count < self.attack_limit {
            let (id, tag) = spawn_simple(hazards, tuning, rng);
            self.attack_count += 1;
            AttackOutcome::Simple { id, tag }
        } else {
            let report = spawn_wave(hazards, player_box, tuning, rng, now_ms);
            self.attack_count = 0;
            AttackOutcome::Wave(report)
        }
    }
}

/// Fire one shot from the top-center with a random downward spread
pub fn spawn_simple<R: Rng + ?Sized>(
    hazards: &mut Hazards,
    tuning: &Tuning,
    rng: &mut R,
) -> (u32, DirectionTag) {
    let tag = if rng.random_bool(0.5) {
        DirectionTag::LeftDown
    } else {
        DirectionTag::RightDown
    };
    let (x_lo, x_hi) = tuning.simple_speed_x;
    let (y_lo, y_hi) = tuning.simple_speed_y;
    let vel = Vec2::new(rng.random_range(x_lo..x_hi), rng.random_range(y_lo..y_hi));
    let origin = Vec2::new((tuning.width / 2.0).floor(), 0.0);

    let id = hazards.spawn_projectile(origin, tuning.sprites.enemy_shot, vel, tag);
    (id, tag)
}

/// Pick the left edge of the dodge corridor
pub fn roll_gap<R: Rng + ?Sized>(tuning: &Tuning, rng: &mut R) -> f32 {
    let max = (tuning.width - tuning.wave_gap_width).max(0.0) as u32;
    rng.random_range(0..=max) as f32
}

/// Horizontal centers of the bones in a wave with its gap at `gap_x`
pub fn bone_centers(tuning: &Tuning, gap_x: f32) -> Vec<f32> {
    let bone_width = tuning.sprites.wave_bone.x;
    let count = (tuning.width / bone_width).floor() as usize;
    let gap_end = gap_x + tuning.wave_gap_width;

    (0..count)
        .map(|i| (i as f32 * bone_width + bone_width / 2.0).floor())
        .filter(|&x| !(gap_x <= x && x < gap_end))
        .collect()
}

/// Launch a bone wave and maybe a beam
pub fn spawn_wave<R: Rng + ?Sized>(
    hazards: &mut Hazards,
    player_box: &Aabb,
    tuning: &Tuning,
    rng: &mut R,
    now_ms: u64,
) -> WaveReport {
    let gap_x = roll_gap(tuning, rng);
    let centers = bone_centers(tuning, gap_x);
    let vel = Vec2::new(0.0, tuning.wave_speed_y);

    for &x in &centers {
        hazards.spawn_projectile(
            Vec2::new(x, tuning.height),
            tuning.sprites.wave_bone,
            vel,
            DirectionTag::Down,
        );
    }

    let beam = if rng.random_bool(tuning.beam_chance) {
        let band = BeamBand::ALL[rng.random_range(0..BeamBand::ALL.len())];
        try_spawn_beam(hazards, band, player_box, tuning, now_ms)
    } else {
        BeamRoll::NotRolled
    };

    WaveReport {
        gap_x,
        bones: centers.len(),
        beam,
    }
}

/// Spawn a beam in `band` unless it would overlap the player's core box
///
/// The player box is shrunk by `beam_guard_inset` on each side first, so a
/// beam that only grazes the sprite's edges is still allowed.
pub fn try_spawn_beam(
    hazards: &mut Hazards,
    band: BeamBand,
    player_box: &Aabb,
    tuning: &Tuning,
    now_ms: u64,
) -> BeamRoll {
    let guard = player_box.deflate(tuning.beam_guard_inset);
    if band.bounds(tuning).intersects(&guard) {
        log::info!("Beam spawn ({:?}) overlapped with player, skipping", band);
        return BeamRoll::Skipped { band };
    }

    let beam_id = hazards.spawn_beam(band, tuning, now_ms);
    let cleared = hazards.remove_oldest_projectiles(tuning.beam_clear_count);
    BeamRoll::Spawned {
        band,
        beam_id,
        cleared,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Player;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn player_box(tuning: &Tuning) -> Aabb {
        Player::new(tuning).bounds
    }

    #[test]
    fn test_simple_attacks_then_wave_then_reset() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut hazards = Hazards::new();
        let mut director = AttackDirector::new(tuning.attack_limit);
        let pbox = player_box(&tuning);

        for i in 0..tuning.attack_limit {
            let out = director.on_attack_tick(&mut hazards, &pbox, &tuning, &mut rng, 0);
            assert!(matches!(out, AttackOutcome::Simple { .. }));
            assert_eq!(director.attack_count, i + 1);
        }
        assert_eq!(hazards.projectiles.len(), 10);

        let out = director.on_attack_tick(&mut hazards, &pbox, &tuning, &mut rng, 5000);
        assert!(matches!(out, AttackOutcome::Wave(_)));
        assert_eq!(director.attack_count, 0);

        // The cycle starts over
        let out = director.on_attack_tick(&mut hazards, &pbox, &tuning, &mut rng, 5500);
        assert!(matches!(out, AttackOutcome::Simple { .. }));
        assert_eq!(director.attack_count, 1);
    }

    #[test]
    fn test_simple_shots_spread_downward_from_top_center() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(99);
        let mut hazards = Hazards::new();
        for _ in 0..200 {
            spawn_simple(&mut hazards, &tuning, &mut rng);
        }
        let mut saw_left = false;
        let mut saw_right = false;
        for p in &hazards.projectiles {
            assert_eq!(p.bounds.center(), Vec2::new(400.0, 0.0));
            assert!(p.vel.x >= -3.0 && p.vel.x < 3.0);
            assert!(p.vel.y >= 2.0 && p.vel.y < 5.0);
            assert!(!p.tag.is_player_origin());
            saw_left |= p.tag == DirectionTag::LeftDown;
            saw_right |= p.tag == DirectionTag::RightDown;
        }
        assert!(saw_left && saw_right);
    }

    #[test]
    fn test_wave_without_beam_tiles_width_minus_gap() {
        let tuning = Tuning {
            beam_chance: 0.0,
            ..Tuning::default()
        };
        let mut rng = Pcg32::seed_from_u64(3);
        let mut hazards = Hazards::new();
        let report = spawn_wave(&mut hazards, &player_box(&tuning), &tuning, &mut rng, 0);

        let total = (tuning.width / tuning.sprites.wave_bone.x) as usize;
        let skipped = (0..total)
            .map(|i| i as f32 * 40.0 + 20.0)
            .filter(|&x| report.gap_x <= x && x < report.gap_x + tuning.wave_gap_width)
            .count();
        assert_eq!(report.bones, total - skipped);
        assert_eq!(hazards.projectiles.len(), report.bones);
        assert_eq!(report.beam, BeamRoll::NotRolled);
        assert!(hazards.beams.is_empty());

        for p in &hazards.projectiles {
            assert_eq!(p.tag, DirectionTag::Down);
            assert_eq!(p.vel, Vec2::new(0.0, -5.0));
            assert_eq!(p.bounds.center().y, tuning.height);
        }
    }

    #[test]
    fn test_beam_skipped_when_covering_player() {
        let tuning = Tuning::default();
        let mut hazards = Hazards::new();
        for i in 0..4 {
            hazards.spawn_projectile(Vec2::new(i as f32 * 10.0, 100.0), Vec2::ONE, Vec2::ZERO, DirectionTag::Down);
        }
        // Park the player on the middle band
        let pbox = Aabb::from_center(Vec2::new(400.0, 300.0), tuning.sprites.player);

        let roll = try_spawn_beam(&mut hazards, BeamBand::Middle, &pbox, &tuning, 0);
        assert_eq!(roll, BeamRoll::Skipped { band: BeamBand::Middle });
        assert!(hazards.beams.is_empty());
        assert_eq!(hazards.projectiles.len(), 4);
    }

    #[test]
    fn test_beam_guard_ignores_edge_graze() {
        let tuning = Tuning::default();
        let mut hazards = Hazards::new();
        // Middle band covers y 280..320; the player's core box (inset 16) starts at 322
        let pbox = Aabb::from_top_left(Vec2::new(300.0, 306.0), tuning.sprites.player);
        assert!(BeamBand::Middle.bounds(&tuning).intersects(&pbox));

        let roll = try_spawn_beam(&mut hazards, BeamBand::Middle, &pbox, &tuning, 0);
        assert!(matches!(roll, BeamRoll::Spawned { band: BeamBand::Middle, .. }));
        assert_eq!(hazards.beams.len(), 1);
    }

    #[test]
    fn test_beam_spawn_clears_three_oldest() {
        let tuning = Tuning::default();
        let mut hazards = Hazards::new();
        let ids: Vec<u32> = (0..5)
            .map(|i| hazards.spawn_projectile(Vec2::new(i as f32, 10.0), Vec2::ONE, Vec2::ZERO, DirectionTag::LeftDown))
            .collect();
        let pbox = player_box(&tuning);

        let roll = try_spawn_beam(&mut hazards, BeamBand::Top, &pbox, &tuning, 100);
        match roll {
            BeamRoll::Spawned { cleared, .. } => assert_eq!(cleared, ids[..3].to_vec()),
            other => panic!("expected a beam, got {:?}", other),
        }
        let left: Vec<u32> = hazards.projectiles.iter().map(|p| p.id).collect();
        assert_eq!(left, ids[3..].to_vec());
        assert_eq!(hazards.beams[0].spawn_ms, 100);
    }

    #[test]
    fn test_guaranteed_beam_wave_never_lands_on_player() {
        let tuning = Tuning {
            beam_chance: 1.0,
            ..Tuning::default()
        };
        let pbox = Aabb::from_center(Vec2::new(400.0, 300.0), tuning.sprites.player);
        let guard = pbox.deflate(tuning.beam_guard_inset);

        for seed in 0..64 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut hazards = Hazards::new();
            let report = spawn_wave(&mut hazards, &pbox, &tuning, &mut rng, 0);
            match report.beam {
                BeamRoll::Spawned { cleared, .. } => {
                    assert_eq!(cleared.len(), 3);
                    assert_eq!(hazards.projectiles.len(), report.bones - 3);
                    assert!(!hazards.beams[0].bounds.intersects(&guard));
                }
                BeamRoll::Skipped { band } => {
                    assert_eq!(band, BeamBand::Middle);
                    assert!(hazards.beams.is_empty());
                    assert_eq!(hazards.projectiles.len(), report.bones);
                }
                BeamRoll::NotRolled => panic!("beam_chance 1.0 must roll"),
            }
        }
    }

    proptest! {
        #[test]
        fn prop_gap_holds_no_bone_center(seed in any::<u64>()) {
            let tuning = Tuning::default();
            let mut rng = Pcg32::seed_from_u64(seed);
            let gap_x = roll_gap(&tuning, &mut rng);
            prop_assert!(gap_x >= 0.0 && gap_x + tuning.wave_gap_width <= tuning.width);
            for x in bone_centers(&tuning, gap_x) {
                prop_assert!(!(gap_x <= x && x < gap_x + tuning.wave_gap_width));
            }
        }
    }
}
