//! Full-width beam hazards
//!
//! A beam telegraphs itself by flashing for `warmup_ms`, then becomes lethal
//! and pulses until `lifetime_ms` has passed since it was spawned. The phase is
//! a pure function of elapsed time, so `update` can be called any number of
//! times with the same timestamp.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Aabb;
use crate::to_alpha;
use crate::tuning::Tuning;

/// Length of one flash window during warmup
pub const FLASH_WINDOW_MS: u64 = 250;
/// Alpha on even / odd flash windows
pub const FLASH_ALPHA_LOW: u8 = 128;
pub const FLASH_ALPHA_HIGH: u8 = 200;
/// Alpha on the tick a beam goes live
pub const ACTIVE_ALPHA: u8 = 255;
/// Divisor applied to elapsed ms inside the pulse sine
const PULSE_RATE_MS: f32 = 200.0;

/// Vertical band a beam occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BeamBand {
    Top,
    Middle,
    Bottom,
}

impl BeamBand {
    pub const ALL: [BeamBand; 3] = [BeamBand::Top, BeamBand::Middle, BeamBand::Bottom];

    pub fn height(&self, tuning: &Tuning) -> f32 {
        match self {
            BeamBand::Top => tuning.sprites.beam_top_height,
            BeamBand::Middle => tuning.sprites.beam_middle_height,
            BeamBand::Bottom => tuning.sprites.beam_bottom_height,
        }
    }

    /// Top edge of the band
    pub fn y(&self, tuning: &Tuning) -> f32 {
        match self {
            BeamBand::Top => 50.0,
            BeamBand::Middle => (tuning.height / 2.0 - self.height(tuning) / 2.0).floor(),
            BeamBand::Bottom => tuning.height - 100.0,
        }
    }

    /// The rectangle a beam in this band would cover
    pub fn bounds(&self, tuning: &Tuning) -> Aabb {
        Aabb::from_top_left(
            Vec2::new(0.0, self.y(tuning)),
            Vec2::new(tuning.width, self.height(tuning)),
        )
    }
}

/// Where a beam is in its timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BeamPhase {
    /// Flashing telegraph, harmless
    Warming,
    /// Lethal
    Active,
    /// Past its lifetime, must be removed
    Expired,
}

/// A time-phased full-width hazard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeamHazard {
    pub id: u32,
    pub band: BeamBand,
    pub bounds: Aabb,
    pub spawn_ms: u64,
    pub warmup_ms: u64,
    pub lifetime_ms: u64,
    /// Only an active beam damages the player
    pub active: bool,
    pub opacity: u8,
    /// Timestamp of the update that armed the beam
    activated_ms: Option<u64>,
}

impl BeamHazard {
    pub fn new(id: u32, band: BeamBand, tuning: &Tuning, now_ms: u64) -> Self {
        Self {
            id,
            band,
            bounds: band.bounds(tuning),
            spawn_ms: now_ms,
            warmup_ms: tuning.beam_warmup_ms,
            lifetime_ms: tuning.beam_lifetime_ms,
            active: false,
            opacity: FLASH_ALPHA_LOW,
            activated_ms: None,
        }
    }

    /// Phase for a given elapsed time
    pub fn phase_at(&self, elapsed_ms: u64) -> BeamPhase {
        if elapsed_ms >= self.lifetime_ms {
            BeamPhase::Expired
        } else if elapsed_ms >= self.warmup_ms {
            BeamPhase::Active
        } else {
            BeamPhase::Warming
        }
    }

    /// Recompute activation and opacity for `now_ms`
    pub fn update(&mut self, now_ms: u64) -> BeamPhase {
        let elapsed = now_ms.saturating_sub(self.spawn_ms);
        let phase = self.phase_at(elapsed);

        match phase {
            BeamPhase::Warming => {
                self.active = false;
                self.opacity = if (elapsed / FLASH_WINDOW_MS) % 2 == 0 {
                    FLASH_ALPHA_LOW
                } else {
                    FLASH_ALPHA_HIGH
                };
            }
            BeamPhase::Active => {
                let armed_at = *self.activated_ms.get_or_insert(now_ms);
                self.active = true;
                self.opacity = if armed_at == now_ms {
                    ACTIVE_ALPHA
                } else {
                    pulse_alpha(elapsed)
                };
            }
            BeamPhase::Expired => {}
        }

        phase
    }
}

/// Breathing alpha once a beam is live
pub fn pulse_alpha(elapsed_ms: u64) -> u8 {
    to_alpha(128.0 + 127.0 * (elapsed_ms as f32 / PULSE_RATE_MS).sin())
}
