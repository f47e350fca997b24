//! Game balance and playfield configuration
//!
//! Every number the simulation depends on lives here so a run can be
//! re-tuned from a JSON file without touching the code. Missing fields fall
//! back to the values in [`crate::consts`].

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Why a tuning file could not be used
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(String),
}

/// On-screen sprite dimensions (the bounding box of every entity)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpriteSizes {
    pub player: Vec2,
    pub target: Vec2,
    pub enemy_shot: Vec2,
    pub player_shot: Vec2,
    pub wave_bone: Vec2,
    /// Beam heights by band; width always spans the playfield
    pub beam_top_height: f32,
    pub beam_middle_height: f32,
    pub beam_bottom_height: f32,
}

impl Default for SpriteSizes {
    fn default() -> Self {
        Self {
            player: Vec2::new(64.0, 64.0),
            target: Vec2::new(100.0, 100.0),
            enemy_shot: Vec2::new(20.0, 20.0),
            player_shot: Vec2::new(10.0, 24.0),
            wave_bone: Vec2::new(40.0, 80.0),
            beam_top_height: 40.0,
            beam_middle_height: 40.0,
            beam_bottom_height: 40.0,
        }
    }
}

/// Complete balance sheet for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    pub width: f32,
    pub height: f32,
    pub tick_hz: u32,

    // === Player ===
    pub player_health: u32,
    pub player_speed: f32,
    pub player_start_y_offset: f32,
    pub attack_cooldown_ms: u64,
    pub player_shot_speed: f32,

    // === Target ===
    pub target_health: u32,
    pub target_y: f32,
    pub hit_score: u64,
    pub defeat_bonus: u64,

    // === Director ===
    pub attack_interval_ms: u64,
    pub attack_limit: u32,
    /// Half-open range for the horizontal speed of simple attacks
    pub simple_speed_x: (f32, f32),
    /// Half-open range for the downward speed of simple attacks
    pub simple_speed_y: (f32, f32),
    pub wave_gap_width: f32,
    pub wave_speed_y: f32,

    // === Beams ===
    pub beam_chance: f64,
    pub beam_warmup_ms: u64,
    pub beam_lifetime_ms: u64,
    pub beam_guard_inset: f32,
    pub beam_clear_count: usize,

    // === Damage ===
    pub projectile_damage: u32,
    pub beam_damage: u32,

    pub sprites: SpriteSizes,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            width: PLAYFIELD_WIDTH,
            height: PLAYFIELD_HEIGHT,
            tick_hz: TICK_HZ,

            player_health: PLAYER_HEALTH,
            player_speed: PLAYER_SPEED,
            player_start_y_offset: PLAYER_START_Y_OFFSET,
            attack_cooldown_ms: PLAYER_ATTACK_COOLDOWN_MS,
            player_shot_speed: PLAYER_SHOT_SPEED,

            target_health: TARGET_HEALTH,
            target_y: TARGET_Y,
            hit_score: HIT_SCORE,
            defeat_bonus: DEFEAT_BONUS,

            attack_interval_ms: ATTACK_INTERVAL_MS,
            attack_limit: ATTACK_LIMIT,
            simple_speed_x: SIMPLE_SPEED_X,
            simple_speed_y: SIMPLE_SPEED_Y,
            wave_gap_width: WAVE_GAP_WIDTH,
            wave_speed_y: WAVE_SPEED_Y,

            beam_chance: BEAM_CHANCE,
            beam_warmup_ms: BEAM_WARMUP_MS,
            beam_lifetime_ms: BEAM_LIFETIME_MS,
            beam_guard_inset: BEAM_GUARD_INSET,
            beam_clear_count: BEAM_CLEAR_COUNT,

            projectile_damage: PROJECTILE_DAMAGE,
            beam_damage: BEAM_DAMAGE,

            sprites: SpriteSizes::default(),
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON document and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read and parse a tuning file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load a tuning file, falling back to defaults if it is missing or broken
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::from_file(path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::warn!("Using default tuning ({}): {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let invalid = |msg: &str| Err(TuningError::Invalid(msg.to_string()));

        if self.width <= 0.0 || self.height <= 0.0 {
            return invalid("playfield must have a positive size");
        }
        if self.tick_hz == 0 {
            return invalid("tick_hz must be non-zero");
        }
        if self.attack_interval_ms == 0 {
            return invalid("attack_interval_ms must be non-zero");
        }
        if self.simple_speed_x.0 >= self.simple_speed_x.1
            || self.simple_speed_y.0 >= self.simple_speed_y.1
        {
            return invalid("simple attack speed ranges must be non-empty");
        }
        if self.simple_speed_y.0 <= 0.0 {
            return invalid("simple attacks must move downward");
        }
        if self.wave_speed_y >= 0.0 {
            return invalid("wave bones must move upward");
        }
        if self.wave_gap_width <= 0.0 || self.wave_gap_width > self.width {
            return invalid("wave gap must fit inside the playfield");
        }
        if self.sprites.wave_bone.x <= 0.0 {
            return invalid("wave bone width must be positive");
        }
        if !(0.0..=1.0).contains(&self.beam_chance) {
            return invalid("beam_chance must be a probability");
        }
        if self.beam_warmup_ms > self.beam_lifetime_ms {
            return invalid("beam warmup cannot outlast its lifetime");
        }
        if self.player_health == 0 || self.target_health == 0 {
            return invalid("starting health must be positive");
        }
        let p = self.sprites.player;
        if p.x <= 0.0 || p.y <= 0.0 || p.x > self.width || p.y > self.height {
            return invalid("player sprite must fit inside the playfield");
        }
        if self.beam_guard_inset < 0.0 || self.beam_guard_inset * 2.0 >= p.x.min(p.y) {
            return invalid("beam_guard_inset must leave part of the player box");
        }
        Ok(())
    }
}
