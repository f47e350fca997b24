//! Boss Dodge - a bullet-hell boss fight
//!
//! Core modules:
//! - `sim`: Deterministic simulation (attack patterns, beams, collisions, game state)
//! - `renderer`: Per-tick draw list handed to whatever surface the shell owns
//! - `platform`: Frame clock and pacing
//! - `audio`: Sound triggers driven by simulation events
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate
    pub const TICK_HZ: u32 = 60;
    /// Milliseconds between attack-tick events
    pub const ATTACK_INTERVAL_MS: u64 = 500;

    /// Playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Player defaults - starts centered, 50px above the bottom edge
    pub const PLAYER_HEALTH: u32 = 5;
    pub const PLAYER_SPEED: f32 = 10.0;
    pub const PLAYER_START_Y_OFFSET: f32 = 50.0;
    pub const PLAYER_ATTACK_COOLDOWN_MS: u64 = 1000;
    pub const PLAYER_SHOT_SPEED: f32 = 7.0;

    /// Target (boss) defaults
    pub const TARGET_HEALTH: u32 = 10;
    pub const TARGET_Y: f32 = 50.0;

    /// Scoring
    pub const HIT_SCORE: u64 = 10;
    pub const DEFEAT_BONUS: u64 = 50;

    /// Director: simple attacks before a wave is summoned
    pub const ATTACK_LIMIT: u32 = 10;
    pub const SIMPLE_SPEED_X: (f32, f32) = (-3.0, 3.0);
    pub const SIMPLE_SPEED_Y: (f32, f32) = (2.0, 5.0);

    /// Wave volley
    pub const WAVE_GAP_WIDTH: f32 = 150.0;
    pub const WAVE_SPEED_Y: f32 = -5.0;

    /// Beam hazards
    pub const BEAM_CHANCE: f64 = 0.3;
    pub const BEAM_WARMUP_MS: u64 = 1000;
    pub const BEAM_LIFETIME_MS: u64 = 3000;
    /// Shrink applied to each side of the player box before the spawn overlap test
    pub const BEAM_GUARD_INSET: f32 = 16.0;
    /// Oldest projectiles cleared when a beam goes up
    pub const BEAM_CLEAR_COUNT: usize = 3;

    /// Damage
    pub const PROJECTILE_DAMAGE: u32 = 1;
    pub const BEAM_DAMAGE: u32 = 2;
}

/// Clamp a float into the 0..=255 alpha range
#[inline]
pub fn to_alpha(value: f32) -> u8 {
    value.clamp(0.0, 255.0) as u8
}
