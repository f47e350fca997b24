//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one `tick` = one step, velocities are per tick)
//! - Seeded RNG only
//! - Stable iteration order (insertion order of every collection)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod beam;
pub mod collision;
pub mod director;
pub mod geometry;
pub mod state;
pub mod tick;

pub use autopilot::autopilot_input;
pub use beam::{BeamBand, BeamHazard, BeamPhase};
pub use collision::{resolve_beam_hits, resolve_projectile_hits};
pub use director::{AttackDirector, AttackOutcome, BeamRoll, WaveReport, spawn_wave};
pub use geometry::Aabb;
pub use state::{
    DirectionTag, GameEvent, GamePhase, GameState, Hazards, Player, Projectile, Target,
};
pub use tick::{TickInput, tick};
