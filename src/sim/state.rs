//! Game state and core simulation types
//!
//! Everything the fixed-tick loop mutates lives in [`GameState`]; there is no
//! other mutable state in the crate.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::beam::{BeamBand, BeamHazard};
use super::director::AttackDirector;
use super::geometry::Aabb;
use crate::tuning::Tuning;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Player health ran out
    PlayerDefeated,
    /// The boss was destroyed
    TargetDefeated,
}

impl GamePhase {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GamePhase::Running)
    }
}

/// Heading of a projectile; `Up` marks player-origin shots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DirectionTag {
    Up,
    LeftDown,
    RightDown,
    Down,
}

impl DirectionTag {
    /// Player shots damage the target, everything else damages the player
    #[inline]
    pub fn is_player_origin(&self) -> bool {
        matches!(self, DirectionTag::Up)
    }
}

/// A moving attack instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub bounds: Aabb,
    /// Displacement applied once per tick
    pub vel: Vec2,
    pub tag: DirectionTag,
}

impl Projectile {
    pub fn new(id: u32, center: Vec2, size: Vec2, vel: Vec2, tag: DirectionTag) -> Self {
        Self {
            id,
            bounds: Aabb::from_center(center, size),
            vel,
            tag,
        }
    }

    /// Move one fixed step
    #[inline]
    pub fn advance(&mut self) {
        self.bounds.translate(self.vel);
    }

    #[inline]
    pub fn is_out_of_bounds(&self, width: f32, height: f32) -> bool {
        self.bounds.is_outside(width, height)
    }
}

/// The player-controlled sprite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub bounds: Aabb,
    pub health: u32,
    pub speed: f32,
    pub can_attack: bool,
    /// Timestamp of the last shot
    pub last_attack_ms: u64,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        let center = Vec2::new(
            (tuning.width / 2.0).floor(),
            tuning.height - tuning.player_start_y_offset,
        );
        Self {
            bounds: Aabb::from_center(center, tuning.sprites.player)
                .clamp_within(tuning.width, tuning.height),
            health: tuning.player_health,
            speed: tuning.player_speed,
            can_attack: true,
            last_attack_ms: 0,
        }
    }

    /// Apply damage, clamping at zero. Returns true if the player is now dead.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        self.health = self.health.saturating_sub(amount);
        self.health == 0
    }
}

/// The boss
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    pub id: u32,
    pub bounds: Aabb,
    pub health: u32,
    pub alive: bool,
}

impl Target {
    pub fn new(id: u32, tuning: &Tuning) -> Self {
        let center = Vec2::new((tuning.width / 2.0).floor(), tuning.target_y);
        Self {
            id,
            bounds: Aabb::from_center(center, tuning.sprites.target),
            health: tuning.target_health,
            alive: true,
        }
    }

    /// Apply damage. Returns true only on the call that kills the target;
    /// a dead target ignores further damage.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        if !self.alive {
            return false;
        }
        self.health = self.health.saturating_sub(amount);
        if self.health == 0 {
            self.alive = false;
            return true;
        }
        false
    }
}

/// Projectiles and beams currently in play, in insertion order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hazards {
    pub projectiles: Vec<Projectile>,
    pub beams: Vec<BeamHazard>,
    next_id: u32,
}

impl Default for Hazards {
    fn default() -> Self {
        Self::new()
    }
}

impl Hazards {
    pub fn new() -> Self {
        Self {
            projectiles: Vec::new(),
            beams: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn spawn_projectile(&mut self, center: Vec2, size: Vec2, vel: Vec2, tag: DirectionTag) -> u32 {
        let id = self.next_entity_id();
        self.projectiles.push(Projectile::new(id, center, size, vel, tag));
        id
    }

    pub fn spawn_beam(&mut self, band: BeamBand, tuning: &Tuning, now_ms: u64) -> u32 {
        let id = self.next_entity_id();
        self.beams.push(BeamHazard::new(id, band, tuning, now_ms));
        id
    }

    /// Remove up to `count` of the oldest projectiles, returning their IDs
    pub fn remove_oldest_projectiles(&mut self, count: usize) -> Vec<u32> {
        let n = count.min(self.projectiles.len());
        self.projectiles.drain(..n).map(|p| p.id).collect()
    }
}

/// Things that happened during a tick, drained by the shell for sound and logs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The player fired a shot
    PlayerAttacked,
    /// The player took damage
    PlayerHit { damage: u32, health: u32 },
    /// A player shot landed on the target
    TargetHit { health: u32 },
    /// A wave volley was launched
    WaveSpawned { gap_x: f32, bones: usize },
    /// A beam started warming up
    BeamSpawned { band: BeamBand },
    /// A beam was rolled but would have landed on the player
    BeamSkipped { band: BeamBand },
    TargetDefeated,
    PlayerDefeated,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub(crate) rng: Pcg32,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Timestamp passed to the most recent tick
    pub now_ms: u64,
    /// Timestamp of the most recent attack-tick event
    pub last_attack_tick_ms: u64,
    pub score: u64,
    pub player: Player,
    /// The boss (a single entry while it lives)
    pub targets: Vec<Target>,
    pub hazards: Hazards,
    pub director: AttackDirector,
    /// Events produced since the shell last drained them
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new run with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut hazards = Hazards::new();
        let target = Target::new(hazards.next_entity_id(), &tuning);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Running,
            time_ticks: 0,
            now_ms: 0,
            last_attack_tick_ms: 0,
            score: 0,
            player: Player::new(&tuning),
            targets: vec![target],
            hazards,
            director: AttackDirector::new(tuning.attack_limit),
            events: Vec::new(),
            tuning,
        }
    }

    /// Take all events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Health of the boss, zero once it has been removed
    pub fn target_health(&self) -> u32 {
        self.targets.iter().map(|t| t.health).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_layout() {
        let state = GameState::new(7);
        let tuning = &state.tuning;
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.player.health, 5);
        assert_eq!(state.player.bounds.center(), Vec2::new(400.0, 550.0));
        assert!(state.player.bounds.is_within(tuning.width, tuning.height));
        assert_eq!(state.targets.len(), 1);
        assert_eq!(state.targets[0].health, 10);
        assert!(state.hazards.projectiles.is_empty());
        assert_eq!(state.director.attack_count, 0);
    }

    #[test]
    fn test_target_ignores_damage_once_dead() {
        let mut target = Target::new(1, &Tuning::default());
        target.health = 1;
        assert!(target.take_damage(1));
        assert!(!target.alive);
        assert!(!target.take_damage(1));
        assert_eq!(target.health, 0);
    }

    #[test]
    fn test_player_health_clamps_at_zero() {
        let mut player = Player::new(&Tuning::default());
        player.health = 1;
        assert!(player.take_damage(2));
        assert_eq!(player.health, 0);
    }

    #[test]
    fn test_remove_oldest_in_insertion_order() {
        let mut hazards = Hazards::new();
        let ids: Vec<u32> = (0..5)
            .map(|i| {
                hazards.spawn_projectile(Vec2::splat(i as f32), Vec2::ONE, Vec2::ZERO, DirectionTag::Down)
            })
            .collect();
        assert_eq!(hazards.remove_oldest_projectiles(3), ids[..3].to_vec());
        let left: Vec<u32> = hazards.projectiles.iter().map(|p| p.id).collect();
        assert_eq!(left, ids[3..].to_vec());

        assert_eq!(hazards.remove_oldest_projectiles(3).len(), 2);
        assert!(hazards.remove_oldest_projectiles(3).is_empty());
    }

    #[test]
    fn test_projectile_leaves_playfield() {
        let mut p = Projectile::new(1, Vec2::new(400.0, 0.0), Vec2::new(20.0, 20.0), Vec2::new(0.0, -4.0), DirectionTag::Up);
        let mut steps = 0;
        while !p.is_out_of_bounds(800.0, 600.0) {
            p.advance();
            steps += 1;
        }
        // Bottom edge starts at y=10 and must drop below 0
        assert_eq!(steps, 3);
    }
}
