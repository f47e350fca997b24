//! Per-tick draw list
//!
//! Flattens the simulation state into positioned sprite draws plus the two
//! HUD values. Draw order matches layering: player, projectiles, beams, boss.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{BeamBand, DirectionTag, GameState};

/// Image handles the shell must have loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteId {
    Player,
    EnemyShot,
    PlayerShot,
    WaveBone,
    BeamTop,
    BeamMiddle,
    BeamBottom,
    Target,
}

impl SpriteId {
    pub const ALL: [SpriteId; 8] = [
        SpriteId::Player,
        SpriteId::EnemyShot,
        SpriteId::PlayerShot,
        SpriteId::WaveBone,
        SpriteId::BeamTop,
        SpriteId::BeamMiddle,
        SpriteId::BeamBottom,
        SpriteId::Target,
    ];

    /// Asset handle name
    pub fn name(&self) -> &'static str {
        match self {
            SpriteId::Player => "player",
            SpriteId::EnemyShot => "attack",
            SpriteId::PlayerShot => "player-attack",
            SpriteId::WaveBone => "wave_bone",
            SpriteId::BeamTop => "beam_top",
            SpriteId::BeamMiddle => "beam_middle",
            SpriteId::BeamBottom => "beam_bottom",
            SpriteId::Target => "enemy",
        }
    }

    pub fn for_projectile(tag: DirectionTag) -> Self {
        match tag {
            DirectionTag::Up => SpriteId::PlayerShot,
            DirectionTag::Down => SpriteId::WaveBone,
            DirectionTag::LeftDown | DirectionTag::RightDown => SpriteId::EnemyShot,
        }
    }

    pub fn for_beam(band: BeamBand) -> Self {
        match band {
            BeamBand::Top => SpriteId::BeamTop,
            BeamBand::Middle => SpriteId::BeamMiddle,
            BeamBand::Bottom => SpriteId::BeamBottom,
        }
    }
}

/// One positioned image
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawCommand {
    pub sprite: SpriteId,
    pub top_left: Vec2,
    pub size: Vec2,
    /// Alpha, 255 = opaque
    pub opacity: u8,
}

/// Everything the shell needs to present one frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
    pub health: u32,
    pub score: u64,
}

impl DrawList {
    /// Text for the two HUD lines
    pub fn hud_lines(&self) -> [String; 2] {
        [format!("Health: {}", self.health), format!("Score: {}", self.score)]
    }
}

/// Build the draw list for the current state
pub fn build_draw_list(state: &GameState) -> DrawList {
    let hazards = &state.hazards;
    let mut commands =
        Vec::with_capacity(2 + hazards.projectiles.len() + hazards.beams.len() + state.targets.len());

    let opaque = |sprite, bounds: &crate::sim::Aabb| DrawCommand {
        sprite,
        top_left: bounds.min,
        size: bounds.size(),
        opacity: 255,
    };

    commands.push(opaque(SpriteId::Player, &state.player.bounds));
    for p in &hazards.projectiles {
        commands.push(opaque(SpriteId::for_projectile(p.tag), &p.bounds));
    }
    for beam in &hazards.beams {
        commands.push(DrawCommand {
            opacity: beam.opacity,
            ..opaque(SpriteId::for_beam(beam.band), &beam.bounds)
        });
    }
    for target in state.targets.iter().filter(|t| t.alive) {
        commands.push(opaque(SpriteId::Target, &target.bounds));
    }

    DrawList {
        commands,
        health: state.player.health,
        score: state.score,
    }
}
