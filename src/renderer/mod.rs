//! Rendering module
//!
//! The crate never touches a GPU or window. Each frame it builds a
//! [`DrawList`] from the game state and hands it to a [`Surface`] owned by the
//! shell.

pub mod draw_list;

pub use draw_list::{DrawCommand, DrawList, SpriteId, build_draw_list};

/// Something that can present a frame
pub trait Surface {
    fn present(&mut self, frame: &DrawList);
}

/// Surface for runs without a display
///
/// Keeps the last frame so callers can inspect what would have been drawn.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    pub frames: u64,
    pub last: Option<DrawList>,
}

impl Surface for HeadlessSurface {
    fn present(&mut self, frame: &DrawList) {
        self.frames += 1;
        log::trace!(
            "frame {}: {} draws, {}",
            self.frames,
            frame.commands.len(),
            frame.hud_lines().join(" | ")
        );
        self.last = Some(frame.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GameState;

    #[test]
    fn test_headless_surface_keeps_last_frame() {
        let mut surface = HeadlessSurface::default();
        let state = GameState::new(2);
        surface.present(&build_draw_list(&state));
        surface.present(&build_draw_list(&state));
        assert_eq!(surface.frames, 2);
        assert_eq!(surface.last.map(|f| f.health), Some(5));
    }
}
