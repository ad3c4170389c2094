//! Backend capability consumed by the game
//!
//! Rendering, audio, window lifecycle and keyboard polling all live behind
//! [`Platform`]. Actors only ever talk to this trait, so the game logic runs
//! the same against macroquad and against the headless recorder used in tests.

mod native;
#[cfg(test)]
pub mod headless;

pub use native::MacroquadPlatform;

use std::path::Path;

use macroquad::prelude::{Color, Rect, Vec2};

use crate::error::AssetError;
use crate::input::Action;

/// A 2D camera in screen pixels
///
/// `target` is the world point that appears at `offset` on screen, scaled by
/// `zoom` and rotated by `rotation` degrees around it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub offset: Vec2,
    pub target: Vec2,
    pub rotation: f32,
    pub zoom: f32,
}

impl Camera {
    pub fn new(offset: Vec2, target: Vec2, zoom: f32) -> Self {
        Self {
            offset,
            target,
            rotation: 0.0,
            zoom,
        }
    }
}

/// Everything the game needs from the outside world
///
/// Frame structure per tick: `begin_frame`, `begin_camera`, any number of
/// `draw_texture_region`, `end_camera`, `end_frame`, then `present().await`.
#[allow(async_fn_in_trait)]
pub trait Platform {
    /// Opaque loaded texture
    type Texture;
    /// Opaque loaded music stream
    type Music;

    // === Graphics ===

    fn load_texture(&mut self, path: &Path) -> Result<Self::Texture, AssetError>;

    /// Size of a loaded texture in pixels
    fn texture_size(&self, texture: &Self::Texture) -> (u32, u32);

    fn unload_texture(&mut self, texture: Self::Texture);

    fn begin_frame(&mut self, clear: Color);

    fn begin_camera(&mut self, camera: &Camera);

    /// Draw `src` of `texture` into `dest`. `origin` is relative to `dest`'s
    /// top-left and is both the anchor placed at `dest.x, dest.y` and the
    /// rotation pivot.
    fn draw_texture_region(
        &mut self,
        texture: &Self::Texture,
        src: Rect,
        dest: Rect,
        origin: Vec2,
        rotation: f32,
        tint: Color,
    );

    fn end_camera(&mut self);

    fn end_frame(&mut self);

    /// Window close was requested by the user
    fn should_close(&self) -> bool;

    /// Hand the finished frame to the backend and wait for the next tick
    async fn present(&mut self);

    // === Audio ===

    /// Start a looped stream
    fn play_music(&mut self, music: &Self::Music);

    /// Feed the stream's buffers. Call every tick while the stream is alive.
    fn update_music(&mut self, music: &Self::Music);

    fn pause_music(&mut self, music: &Self::Music);

    fn resume_music(&mut self, music: &Self::Music);

    fn unload_music(&mut self, music: Self::Music);

    // === Input ===

    /// Any key bound to `action` is held
    fn is_down(&self, action: Action) -> bool;

    /// Any key bound to `action` went down this frame
    fn is_pressed(&self, action: Action) -> bool;
}
