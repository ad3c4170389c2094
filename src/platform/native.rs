//! macroquad-backed platform

use std::path::Path;

use macroquad::audio::{self, PlaySoundParams, Sound};
use macroquad::prelude::*;

use super::{Camera, Platform};
use crate::error::AssetError;
use crate::input::{bindings, Action};

/// Volume used while the music is playing
const MUSIC_VOLUME: f32 = 1.0;

/// The real window, GPU and audio device
pub struct MacroquadPlatform {
    /// Seconds per frame at the configured fps
    target_frame_time: f64,
    /// `get_time()` at the start of the current tick
    frame_start: f64,
}

impl MacroquadPlatform {
    /// Must be called from inside the macroquad window future
    pub fn new(fps: u32) -> Self {
        // Close requests are reported through `should_close` instead of
        // tearing the window down under the game loop.
        prevent_quit();

        Self {
            target_frame_time: 1.0 / fps.max(1) as f64,
            frame_start: get_time(),
        }
    }

    /// Load a music stream
    ///
    /// Separate from the trait because macroquad decodes sound asynchronously.
    pub async fn load_music(&mut self, path: &Path) -> Result<Sound, AssetError> {
        if !path.exists() {
            return Err(AssetError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
            });
        }
        let sound = audio::load_sound(&path.to_string_lossy())
            .await
            .map_err(|e| AssetError::Decode {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        log::info!("Loaded music stream {}", path.display());
        Ok(sound)
    }

    /// Sleep most of the remaining frame time, then spin for precision
    fn pace(&self) {
        let target = self.target_frame_time;
        let remaining = target - (get_time() - self.frame_start);
        if remaining <= 0.0 {
            return;
        }

        // The browser paces frames itself
        #[cfg(not(target_arch = "wasm32"))]
        {
            let spin_margin = 0.002; // 2ms
            while get_time() - self.frame_start + spin_margin < target {
                std::thread::sleep(std::time::Duration::from_millis(1));
            }
            while get_time() - self.frame_start < target {
                std::hint::spin_loop();
            }
        }
    }
}

/// The macroquad camera equivalent to `camera` on a `screen_w` x `screen_h`
/// window
///
/// macroquad cameras work in normalized device coordinates with y pointing
/// up, while [`Camera`] works in screen pixels with y pointing down. Without
/// a render target `Camera2D` already inverts y, so `zoom.y` stays positive.
pub fn camera_2d(camera: &Camera, screen_w: f32, screen_h: f32) -> Camera2D {
    Camera2D {
        target: camera.target,
        zoom: vec2(2.0 * camera.zoom / screen_w, 2.0 * camera.zoom / screen_h),
        offset: vec2(
            2.0 * camera.offset.x / screen_w - 1.0,
            1.0 - 2.0 * camera.offset.y / screen_h,
        ),
        rotation: camera.rotation,
        ..Default::default()
    }
}

impl Platform for MacroquadPlatform {
    type Texture = Texture2D;
    type Music = Sound;

    fn load_texture(&mut self, path: &Path) -> Result<Texture2D, AssetError> {
        let bytes = std::fs::read(path).map_err(|source| AssetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let image = Image::from_file_with_format(&bytes, None).map_err(|e| AssetError::Decode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let texture = Texture2D::from_image(&image);
        // Pixel art: no smoothing when zoomed
        texture.set_filter(FilterMode::Nearest);
        log::debug!(
            "Loaded texture {} ({}x{})",
            path.display(),
            image.width,
            image.height
        );
        Ok(texture)
    }

    fn texture_size(&self, texture: &Texture2D) -> (u32, u32) {
        (texture.width() as u32, texture.height() as u32)
    }

    fn unload_texture(&mut self, texture: Texture2D) {
        // GPU memory is freed once the last handle is dropped
        drop(texture);
    }

    fn begin_frame(&mut self, clear: Color) {
        clear_background(clear);
    }

    fn begin_camera(&mut self, camera: &Camera) {
        set_camera(&camera_2d(camera, screen_width(), screen_height()));
    }

    fn draw_texture_region(
        &mut self,
        texture: &Texture2D,
        src: Rect,
        dest: Rect,
        origin: Vec2,
        rotation: f32,
        tint: Color,
    ) {
        draw_texture_ex(
            texture,
            dest.x - origin.x,
            dest.y - origin.y,
            tint,
            DrawTextureParams {
                dest_size: Some(vec2(dest.w, dest.h)),
                source: Some(src),
                rotation: rotation.to_radians(),
                pivot: Some(vec2(dest.x, dest.y)),
                ..Default::default()
            },
        );
    }

    fn end_camera(&mut self) {
        set_default_camera();
    }

    fn end_frame(&mut self) {}

    fn should_close(&self) -> bool {
        is_quit_requested()
    }

    async fn present(&mut self) {
        self.pace();
        next_frame().await;
        self.frame_start = get_time();
    }

    fn play_music(&mut self, music: &Sound) {
        audio::play_sound(
            music,
            PlaySoundParams {
                looped: true,
                volume: MUSIC_VOLUME,
            },
        );
    }

    fn update_music(&mut self, _music: &Sound) {
        // The audio thread streams on its own
    }

    fn pause_music(&mut self, music: &Sound) {
        audio::set_sound_volume(music, 0.0);
    }

    fn resume_music(&mut self, music: &Sound) {
        audio::set_sound_volume(music, MUSIC_VOLUME);
    }

    fn unload_music(&mut self, music: Sound) {
        audio::stop_sound(&music);
    }

    fn is_down(&self, action: Action) -> bool {
        bindings(action).iter().any(|key| is_key_down(*key))
    }

    fn is_pressed(&self, action: Action) -> bool {
        bindings(action).iter().any(|key| is_key_pressed(*key))
    }
}
