//! Headless recording platform for tests
//!
//! Loads "textures" by looking up configured sizes, records every call the
//! game makes, and lets tests hold or press actions and request a close.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use macroquad::prelude::{Color, Rect, Vec2};

use super::{Camera, Platform};
use crate::error::AssetError;
use crate::input::Action;

/// Sheet size used when a test doesn't configure one (4x4 tiles of 16px)
pub const DEFAULT_SHEET_SIZE: (u32, u32) = (64, 64);

/// Serializes tests that create a `Game`, since only one may be live
static GAME_LOCK: Mutex<()> = Mutex::new(());

pub fn game_lock() -> MutexGuard<'static, ()> {
    GAME_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Debug, Clone, PartialEq)]
pub struct FakeTexture {
    pub id: usize,
    pub path: PathBuf,
    pub size: (u32, u32),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FakeMusic;

#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub texture: PathBuf,
    pub src: Rect,
    pub dest: Rect,
    pub origin: Vec2,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FrameEvent {
    Begin(Color),
    Camera(Camera),
    Draw(DrawCall),
    EndCamera,
    End,
    Present,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicCall {
    Play,
    Update,
    Pause,
    Resume,
    Unload,
}

#[derive(Default)]
pub struct RecordingPlatform {
    /// Pixel sizes by file name; unlisted files get [`DEFAULT_SHEET_SIZE`]
    pub sheet_sizes: HashMap<String, (u32, u32)>,
    /// File names that fail to load
    pub missing: HashSet<String>,
    pub loads: Vec<PathBuf>,
    pub unloaded: Vec<usize>,
    pub events: Vec<FrameEvent>,
    pub music_calls: Vec<MusicCall>,
    pub held: HashSet<Action>,
    pub pressed: HashSet<Action>,
    pub close_requested: bool,
    /// Request a close once this many frames have been presented
    pub close_after: Option<usize>,
    pub presented: usize,
}

impl RecordingPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sheet(mut self, file_name: &str, width: u32, height: u32) -> Self {
        self.sheet_sizes.insert(file_name.to_string(), (width, height));
        self
    }

    pub fn with_missing(mut self, file_name: &str) -> Self {
        self.missing.insert(file_name.to_string());
        self
    }

    pub fn hold(&mut self, action: Action) {
        self.held.insert(action);
    }

    pub fn release_all(&mut self) {
        self.held.clear();
        self.pressed.clear();
    }

    pub fn press(&mut self, action: Action) {
        self.pressed.insert(action);
    }

    pub fn draws(&self) -> Vec<&DrawCall> {
        self.events
            .iter()
            .filter_map(|e| match e {
                FrameEvent::Draw(call) => Some(call),
                _ => None,
            })
            .collect()
    }

    /// Loads minus unloads
    pub fn live_textures(&self) -> usize {
        self.loads.len() - self.unloaded.len()
    }

    fn file_name(path: &Path) -> String {
        path.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

impl Platform for RecordingPlatform {
    type Texture = FakeTexture;
    type Music = FakeMusic;

    fn load_texture(&mut self, path: &Path) -> Result<FakeTexture, AssetError> {
        let name = Self::file_name(path);
        if self.missing.contains(&name) {
            return Err(AssetError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
            });
        }
        let size = self
            .sheet_sizes
            .get(&name)
            .copied()
            .unwrap_or(DEFAULT_SHEET_SIZE);
        self.loads.push(path.to_path_buf());
        Ok(FakeTexture {
            id: self.loads.len() - 1,
            path: path.to_path_buf(),
            size,
        })
    }

    fn texture_size(&self, texture: &FakeTexture) -> (u32, u32) {
        texture.size
    }

    fn unload_texture(&mut self, texture: FakeTexture) {
        self.unloaded.push(texture.id);
    }

    fn begin_frame(&mut self, clear: Color) {
        self.events.push(FrameEvent::Begin(clear));
    }

    fn begin_camera(&mut self, camera: &Camera) {
        self.events.push(FrameEvent::Camera(*camera));
    }

    fn draw_texture_region(
        &mut self,
        texture: &FakeTexture,
        src: Rect,
        dest: Rect,
        origin: Vec2,
        _rotation: f32,
        _tint: Color,
    ) {
        self.events.push(FrameEvent::Draw(DrawCall {
            texture: texture.path.clone(),
            src,
            dest,
            origin,
        }));
    }

    fn end_camera(&mut self) {
        self.events.push(FrameEvent::EndCamera);
    }

    fn end_frame(&mut self) {
        self.events.push(FrameEvent::End);
    }

    fn should_close(&self) -> bool {
        self.close_requested || self.close_after.is_some_and(|n| self.presented >= n)
    }

    async fn present(&mut self) {
        self.presented += 1;
        self.events.push(FrameEvent::Present);
        // Edges only last one frame
        self.pressed.clear();
    }

    fn play_music(&mut self, _music: &FakeMusic) {
        self.music_calls.push(MusicCall::Play);
    }

    fn update_music(&mut self, _music: &FakeMusic) {
        self.music_calls.push(MusicCall::Update);
    }

    fn pause_music(&mut self, _music: &FakeMusic) {
        self.music_calls.push(MusicCall::Pause);
    }

    fn resume_music(&mut self, _music: &FakeMusic) {
        self.music_calls.push(MusicCall::Resume);
    }

    fn unload_music(&mut self, _music: FakeMusic) {
        self.music_calls.push(MusicCall::Unload);
    }

    fn is_down(&self, action: Action) -> bool {
        self.held.contains(&action)
    }

    fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }
}
