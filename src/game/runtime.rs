//! Game runtime
//!
//! The `Game` owns the platform, the actors and the camera, and runs the
//! fixed-step Input -> Update -> Render loop until asked to quit.
//!
//! Only one game may be alive per process. `Game::new` claims a process-wide
//! slot and reports `GameError::AlreadyRunning` if it is taken; the slot is
//! freed when the game is dropped.

use std::sync::atomic::{AtomicBool, Ordering};

use macroquad::prelude::{vec2, Color};

use super::{Actor, MusicController, Player};
use crate::config::Settings;
use crate::error::GameError;
use crate::input::Action;
use crate::platform::{Camera, Platform};
use crate::world::Flooring;

/// Sky-ish backdrop behind the tiles
pub const BACKGROUND: Color = Color::new(147.0 / 255.0, 211.0 / 255.0, 196.0 / 255.0, 1.0);

static GAME_ALIVE: AtomicBool = AtomicBool::new(false);

/// Proof of holding the single game slot
struct GameSlot(());

impl GameSlot {
    fn claim() -> Result<Self, GameError> {
        GAME_ALIVE
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| GameSlot(()))
            .map_err(|_| GameError::AlreadyRunning)
    }
}

impl Drop for GameSlot {
    fn drop(&mut self) {
        GAME_ALIVE.store(false, Ordering::Release);
    }
}

/// The actor list, in registration order
struct Actors<P: Platform> {
    music: MusicController<P::Music>,
    flooring: Flooring<P::Texture>,
    player: Player<P::Texture>,
}

impl<P: Platform> Actors<P> {
    fn each(&self) -> [&dyn Actor<P>; 3] {
        [&self.music, &self.flooring, &self.player]
    }

    fn each_mut(&mut self) -> [&mut dyn Actor<P>; 3] {
        [&mut self.music, &mut self.flooring, &mut self.player]
    }
}

pub struct Game<P: Platform> {
    platform: P,
    actors: Actors<P>,
    camera: Camera,
    frame_count: u32,
    /// Frame counter wraps to 0 once it passes this (one minute of frames)
    max_frame_count: u32,
    running: bool,
    background: Color,
    _slot: GameSlot,
}

impl<P: Platform> Game<P> {
    /// Bring up the game: music, map, player and camera
    ///
    /// `music` is a stream already loaded by the caller. On failure nothing
    /// acquired here is left behind.
    pub fn new(mut platform: P, settings: &Settings, music: P::Music) -> Result<Self, GameError> {
        let slot = GameSlot::claim()?;

        let mut music = MusicController::new(music, settings.start_muted, &mut platform);

        let loaded = Flooring::load(&settings.map_file, &settings.asset_dir, &mut platform);
        let mut flooring = match loaded {
            Ok(flooring) => flooring,
            Err(source) => {
                music.quit(&mut platform);
                return Err(GameError::Map {
                    path: settings.map_file.clone(),
                    source,
                });
            }
        };

        let player = match Player::load(&settings.asset_dir, settings.player_speed, &mut platform) {
            Ok(player) => player,
            Err(e) => {
                flooring.quit(&mut platform);
                music.quit(&mut platform);
                return Err(e.into());
            }
        };

        let window = &settings.window;
        let camera = Camera::new(
            vec2(window.width as f32 / 2.0, window.height as f32 / 2.0),
            player.camera_target(),
            settings.zoom,
        );

        log::info!(
            "Game ready: {}x{} window at {} fps, zoom {}",
            window.width,
            window.height,
            window.fps,
            settings.zoom
        );

        Ok(Self {
            platform,
            actors: Actors {
                music,
                flooring,
                player,
            },
            camera,
            frame_count: 0,
            max_frame_count: window.fps.saturating_mul(60),
            running: true,
            background: BACKGROUND,
            _slot: slot,
        })
    }

    /// Quit key stops the game; otherwise every actor reads input
    pub fn input(&mut self) {
        if self.platform.is_down(Action::Quit) {
            log::info!("Quit requested");
            self.running = false;
            return;
        }

        for actor in self.actors.each_mut() {
            actor.input(&self.platform);
        }
    }

    pub fn update(&mut self) {
        self.running = self.running && !self.platform.should_close();

        for actor in self.actors.each_mut() {
            actor.update(self.frame_count, &mut self.platform);
        }

        self.camera.target = self.actors.player.camera_target();

        self.frame_count += 1;
        if self.frame_count > self.max_frame_count {
            self.frame_count = 0;
        }
    }

    /// One backend frame: clear, camera, every actor in order
    pub fn render(&mut self) {
        self.platform.begin_frame(self.background);
        self.platform.begin_camera(&self.camera);

        for actor in self.actors.each() {
            actor.draw(&mut self.platform);
        }

        self.platform.end_camera();
        self.platform.end_frame();
    }

    /// Run until the quit key or a window close
    pub async fn run(&mut self) {
        while self.running {
            self.input();
            self.update();
            self.render();
            self.platform.present().await;
        }
    }

    /// Release every actor's resources and free the game slot
    pub fn shutdown(mut self) {
        for actor in self.actors.each_mut() {
            actor.quit(&mut self.platform);
        }
        log::info!("Game shut down after frame {}", self.frame_count);
    }
}
