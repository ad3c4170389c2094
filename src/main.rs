//! Tilewalk: walk a character around a tile map
//!
//! - A text map file lists sprite indices and sprite-sheet keys per cell
//! - The player walks in four directions with a frame-counted animation
//! - A camera follows the player; a looping track plays in the background

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod config;
mod error;
mod game;
mod input;
mod platform;
mod world;

use clap::Parser;
use macroquad::prelude::Conf;

use config::{Cli, Settings};
use game::Game;
use platform::MacroquadPlatform;

fn window_conf(settings: &Settings) -> Conf {
    let window = &settings.window;
    Conf {
        window_title: window.title.clone(),
        window_width: window.width as i32,
        window_height: window.height as i32,
        window_resizable: false,
        high_dpi: false,
        ..Default::default()
    }
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    // Panic reports with backtraces, before anything else can panic
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    let settings = match cli.settings() {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    log::info!("Tilewalk v{}", VERSION);
    macroquad::Window::from_config(window_conf(&settings), run(settings));
}

async fn run(settings: Settings) {
    let mut platform = MacroquadPlatform::new(settings.window.fps);

    let music = match platform.load_music(&settings.music_path()).await {
        Ok(music) => music,
        Err(e) => {
            log::error!("Failed to load music: {}", e);
            std::process::exit(1);
        }
    };

    let mut game = match Game::new(platform, &settings, music) {
        Ok(game) => game,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    game.run().await;
    game.shutdown();
}
