//! Player controller
//!
//! Four-way walking with a frame-counted animation. Movement flags are
//! rebuilt from input every tick; position and animation advance in `update`.

use std::path::{Path, PathBuf};

use macroquad::prelude::{vec2, Rect, Vec2, WHITE};

use super::Actor;
use crate::error::AssetError;
use crate::input::Action;
use crate::platform::Platform;

/// Character sheet, relative to the asset root
pub const PLAYER_SHEET: &str =
    "Sprout Lands - Sprites - Basic pack/Characters/Basic Charakter Spritesheet.png";

/// Size of one animation frame in the sheet
pub const FRAME_SIZE: f32 = 48.0;

/// On-screen size of the player
pub const DRAW_SIZE: f32 = 60.0;

/// Where the player starts, in world pixels
pub const START_POSITION: Vec2 = Vec2::new(200.0, 200.0);

/// Ticks between animation frames while walking (~.13s at 60fps)
const MOVING_FRAME_TICKS: u32 = 8;
/// Walking cycles through frames 0..4
const MOVING_FRAMES: u32 = 4;
/// Ticks between animation frames while idle (~.75s at 60fps)
const IDLE_FRAME_TICKS: u32 = 45;
/// Idling cycles through frames 0..2
const IDLE_FRAMES: u32 = 2;

/// Which way the player looks. The value is the row in the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Down = 0,
    Up = 1,
    Left = 2,
    Right = 3,
}

impl Facing {
    pub fn row(self) -> u32 {
        self as u32
    }
}

/// Directions held this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Movement {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Movement {
    pub fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }
}

pub struct Player<T> {
    texture: Option<T>,
    speed: f32,
    /// Position and draw size
    dest: Rect,
    /// Current animation cell in the sheet
    src: Rect,
    facing: Facing,
    movement: Movement,
    frame: u32,
}

impl<T> Player<T> {
    pub fn new(texture: T, speed: f32) -> Self {
        Self {
            texture: Some(texture),
            speed,
            dest: Rect::new(START_POSITION.x, START_POSITION.y, DRAW_SIZE, DRAW_SIZE),
            src: Rect::new(0.0, 0.0, FRAME_SIZE, FRAME_SIZE),
            facing: Facing::default(),
            movement: Movement::default(),
            frame: 0,
        }
    }

    /// Load the character sheet and place the player at the start position
    pub fn load<P>(asset_dir: &Path, speed: f32, platform: &mut P) -> Result<Self, AssetError>
    where
        P: Platform<Texture = T>,
    {
        let path: PathBuf = asset_dir.join(PLAYER_SHEET);
        let texture = platform.load_texture(&path)?;
        log::info!(
            "Player spawned at ({}, {}) with speed {}",
            START_POSITION.x,
            START_POSITION.y,
            speed
        );
        Ok(Self::new(texture, speed))
    }

    /// Replace the held directions. Checked Up, Down, Left, Right; the last
    /// held one decides the facing.
    pub fn set_movement(&mut self, movement: Movement) {
        self.movement = movement;
        if movement.up {
            self.facing = Facing::Up;
        }
        if movement.down {
            self.facing = Facing::Down;
        }
        if movement.left {
            self.facing = Facing::Left;
        }
        if movement.right {
            self.facing = Facing::Right;
        }
    }

    /// Advance position and animation by one tick
    pub fn step(&mut self, tick: u32) {
        if self.is_moving() {
            let m = self.movement;
            if m.up {
                self.dest.y -= self.speed;
            }
            if m.down {
                self.dest.y += self.speed;
            }
            if m.right {
                self.dest.x += self.speed;
            }
            if m.left {
                self.dest.x -= self.speed;
            }
            self.animate(tick, MOVING_FRAME_TICKS, MOVING_FRAMES);
        } else {
            self.animate(tick, IDLE_FRAME_TICKS, IDLE_FRAMES);
        }

        self.src.x = self.src.w * self.frame as f32;
        self.src.y = self.src.h * self.facing.row() as f32;
    }

    fn animate(&mut self, tick: u32, every: u32, frames: u32) {
        if tick % every == 0 {
            self.frame += 1;
        }
        self.frame %= frames;
    }

    /// World point the camera should center on
    pub fn camera_target(&self) -> Vec2 {
        vec2(self.dest.x - self.dest.w / 2.0, self.dest.y - self.dest.h / 2.0)
    }

    pub fn is_moving(&self) -> bool {
        self.movement.any()
    }

    #[cfg(test)]
    pub fn position(&self) -> Vec2 {
        vec2(self.dest.x, self.dest.y)
    }

    #[cfg(test)]
    pub fn facing(&self) -> Facing {
        self.facing
    }

    #[cfg(test)]
    pub fn frame(&self) -> u32 {
        self.frame
    }

    #[cfg(test)]
    pub fn source_rect(&self) -> Rect {
        self.src
    }
}

impl<P: Platform> Actor<P> for Player<P::Texture> {
    fn input(&mut self, platform: &P) {
        self.set_movement(Movement {
            up: platform.is_down(Action::MoveUp),
            down: platform.is_down(Action::MoveDown),
            left: platform.is_down(Action::MoveLeft),
            right: platform.is_down(Action::MoveRight),
        });
    }

    fn update(&mut self, tick: u32, _platform: &mut P) {
        self.step(tick);
    }

    fn draw(&self, platform: &mut P) {
        let Some(texture) = &self.texture else {
            return;
        };
        // Anchored at the full draw size so the sprite's centre is the
        // camera target
        let origin = vec2(self.dest.w, self.dest.h);
        platform.draw_texture_region(texture, self.src, self.dest, origin, 0.0, WHITE);
    }

    fn quit(&mut self, platform: &mut P) {
        if let Some(texture) = self.texture.take() {
            platform.unload_texture(texture);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::headless::RecordingPlatform;

    fn player(speed: f32) -> Player<()> {
        Player::new((), speed)
    }

    fn held(up: bool, down: bool, left: bool, right: bool) -> Movement {
        Movement { up, down, left, right }
    }

    #[test]
    fn test_starts_idle_facing_down() {
        let p = player(1.4);
        assert_eq!(p.position(), START_POSITION);
        assert_eq!(p.facing(), Facing::Down);
        assert!(!p.is_moving());
        assert_eq!(p.frame(), 0);
    }

    #[test]
    fn test_single_direction_moves_by_speed() {
        let mut p = player(2.0);
        p.set_movement(held(false, false, true, false));
        p.step(1);
        assert_eq!(p.position(), vec2(198.0, 200.0));
        assert_eq!(p.facing(), Facing::Left);
    }

    #[test]
    fn test_diagonal_is_not_normalized() {
        let mut p = player(1.5);
        p.set_movement(held(true, false, false, true));
        p.step(1);
        assert_eq!(p.position(), vec2(201.5, 198.5));
    }

    #[test]
    fn test_opposite_directions_cancel_but_still_walk() {
        let mut p = player(1.0);
        p.set_movement(held(true, true, false, false));
        p.step(1);
        assert_eq!(p.position(), START_POSITION);
        assert!(p.is_moving());
        assert_eq!(p.facing(), Facing::Down);
    }

    #[test]
    fn test_last_checked_direction_wins() {
        let mut p = player(1.0);
        p.set_movement(held(true, true, true, true));
        assert_eq!(p.facing(), Facing::Right);
        p.set_movement(held(true, false, true, false));
        assert_eq!(p.facing(), Facing::Left);
        p.set_movement(held(true, true, false, false));
        assert_eq!(p.facing(), Facing::Down);
        // Releasing everything keeps the last facing
        p.set_movement(Movement::default());
        assert_eq!(p.facing(), Facing::Down);
    }

    #[test]
    fn test_walking_animation_cycle() {
        let mut p = player(1.0);
        p.set_movement(held(false, true, false, false));
        let mut frames = Vec::new();
        for tick in 1..=40 {
            p.step(tick);
            if tick % 8 == 0 {
                frames.push(p.frame());
            }
        }
        assert_eq!(frames, vec![1, 2, 3, 0, 1]);
    }

    #[test]
    fn test_idle_animation_cycle() {
        let mut p = player(1.0);
        let mut frames = Vec::new();
        for tick in 1..=180 {
            p.step(tick);
            if tick % 45 == 0 {
                frames.push(p.frame());
            }
        }
        assert_eq!(frames, vec![1, 0, 1, 0]);
    }

    #[test]
    fn test_frame_bounds_hold_for_any_tick() {
        let mut p = player(1.0);
        // Toggle walking on an irregular schedule so every mode switch phase
        // is covered
        for tick in 0..20_000u32 {
            let walking = (tick / 7 + tick / 13) % 3 != 0;
            p.set_movement(held(false, false, false, walking));
            p.step(tick % 3600);
            if walking {
                assert!(p.frame() <= 3, "tick {}: frame {}", tick, p.frame());
            } else {
                assert!(p.frame() <= 1, "tick {}: frame {}", tick, p.frame());
            }
        }
    }

    #[test]
    fn test_stopping_keeps_frame_modulo_idle_cycle() {
        let mut p = player(1.0);
        p.set_movement(held(true, false, false, false));
        for tick in 1..=24 {
            p.step(tick);
        }
        assert_eq!(p.frame(), 3);
        p.set_movement(Movement::default());
        p.step(25);
        assert_eq!(p.frame(), 1);
    }

    #[test]
    fn test_source_rect_follows_frame_and_facing() {
        let mut p = player(1.0);
        p.set_movement(held(false, false, false, true));
        for tick in 1..=16 {
            p.step(tick);
        }
        assert_eq!(p.frame(), 2);
        assert_eq!(p.source_rect(), Rect::new(96.0, 144.0, FRAME_SIZE, FRAME_SIZE));
    }

    #[test]
    fn test_camera_target_centres_on_sprite() {
        let mut p = player(3.0);
        assert_eq!(p.camera_target(), vec2(170.0, 170.0));
        p.set_movement(held(false, true, false, false));
        p.step(1);
        assert_eq!(p.camera_target(), vec2(170.0, 173.0));
    }

    #[test]
    fn test_actor_reads_platform_input() {
        let mut platform = RecordingPlatform::new();
        let mut p = Player::load(Path::new("res"), 1.0, &mut platform).unwrap();
        assert_eq!(platform.loads, vec![Path::new("res").join(PLAYER_SHEET)]);

        platform.hold(Action::MoveUp);
        platform.hold(Action::MoveLeft);
        p.input(&platform);
        p.update(1, &mut platform);
        assert_eq!(p.position(), vec2(199.0, 199.0));
        assert_eq!(p.facing(), Facing::Left);

        platform.release_all();
        p.input(&platform);
        assert!(!p.is_moving());
    }

    #[test]
    fn test_draw_and_quit() {
        let mut platform = RecordingPlatform::new();
        let mut p = Player::load(Path::new("res"), 1.0, &mut platform).unwrap();
        p.draw(&mut platform);
        let draws = platform.draws();
        assert_eq!(draws.len(), 1);
        assert_eq!(draws[0].dest, Rect::new(200.0, 200.0, DRAW_SIZE, DRAW_SIZE));
        assert_eq!(draws[0].origin, vec2(DRAW_SIZE, DRAW_SIZE));

        p.quit(&mut platform);
        p.quit(&mut platform);
        assert_eq!(platform.unloaded.len(), 1);

        platform.events.clear();
        p.draw(&mut platform);
        assert!(platform.draws().is_empty());
    }
}
