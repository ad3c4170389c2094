//! Game Module
//!
//! Everything that lives in the frame loop:
//! - Actor: the input / update / draw / quit lifecycle shared by all actors
//! - Player: the walking character and its camera target
//! - Music: the looping background track
//! - Runtime: the `Game` aggregate that owns and drives them

pub mod actor;
pub mod music;
pub mod player;
pub mod runtime;

pub use actor::Actor;
pub use music::MusicController;
pub use player::Player;
pub use runtime::Game;
