//! Input handling
//!
//! Gameplay code never asks about physical keys. It asks about [`Action`]s,
//! and the platform resolves each action through [`bindings`].

mod actions;

pub use actions::*;
