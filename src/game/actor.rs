//! Actor lifecycle

use crate::platform::Platform;

/// Anything the game loop drives once per tick
///
/// The game calls every actor's `input`, then every actor's `update`, then
/// every actor's `draw`, always in registration order. `quit` is called once
/// at shutdown and must release whatever the actor loaded; calling it again
/// must be harmless.
pub trait Actor<P: Platform> {
    /// Read this tick's input
    fn input(&mut self, platform: &P);

    /// Advance state. `tick` is the game's rolling frame counter.
    fn update(&mut self, tick: u32, platform: &mut P);

    /// Emit draw calls. Runs inside the camera transform.
    fn draw(&self, platform: &mut P);

    /// Release owned resources
    fn quit(&mut self, platform: &mut P);
}
