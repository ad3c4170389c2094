//! Background music
//!
//! One looping stream, paused or playing. The pause key flips the desired
//! state; the backend only hears about it when the desired state differs
//! from what was last applied.

use super::Actor;
use crate::input::Action;
use crate::platform::Platform;

pub struct MusicController<M> {
    stream: Option<M>,
    paused: bool,
    /// Last state sent to the backend; `None` until the first update
    applied: Option<bool>,
}

impl<M> MusicController<M> {
    /// Start `stream` looping. With `paused` set it is silenced on the first
    /// update.
    pub fn new<P>(stream: M, paused: bool, platform: &mut P) -> Self
    where
        P: Platform<Music = M>,
    {
        platform.play_music(&stream);
        Self {
            stream: Some(stream),
            paused,
            applied: None,
        }
    }

    #[cfg(test)]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn toggle(&mut self) {
        self.paused = !self.paused;
        log::debug!("Music {}", if self.paused { "paused" } else { "resumed" });
    }
}

impl<P: Platform> Actor<P> for MusicController<P::Music> {
    fn input(&mut self, platform: &P) {
        if platform.is_pressed(Action::ToggleMusic) {
            self.toggle();
        }
    }

    fn update(&mut self, _tick: u32, platform: &mut P) {
        let Some(stream) = &self.stream else {
            return;
        };
        platform.update_music(stream);

        if self.applied != Some(self.paused) {
            if self.paused {
                platform.pause_music(stream);
            } else {
                platform.resume_music(stream);
            }
            self.applied = Some(self.paused);
        }
    }

    fn draw(&self, _platform: &mut P) {}

    fn quit(&mut self, platform: &mut P) {
        if let Some(stream) = self.stream.take() {
            platform.unload_music(stream);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::headless::{FakeMusic, MusicCall, RecordingPlatform};

    fn track() -> FakeMusic {
        FakeMusic
    }

    #[test]
    fn test_plays_on_creation_and_resumes_once() {
        let mut platform = RecordingPlatform::new();
        let mut music = MusicController::new(track(), false, &mut platform);
        for tick in 0..3 {
            music.update(tick, &mut platform);
        }
        assert_eq!(
            platform.music_calls,
            vec![
                MusicCall::Play,
                MusicCall::Update,
                MusicCall::Resume,
                MusicCall::Update,
                MusicCall::Update,
            ]
        );
    }

    #[test]
    fn test_start_muted_pauses_on_first_update() {
        let mut platform = RecordingPlatform::new();
        let mut music = MusicController::new(track(), true, &mut platform);
        assert!(music.is_paused());
        music.update(0, &mut platform);
        assert_eq!(
            platform.music_calls,
            vec![MusicCall::Play, MusicCall::Update, MusicCall::Pause]
        );
    }

    #[test]
    fn test_toggle_on_press_edge_only() {
        let mut platform = RecordingPlatform::new();
        let mut music = MusicController::new(track(), false, &mut platform);
        music.update(0, &mut platform);

        // Holding the key is not a press
        platform.hold(Action::ToggleMusic);
        music.input(&platform);
        assert!(!music.is_paused());

        platform.press(Action::ToggleMusic);
        music.input(&platform);
        assert!(music.is_paused());
        music.update(1, &mut platform);

        platform.release_all();
        music.input(&platform);
        music.update(2, &mut platform);

        platform.press(Action::ToggleMusic);
        music.input(&platform);
        music.update(3, &mut platform);

        let changes: Vec<_> = platform
            .music_calls
            .iter()
            .filter(|c| matches!(c, MusicCall::Pause | MusicCall::Resume))
            .collect();
        assert_eq!(
            changes,
            vec![&MusicCall::Resume, &MusicCall::Pause, &MusicCall::Resume]
        );
    }

    #[test]
    fn test_buffers_fed_while_paused() {
        let mut platform = RecordingPlatform::new();
        let mut music = MusicController::new(track(), true, &mut platform);
        for tick in 0..5 {
            music.update(tick, &mut platform);
        }
        let updates = platform
            .music_calls
            .iter()
            .filter(|c| **c == MusicCall::Update)
            .count();
        assert_eq!(updates, 5);
    }

    #[test]
    fn test_quit_unloads_once() {
        let mut platform = RecordingPlatform::new();
        let mut music = MusicController::new(track(), false, &mut platform);
        music.quit(&mut platform);
        music.quit(&mut platform);
        music.update(0, &mut platform);
        assert_eq!(platform.music_calls, vec![MusicCall::Play, MusicCall::Unload]);
    }
}
