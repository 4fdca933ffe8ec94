//! Playback state of the background music.

use bevy::prelude::*;

/// Where the background track is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MusicStatus {
    #[default]
    Stopped,
    /// Asset requested, waiting for the loader.
    Loading,
    Playing,
    /// The asset could not be loaded. Not retried automatically.
    Failed,
}

/// Tracks the background music status shown by the CD player.
#[derive(Resource, Debug, Default)]
pub struct MusicPlayer {
    status: MusicStatus,
}

impl MusicPlayer {
    pub fn status(&self) -> MusicStatus {
        self.status
    }

    pub fn is_playing(&self) -> bool {
        self.status == MusicStatus::Playing
    }

    /// Starts a load. Returns `false` if the track is already loading or
    /// playing, or has failed before, in which case nothing should be
    /// requested. A failed track stays failed for the session.
    pub fn request(&mut self) -> bool {
        match self.status {
            MusicStatus::Loading | MusicStatus::Playing | MusicStatus::Failed => false,
            MusicStatus::Stopped => {
                self.status = MusicStatus::Loading;
                true
            }
        }
    }

    /// The asset finished loading; returns `true` if playback should start.
    pub fn loaded(&mut self) -> bool {
        if self.status != MusicStatus::Loading {
            return false;
        }
        self.status = MusicStatus::Playing;
        true
    }

    /// The asset failed to load; returns `true` if this is news.
    pub fn failed(&mut self) -> bool {
        if self.status != MusicStatus::Loading {
            return false;
        }
        self.status = MusicStatus::Failed;
        true
    }

    /// Stops playback or abandons a pending load.
    pub fn stop(&mut self) -> bool {
        match self.status {
            MusicStatus::Loading | MusicStatus::Playing => {
                self.status = MusicStatus::Stopped;
                true
            }
            MusicStatus::Stopped | MusicStatus::Failed => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_load_play_stop() {
        let mut player = MusicPlayer::default();
        assert!(player.request());
        assert_eq!(player.status(), MusicStatus::Loading);
        assert!(!player.request());
        assert!(player.loaded());
        assert!(player.is_playing());
        assert!(!player.request());
        assert!(player.stop());
        assert_eq!(player.status(), MusicStatus::Stopped);
        assert!(!player.stop());
    }

    #[test]
    fn test_failure_is_reported_once() {
        let mut player = MusicPlayer::default();
        player.request();
        assert!(player.failed());
        assert!(!player.failed());
        assert_eq!(player.status(), MusicStatus::Failed);
        assert!(!player.loaded());
    }

    #[test]
    fn test_failed_track_is_not_requested_again() {
        let mut player = MusicPlayer::default();
        player.request();
        player.failed();
        assert!(!player.request());
        assert_eq!(player.status(), MusicStatus::Failed);
    }

    #[test]
    fn test_load_after_stop_is_ignored() {
        let mut player = MusicPlayer::default();
        player.request();
        player.stop();
        assert!(!player.loaded());
        assert!(!player.failed());
        assert_eq!(player.status(), MusicStatus::Stopped);
    }
}
