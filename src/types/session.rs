use crate::types::episode::{EpisodeCatalog, EpisodeFilterState};
use crate::types::video::Video;

/// Sub/Dub tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AudioTrack {
    #[default]
    Sub,
    Dub,
}

impl AudioTrack {
    pub const ALL: [AudioTrack; 2] = [AudioTrack::Sub, AudioTrack::Dub];

    pub fn label(self) -> &'static str {
        match self {
            AudioTrack::Sub => "Sub",
            AudioTrack::Dub => "Dub",
        }
    }
}

/// WatchSession groups the page selections that live outside the player.
/// Playback state is owned by the player's controller, not by the session.
#[derive(Debug, Clone)]
pub struct WatchSession {
    pub video: &'static Video,
    pub audio_track: AudioTrack,
    pub catalog: EpisodeCatalog,
    pub episodes: EpisodeFilterState,
}

impl WatchSession {
    pub fn new(video: &'static Video, catalog: EpisodeCatalog) -> Self {
        let episodes = EpisodeFilterState::new(&catalog);
        WatchSession {
            video,
            audio_track: AudioTrack::default(),
            catalog,
            episodes,
        }
    }

    /// Returns true when the selection actually changed.
    pub fn select_video(&mut self, video: &'static Video) -> bool {
        if self.video.id == video.id {
            return false;
        }
        self.video = video;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::video::CATALOG;

    #[test]
    fn test_session_defaults() {
        let session = WatchSession::new(&CATALOG[0], EpisodeCatalog::new(100, 20));
        assert_eq!(session.audio_track, AudioTrack::Sub);
        assert_eq!(session.episodes.active_episode, 1);
        assert_eq!(session.episodes.active_range.label(), "1-20");
    }

    #[test]
    fn test_select_video_reports_change() {
        let mut session = WatchSession::new(&CATALOG[0], EpisodeCatalog::new(100, 20));
        assert!(!session.select_video(&CATALOG[0]));
        assert!(session.select_video(&CATALOG[2]));
        assert_eq!(session.video.title, "Tears of Steel");
    }
}
