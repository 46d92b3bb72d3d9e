use crate::ops::media_events::MediaEvent;

/// Seconds between periodic time updates while playing.
pub const TIME_UPDATE_INTERVAL: f64 = 0.25;

/// Turns raw pipeline observations into the media events the controller
/// understands. Holds just enough memory to avoid repeating itself.
#[derive(Debug, Clone, Default)]
pub struct EventBridge {
    last_position: Option<f64>,
    announced_duration: Option<f64>,
    stalled: bool,
    playing: bool,
}

impl EventBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything about the previous source.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Called with the pipeline position on every UI frame while playing.
    pub fn position(&mut self, seconds: f64) -> Option<MediaEvent> {
        if let Some(last) = self.last_position {
            if (seconds - last).abs() < TIME_UPDATE_INTERVAL {
                return None;
            }
        }
        self.last_position = Some(seconds);
        Some(MediaEvent::TimeUpdate(seconds))
    }

    /// A seek always reports its target.
    pub fn seeked(&mut self, seconds: f64) -> MediaEvent {
        self.last_position = Some(seconds);
        MediaEvent::TimeUpdate(seconds)
    }

    pub fn duration(&mut self, seconds: f64) -> Option<MediaEvent> {
        if self.announced_duration == Some(seconds) {
            return None;
        }
        self.announced_duration = Some(seconds);
        Some(MediaEvent::LoadedMetadata { duration: seconds })
    }

    /// Result of a duration query once the pipeline has prerolled. A stream
    /// with no known length is announced once as zero so loading completes.
    pub fn metadata(&mut self, duration: Option<f64>) -> Option<MediaEvent> {
        match duration {
            Some(seconds) => self.duration(seconds),
            None if self.announced_duration.is_none() => self.duration(0.0),
            None => None,
        }
    }

    /// End of stream. The pipeline is held paused, so a later start is
    /// reported again.
    pub fn ended(&mut self) -> [MediaEvent; 2] {
        self.playing = false;
        self.stalled = false;
        self.last_position = None;
        [MediaEvent::Pause, MediaEvent::Ended]
    }

    pub fn buffering(&mut self, percent: i32) -> Option<MediaEvent> {
        match (self.stalled, percent < 100) {
            (false, true) => {
                self.stalled = true;
                Some(MediaEvent::Waiting)
            }
            (true, false) => {
                self.stalled = false;
                Some(if self.playing {
                    MediaEvent::Playing
                } else {
                    MediaEvent::CanPlay
                })
            }
            _ => None,
        }
    }

    /// Pipeline reached a new state.
    pub fn state_changed(&mut self, playing: bool) -> Option<MediaEvent> {
        let started = playing && !self.playing;
        self.playing = playing;
        (started && !self.stalled).then_some(MediaEvent::Playing)
    }

    pub fn is_stalled(&self) -> bool {
        self.stalled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_updates_are_throttled() {
        let mut bridge = EventBridge::new();
        assert_eq!(bridge.position(0.0), Some(MediaEvent::TimeUpdate(0.0)));
        assert_eq!(bridge.position(0.1), None);
        assert_eq!(bridge.position(0.3), Some(MediaEvent::TimeUpdate(0.3)));
        assert_eq!(bridge.seeked(40.0), MediaEvent::TimeUpdate(40.0));
        assert_eq!(bridge.position(40.1), None);
    }

    #[test]
    fn test_duration_announced_once_per_value() {
        let mut bridge = EventBridge::new();
        assert_eq!(
            bridge.duration(120.0),
            Some(MediaEvent::LoadedMetadata { duration: 120.0 })
        );
        assert_eq!(bridge.duration(120.0), None);
        assert!(bridge.duration(121.0).is_some());
        bridge.reset();
        assert!(bridge.duration(121.0).is_some());
    }

    #[test]
    fn test_unknown_duration_still_completes_loading() {
        let mut bridge = EventBridge::new();
        assert_eq!(
            bridge.metadata(None),
            Some(MediaEvent::LoadedMetadata { duration: 0.0 })
        );
        assert_eq!(bridge.metadata(None), None);
        assert_eq!(
            bridge.metadata(Some(30.0)),
            Some(MediaEvent::LoadedMetadata { duration: 30.0 })
        );
        assert_eq!(bridge.metadata(None), None);
    }

    #[test]
    fn test_restart_after_end_is_reported() {
        let mut bridge = EventBridge::new();
        assert_eq!(bridge.state_changed(true), Some(MediaEvent::Playing));
        assert_eq!(bridge.position(59.8), Some(MediaEvent::TimeUpdate(59.8)));
        assert_eq!(bridge.ended(), [MediaEvent::Pause, MediaEvent::Ended]);
        assert_eq!(bridge.position(59.9), Some(MediaEvent::TimeUpdate(59.9)));
        assert_eq!(bridge.state_changed(true), Some(MediaEvent::Playing));
    }

    #[test]
    fn test_buffering_edges() {
        let mut bridge = EventBridge::new();
        assert_eq!(bridge.buffering(10), Some(MediaEvent::Waiting));
        assert_eq!(bridge.buffering(50), None);
        assert!(bridge.is_stalled());
        assert_eq!(bridge.buffering(100), Some(MediaEvent::CanPlay));
        assert_eq!(bridge.buffering(100), None);

        assert_eq!(bridge.state_changed(true), Some(MediaEvent::Playing));
        assert_eq!(bridge.buffering(0), Some(MediaEvent::Waiting));
        assert_eq!(bridge.buffering(100), Some(MediaEvent::Playing));
    }

    #[test]
    fn test_playing_not_reported_while_stalled() {
        let mut bridge = EventBridge::new();
        bridge.buffering(20);
        assert_eq!(bridge.state_changed(true), None);
        assert_eq!(bridge.state_changed(true), None);
        assert_eq!(bridge.state_changed(false), None);
    }
}
