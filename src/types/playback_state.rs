/// Where playback goes back to once a stall clears.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resume {
    Ready,
    Playing,
    Paused,
}

impl Resume {
    pub fn phase(self) -> PlaybackPhase {
        match self {
            Resume::Ready => PlaybackPhase::Ready,
            Resume::Playing => PlaybackPhase::Playing,
            Resume::Paused => PlaybackPhase::Paused,
        }
    }
}

/// Lifecycle of the bound media source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackPhase {
    /// No source bound yet.
    Idle,
    /// Source bound, metadata not loaded.
    Loading,
    /// Metadata loaded, playback never started.
    Ready,
    Playing,
    Paused,
    /// Stalled waiting for data.
    Buffering { resume: Resume },
    Ended,
}

/// Playback state for one media element.
///
/// `is_playing` and `is_buffering` are derived from `phase`, so an event
/// always moves both together.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    pub phase: PlaybackPhase,
    /// Seconds.
    pub current_time: f64,
    /// Seconds, 0 until metadata is known.
    pub duration: f64,
    /// Linear 0..=1, the volume the user last chose.
    pub volume: f64,
    /// Last non-zero volume, restored on unmute.
    pub restore_volume: f64,
    pub is_muted: bool,
    pub is_fullscreen: bool,
    pub is_locked: bool,
}

impl PlaybackState {
    pub fn new() -> Self {
        PlaybackState {
            phase: PlaybackPhase::Idle,
            current_time: 0.0,
            duration: 0.0,
            volume: 1.0,
            restore_volume: 1.0,
            is_muted: false,
            is_fullscreen: false,
            is_locked: false,
        }
    }

    pub fn is_playing(&self) -> bool {
        matches!(
            self.phase,
            PlaybackPhase::Playing
                | PlaybackPhase::Buffering {
                    resume: Resume::Playing
                }
        )
    }

    pub fn is_buffering(&self) -> bool {
        matches!(
            self.phase,
            PlaybackPhase::Loading | PlaybackPhase::Buffering { .. }
        )
    }

    /// Volume actually applied to the element.
    pub fn effective_volume(&self) -> f64 {
        if self.is_muted { 0.0 } else { self.volume }
    }

    /// Volume slider position, 0..=100. Reads 0 while muted.
    pub fn volume_percent(&self) -> f64 {
        self.effective_volume() * 100.0
    }

    /// Seek bar position, 0..=100.
    pub fn progress_percent(&self) -> f64 {
        if self.duration > 0.0 {
            (self.current_time / self.duration * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        }
    }

    /// Clears everything tied to the previous source. Volume, mute, lock
    /// and fullscreen belong to the player and survive.
    pub fn reset_for_source(&mut self) {
        self.phase = PlaybackPhase::Loading;
        self.current_time = 0.0;
        self.duration = 0.0;
    }

    /// Clamps a position into `[0, duration]` once the duration is known.
    pub fn clamp_time(&self, time: f64) -> f64 {
        if !time.is_finite() {
            return 0.0;
        }
        if self.duration > 0.0 {
            time.clamp(0.0, self.duration)
        } else {
            time.max(0.0)
        }
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new()
    }
}
