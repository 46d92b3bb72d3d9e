use tracing::{debug, info, warn};

use crate::error::Result;
use crate::ops::media_events::{
    self, EventSink, MediaElement, MediaEvent, Presentation, SourceId, Subscription,
};
use crate::types::playback_state::{PlaybackPhase, PlaybackState, Resume};

/// A user request coming from the control surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    TogglePlay,
    /// Seek bar position, 0..=100.
    Seek(f64),
    /// Relative jump in seconds.
    Skip(f64),
    /// Volume slider position, 0..=100.
    SetVolume(f64),
    ToggleMute,
    ToggleFullscreen,
    ToggleLock,
}

impl Intent {
    /// While locked only the lock itself can be operated.
    pub fn permitted(self, locked: bool) -> bool {
        !locked || self == Intent::ToggleLock
    }
}

/// Phase after `event`, given the current phase.
pub fn next_phase(phase: PlaybackPhase, event: &MediaEvent) -> PlaybackPhase {
    use PlaybackPhase::*;

    match (phase, event) {
        (Idle, _) => Idle,

        (Loading | Buffering { .. }, MediaEvent::Play) => Buffering {
            resume: Resume::Playing,
        },
        (_, MediaEvent::Play) => Playing,

        (Loading, MediaEvent::Pause) => Loading,
        (Buffering { .. }, MediaEvent::Pause) => Buffering {
            resume: Resume::Paused,
        },
        (_, MediaEvent::Pause) => Paused,

        (_, MediaEvent::Playing) => Playing,

        (Playing, MediaEvent::Waiting) => Buffering {
            resume: Resume::Playing,
        },
        (Ready, MediaEvent::Waiting) => Buffering {
            resume: Resume::Ready,
        },
        (Paused | Ended, MediaEvent::Waiting) => Buffering {
            resume: Resume::Paused,
        },

        (Buffering { resume }, MediaEvent::CanPlay | MediaEvent::LoadedMetadata { .. }) => {
            resume.phase()
        }
        (Loading, MediaEvent::LoadedMetadata { .. }) => Ready,

        (_, MediaEvent::Ended) => Ended,

        (phase, _) => phase,
    }
}

/// Keeps a [`PlaybackState`] in step with one media element.
///
/// The element reports what happened through a subscription; the controller
/// applies those events and forwards user intents to the element. Nothing
/// here touches the element directly from a state transition.
pub struct PlaybackController<E: MediaElement> {
    element: Option<E>,
    presenter: Option<Box<dyn Presentation>>,
    state: PlaybackState,
    source_uri: Option<String>,
    subscription: Option<Subscription>,
    next_source: u64,
}

impl<E: MediaElement> PlaybackController<E> {
    pub fn new() -> Self {
        Self {
            element: None,
            presenter: None,
            state: PlaybackState::new(),
            source_uri: None,
            subscription: None,
            next_source: 0,
        }
    }

    pub fn with_element(element: E) -> Self {
        let mut controller = Self::new();
        controller.attach_element(element);
        controller
    }

    /// Binds the element. A source bound earlier is loaded into it.
    pub fn attach_element(&mut self, element: E) {
        self.release();
        self.element = Some(element);
        if let Some(uri) = self.source_uri.clone() {
            self.bind_source(&uri);
        }
    }

    pub fn set_presenter(&mut self, presenter: Box<dyn Presentation>) {
        self.presenter = Some(presenter);
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn element_mut(&mut self) -> Option<&mut E> {
        self.element.as_mut()
    }

    pub fn source(&self) -> Option<SourceId> {
        self.subscription.as_ref().map(Subscription::source)
    }

    /// Switches to a new source. State tied to the old one is reset and its
    /// events are no longer observed, whether or not the load succeeds.
    pub fn bind_source(&mut self, uri: &str) {
        self.release();
        self.state.reset_for_source();
        self.source_uri = Some(uri.to_string());
        self.next_source += 1;
        let source = SourceId(self.next_source);

        let volume = self.state.effective_volume();
        let Some(element) = self.element.as_mut() else {
            debug!(uri, "no media element yet, source deferred");
            return;
        };

        let (sink, subscription) = media_events::subscribe(source);
        match Self::load_into(element, sink, uri, volume) {
            Ok(()) => {
                info!(uri, source = source.0, "bound media source");
                self.subscription = Some(subscription);
            }
            Err(err) => {
                warn!(uri, %err, "failed to load media source");
                element.unsubscribe();
            }
        }
    }

    fn load_into(element: &mut E, sink: EventSink, uri: &str, volume: f64) -> Result<()> {
        element.subscribe(sink);
        element.load(uri)?;
        element.set_volume(volume)
    }

    fn release(&mut self) {
        if self.subscription.take().is_some() {
            if let Some(element) = self.element.as_mut() {
                element.unsubscribe();
            }
        }
    }

    /// Applies every event the element delivered since the last call.
    /// Returns how many were applied.
    pub fn pump(&mut self) -> usize {
        let Some(subscription) = self.subscription.as_ref() else {
            return 0;
        };
        let events = subscription.drain();
        let count = events.len();
        for event in events {
            self.apply(event);
        }
        count
    }

    fn apply(&mut self, event: MediaEvent) {
        let phase = next_phase(self.state.phase, &event);
        match event {
            MediaEvent::TimeUpdate(time) => {
                self.state.current_time = self.state.clamp_time(time);
            }
            MediaEvent::LoadedMetadata { duration } => {
                self.state.duration = if duration.is_finite() && duration > 0.0 {
                    duration
                } else {
                    0.0
                };
                self.state.current_time = self.state.clamp_time(self.state.current_time);
            }
            MediaEvent::Ended if self.state.duration > 0.0 => {
                self.state.current_time = self.state.duration;
            }
            _ => {}
        }
        if phase != self.state.phase {
            debug!(from = ?self.state.phase, to = ?phase, ?event, "playback transition");
        }
        self.state.phase = phase;
    }

    /// Host report of the actual fullscreen state.
    pub fn sync_fullscreen(&mut self, fullscreen: bool) {
        if self.state.is_fullscreen != fullscreen {
            debug!(fullscreen, "presentation changed");
            self.state.is_fullscreen = fullscreen;
        }
    }

    pub fn toggle_play(&mut self) {
        self.dispatch(Intent::TogglePlay);
    }

    pub fn seek(&mut self, fraction: f64) {
        self.dispatch(Intent::Seek(fraction));
    }

    pub fn skip(&mut self, seconds: f64) {
        self.dispatch(Intent::Skip(seconds));
    }

    pub fn set_volume(&mut self, fraction: f64) {
        self.dispatch(Intent::SetVolume(fraction));
    }

    pub fn toggle_mute(&mut self) {
        self.dispatch(Intent::ToggleMute);
    }

    pub fn toggle_fullscreen(&mut self) {
        self.dispatch(Intent::ToggleFullscreen);
    }

    pub fn toggle_lock(&mut self) {
        self.dispatch(Intent::ToggleLock);
    }

    pub fn dispatch(&mut self, intent: Intent) {
        if !intent.permitted(self.state.is_locked) {
            debug!(?intent, "ignored while locked");
            return;
        }

        let result = match intent {
            Intent::ToggleLock => {
                self.state.is_locked = !self.state.is_locked;
                Ok(())
            }
            Intent::ToggleFullscreen => match self.presenter.as_mut() {
                Some(presenter) => presenter.request_fullscreen(!self.state.is_fullscreen),
                None => Ok(()),
            },
            _ => {
                let Some(element) = self.element.as_mut() else {
                    debug!(?intent, "no media element bound");
                    return;
                };
                control(element, &mut self.state, intent)
            }
        };

        if let Err(err) = result {
            warn!(?intent, %err, "intent not applied");
        }
    }
}

/// Forwards a transport intent to the element and records what the element
/// accepted. Play state is left to the element's own events.
fn control<E: MediaElement>(
    element: &mut E,
    state: &mut PlaybackState,
    intent: Intent,
) -> Result<()> {
    match intent {
        Intent::TogglePlay if state.is_playing() => element.pause(),
        Intent::TogglePlay => {
            if state.phase == PlaybackPhase::Ended && state.current_time >= state.duration {
                seek_to(element, state, 0.0)?;
            }
            element.play()
        }
        Intent::Seek(fraction) => {
            let time = clamp_percent(fraction) / 100.0 * state.duration;
            seek_to(element, state, time)
        }
        Intent::Skip(seconds) => {
            let time = state.current_time + seconds;
            seek_to(element, state, time)
        }
        Intent::SetVolume(fraction) => {
            let volume = clamp_percent(fraction) / 100.0;
            element.set_volume(volume)?;
            state.volume = volume;
            state.is_muted = volume == 0.0;
            if volume > 0.0 {
                state.restore_volume = volume;
            }
            Ok(())
        }
        Intent::ToggleMute if state.is_muted => {
            element.set_volume(state.restore_volume)?;
            state.volume = state.restore_volume;
            state.is_muted = false;
            Ok(())
        }
        Intent::ToggleMute => {
            element.set_volume(0.0)?;
            if state.volume > 0.0 {
                state.restore_volume = state.volume;
            }
            state.is_muted = true;
            Ok(())
        }
        Intent::ToggleFullscreen | Intent::ToggleLock => Ok(()),
    }
}

/// Seeking back from the end leaves the ended state, like a media element.
fn seek_to<E: MediaElement>(element: &mut E, state: &mut PlaybackState, time: f64) -> Result<()> {
    let time = state.clamp_time(time);
    element.set_current_time(time)?;
    state.current_time = time;
    if state.phase == PlaybackPhase::Ended && time < state.duration {
        state.phase = PlaybackPhase::Paused;
    }
    Ok(())
}

fn clamp_percent(fraction: f64) -> f64 {
    if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 100.0)
    }
}

impl<E: MediaElement> Default for PlaybackController<E> {
    fn default() -> Self {
        Self::new()
    }
}
