use std::sync::mpsc::{self, Receiver, Sender};

use crate::error::Result;

/// Signals a media element raises while it loads and plays a source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MediaEvent {
    /// Playback was requested and accepted.
    Play,
    Pause,
    /// Frames are flowing again after a start or a stall.
    Playing,
    /// Stalled waiting for data.
    Waiting,
    /// Enough data buffered to continue.
    CanPlay,
    TimeUpdate(f64),
    LoadedMetadata { duration: f64 },
    Ended,
}

/// Identifies one binding of a source to an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourcedEvent {
    pub source: SourceId,
    pub event: MediaEvent,
}

/// The element's end of a subscription. Cloneable so handlers on other
/// threads can hold one.
#[derive(Debug, Clone)]
pub struct EventSink {
    source: SourceId,
    tx: Sender<SourcedEvent>,
}

impl EventSink {
    pub fn source(&self) -> SourceId {
        self.source
    }

    /// Returns false once the subscription has been released.
    pub fn emit(&self, event: MediaEvent) -> bool {
        self.tx
            .send(SourcedEvent {
                source: self.source,
                event,
            })
            .is_ok()
    }
}

/// The controller's end of a subscription. Dropping it releases the
/// subscription: every later `emit` on the matching sink is discarded.
#[derive(Debug)]
pub struct Subscription {
    source: SourceId,
    rx: Receiver<SourcedEvent>,
}

impl Subscription {
    pub fn source(&self) -> SourceId {
        self.source
    }

    /// Events delivered so far, in delivery order.
    pub fn drain(&self) -> Vec<MediaEvent> {
        self.rx
            .try_iter()
            .filter(|sourced| {
                if sourced.source != self.source {
                    tracing::debug!(?sourced, "dropping event from a stale source");
                    return false;
                }
                true
            })
            .map(|sourced| sourced.event)
            .collect()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        tracing::debug!(source = self.source.0, "media subscription released");
    }
}

pub fn subscribe(source: SourceId) -> (EventSink, Subscription) {
    let (tx, rx) = mpsc::channel();
    (EventSink { source, tx }, Subscription { source, rx })
}

/// The host platform's media element.
pub trait MediaElement {
    /// Routes the element's signals to `sink` until `unsubscribe`.
    fn subscribe(&mut self, sink: EventSink);
    fn unsubscribe(&mut self);
    fn load(&mut self, uri: &str) -> Result<()>;
    fn play(&mut self) -> Result<()>;
    fn pause(&mut self) -> Result<()>;
    fn set_current_time(&mut self, seconds: f64) -> Result<()>;
    /// Linear, 0..=1.
    fn set_volume(&mut self, volume: f64) -> Result<()>;
}

/// The display the element is presented on.
pub trait Presentation {
    /// Asks the host to enter or leave fullscreen. The host confirms the
    /// resulting state separately.
    fn request_fullscreen(&mut self, fullscreen: bool) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_preserves_order() {
        let (sink, subscription) = subscribe(SourceId(1));
        sink.emit(MediaEvent::Play);
        sink.emit(MediaEvent::TimeUpdate(1.5));
        sink.emit(MediaEvent::Pause);
        assert_eq!(
            subscription.drain(),
            vec![
                MediaEvent::Play,
                MediaEvent::TimeUpdate(1.5),
                MediaEvent::Pause
            ]
        );
        assert!(subscription.drain().is_empty());
    }

    #[test]
    fn test_emit_after_release_is_discarded() {
        let (sink, subscription) = subscribe(SourceId(7));
        assert_eq!(sink.source(), SourceId(7));
        drop(subscription);
        assert!(!sink.emit(MediaEvent::Ended));
    }
}
