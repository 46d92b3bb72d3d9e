use std::sync::Arc;

use gst::prelude::*;
use gstreamer as gst;
use gstreamer_app as gst_app;
use gstreamer_video as gst_video;
use tracing::{debug, warn};

use crate::error::Result;
use crate::ops::media_events::{EventSink, MediaElement, MediaEvent};
use crate::ops::time_ops::{nanos_to_seconds, seconds_to_nanos};
use crate::renderer::event_bridge::EventBridge;
use crate::renderer::frame_sink::{FrameSlot, VideoFrame, frame_from_sample};

/// Called from GStreamer threads whenever the UI has something to pick up.
pub type Waker = Arc<dyn Fn() + Send + Sync>;

/// Media element backed by a `playbin`, with video delivered as RGBA frames
/// through an appsink.
///
/// Bus messages are drained on the UI thread in [`GstElement::dispatch_pending`];
/// the bus sync handler only wakes the UI.
pub struct GstElement {
    playbin: Option<gst::Element>,
    frames: FrameSlot,
    sink: Option<EventSink>,
    bridge: EventBridge,
    waker: Waker,
    wants_playing: bool,
}

impl GstElement {
    pub fn new(waker: Waker) -> Self {
        Self {
            playbin: None,
            frames: FrameSlot::default(),
            sink: None,
            bridge: EventBridge::new(),
            waker,
            wants_playing: false,
        }
    }

    /// Newest decoded frame, if one arrived since the last call.
    pub fn take_frame(&self) -> Option<VideoFrame> {
        self.frames.take()
    }

    /// Translates pending bus messages and the playback position into media
    /// events on the current subscription.
    pub fn dispatch_pending(&mut self) {
        let Some(playbin) = self.playbin.clone() else {
            return;
        };
        if let Some(bus) = playbin.bus() {
            while let Some(msg) = bus.pop() {
                self.handle_message(&playbin, &msg);
            }
        }
        if self.wants_playing && !self.bridge.is_stalled() {
            if let Some(position) = playbin.query_position::<gst::ClockTime>() {
                if let Some(event) = self.bridge.position(nanos_to_seconds(position.nseconds())) {
                    self.emit(event);
                }
            }
        }
    }

    fn handle_message(&mut self, playbin: &gst::Element, msg: &gst::Message) {
        use gst::MessageView;

        match msg.view() {
            MessageView::AsyncDone(_) | MessageView::DurationChanged(_) => {
                let duration = playbin
                    .query_duration::<gst::ClockTime>()
                    .map(|duration| nanos_to_seconds(duration.nseconds()));
                if let Some(event) = self.bridge.metadata(duration) {
                    self.emit(event);
                }
            }
            MessageView::Buffering(buffering) => {
                let percent = buffering.percent();
                if let Some(event) = self.bridge.buffering(percent) {
                    // Hold the pipeline while the queue refills, then resume
                    // whatever the user last asked for.
                    let target = match (event, self.wants_playing) {
                        (MediaEvent::Waiting, _) => Some(gst::State::Paused),
                        (_, true) => Some(gst::State::Playing),
                        _ => None,
                    };
                    if let Some(target) = target {
                        if let Err(err) = playbin.set_state(target) {
                            warn!(?target, %err, "buffering state change failed");
                        }
                    }
                    self.emit(event);
                }
            }
            MessageView::StateChanged(change) => {
                if msg.src() == Some(playbin.upcast_ref::<gst::Object>()) {
                    debug!(old = ?change.old(), new = ?change.current(), "pipeline state");
                    let playing = change.current() == gst::State::Playing;
                    if let Some(event) = self.bridge.state_changed(playing) {
                        self.emit(event);
                    }
                }
            }
            MessageView::Eos(_) => {
                // A flushing seek on a playing pipeline would restart it.
                if let Err(err) = playbin.set_state(gst::State::Paused) {
                    warn!(%err, "pause at end of stream failed");
                }
                self.wants_playing = false;
                for event in self.bridge.ended() {
                    self.emit(event);
                }
            }
            MessageView::Error(err) => {
                warn!(error = %err.error(), debug = ?err.debug(), "pipeline error");
            }
            _ => {}
        }
    }

    fn emit(&self, event: MediaEvent) {
        if let Some(sink) = &self.sink {
            if !sink.emit(event) {
                debug!(?event, "subscription gone, event dropped");
            }
        }
    }

    fn ensure_playbin(&mut self) -> Result<gst::Element> {
        if let Some(playbin) = &self.playbin {
            return Ok(playbin.clone());
        }

        gst::init()?;

        let appsink = gst_app::AppSink::builder()
            .caps(
                &gst_video::VideoCapsBuilder::new()
                    .format(gst_video::VideoFormat::Rgba)
                    .build(),
            )
            .max_buffers(1)
            .drop(true)
            .build();

        let frames = self.frames.clone();
        let waker = self.waker.clone();
        appsink.set_callbacks(
            gst_app::AppSinkCallbacks::builder()
                .new_sample(move |sink| {
                    let sample = sink.pull_sample().map_err(|_| gst::FlowError::Eos)?;
                    if let Some(frame) = frame_from_sample(&sample) {
                        frames.store(frame);
                        waker();
                    }
                    Ok(gst::FlowSuccess::Ok)
                })
                .build(),
        );

        let playbin = gst::ElementFactory::make("playbin")
            .name("episodic-playbin")
            .property("video-sink", appsink.upcast_ref::<gst::Element>())
            .build()?;

        if let Some(bus) = playbin.bus() {
            let waker = self.waker.clone();
            bus.set_sync_handler(move |_, _| {
                waker();
                gst::BusSyncReply::Pass
            });
        }

        self.playbin = Some(playbin.clone());
        Ok(playbin)
    }
}

impl MediaElement for GstElement {
    fn subscribe(&mut self, sink: EventSink) {
        debug!(source = sink.source().0, "element subscribed");
        self.sink = Some(sink);
    }

    fn unsubscribe(&mut self) {
        self.sink = None;
        self.bridge.reset();
    }

    fn load(&mut self, uri: &str) -> Result<()> {
        let playbin = self.ensure_playbin()?;

        playbin.set_state(gst::State::Null)?;
        // Anything still queued belongs to the previous source.
        if let Some(bus) = playbin.bus() {
            bus.set_flushing(true);
            bus.set_flushing(false);
        }
        self.frames.clear();
        self.bridge.reset();
        self.wants_playing = false;

        playbin.set_property("uri", uri);
        // Paused prerolls far enough to learn the duration without starting.
        playbin.set_state(gst::State::Paused)?;
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        let Some(playbin) = &self.playbin else {
            return Ok(());
        };
        if !self.bridge.is_stalled() {
            playbin.set_state(gst::State::Playing)?;
        }
        self.wants_playing = true;
        self.emit(MediaEvent::Play);
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        let Some(playbin) = &self.playbin else {
            return Ok(());
        };
        playbin.set_state(gst::State::Paused)?;
        self.wants_playing = false;
        self.emit(MediaEvent::Pause);
        Ok(())
    }

    fn set_current_time(&mut self, seconds: f64) -> Result<()> {
        let Some(playbin) = &self.playbin else {
            return Ok(());
        };
        playbin.seek_simple(
            gst::SeekFlags::FLUSH | gst::SeekFlags::KEY_UNIT,
            gst::ClockTime::from_nseconds(seconds_to_nanos(seconds)),
        )?;
        let event = self.bridge.seeked(seconds);
        self.emit(event);
        Ok(())
    }

    fn set_volume(&mut self, volume: f64) -> Result<()> {
        if let Some(playbin) = &self.playbin {
            playbin.set_property("volume", volume.clamp(0.0, 1.0));
        }
        Ok(())
    }
}

impl Drop for GstElement {
    fn drop(&mut self) {
        if let Some(playbin) = self.playbin.take() {
            if let Some(bus) = playbin.bus() {
                bus.unset_sync_handler();
            }
            let _ = playbin.set_state(gst::State::Null);
        }
    }
}
