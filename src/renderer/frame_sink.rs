use std::sync::{Arc, Mutex};

use gstreamer as gst;
use gstreamer_video as gst_video;
use gstreamer_video::prelude::VideoFrameExt;

#[derive(Debug, Clone)]
pub struct VideoFrame {
    pub data: Vec<u8>, // Tightly packed RGBA
    pub width: u32,
    pub height: u32,
}

/// Latest decoded frame, shared between the streaming thread and the UI.
#[derive(Debug, Clone, Default)]
pub struct FrameSlot {
    inner: Arc<Mutex<Option<VideoFrame>>>,
}

impl FrameSlot {
    pub fn store(&self, frame: VideoFrame) {
        if let Ok(mut slot) = self.inner.lock() {
            *slot = Some(frame);
        }
    }

    /// Takes the frame if one arrived since the last call.
    pub fn take(&self) -> Option<VideoFrame> {
        self.inner.lock().ok().and_then(|mut slot| slot.take())
    }

    pub fn clear(&self) {
        let _ = self.take();
    }
}

/// Copies `height` rows of `width` RGBA pixels out of a strided plane.
pub fn pack_rows(plane: &[u8], stride: usize, width: usize, height: usize) -> Option<Vec<u8>> {
    let row = width * 4;
    if stride < row {
        return None;
    }
    let mut data = Vec::with_capacity(row * height);
    for y in 0..height {
        let start = y * stride;
        data.extend_from_slice(plane.get(start..start + row)?);
    }
    Some(data)
}

/// Converts an RGBA appsink sample into a frame.
pub fn frame_from_sample(sample: &gst::Sample) -> Option<VideoFrame> {
    let buffer = sample.buffer()?;
    let info = gst_video::VideoInfo::from_caps(sample.caps()?).ok()?;
    let frame = gst_video::VideoFrameRef::from_buffer_ref_readable(buffer, &info).ok()?;

    let width = frame.width();
    let height = frame.height();
    let stride = usize::try_from(*frame.plane_stride().first()?).ok()?;
    let data = pack_rows(
        frame.plane_data(0).ok()?,
        stride,
        width as usize,
        height as usize,
    )?;

    Some(VideoFrame {
        data,
        width,
        height,
    })
}
