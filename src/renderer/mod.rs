pub mod event_bridge;
pub mod frame_sink;
pub mod gst_element;
