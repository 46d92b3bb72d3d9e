pub mod media_events;
pub mod playback;
pub mod time_ops;
