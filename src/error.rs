use gstreamer as gst;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings file: {0}")]
    Config(#[from] toml::de::Error),
    #[error("gstreamer: {0}")]
    Gst(#[from] gst::glib::Error),
    #[error("gstreamer: {0}")]
    GstCall(#[from] gst::glib::BoolError),
    #[error("pipeline state change failed")]
    StateChange(#[from] gst::StateChangeError),
    #[error("invalid episode range `{0}`")]
    EpisodeRange(String),
}

pub type Result<T> = std::result::Result<T, Error>;
