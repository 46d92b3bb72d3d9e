//! Episodic: a watch page with a custom video player, sub/dub tabs and a
//! paginated episode grid, on eframe and GStreamer.

pub mod config;
pub mod error;
pub mod ops;
pub mod renderer;
pub mod types;
pub mod ui;
