use std::path::PathBuf;

use gstreamer as gst;

use episodic::config;
use episodic::types::episode::EpisodeCatalog;
use episodic::types::session::WatchSession;
use episodic::ui::app::{WatchApp, initial_video};

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("episodic=info")),
        )
        .init();

    let mut args = pico_args::Arguments::from_env();
    let config_path: Option<PathBuf> = args.opt_value_from_str("--config").unwrap_or_else(|err| {
        tracing::warn!(%err, "ignoring --config");
        None
    });
    let video_arg: Option<String> = args.opt_value_from_str("--video").unwrap_or_else(|err| {
        tracing::warn!(%err, "ignoring --video");
        None
    });

    let loaded = match &config_path {
        Some(path) => config::load_from_path(path),
        None => config::load(),
    };
    let config = loaded.unwrap_or_else(|err| {
        tracing::warn!(%err, "using default settings");
        config::Config::default()
    });

    if let Err(err) = gst::init() {
        tracing::error!(%err, "GStreamer failed to initialise, playback will not start");
    }

    let video = initial_video(video_arg.as_deref().unwrap_or(config.default_video()));
    let catalog = EpisodeCatalog::new(config.episode_count(), config.episode_bucket_size());
    let session = WatchSession::new(video, catalog);
    let initial_volume = config.initial_volume();

    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size(config.window_size())
            .with_title("Episodic"),
        ..Default::default()
    };
    eframe::run_native(
        "Episodic",
        native_options,
        Box::new(move |cc| Ok(Box::new(WatchApp::new(cc, session, initial_volume)))),
    )
}
