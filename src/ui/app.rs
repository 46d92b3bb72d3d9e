use eframe::egui;

use crate::types::session::WatchSession;
use crate::types::video::{self, CATALOG};
use crate::ui::episode_grid::episode_grid;
use crate::ui::episode_selector::episode_selector;
use crate::ui::video_list::video_list;
use crate::ui::video_player::VideoPlayer;

pub struct WatchApp {
    pub session: WatchSession,
    pub player: VideoPlayer,
}

impl WatchApp {
    pub fn new(cc: &eframe::CreationContext<'_>, session: WatchSession, initial_volume: f64) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());
        let mut player = VideoPlayer::new(&cc.egui_ctx, initial_volume);
        player.load(session.video);
        Self { session, player }
    }
}

impl eframe::App for WatchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.player.update(ctx);

        // The player alone while fullscreen
        if self.player.controller.state().is_fullscreen {
            egui::CentralPanel::default()
                .frame(egui::Frame::default().fill(egui::Color32::BLACK))
                .show(ctx, |ui| self.player.show(ui));
            return;
        }

        // Left: catalog
        egui::SidePanel::left("video_list_panel")
            .resizable(true)
            .default_width(240.0)
            .show(ctx, |ui| {
                ui.heading("Videos");
                ui.separator();
                if let Some(chosen) = video_list(ui, CATALOG, self.session.video.id) {
                    if self.session.select_video(chosen) {
                        self.player.load(chosen);
                    }
                }
            });

        // Center: player, tabs and episodes
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.player.show(ui);
                ui.label(
                    egui::RichText::new(&self.player.description).color(egui::Color32::GRAY),
                );
                ui.add_space(8.0);

                episode_selector(
                    ui,
                    self.session.episodes.active_episode,
                    &mut self.session.audio_track,
                );
                episode_grid(ui, &self.session.catalog, &mut self.session.episodes);
            });
        });
    }
}

/// Resolves the requested catalog id, falling back to the first entry.
pub fn initial_video(id: &str) -> &'static video::Video {
    video::find(id).unwrap_or_else(|| {
        tracing::warn!(id, "unknown video id, using the first catalog entry");
        video::first()
    })
}
