use eframe::egui;

use crate::types::session::AudioTrack;

/// "You are watching" banner and the Sub/Dub tabs.
pub fn episode_selector(ui: &mut egui::Ui, episode: u32, track: &mut AudioTrack) {
    ui.vertical_centered(|ui| {
        ui.horizontal(|ui| {
            ui.weak("You are watching");
            ui.colored_label(
                egui::Color32::from_rgb(255, 140, 40),
                format!("Episode {episode}"),
            );
        });
    });

    ui.columns(AudioTrack::ALL.len(), |columns| {
        for (ui, option) in columns.iter_mut().zip(AudioTrack::ALL) {
            ui.vertical_centered_justified(|ui| {
                ui.selectable_value(track, option, option.label());
            });
        }
    });
    ui.separator();
}
