use eframe::egui;

use crate::types::episode::{EpisodeCatalog, EpisodeFilterState};

const COLUMNS: usize = 5;

/// Bucket dropdown, number search and the grid of episode buttons.
pub fn episode_grid(ui: &mut egui::Ui, catalog: &EpisodeCatalog, state: &mut EpisodeFilterState) {
    ui.vertical(|ui| {
        ui.strong("List of episodes");

        ui.horizontal(|ui| {
            ui.label("☰");
            egui::ComboBox::from_id_salt("episode_range")
                .selected_text(format!("EPS: {}", state.active_range))
                .show_ui(ui, |ui| {
                    for range in catalog.ranges() {
                        if ui
                            .selectable_label(state.active_range == *range, format!("EPS: {range}"))
                            .clicked()
                        {
                            state.select_range(*range);
                        }
                    }
                });

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.add(
                    egui::TextEdit::singleline(&mut state.search_term)
                        .hint_text("Number of Ep")
                        .desired_width(120.0),
                );
                ui.label("🔍");
            });
        });

        ui.add_space(4.0);

        let episodes = state.filtered(catalog);
        if episodes.is_empty() {
            ui.weak("No episodes match");
            return;
        }

        let cell = egui::vec2(
            (ui.available_width() / COLUMNS as f32 - ui.spacing().item_spacing.x).max(24.0),
            24.0,
        );
        egui::Grid::new("episode_grid")
            .spacing(egui::vec2(4.0, 4.0))
            .show(ui, |ui| {
                for row in episodes.chunks(COLUMNS) {
                    for &episode in row {
                        let selected = state.active_episode == episode;
                        let button = egui::Button::new(episode.to_string())
                            .selected(selected)
                            .min_size(cell);
                        if ui.add(button).clicked() {
                            state.select_episode(episode);
                        }
                    }
                    ui.end_row();
                }
            });
    });
}
