use eframe::egui;

use crate::types::video::Video;

/// Catalog cards. Returns the video the user clicked, if any.
pub fn video_list(
    ui: &mut egui::Ui,
    videos: &'static [Video],
    selected_id: &str,
) -> Option<&'static Video> {
    let mut chosen = None;

    egui::ScrollArea::vertical().show(ui, |ui| {
        for video in videos {
            if video_card(ui, video, video.id == selected_id).clicked() {
                chosen = Some(video);
            }
            ui.add_space(8.0);
        }
    });

    chosen
}

fn video_card(ui: &mut egui::Ui, video: &Video, selected: bool) -> egui::Response {
    let stroke = if selected {
        egui::Stroke::new(2.0, egui::Color32::from_rgb(255, 140, 40))
    } else {
        egui::Stroke::new(2.0, egui::Color32::TRANSPARENT)
    };

    let inner = egui::Frame::group(ui.style()).stroke(stroke).show(ui, |ui| {
        ui.set_width(ui.available_width());
        let poster_size = egui::vec2(ui.available_width(), ui.available_width() * 9.0 / 16.0);
        let (poster, _) = ui.allocate_exact_size(poster_size, egui::Sense::hover());
        ui.painter()
            .rect_filled(poster, 4.0, egui::Color32::from_gray(40));
        ui.painter().text(
            poster.center(),
            egui::Align2::CENTER_CENTER,
            "🎬",
            egui::FontId::proportional(24.0),
            egui::Color32::GRAY,
        );

        ui.add(egui::Label::new(egui::RichText::new(video.title).strong()).truncate());
        ui.add(
            egui::Label::new(
                egui::RichText::new(video.description)
                    .size(11.0)
                    .color(egui::Color32::GRAY),
            )
            .wrap(),
        );
    });

    inner
        .response
        .interact(egui::Sense::click())
        .on_hover_cursor(egui::CursorIcon::PointingHand)
}
