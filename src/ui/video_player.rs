use eframe::egui;

use crate::error::Result;
use crate::ops::media_events::Presentation;
use crate::ops::playback::{Intent, PlaybackController};
use crate::ops::time_ops::format_time;
use crate::renderer::gst_element::GstElement;
use crate::types::playback_state::PlaybackState;
use crate::types::video::Video;

const ACCENT: egui::Color32 = egui::Color32::from_rgb(255, 140, 40);
const SKIP_SECONDS: f64 = 10.0;
const CONTROL_BAR_HEIGHT: f32 = 64.0;

/// Sends fullscreen requests to the native window.
pub struct ViewportPresenter {
    ctx: egui::Context,
}

impl ViewportPresenter {
    pub fn new(ctx: egui::Context) -> Self {
        Self { ctx }
    }
}

impl Presentation for ViewportPresenter {
    fn request_fullscreen(&mut self, fullscreen: bool) -> Result<()> {
        self.ctx
            .send_viewport_cmd(egui::ViewportCommand::Fullscreen(fullscreen));
        Ok(())
    }
}

/// The custom player: video surface, overlays and the control bar.
pub struct VideoPlayer {
    pub controller: PlaybackController<GstElement>,
    pub texture: Option<egui::TextureHandle>,
    pub title: String,
    pub description: String,
    pub show_controls: bool,
}

impl VideoPlayer {
    pub fn new(ctx: &egui::Context, initial_volume: f64) -> Self {
        let repaint = ctx.clone();
        let element = GstElement::new(std::sync::Arc::new(move || repaint.request_repaint()));
        let mut controller = PlaybackController::with_element(element);
        controller.set_presenter(Box::new(ViewportPresenter::new(ctx.clone())));
        controller.set_volume(initial_volume);

        Self {
            controller,
            texture: None,
            title: String::new(),
            description: String::new(),
            show_controls: true,
        }
    }

    /// Loads a catalog entry, replacing whatever was playing.
    pub fn load(&mut self, video: &Video) {
        self.title = video.title.to_string();
        self.description = video.description.to_string();
        self.texture = None;
        self.controller.bind_source(video.src);
    }

    /// Pulls pending element events and the newest frame.
    pub fn update(&mut self, ctx: &egui::Context) {
        if let Some(element) = self.controller.element_mut() {
            element.dispatch_pending();
            if let Some(frame) = element.take_frame() {
                let image = egui::ColorImage::from_rgba_unmultiplied(
                    [frame.width as usize, frame.height as usize],
                    &frame.data,
                );
                match &mut self.texture {
                    Some(texture) => texture.set(image, egui::TextureOptions::LINEAR),
                    None => {
                        self.texture = Some(ctx.load_texture(
                            "player_video_frame",
                            image,
                            egui::TextureOptions::LINEAR,
                        ))
                    }
                }
            }
        }
        self.controller.pump();

        let fullscreen = ctx.input(|i| i.viewport().fullscreen).unwrap_or(false);
        self.controller.sync_fullscreen(fullscreen);

        if self.controller.state().is_playing() || self.controller.state().is_buffering() {
            ctx.request_repaint_after(std::time::Duration::from_millis(16));
        }
    }

    /// Show the player in egui. In fullscreen the surface takes all the
    /// space it is given, otherwise it is 16:9 at the available width.
    pub fn show(&mut self, ui: &mut egui::Ui) {
        let state = self.controller.state().clone();
        let width = ui.available_width();
        let size = if state.is_fullscreen {
            ui.available_size()
        } else {
            egui::vec2(width, width * 9.0 / 16.0)
        };
        let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click());
        self.show_controls = ui.rect_contains_pointer(rect);

        let mut intents = Vec::new();

        ui.painter().rect_filled(rect, 0.0, egui::Color32::BLACK);
        if let Some(texture) = &self.texture {
            let picture = fit_rect(rect, texture.size_vec2());
            egui::Image::new((texture.id(), picture.size())).paint_at(ui, picture);
        }

        if response.clicked() {
            intents.push(Intent::TogglePlay);
        }

        if state.is_buffering() {
            ui.painter()
                .rect_filled(rect, 0.0, egui::Color32::from_black_alpha(128));
            let spinner = egui::Rect::from_center_size(rect.center(), egui::vec2(64.0, 64.0));
            ui.put(spinner, egui::Spinner::new().size(64.0).color(ACCENT));
        }

        if state.is_locked {
            ui.painter()
                .rect_filled(rect, 0.0, egui::Color32::from_black_alpha(128));
            if self.show_controls {
                let button = egui::Rect::from_center_size(rect.center(), egui::vec2(64.0, 64.0));
                if ui.put(button, egui::Button::new("🔓")).clicked() {
                    intents.push(Intent::ToggleLock);
                }
            }
        } else if self.show_controls {
            self.paint_overlay(ui, rect, &state, &mut intents);
        }

        if self.show_controls {
            let bar = egui::Rect::from_min_max(
                egui::pos2(rect.left(), rect.bottom() - CONTROL_BAR_HEIGHT),
                rect.max,
            );
            ui.painter()
                .rect_filled(bar, 0.0, egui::Color32::from_black_alpha(160));
            let mut bar_ui = ui.new_child(
                egui::UiBuilder::new()
                    .max_rect(bar.shrink2(egui::vec2(8.0, 4.0)))
                    .layout(egui::Layout::top_down(egui::Align::Min)),
            );
            control_bar(&mut bar_ui, &state, &mut intents);
        }

        for intent in intents {
            self.controller.dispatch(intent);
        }
    }

    fn paint_overlay(
        &self,
        ui: &mut egui::Ui,
        rect: egui::Rect,
        state: &PlaybackState,
        intents: &mut Vec<Intent>,
    ) {
        let painter = ui.painter();
        let top = egui::Rect::from_min_size(rect.min, egui::vec2(rect.width(), 48.0));
        painter.rect_filled(top, 0.0, egui::Color32::from_black_alpha(160));
        painter.text(
            top.left_center() + egui::vec2(12.0, 0.0),
            egui::Align2::LEFT_CENTER,
            &self.title,
            egui::FontId::proportional(16.0),
            egui::Color32::WHITE,
        );

        let mid = rect.left_center().y;
        painter.text(
            egui::pos2(rect.left() + 12.0, mid),
            egui::Align2::LEFT_CENTER,
            format_time(state.current_time),
            egui::FontId::monospace(12.0),
            egui::Color32::WHITE,
        );
        painter.text(
            egui::pos2(rect.right() - 12.0, mid),
            egui::Align2::RIGHT_CENTER,
            format_time(state.duration),
            egui::FontId::monospace(12.0),
            egui::Color32::WHITE,
        );

        if !state.is_buffering() {
            let label = if state.is_playing() { "⏸" } else { "▶" };
            let button = egui::Rect::from_center_size(rect.center(), egui::vec2(64.0, 64.0));
            let play = egui::Button::new(egui::RichText::new(label).size(28.0))
                .fill(egui::Color32::from_white_alpha(50));
            if ui.put(button, play).clicked() {
                intents.push(Intent::TogglePlay);
            }
        }
    }
}

/// Seek bar plus the transport row. Everything but the lock is disabled
/// while locked.
fn control_bar(ui: &mut egui::Ui, state: &PlaybackState, intents: &mut Vec<Intent>) {
    let unlocked = !state.is_locked;

    ui.add_enabled_ui(unlocked, |ui| {
        let mut progress = state.progress_percent();
        let width = ui.available_width();
        ui.spacing_mut().slider_width = width;
        let seek = egui::Slider::new(&mut progress, 0.0..=100.0)
            .step_by(0.1)
            .show_value(false);
        if ui.add(seek).changed() {
            intents.push(Intent::Seek(progress));
        }
    });

    ui.horizontal(|ui| {
        let lock = if state.is_locked { "🔒" } else { "🔓" };
        if ui.button(lock).clicked() {
            intents.push(Intent::ToggleLock);
        }

        ui.add_enabled_ui(unlocked, |ui| {
            let play = if state.is_playing() { "⏸" } else { "▶" };
            if ui.button(play).clicked() {
                intents.push(Intent::TogglePlay);
            }
            if ui.button("⏪").clicked() {
                intents.push(Intent::Skip(-SKIP_SECONDS));
            }
            if ui.button("⏩").clicked() {
                intents.push(Intent::Skip(SKIP_SECONDS));
            }

            let speaker = if state.is_muted || state.volume == 0.0 {
                "🔇"
            } else {
                "🔊"
            };
            if ui.button(speaker).clicked() {
                intents.push(Intent::ToggleMute);
            }
            let mut volume = state.volume_percent();
            ui.spacing_mut().slider_width = 80.0;
            let slider = egui::Slider::new(&mut volume, 0.0..=100.0)
                .step_by(1.0)
                .show_value(false);
            if ui.add(slider).changed() {
                intents.push(Intent::SetVolume(volume));
            }

            ui.monospace(format!(
                "{} / {}",
                format_time(state.current_time),
                format_time(state.duration)
            ));

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let fullscreen = if state.is_fullscreen { "🗗" } else { "⛶" };
                if ui.button(fullscreen).clicked() {
                    intents.push(Intent::ToggleFullscreen);
                }
            });
        });
    });
}

/// Largest rect with the frame's aspect ratio, centred in `area`.
fn fit_rect(area: egui::Rect, frame: egui::Vec2) -> egui::Rect {
    if frame.x <= 0.0 || frame.y <= 0.0 {
        return area;
    }
    let scale = (area.width() / frame.x).min(area.height() / frame.y);
    egui::Rect::from_center_size(area.center(), frame * scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_rect_letterboxes_wide_frames() {
        let area = egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(1600.0, 1200.0));
        let picture = fit_rect(area, egui::vec2(1920.0, 1080.0));
        assert!((picture.width() - 1600.0).abs() < 1e-2);
        assert!((picture.height() - 900.0).abs() < 1e-2);
        assert!((picture.center() - area.center()).length() < 1e-2);
    }

    #[test]
    fn test_fit_rect_pillarboxes_tall_frames() {
        let area = egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(1920.0, 1080.0));
        let picture = fit_rect(area, egui::vec2(1080.0, 1920.0));
        assert_eq!(picture.height(), 1080.0);
        assert!((picture.width() - 607.5).abs() < 1e-3);
        assert_eq!(fit_rect(area, egui::Vec2::ZERO), area);
    }
}
