//! egui overlay: the title screen and the shape / mode panel.
//!
//! The overlay only produces [`UiEvent`]s and tessellated output; the viewer
//! state is changed by [`crate::ui::UiBridge`] and the output is drawn by the
//! renderer on top of the scene.

use winit::window::Window;

use crate::shape::{DisplayMode, ShapeType};
use crate::ui::{UiEvent, UiState};

/// Tessellated egui output for one frame
pub struct OverlayFrame {
    pub primitives: Vec<egui::ClippedPrimitive>,
    pub textures_delta: egui::TexturesDelta,
    pub pixels_per_point: f32,
}

impl OverlayFrame {
    /// Folds in an older frame that was never drawn. Its shapes are stale but
    /// its texture updates must still reach the GPU, ahead of this frame's.
    pub fn absorb(&mut self, older: OverlayFrame) {
        let mut textures_delta = older.textures_delta;
        textures_delta.append(std::mem::take(&mut self.textures_delta));
        self.textures_delta = textures_delta;
    }
}

pub struct Overlay {
    ctx: egui::Context,
    state: egui_winit::State,
}

impl Overlay {
    pub fn new(window: &Window) -> Self {
        let ctx = egui::Context::default();
        let state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        Self { ctx, state }
    }

    /// Returns true when egui wants the event for itself
    pub fn on_window_event(&mut self, window: &Window, event: &winit::event::WindowEvent) -> bool {
        self.state.on_window_event(window, event).consumed
    }

    pub fn run(&mut self, window: &Window, ui_state: &UiState, fps: f32) -> (Vec<UiEvent>, OverlayFrame) {
        let raw_input = self.state.take_egui_input(window);
        let mut events = Vec::new();

        let full_output = self.ctx.run(raw_input, |ctx| {
            if ui_state.title_visible {
                title_screen(ctx, &mut events);
            } else {
                control_panel(ctx, ui_state, fps, &mut events);
            }
        });

        self.state
            .handle_platform_output(window, full_output.platform_output);

        let pixels_per_point = full_output.pixels_per_point;
        let primitives = self.ctx.tessellate(full_output.shapes, pixels_per_point);

        (
            events,
            OverlayFrame {
                primitives,
                textures_delta: full_output.textures_delta,
                pixels_per_point,
            },
        )
    }
}

fn title_screen(ctx: &egui::Context, events: &mut Vec<UiEvent>) {
    egui::CentralPanel::default()
        .frame(egui::Frame::new().fill(egui::Color32::from_black_alpha(200)))
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(ui.available_height() * 0.35);
                ui.heading(
                    egui::RichText::new("Shape Viewer")
                        .size(48.0)
                        .color(egui::Color32::WHITE),
                );
                ui.add_space(24.0);
                let start = egui::Button::new(egui::RichText::new("Start").size(24.0))
                    .min_size(egui::vec2(160.0, 48.0));
                if ui.add(start).clicked() {
                    events.push(UiEvent::StartClicked);
                }
            });
        });
}

fn control_panel(ctx: &egui::Context, ui_state: &UiState, fps: f32, events: &mut Vec<UiEvent>) {
    egui::Window::new("Shape")
        .title_bar(false)
        .resizable(false)
        .fixed_pos(egui::pos2(10.0, 10.0))
        .show(ctx, |ui| {
            let mut shape = ui_state.selected_shape;
            egui::ComboBox::from_label("Shape")
                .selected_text(shape.label())
                .show_ui(ui, |ui| {
                    for option in ShapeType::ALL {
                        ui.selectable_value(&mut shape, option, option.label());
                    }
                });
            if shape != ui_state.selected_shape {
                events.push(UiEvent::ShapeSelected(shape));
            }

            let mut mode = ui_state.mode;
            egui::ComboBox::from_label("Mode")
                .selected_text(mode.label())
                .show_ui(ui, |ui| {
                    for option in DisplayMode::ALL {
                        ui.selectable_value(&mut mode, option, option.label());
                    }
                });
            if mode != ui_state.mode {
                events.push(UiEvent::ModeSelected(mode));
            }

            ui.add_space(5.0);
            ui.separator();
            ui.label(
                egui::RichText::new(format!("{:.0} FPS", fps))
                    .size(14.0)
                    .color(egui::Color32::GRAY),
            );
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_with(set: Vec<egui::TextureId>, free: Vec<egui::TextureId>) -> OverlayFrame {
        let mut textures_delta = egui::TexturesDelta::default();
        for id in set {
            let image = egui::ColorImage::from_rgba_unmultiplied([1, 1], &[255, 255, 255, 255]);
            textures_delta
                .set
                .push((id, egui::epaint::ImageDelta::full(image, egui::TextureOptions::LINEAR)));
        }
        textures_delta.free = free;
        OverlayFrame {
            primitives: Vec::new(),
            textures_delta,
            pixels_per_point: 1.0,
        }
    }

    #[test]
    fn test_absorb_keeps_undrawn_texture_updates() {
        let atlas = egui::TextureId::Managed(0);
        let first = frame_with(vec![atlas], Vec::new());
        let mut second = frame_with(Vec::new(), Vec::new());

        second.absorb(first);

        assert_eq!(second.textures_delta.set.len(), 1);
        assert_eq!(second.textures_delta.set[0].0, atlas);
    }

    #[test]
    fn test_absorb_orders_older_updates_first() {
        let atlas = egui::TextureId::Managed(0);
        let patch = egui::TextureId::Managed(1);
        let stale = egui::TextureId::Managed(2);
        let first = frame_with(vec![atlas], Vec::new());
        let mut second = frame_with(vec![patch], vec![stale]);
        second.pixels_per_point = 2.0;

        second.absorb(first);

        let ids: Vec<_> = second.textures_delta.set.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec![atlas, patch]);
        assert_eq!(second.textures_delta.free, vec![stale]);
        assert_eq!(second.pixels_per_point, 2.0);
    }
}
