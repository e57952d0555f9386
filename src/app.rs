use eframe::egui;
use log::info;
use serde::{Deserialize, Serialize};

use crate::color;
use crate::controller::{SceneController, MIN_VECTORS};
use crate::interaction::PointerEvent;
use crate::math::{self, Operation};
use crate::render;

/// Persisted across runs through eframe storage. The help window opens by
/// itself only until the first visit has been recorded.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub has_visited: bool,
}

pub struct VectorApp {
    controller: SceneController,
    config: AppConfig,
    show_help: bool,
    input_buffer: String,
}

impl VectorApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config: AppConfig = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();
        let show_help = !config.has_visited;
        if show_help {
            info!("first visit, opening the help window");
        }

        Self {
            controller: SceneController::new(),
            config: AppConfig { has_visited: true },
            show_help,
            input_buffer: String::new(),
        }
    }

    /// Text field that shows the stored value while unfocused and the raw
    /// edit buffer while focused. Commits through `parse_component`, so
    /// unparsable text lands as 0.
    fn handle_buffered_input(
        ui: &mut egui::Ui,
        id: egui::Id,
        buffer: &mut String,
        val: &mut f32,
    ) -> bool {
        let mut display_str = if ui.memory(|mem| mem.has_focus(id)) {
            buffer.clone()
        } else {
            format!("{:.2}", val)
        };

        let response = ui.add(
            egui::TextEdit::singleline(&mut display_str)
                .id(id)
                .desired_width(52.0),
        );

        if response.gained_focus() {
            *buffer = format!("{:.2}", val);
            if let Some(mut state) = egui::TextEdit::load_state(ui.ctx(), id) {
                let c_range = egui::text::CCursorRange::two(
                    egui::text::CCursor::new(0),
                    egui::text::CCursor::new(buffer.len()),
                );
                state.cursor.set_char_range(Some(c_range));
                egui::TextEdit::store_state(ui.ctx(), id, state);
            }
        }

        if response.changed() {
            *buffer = display_str;
            *val = math::parse_component(buffer);
            return true;
        }
        false
    }

    fn handle_hotkeys(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        if ctx.input(|i| i.key_pressed(egui::Key::N)) {
            let show = !self.controller.show_axis_numbers();
            self.controller.set_show_axis_numbers(show);
        }
        if ctx.input(|i| i.key_pressed(egui::Key::H)) {
            self.show_help = true;
        }
    }

    fn draw_vector_rows(&mut self, ui: &mut egui::Ui) {
        let count = self.controller.vectors().len();
        let mut remove: Option<usize> = None;
        let mut randomize: Option<usize> = None;
        let mut edited: Option<(usize, usize, f32)> = None;

        for index in 0..count {
            let label_color = color::vector_color(index, count);
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new(SceneController::vector_label(index))
                        .color(label_color)
                        .strong(),
                );
                if ui.button("🎲").on_hover_text("Randomize").clicked() {
                    randomize = Some(index);
                }
                if count > MIN_VECTORS && ui.button("❌").on_hover_text("Remove").clicked() {
                    remove = Some(index);
                }
            });

            ui.horizontal(|ui| {
                for component in 0..3 {
                    ui.label(["X", "Y", "Z"][component]);
                    let id = ui.make_persistent_id(format!("vec_{}_{}", index, component));
                    let mut value = self.controller.vectors()[index][component];
                    if Self::handle_buffered_input(ui, id, &mut self.input_buffer, &mut value) {
                        edited = Some((index, component, value));
                    }
                }
            });
            ui.add_space(6.0);
        }

        if let Some((index, component, value)) = edited {
            self.controller.set_component(index, component, value);
        }
        if let Some(index) = randomize {
            self.controller.randomize_vector(index);
        }
        if let Some(index) = remove {
            self.controller.remove_vector(index);
        }
    }

    fn draw_operation_controls(&mut self, ui: &mut egui::Ui) {
        let count = self.controller.vectors().len();
        let mut operation = self.controller.operation();

        egui::ComboBox::from_id_source("operation")
            .selected_text(operation.label())
            .show_ui(ui, |ui| {
                for op in Operation::ALL {
                    // Dot and cross only make sense for a pair; hide them
                    // otherwise, matching the engine's own guard.
                    if op.requires_pair() && count != 2 {
                        continue;
                    }
                    ui.selectable_value(&mut operation, op, op.label());
                }
            });
        if operation != self.controller.operation() {
            self.controller.set_operation(operation);
        }

        if ui.button("Calculate").clicked() {
            self.controller.calculate();
        }

        if let Some(notice) = self.controller.notice() {
            ui.colored_label(egui::Color32::LIGHT_RED, notice);
        }

        if let Some(result) = self.controller.result() {
            ui.add_space(4.0);
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.label(
                    egui::RichText::new(format!(
                        "Result: {}",
                        self.controller.operation().label()
                    ))
                    .strong(),
                );
                ui.label(
                    egui::RichText::new(result.to_string())
                        .monospace()
                        .color(color::RESULT_COLOR)
                        .size(16.0),
                );
            });
        }
    }

    fn draw_view_controls(&mut self, ui: &mut egui::Ui) {
        let mut show_numbers = self.controller.show_axis_numbers();
        if ui.checkbox(&mut show_numbers, "Axis numbers [N]").changed() {
            self.controller.set_show_axis_numbers(show_numbers);
        }
        ui.horizontal(|ui| {
            if ui.button("🔍 Zoom In").clicked() {
                self.controller.zoom_in();
            }
            if ui.button("🔍 Zoom Out").clicked() {
                self.controller.zoom_out();
            }
        });
    }

    fn draw_viewport(&mut self, ui: &mut egui::Ui) {
        let (rect, resp) = ui.allocate_exact_size(ui.available_size(), egui::Sense::drag());
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 4.0, egui::Color32::from_rgb(0xf8, 0xf9, 0xfa));

        if resp.drag_started() {
            if let Some(pos) = resp.interact_pointer_pos() {
                self.controller.pointer_event(PointerEvent::Down(pos));
            }
        }
        if resp.dragged() {
            if let Some(pos) = resp.interact_pointer_pos() {
                self.controller.pointer_event(PointerEvent::Move(pos));
            }
        }
        if resp.drag_stopped() {
            self.controller.pointer_event(PointerEvent::Up);
        }
        // The pointer disappearing mid-drag (left the window) ends the drag.
        if self.controller.is_dragging() && ui.input(|i| i.pointer.latest_pos().is_none()) {
            self.controller.pointer_event(PointerEvent::Leave);
        }

        if resp.hovered() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll != 0.0 {
                self.controller.wheel(scroll);
            }
        }

        render::draw_scene(&painter, rect, self.controller.camera(), self.controller.scene());
    }

    fn draw_help_window(&mut self, ctx: &egui::Context) {
        egui::Window::new("How to use")
            .open(&mut self.show_help)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label("Enter vector components in the side panel, pick an operation and press Calculate.");
                ui.label("Drag the scene to orbit, scroll or use the zoom buttons to zoom.");
                ui.label("Dot and cross products need exactly two vectors.");
                ui.label("Hotkeys: N toggles axis numbers, H reopens this window.");
            });
    }
}

impl eframe::App for VectorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_hotkeys(ctx);

        egui::TopBottomPanel::top("navbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("3D Vector Calculator");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("❓ Help").clicked() {
                        self.show_help = true;
                    }
                });
            });
        });

        egui::SidePanel::left("controls")
            .width_range(260.0..=320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false; 2])
                    .show(ui, |ui| {
                        if ui.button("➕ Add Vector").clicked() {
                            self.controller.add_vector();
                        }
                        ui.add_space(8.0);

                        self.draw_vector_rows(ui);

                        ui.separator();
                        self.draw_operation_controls(ui);

                        ui.separator();
                        self.draw_view_controls(ui);
                    });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_viewport(ui);
        });

        self.draw_help_window(ctx);

        // Continuous render loop: repose the camera and redraw every frame.
        ctx.request_repaint();
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.config);
    }
}
