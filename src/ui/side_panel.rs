// src/ui/side_panel.rs

use std::sync::Arc;
use eframe::egui::{self, Context, Ui};
use log::{error, info};
use parking_lot::RwLock;

use crate::config::ExportSettings;
use crate::editor::Canvas;
use crate::export::{self, CodeGenerator, CppCodeGenerator};
use crate::ui::main_window::UiState;

/// Columns of the saved tileset sheet.
const TILESET_COLUMNS: u32 = 16;

/// Left-side panel: grid, room and export settings.
pub struct SidePanel {
    canvas: Arc<RwLock<Canvas>>,
    state: Arc<RwLock<UiState>>,
    export: ExportSettings,
    generated: String,
    output_path: String,
    tileset_path: String,
    /// Error to surface in a dialog after this frame.
    error: Option<String>,
}

impl SidePanel {
    pub fn new(canvas: Arc<RwLock<Canvas>>, state: Arc<RwLock<UiState>>, export: ExportSettings) -> Self {
        Self {
            canvas,
            state,
            export,
            generated: String::new(),
            output_path: "tilemap.h".to_owned(),
            tileset_path: "tileset.png".to_owned(),
            error: None,
        }
    }

    /// Called each frame. Returns an error message to show, if an export
    /// step failed.
    pub fn update(&mut self, ctx: &Context) -> Option<String> {
        egui::SidePanel::left("tools_panel")
            .default_width(250.0)
            .resizable(true)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.show_grid(ui);
                    ui.separator();
                    self.show_rooms(ui);
                    ui.separator();
                    self.show_export(ui);
                });
            });
        self.error.take()
    }

    fn show_grid(&self, ui: &mut Ui) {
        ui.heading("Grid");
        let mut canvas = self.canvas.write();

        let mut enabled = canvas.grid_enabled();
        let (mut gx, mut gy) = canvas.grid();
        if ui.checkbox(&mut enabled, "Show grid").changed() {
            canvas.set_grid(enabled, gx, gy);
        }
        ui.horizontal(|ui| {
            ui.label("Cell");
            if ui.add(egui::DragValue::new(&mut gx).clamp_range(1..=1024)).changed() {
                canvas.set_grid_x(gx);
            }
            ui.label("x");
            if ui.add(egui::DragValue::new(&mut gy).clamp_range(1..=1024)).changed() {
                canvas.set_grid_y(gy);
            }
        });
        let mut snap = canvas.snap_to_grid();
        if ui.checkbox(&mut snap, "Snap to grid").changed() {
            canvas.set_snap_to_grid(snap);
        }
    }

    fn show_rooms(&self, ui: &mut Ui) {
        ui.heading("Rooms");
        let mut canvas = self.canvas.write();

        // Rooms larger than the image could never be placed.
        let (max_w, max_h) = canvas
            .image_size()
            .map(|(w, h)| (w as i32, h as i32))
            .unwrap_or((4096, 4096));
        let (mut rw, mut rh) = canvas.room_size();
        ui.horizontal(|ui| {
            ui.label("Size");
            if ui.add(egui::DragValue::new(&mut rw).clamp_range(1..=max_w.max(1))).changed() {
                canvas.set_room_size_x(rw);
            }
            ui.label("x");
            if ui.add(egui::DragValue::new(&mut rh).clamp_range(1..=max_h.max(1))).changed() {
                canvas.set_room_size_y(rh);
            }
        });

        let mut place = canvas.place_mode();
        if ui.checkbox(&mut place, "Place rooms").changed() {
            canvas.set_place_rooms(place);
        }
        let mut link = canvas.link_mode();
        if ui.checkbox(&mut link, "Link rooms").changed() {
            canvas.set_link_rooms(link);
        }

        ui.horizontal(|ui| {
            if ui.button("Place all").clicked() {
                canvas.place_all_rooms();
            }
            if ui.button("Clear all").clicked() {
                canvas.clear_all_rooms();
            }
        });
        let linked = canvas.links().values().filter(|l| l.is_linked()).count();
        ui.label(format!("{} rooms, {} linked", canvas.rooms().len(), linked));
    }

    fn show_export(&mut self, ui: &mut Ui) {
        ui.heading("Export");
        ui.horizontal(|ui| {
            ui.label("Tile");
            ui.add(egui::DragValue::new(&mut self.export.tile_width).clamp_range(1..=512));
            ui.label("x");
            ui.add(egui::DragValue::new(&mut self.export.tile_height).clamp_range(1..=512));
        });

        if ui.button("Generate tilemap").clicked() {
            self.generate();
        }

        ui.horizontal(|ui| {
            ui.text_edit_singleline(&mut self.output_path);
            if ui.button("Save to").clicked() {
                self.save_output();
            }
        });
        ui.horizontal(|ui| {
            ui.text_edit_singleline(&mut self.tileset_path);
            if ui.button("Save tileset").clicked() {
                self.save_tileset();
            }
        });

        ui.add(
            egui::TextEdit::multiline(&mut self.generated.as_str())
                .code_editor()
                .desired_rows(12),
        );
    }

    fn generate(&mut self) {
        let canvas = self.canvas.read();
        let generator = CppCodeGenerator::new();

        let result = canvas
            .tilemap(self.export.tile_width, self.export.tile_height)
            .map_err(|e| e.to_string())
            .and_then(|tilemap| {
                let mut text = generator.generate(&tilemap.areas).map_err(|e| e.to_string())?;
                if canvas.link_mode() {
                    generator
                        .generate_room_links(&mut text, canvas.links())
                        .map_err(|e| e.to_string())?;
                }
                Ok((text, tilemap.areas.len(), tilemap.tiles.len()))
            });
        drop(canvas);

        match result {
            Ok((text, rooms, tiles)) => {
                info!("Generated tilemap: {} rooms, {} unique tiles", rooms, tiles);
                self.generated = text;
                self.state
                    .write()
                    .set_status(format!("Generated {} rooms, {} unique tiles", rooms, tiles));
            }
            Err(e) => self.fail(format!("Tilemap not generated: {}", e)),
        }
    }

    fn save_output(&mut self) {
        if self.generated.is_empty() {
            self.fail("Nothing generated yet".to_owned());
            return;
        }
        match export::write_to_file(&self.output_path, &self.generated) {
            Ok(()) => self.state.write().set_status(format!("Saved {}", self.output_path)),
            Err(e) => self.fail(format!("Could not save {}: {}", self.output_path, e)),
        }
    }

    fn save_tileset(&mut self) {
        let result = self
            .canvas
            .read()
            .tilemap(self.export.tile_width, self.export.tile_height);
        match result {
            Ok(tilemap) => match tilemap.tileset_image(TILESET_COLUMNS).save(&self.tileset_path) {
                Ok(()) => self.state.write().set_status(format!("Saved {}", self.tileset_path)),
                Err(e) => self.fail(format!("Could not save {}: {}", self.tileset_path, e)),
            },
            Err(e) => self.fail(format!("Tileset not generated: {}", e)),
        }
    }

    fn fail(&mut self, message: String) {
        error!("{}", message);
        self.state.write().set_status(message.clone());
        self.error = Some(message);
    }
}
