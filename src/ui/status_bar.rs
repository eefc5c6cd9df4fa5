// src/ui/status_bar.rs

use std::sync::Arc;
use eframe::egui::{self, Context};
use parking_lot::RwLock;
use crate::editor::Canvas;
use crate::ui::main_window::UiState;

pub struct StatusBar {
    canvas: Arc<RwLock<Canvas>>,
    state: Arc<RwLock<UiState>>,
}

impl StatusBar {
    pub fn new(canvas: Arc<RwLock<Canvas>>, state: Arc<RwLock<UiState>>) -> Self {
        Self { canvas, state }
    }

    pub fn update(&mut self, ctx: &Context) {
        // Copy out what we need; keep the locks short.
        let (dimensions, rooms) = {
            let canvas = self.canvas.read();
            (canvas.image_size(), canvas.rooms().len())
        };
        let (message, zoom, mouse) = {
            let state = self.state.read();
            (state.status_message.clone(), state.zoom, state.mouse)
        };

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(message);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("Zoom: {:.0}%", zoom * 100.0));
                    ui.separator();
                    ui.label(match mouse {
                        Some((x, y)) => format!("({}, {})", x, y),
                        None => "(-, -)".to_owned(),
                    });
                    ui.separator();
                    ui.label(format!("Rooms: {}", rooms));
                    if let Some((w, h)) = dimensions {
                        ui.separator();
                        ui.label(format!("{} x {}", w, h));
                    }
                });
            });
        });
    }
}
