// src/ui/menu.rs

use std::sync::Arc;
use eframe::egui::{self, Context};
use parking_lot::RwLock;
use crate::editor::Canvas;

/// Menu entries the application window has to handle itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    LoadImage,
    Exit,
}

pub struct MenuBar {
    canvas: Arc<RwLock<Canvas>>,
}

impl MenuBar {
    pub fn new(canvas: Arc<RwLock<Canvas>>) -> Self {
        Self { canvas }
    }

    pub fn update(&mut self, ctx: &Context) -> Option<MenuAction> {
        let mut action = None;

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Load image...").clicked() {
                        action = Some(MenuAction::LoadImage);
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        action = Some(MenuAction::Exit);
                        ui.close_menu();
                    }
                });

                ui.menu_button("Rooms", |ui| {
                    if ui.button("Place all rooms").clicked() {
                        self.canvas.write().place_all_rooms();
                        ui.close_menu();
                    }
                    if ui.button("Clear all rooms").clicked() {
                        self.canvas.write().clear_all_rooms();
                        ui.close_menu();
                    }
                });

                ui.menu_button("View", |ui| {
                    let mut canvas = self.canvas.write();

                    let mut grid = canvas.grid_enabled();
                    if ui.checkbox(&mut grid, "Grid").clicked() {
                        let (gx, gy) = canvas.grid();
                        canvas.set_grid(grid, gx, gy);
                        ui.close_menu();
                    }
                    let mut place = canvas.place_mode();
                    if ui.checkbox(&mut place, "Place rooms").clicked() {
                        canvas.set_place_rooms(place);
                        ui.close_menu();
                    }
                    let mut link = canvas.link_mode();
                    if ui.checkbox(&mut link, "Link rooms").clicked() {
                        canvas.set_link_rooms(link);
                        ui.close_menu();
                    }
                });
            });
        });

        action
    }
}
