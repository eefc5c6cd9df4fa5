//! # Main Window Module
//!
//! Wires the canvas into an eframe application:
//! - a top menu bar for loading images and bulk room actions,
//! - a left side panel with grid, room and export settings,
//! - the central canvas view,
//! - a bottom status bar for zoom, pointer position and messages.
//!
//! Panels share the canvas as `Arc<RwLock<Canvas>>`. Canvas notifications
//! land in a shared [`UiState`] that the panels read on the next frame.

use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use eframe::egui;
use log::{error, info};
use parking_lot::RwLock;

use crate::config::Config;
use crate::editor::{Canvas, CanvasEvent};
use crate::ui::central_panel::CentralPanel;
use crate::ui::dialog::{DialogManager, DialogResult};
use crate::ui::menu::{MenuAction, MenuBar};
use crate::ui::side_panel::SidePanel;
use crate::ui::status_bar::StatusBar;
use crate::{APPLICATION_NAME, BUILD_VERSION};

/// View-side state fed by canvas notifications.
#[derive(Debug, Default)]
pub struct UiState {
    pub zoom: f64,
    /// Pointer position in image pixels, `None` off the image.
    pub mouse: Option<(i32, i32)>,
    /// Scroll requested by the canvas and not yet applied.
    pub pending_scroll: (f64, f64),
    pub status_message: String,
    /// Path of the last image opened, offered again by the load dialog.
    pub last_image_path: String,
    pub needs_repaint: bool,
}

impl UiState {
    pub fn apply(&mut self, event: &CanvasEvent) {
        match *event {
            CanvasEvent::ZoomChanged(zoom) => self.zoom = zoom,
            CanvasEvent::MouseMoved(mouse) => self.mouse = mouse,
            CanvasEvent::ScrollBars { dx, dy } => {
                self.pending_scroll.0 += dx;
                self.pending_scroll.1 += dy;
            }
            CanvasEvent::ScrollVertical(dy) => self.pending_scroll.1 += dy,
            CanvasEvent::Redraw => {}
        }
        self.needs_repaint = true;
    }

    pub fn take_scroll(&mut self) -> (f64, f64) {
        std::mem::take(&mut self.pending_scroll)
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}

pub struct TilemapApp {
    canvas: Arc<RwLock<Canvas>>,
    state: Arc<RwLock<UiState>>,
    menu: MenuBar,
    side_panel: SidePanel,
    central_panel: CentralPanel,
    status_bar: StatusBar,
    dialogs: DialogManager,
}

impl TilemapApp {
    pub fn new(config: Config, initial_image: Option<PathBuf>) -> Self {
        let export = config.export.clone();
        let canvas = Arc::new(RwLock::new(Canvas::new(config)));
        let state = Arc::new(RwLock::new(UiState {
            zoom: canvas.read().scale(),
            status_message: "Load an image to start.".to_owned(),
            ..UiState::default()
        }));

        let sink = Arc::clone(&state);
        canvas.write().subscribe(move |event| sink.write().apply(event));

        let mut app = Self {
            menu: MenuBar::new(Arc::clone(&canvas)),
            side_panel: SidePanel::new(Arc::clone(&canvas), Arc::clone(&state), export),
            central_panel: CentralPanel::new(Arc::clone(&canvas), Arc::clone(&state)),
            status_bar: StatusBar::new(Arc::clone(&canvas), Arc::clone(&state)),
            dialogs: DialogManager::new(),
            canvas,
            state,
        };
        if let Some(path) = initial_image {
            app.open_image(&path);
        }
        app
    }

    /// Loads a background image, reporting failure in the status bar and a
    /// dialog. The current layout survives a failed load.
    pub fn open_image(&mut self, path: &Path) {
        let result = self.canvas.write().load_image(path);
        let mut state = self.state.write();
        state.last_image_path = path.display().to_string();
        match result {
            Ok(()) => {
                state.set_status(format!("Loaded {}", path.display()));
            }
            Err(e) => {
                error!("{}", e);
                state.set_status("Image not loaded");
                drop(state);
                self.dialogs.show_message("Image not loaded", e.to_string());
            }
        }
    }

    fn handle_menu_action(&mut self, action: MenuAction, frame: &mut eframe::Frame) {
        match action {
            MenuAction::LoadImage => {
                let last = self.state.read().last_image_path.clone();
                self.dialogs.show_load_image(&last);
            }
            MenuAction::Exit => {
                info!("Exit requested");
                frame.close();
            }
        }
    }
}

impl eframe::App for TilemapApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        if let Some(action) = self.menu.update(ctx) {
            self.handle_menu_action(action, frame);
        }
        if let Some(message) = self.side_panel.update(ctx) {
            self.dialogs.show_message("Export", message);
        }
        self.status_bar.update(ctx);
        self.central_panel.update(ctx, !self.dialogs.is_open());

        match self.dialogs.update(ctx) {
            Some(DialogResult::LoadImage(path)) => self.open_image(&path),
            Some(DialogResult::Dismissed) | None => {}
        }

        let repaint = std::mem::take(&mut self.state.write().needs_repaint);
        if repaint {
            ctx.request_repaint();
        }
    }
}

/// Runs the editor as a native egui application.
pub fn run_main_window(config: Config, initial_image: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
    let native_options = eframe::NativeOptions::default();
    let title = format!("{} {}", APPLICATION_NAME, BUILD_VERSION);
    eframe::run_native(
        &title,
        native_options,
        Box::new(move |_cc| Box::new(TilemapApp::new(config, initial_image))),
    );
    // Since run_native returns (), we simply return Ok.
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::PointerButton;
    use crate::utils::Point2D;
    use image::RgbaImage;

    #[test]
    fn test_ui_state_tracks_canvas_events() {
        let state = Arc::new(RwLock::new(UiState::default()));
        let mut canvas = Canvas::default();
        let sink = Arc::clone(&state);
        canvas.subscribe(move |event| sink.write().apply(event));

        canvas.set_image(RgbaImage::new(64, 64));
        canvas.wheel(1.0, true);
        canvas.pointer_moved(Point2D::new(25.0, 50.0));
        canvas.wheel(-1.0, false);
        canvas.pointer_pressed(PointerButton::Middle, Point2D::new(0.0, 0.0));

        let state = state.read();
        assert_eq!(state.zoom, 1.25);
        assert_eq!(state.mouse, Some((20, 40)));
        assert_eq!(state.pending_scroll, (0.0, 20.0));
        assert!(state.needs_repaint);
    }

    #[test]
    fn test_take_scroll_resets() {
        let mut state = UiState::default();
        state.apply(&CanvasEvent::ScrollBars { dx: 3.0, dy: -2.0 });
        state.apply(&CanvasEvent::ScrollVertical(20.0));
        assert_eq!(state.take_scroll(), (3.0, 18.0));
        assert_eq!(state.take_scroll(), (0.0, 0.0));
    }
}
