// src/ui/dialog.rs

use std::path::PathBuf;

use eframe::egui::{self, Context};

/// The dialogs the shell can show. Only one is open at a time.
#[derive(Debug, PartialEq, Eq)]
pub enum Dialog {
    /// Asks for the path of a background image.
    LoadImage { path: String },
    /// Reports an error or notice.
    Message { title: String, text: String },
}

/// The possible outcomes when a dialog is closed.
#[derive(Debug, PartialEq, Eq)]
pub enum DialogResult {
    LoadImage(PathBuf),
    Dismissed,
}

/// Manages the currently active dialog (if any).
#[derive(Default)]
pub struct DialogManager {
    active_dialog: Option<Dialog>,
}

impl DialogManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.active_dialog.is_some()
    }

    pub fn show_dialog(&mut self, dialog: Dialog) {
        self.active_dialog = Some(dialog);
    }

    pub fn show_load_image(&mut self, last_path: &str) {
        self.show_dialog(Dialog::LoadImage {
            path: last_path.to_owned(),
        });
    }

    pub fn show_message(&mut self, title: impl Into<String>, text: impl Into<String>) {
        self.show_dialog(Dialog::Message {
            title: title.into(),
            text: text.into(),
        });
    }

    /// Call this method on every UI frame to render the active dialog (if any).
    /// When the user responds, the method returns `Some(DialogResult)` and clears the active dialog.
    pub fn update(&mut self, ctx: &Context) -> Option<DialogResult> {
        let mut result = None;

        match self.active_dialog.as_mut()? {
            Dialog::LoadImage { path } => {
                centered_window("Load image").show(ctx, |ui| {
                    ui.label("Image path:");
                    let edit = ui.text_edit_singleline(path);
                    let submitted = edit.lost_focus() && ui.input().key_pressed(egui::Key::Enter);
                    ui.horizontal(|ui| {
                        if ui.button("Load").clicked() || submitted {
                            result = Some(DialogResult::LoadImage(PathBuf::from(path.trim())));
                        }
                        if ui.button("Cancel").clicked() {
                            result = Some(DialogResult::Dismissed);
                        }
                    });
                });
            }
            Dialog::Message { title, text } => {
                centered_window(title.as_str()).show(ctx, |ui| {
                    ui.label(text.as_str());
                    if ui.button("OK").clicked() {
                        result = Some(DialogResult::Dismissed);
                    }
                });
            }
        }

        if result.is_some() {
            self.active_dialog = None;
        }
        result
    }
}

fn centered_window(title: &str) -> egui::Window<'static> {
    egui::Window::new(title.to_owned())
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
}
