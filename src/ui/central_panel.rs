//! Central panel UI module: shows the image canvas, keeps the scroll offset,
//! uploads the background texture and forwards pointer and wheel input to the
//! canvas controller.

use std::sync::Arc;
use std::time::Instant;

use eframe::egui::{
    self, Color32, ColorImage, Context, Painter, Pos2, Rect, Stroke, TextureHandle, TextureId, TextureOptions, Vec2,
};
use log::debug;
use parking_lot::RwLock;

use crate::editor::{Canvas, Color, PointerButton, Surface};
use crate::ui::main_window::UiState;
use crate::utils::util::clamp_scroll;
use crate::utils::Point2D;

/// Radius of the pan cursor, in screen pixels.
const PAN_CURSOR_RADIUS: f32 = 8.0;

/// The `CentralPanel` struct provides the scrollable viewport onto the canvas.
/// Scrolling lives here; zoom and everything else lives in the canvas.
pub struct CentralPanel {
    canvas: Arc<RwLock<Canvas>>,
    state: Arc<RwLock<UiState>>,

    /// Scroll offset of the viewport in widget pixels.
    scroll: Vec2,

    texture: Option<TextureHandle>,
    texture_generation: u64,

    pointer_inside: bool,
}

/// Input gathered from one frame, copied out so no egui lock is held while
/// the canvas runs its listeners.
#[derive(Default)]
struct FrameInput {
    hover: Option<Pos2>,
    presses: Vec<(PointerButton, Pos2)>,
    released: bool,
    zoom_delta: f32,
    scroll_y: f32,
}

impl CentralPanel {
    pub fn new(canvas: Arc<RwLock<Canvas>>, state: Arc<RwLock<UiState>>) -> Self {
        Self {
            canvas,
            state,
            scroll: Vec2::ZERO,
            texture: None,
            texture_generation: 0,
            pointer_inside: false,
        }
    }

    /// Called each frame. Input is ignored while `accept_input` is false, e.g.
    /// when a modal dialog is open.
    pub fn update(&mut self, ctx: &Context, accept_input: bool) {
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(Color32::from_gray(40)))
            .show(ctx, |ui| {
                let viewport = ui.available_rect_before_wrap();
                self.sync_texture(ctx);

                if accept_input {
                    let input = Self::read_input(ui);
                    self.forward_input(&input, viewport);
                }

                self.canvas.write().tick(Instant::now());
                self.apply_scroll(viewport);

                let painter = ui.painter_at(viewport);
                let canvas = self.canvas.read();
                let mut surface = EguiSurface {
                    painter: &painter,
                    origin: viewport.min - self.scroll,
                    scale: canvas.scale() as f32,
                    texture: self.texture.as_ref().map(|t| t.id()),
                };
                canvas.render(&mut surface);

                if canvas.is_pan_timer_running() {
                    ctx.request_repaint();
                }
            });
    }

    /// Re-uploads the background whenever the canvas reports a new image.
    fn sync_texture(&mut self, ctx: &Context) {
        let canvas = self.canvas.read();
        let generation = canvas.image_generation();
        if self.texture.is_some() && generation == self.texture_generation {
            return;
        }
        let Some(image) = canvas.image() else {
            self.texture = None;
            return;
        };
        let size = [image.width() as usize, image.height() as usize];
        let color_image = ColorImage::from_rgba_unmultiplied(size, image.as_raw());
        self.texture = Some(ctx.load_texture("background", color_image, TextureOptions::NEAREST));
        self.texture_generation = generation;
        debug!("Uploaded background texture {}x{}", size[0], size[1]);
    }

    fn read_input(ui: &egui::Ui) -> FrameInput {
        let input = ui.input();
        let mut frame = FrameInput {
            hover: input.pointer.hover_pos(),
            released: input.pointer.any_released(),
            zoom_delta: input.zoom_delta(),
            scroll_y: input.scroll_delta.y,
            ..FrameInput::default()
        };
        for event in &input.events {
            if let egui::Event::PointerButton { pos, button, pressed: true, .. } = event {
                let button = match button {
                    egui::PointerButton::Primary => PointerButton::Primary,
                    egui::PointerButton::Secondary => PointerButton::Secondary,
                    egui::PointerButton::Middle => PointerButton::Middle,
                    _ => continue,
                };
                frame.presses.push((button, *pos));
            }
        }
        frame
    }

    fn forward_input(&mut self, input: &FrameInput, viewport: Rect) {
        // Canvas coordinates are widget pixels with the image at the origin.
        let origin = viewport.min - self.scroll;
        let to_canvas = |pos: Pos2| Point2D::new((pos.x - origin.x) as f64, (pos.y - origin.y) as f64);

        let mut canvas = self.canvas.write();
        let hovered = input.hover.filter(|pos| viewport.contains(*pos));

        match hovered {
            Some(pos) => {
                self.pointer_inside = true;
                canvas.pointer_moved(to_canvas(pos));
            }
            None if self.pointer_inside && !canvas.is_panning() => {
                self.pointer_inside = false;
                canvas.pointer_left();
            }
            None => {
                // A held pan keeps tracking outside the viewport.
                if let Some(pos) = input.hover.filter(|_| canvas.is_panning()) {
                    canvas.pointer_moved(to_canvas(pos));
                }
            }
        }

        for &(button, pos) in &input.presses {
            if viewport.contains(pos) {
                canvas.pointer_pressed(button, to_canvas(pos));
            }
        }
        if input.released {
            canvas.pointer_released();
        }

        if hovered.is_some() {
            if input.zoom_delta != 1.0 {
                canvas.wheel(if input.zoom_delta > 1.0 { 1.0 } else { -1.0 }, true);
            } else if input.scroll_y != 0.0 {
                canvas.wheel(input.scroll_y as f64, false);
            }
        }
    }

    /// Applies scroll requested by the canvas, clamped to the scrollable
    /// range, and tells the canvas how far the view actually moved.
    fn apply_scroll(&mut self, viewport: Rect) {
        let (dx, dy) = self.state.write().take_scroll();
        let mut canvas = self.canvas.write();
        let (content_w, content_h) = canvas.min_size();

        let old = self.scroll;
        self.scroll.x = clamp_scroll(old.x as f64 + dx, content_w, viewport.width() as f64) as f32;
        self.scroll.y = clamp_scroll(old.y as f64 + dy, content_h, viewport.height() as f64) as f32;

        let moved = self.scroll - old;
        if moved != Vec2::ZERO {
            canvas.move_reference(moved.x as f64, moved.y as f64);
        }
    }
}

/// Paints the render pass with egui, scaling image pixels to the screen.
struct EguiSurface<'a> {
    painter: &'a Painter,
    origin: Pos2,
    scale: f32,
    texture: Option<TextureId>,
}

impl EguiSurface<'_> {
    fn to_screen(&self, x: f32, y: f32) -> Pos2 {
        Pos2::new(self.origin.x + x * self.scale, self.origin.y + y * self.scale)
    }
}

fn color32(color: Color) -> Color32 {
    match color {
        Color::Black => Color32::BLACK,
        Color::Blue => Color32::BLUE,
        Color::Green => Color32::GREEN,
        Color::Red => Color32::RED,
        Color::Yellow => Color32::YELLOW,
    }
}

impl Surface for EguiSurface<'_> {
    fn draw_image(&mut self, width: u32, height: u32) {
        let rect = Rect::from_min_max(self.origin, self.to_screen(width as f32, height as f32));
        match self.texture {
            Some(texture) => {
                let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
                self.painter.image(texture, rect, uv, Color32::WHITE);
            }
            None => {
                self.painter.rect_filled(rect, 0.0, Color32::WHITE);
            }
        }
    }

    fn draw_pan_cursor(&mut self, x: f64, y: f64) {
        let center = self.to_screen(x as f32, y as f32);
        let color = Color32::WHITE.linear_multiply(0.5);
        self.painter.circle_stroke(center, PAN_CURSOR_RADIUS, Stroke::new(2.0, color));
        self.painter.circle_filled(center, 2.0, color);
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Color, opacity: f32) {
        let min = self.to_screen(x as f32, y as f32);
        let max = self.to_screen((x + width) as f32, (y + height) as f32);
        self.painter
            .rect_filled(Rect::from_min_max(min, max), 0.0, color32(color).linear_multiply(opacity));
    }

    fn line(&mut self, from: (i32, i32), to: (i32, i32), color: Color) {
        let a = self.to_screen(from.0 as f32, from.1 as f32);
        let b = self.to_screen(to.0 as f32, to.1 as f32);
        self.painter.line_segment([a, b], Stroke::new(1.0, color32(color)));
    }
}
