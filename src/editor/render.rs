// src/editor/render.rs

use super::canvas::Canvas;

/// Translucency used for every overlay drawn on top of the image.
pub const OVERLAY_OPACITY: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Black,
    Blue,
    Green,
    Red,
    Yellow,
}

/// Drawing capability the render pass needs. All coordinates are image
/// pixels; the implementation applies the zoom factor.
pub trait Surface {
    /// Draws the loaded image with its top-left corner at the origin.
    fn draw_image(&mut self, width: u32, height: u32);
    /// Draws the pan cursor centred on the given point.
    fn draw_pan_cursor(&mut self, x: f64, y: f64);
    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Color, opacity: f32);
    fn line(&mut self, from: (i32, i32), to: (i32, i32), color: Color);
}

impl Canvas {
    /// Draws the current state. Reads only; safe to call every frame.
    pub fn render(&self, surface: &mut dyn Surface) {
        let Some((width, height)) = self.image_size() else {
            return;
        };

        surface.draw_image(width, height);

        if self.is_panning() {
            let reference = self.pan_reference();
            surface.draw_pan_cursor(reference.x / self.scale(), reference.y / self.scale());
        }

        if self.grid_enabled() {
            self.draw_grid_lines(surface, width as i32, height as i32);
        }

        if self.place_mode() {
            self.draw_placement_marker(surface);
        }

        for room in self.rooms() {
            surface.fill_rect(room.x, room.y, room.width, room.height, Color::Blue, OVERLAY_OPACITY);
        }

        self.draw_room_links(surface);
    }

    fn draw_grid_lines(&self, surface: &mut dyn Surface, width: i32, height: i32) {
        let (gx, gy) = self.grid();
        if gx <= 0 || gy <= 0 {
            return;
        }
        for x in (0..width).step_by(gx as usize) {
            surface.line((x, 0), (x, height), Color::Black);
        }
        for y in (0..height).step_by(gy as usize) {
            surface.line((0, y), (width, y), Color::Black);
        }
    }

    fn draw_placement_marker(&self, surface: &mut dyn Surface) {
        let Some(candidate) = self.placement_candidate() else {
            return;
        };
        let color = if self.rooms().can_place(&candidate) {
            Color::Green
        } else {
            Color::Red
        };
        surface.fill_rect(candidate.x, candidate.y, candidate.width, candidate.height, color, OVERLAY_OPACITY);
    }

    fn draw_room_links(&self, surface: &mut dyn Surface) {
        let markers = &self.config().links;
        let (short, long) = (markers.marker_short, markers.marker_long);

        for (room, linked) in self.links() {
            if linked.up.is_some() {
                surface.fill_rect(
                    room.x + room.width / 2 - short / 2,
                    room.y - long / 2,
                    short,
                    long,
                    Color::Yellow,
                    OVERLAY_OPACITY,
                );
            }
            if linked.left.is_some() {
                surface.fill_rect(
                    room.x - long / 2,
                    room.y + room.height / 2 - short / 2,
                    long,
                    short,
                    Color::Yellow,
                    OVERLAY_OPACITY,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::editor::canvas::PointerButton;
    use crate::utils::Point2D;
    use image::RgbaImage;

    #[derive(Debug, Clone, PartialEq)]
    enum DrawCall {
        Image(u32, u32),
        PanCursor(f64, f64),
        Rect(i32, i32, i32, i32, Color),
        Line((i32, i32), (i32, i32)),
    }

    /// Records draw calls instead of painting.
    #[derive(Debug, Default)]
    struct RecordingSurface {
        calls: Vec<DrawCall>,
    }

    impl RecordingSurface {
        fn rects(&self, color: Color) -> Vec<(i32, i32, i32, i32)> {
            self.calls
                .iter()
                .filter_map(|call| match call {
                    DrawCall::Rect(x, y, w, h, c) if *c == color => Some((*x, *y, *w, *h)),
                    _ => None,
                })
                .collect()
        }

        fn line_count(&self) -> usize {
            self.calls.iter().filter(|c| matches!(c, DrawCall::Line(..))).count()
        }
    }

    impl Surface for RecordingSurface {
        fn draw_image(&mut self, width: u32, height: u32) {
            self.calls.push(DrawCall::Image(width, height));
        }

        fn draw_pan_cursor(&mut self, x: f64, y: f64) {
            self.calls.push(DrawCall::PanCursor(x, y));
        }

        fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Color, _opacity: f32) {
            self.calls.push(DrawCall::Rect(x, y, width, height, color));
        }

        fn line(&mut self, from: (i32, i32), to: (i32, i32), _color: Color) {
            self.calls.push(DrawCall::Line(from, to));
        }
    }

    fn canvas_64() -> Canvas {
        let mut canvas = Canvas::new(Config::default());
        canvas.set_image(RgbaImage::new(64, 64));
        canvas.set_room_size_x(32);
        canvas.set_room_size_y(32);
        canvas.set_snap_to_grid(true);
        canvas
    }

    #[test]
    fn test_nothing_drawn_without_image() {
        let canvas = Canvas::new(Config::default());
        let mut surface = RecordingSurface::default();
        canvas.render(&mut surface);
        assert!(surface.calls.is_empty());
    }

    #[test]
    fn test_image_then_rooms() {
        let mut canvas = canvas_64();
        canvas.place_all_rooms();
        let mut surface = RecordingSurface::default();
        canvas.render(&mut surface);

        assert_eq!(surface.calls[0], DrawCall::Image(64, 64));
        assert_eq!(surface.rects(Color::Blue).len(), 4);
        assert!(surface.rects(Color::Yellow).is_empty());
    }

    #[test]
    fn test_grid_lines_cover_image() {
        let mut canvas = canvas_64();
        canvas.set_grid(true, 16, 32);
        let mut surface = RecordingSurface::default();
        canvas.render(&mut surface);
        // 4 vertical, 2 horizontal.
        assert_eq!(surface.line_count(), 6);
        assert!(surface.calls.contains(&DrawCall::Line((48, 0), (48, 64))));
        assert!(surface.calls.contains(&DrawCall::Line((0, 32), (64, 32))));
    }

    #[test]
    fn test_placement_preview_colour() {
        let mut canvas = canvas_64();
        canvas.set_place_rooms(true);
        canvas.pointer_moved(Point2D::new(5.0, 5.0));

        let mut surface = RecordingSurface::default();
        canvas.render(&mut surface);
        assert_eq!(surface.rects(Color::Green), vec![(0, 0, 32, 32)]);

        canvas.pointer_pressed(PointerButton::Primary, Point2D::new(5.0, 5.0));
        let mut surface = RecordingSurface::default();
        canvas.render(&mut surface);
        assert_eq!(surface.rects(Color::Red), vec![(0, 0, 32, 32)]);
        assert!(surface.rects(Color::Green).is_empty());
    }

    #[test]
    fn test_no_preview_past_image_edge() {
        let mut canvas = canvas_64();
        canvas.set_place_rooms(true);
        canvas.pointer_moved(Point2D::new(50.0, 5.0));
        let mut surface = RecordingSurface::default();
        canvas.render(&mut surface);
        assert!(surface.rects(Color::Green).is_empty());
        assert!(surface.rects(Color::Red).is_empty());
    }

    #[test]
    fn test_link_markers() {
        let mut canvas = canvas_64();
        canvas.set_link_rooms(true);
        canvas.place_all_rooms();
        let mut surface = RecordingSurface::default();
        canvas.render(&mut surface);

        let mut markers = surface.rects(Color::Yellow);
        markers.sort();
        // Up markers of (0,32) and (32,32), left markers of (32,0) and (32,32).
        assert_eq!(
            markers,
            vec![(8, 16, 16, 32), (16, 8, 32, 16), (16, 40, 32, 16), (40, 16, 16, 32)]
        );
    }

    #[test]
    fn test_pan_cursor_drawn_while_panning() {
        let mut canvas = canvas_64();
        canvas.pointer_pressed(PointerButton::Middle, Point2D::new(20.0, 10.0));
        let mut surface = RecordingSurface::default();
        canvas.render(&mut surface);
        assert!(surface.calls.contains(&DrawCall::PanCursor(20.0, 10.0)));

        canvas.pointer_released();
        let mut surface = RecordingSurface::default();
        canvas.render(&mut surface);
        assert!(!surface.calls.iter().any(|c| matches!(c, DrawCall::PanCursor(..))));
    }
}
