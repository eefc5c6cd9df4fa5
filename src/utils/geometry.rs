// src/utils/geometry.rs

/// A point in widget (screen) space, before the zoom factor is undone.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The vector pointing from `origin` to `self`.
    pub fn offset_from(&self, origin: &Point2D) -> Vector2D {
        Vector2D::new(self.x - origin.x, self.y - origin.y)
    }

    /// Maps a widget-space point into image pixels for the given zoom factor.
    /// Truncates toward zero, so points just left of the image still map to 0.
    pub fn to_image(&self, scale: f64) -> (i32, i32) {
        ((self.x / scale) as i32, (self.y / scale) as i32)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2D {
    pub x: f64,
    pub y: f64,
}

impl Vector2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn scaled(&self, factor: f64) -> Vector2D {
        Vector2D::new(self.x * factor, self.y * factor)
    }

    pub fn normalize(&self) -> Vector2D {
        let length = self.length();
        if length == 0.0 {
            return *self;
        }
        Vector2D::new(self.x / length, self.y / length)
    }
}

/// Snaps a pixel coordinate down onto the grid when `snap` is set.
///
/// # Panics
///
/// Panics if snapping is requested with a zero grid dimension. Callers are
/// expected to validate the grid before asking for a snapped position.
pub fn pixel_to_grid_snapped(raw_x: i32, raw_y: i32, grid_x: i32, grid_y: i32, snap: bool) -> (i32, i32) {
    if !snap {
        return (raw_x, raw_y);
    }
    assert!(grid_x != 0 && grid_y != 0, "snapping requires a non-zero grid ({grid_x}x{grid_y})");
    (
        raw_x - raw_x.rem_euclid(grid_x),
        raw_y - raw_y.rem_euclid(grid_y),
    )
}

/// True if the point lies on the image, edges included.
pub fn within_bounds(x: i32, y: i32, image_width: i32, image_height: i32) -> bool {
    x >= 0 && x <= image_width && y >= 0 && y <= image_height
}
