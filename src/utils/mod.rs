// src/utils/mod.rs
pub mod geometry;
pub mod util;

pub use geometry::{pixel_to_grid_snapped, within_bounds, Point2D, Vector2D};
