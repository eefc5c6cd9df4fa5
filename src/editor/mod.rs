// src/editor/mod.rs

pub mod canvas;
pub mod events;
pub mod pan;
pub mod render;

pub use canvas::{Canvas, PointerButton};
pub use events::{CanvasEvent, ListenerId};
pub use render::{Color, Surface};
