// src/lib.rs

pub mod config;
pub mod editor;
pub mod error;
pub mod export;
pub mod map;
#[cfg(feature = "gui")]
pub mod ui;
pub mod utils;

/// Name written into generated headers and the window title.
pub const APPLICATION_NAME: &str = "Tilemap Creator";
pub const BUILD_VERSION: &str = env!("CARGO_PKG_VERSION");
