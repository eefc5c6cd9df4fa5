// src/export/mod.rs
//! Code generation from the finished room/tile layout.

mod cpp;

pub use cpp::CppCodeGenerator;

use std::fmt;
use std::fs;
use std::path::Path;

use log::info;

use crate::error::ExportError;
use crate::map::{RoomLinkMap, TileArea};

/// A target language for the generated tilemap declaration.
pub trait CodeGenerator {
    /// Writes the header and the room/tile matrix. Every area is validated
    /// before the first byte is written.
    fn generate_rooms(&self, out: &mut dyn fmt::Write, areas: &[TileArea]) -> Result<(), ExportError>;

    /// Writes the up/left neighbours of every room.
    fn generate_room_links(&self, out: &mut dyn fmt::Write, links: &RoomLinkMap) -> Result<(), ExportError>;

    fn generate(&self, areas: &[TileArea]) -> Result<String, ExportError> {
        let mut out = String::new();
        self.generate_rooms(&mut out, areas)?;
        Ok(out)
    }
}

/// Checks that every area holds exactly `tiles_across * tiles_down`
/// indices and has no zero dimension.
pub fn validate_areas(areas: &[TileArea]) -> Result<(), ExportError> {
    for (area, tile_area) in areas.iter().enumerate() {
        if tile_area.tiles_across == 0 || tile_area.tiles_down == 0 {
            return Err(ExportError::EmptyArea { area });
        }
        let expected = tile_area.expected_len();
        let actual = tile_area.tile_indices.len();
        if expected != actual {
            return Err(ExportError::TileCountMismatch { area, expected, actual });
        }
    }
    Ok(())
}

/// Saves generated text to `path`.
pub fn write_to_file(path: impl AsRef<Path>, text: &str) -> Result<(), ExportError> {
    let path = path.as_ref();
    fs::write(path, text)?;
    info!("Wrote {} bytes to {:?}", text.len(), path);
    Ok(())
}
