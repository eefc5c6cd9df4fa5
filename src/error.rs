// src/error.rs

use std::path::PathBuf;

use thiserror::Error;

use crate::map::Room;

/// Errors surfaced by the canvas controller.
#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("could not load image `{}`: {source}", .path.display())]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("no image loaded")]
    NoImage,
    #[error(transparent)]
    Tilemap(#[from] TilemapError),
}

/// Errors while cutting rooms into tiles.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TilemapError {
    #[error("tile size must be non-zero")]
    ZeroTileSize,
    #[error("room {room} lies outside the image")]
    RoomOutOfBounds { room: Room },
    #[error("room {room} is not a whole number of {tile_width}x{tile_height} tiles")]
    UnalignedRoom {
        room: Room,
        tile_width: u32,
        tile_height: u32,
    },
}

/// Errors raised by code generation.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("tile area {area} declares {expected} tiles but holds {actual}")]
    TileCountMismatch {
        area: usize,
        expected: usize,
        actual: usize,
    },
    #[error("tile area {area} has a zero dimension")]
    EmptyArea { area: usize },
    #[error("formatting error")]
    Fmt(#[from] std::fmt::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config value for `{field}`: {value}")]
    Invalid { field: &'static str, value: String },
}
