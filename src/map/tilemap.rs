// src/map/tilemap.rs

use std::collections::HashMap;

use image::{imageops, GenericImage, RgbaImage};
use log::debug;
use rayon::prelude::*;

use super::room::Room;
use crate::error::TilemapError;

/// One room reduced to tile-grid resolution: a row-major matrix of indices
/// into the tileset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileArea {
    pub tiles_across: usize,
    pub tiles_down: usize,
    pub tile_indices: Vec<usize>,
}

impl TileArea {
    pub fn new(tiles_across: usize, tiles_down: usize, tile_indices: Vec<usize>) -> Self {
        Self {
            tiles_across,
            tiles_down,
            tile_indices,
        }
    }

    /// Number of indices the declared dimensions call for.
    pub fn expected_len(&self) -> usize {
        self.tiles_across * self.tiles_down
    }

    /// Rows of indices, top to bottom.
    pub fn rows(&self) -> std::slice::Chunks<'_, usize> {
        self.tile_indices.chunks(self.tiles_across.max(1))
    }
}

/// A de-duplicated tileset plus the tile areas referencing it.
#[derive(Debug, Clone)]
pub struct Tilemap {
    pub tile_width: u32,
    pub tile_height: u32,
    /// Unique tiles in first-seen order.
    pub tiles: Vec<RgbaImage>,
    /// One area per room, in the order the rooms were given.
    pub areas: Vec<TileArea>,
}

impl Tilemap {
    /// Cuts every room into `tile_width x tile_height` tiles and indexes them.
    ///
    /// Rooms are cut in parallel; indices are assigned afterwards in room
    /// order, so the result does not depend on scheduling.
    pub fn extract(image: &RgbaImage, rooms: &[Room], tile_width: u32, tile_height: u32) -> Result<Self, TilemapError> {
        if tile_width == 0 || tile_height == 0 {
            return Err(TilemapError::ZeroTileSize);
        }
        for room in rooms {
            check_room(image, room, tile_width, tile_height)?;
        }

        let cut: Vec<(usize, usize, Vec<RgbaImage>)> = rooms
            .par_iter()
            .map(|room| cut_room(image, room, tile_width, tile_height))
            .collect();

        let mut tiles: Vec<RgbaImage> = Vec::new();
        let mut lookup: HashMap<Vec<u8>, usize> = HashMap::new();
        let mut areas = Vec::with_capacity(cut.len());

        for (tiles_across, tiles_down, room_tiles) in cut {
            let mut tile_indices = Vec::with_capacity(room_tiles.len());
            for tile in room_tiles {
                let index = match lookup.get(tile.as_raw()) {
                    Some(&index) => index,
                    None => {
                        let index = tiles.len();
                        lookup.insert(tile.as_raw().clone(), index);
                        tiles.push(tile);
                        index
                    }
                };
                tile_indices.push(index);
            }
            areas.push(TileArea::new(tiles_across, tiles_down, tile_indices));
        }

        debug!("Extracted {} unique tiles from {} rooms", tiles.len(), areas.len());
        Ok(Self {
            tile_width,
            tile_height,
            tiles,
            areas,
        })
    }

    /// Lays the tileset out as a sheet `columns` tiles wide.
    pub fn tileset_image(&self, columns: u32) -> RgbaImage {
        let columns = columns.max(1);
        let count = self.tiles.len() as u32;
        let rows = (count + columns - 1) / columns;
        let mut sheet = RgbaImage::new(columns.min(count.max(1)) * self.tile_width, rows * self.tile_height);

        for (i, tile) in self.tiles.iter().enumerate() {
            let i = i as u32;
            let x = (i % columns) * self.tile_width;
            let y = (i / columns) * self.tile_height;
            let copied = sheet.copy_from(tile, x, y);
            debug_assert!(copied.is_ok(), "tile {} does not fit the sheet", i);
        }
        sheet
    }
}

fn check_room(image: &RgbaImage, room: &Room, tile_width: u32, tile_height: u32) -> Result<(), TilemapError> {
    let inside = room.x >= 0
        && room.y >= 0
        && room.right() as i64 <= image.width() as i64
        && room.bottom() as i64 <= image.height() as i64;
    if !inside {
        return Err(TilemapError::RoomOutOfBounds { room: *room });
    }
    let aligned = !room.is_empty() && room.width as u32 % tile_width == 0 && room.height as u32 % tile_height == 0;
    if !aligned {
        return Err(TilemapError::UnalignedRoom {
            room: *room,
            tile_width,
            tile_height,
        });
    }
    Ok(())
}

fn cut_room(image: &RgbaImage, room: &Room, tile_width: u32, tile_height: u32) -> (usize, usize, Vec<RgbaImage>) {
    let tiles_across = room.width as u32 / tile_width;
    let tiles_down = room.height as u32 / tile_height;
    let mut tiles = Vec::with_capacity((tiles_across * tiles_down) as usize);

    for ty in 0..tiles_down {
        for tx in 0..tiles_across {
            let x = room.x as u32 + tx * tile_width;
            let y = room.y as u32 + ty * tile_height;
            tiles.push(imageops::crop_imm(image, x, y, tile_width, tile_height).to_image());
        }
    }
    (tiles_across as usize, tiles_down as usize, tiles)
}
