// src/map/mod.rs
pub mod link;
pub mod room;
pub mod tilemap;

pub use link::{link_rooms, LinkedRoom, RoomLinkMap};
pub use room::{Room, RoomCollection};
pub use tilemap::{TileArea, Tilemap};
