// src/map/link.rs

use std::collections::HashMap;

use super::room::Room;

/// The neighbours of a room that share its top or left edge.
///
/// Only two directions are tracked. The room below or to the right of
/// another records the same adjacency as its own `up`/`left`, so each shared
/// edge appears exactly once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkedRoom {
    pub up: Option<Room>,
    pub left: Option<Room>,
}

impl LinkedRoom {
    pub fn is_linked(&self) -> bool {
        self.up.is_some() || self.left.is_some()
    }
}

/// One entry per room, keyed by the room itself.
pub type RoomLinkMap = HashMap<Room, LinkedRoom>;

/// Finds, for every room, the first room touching its top edge and the first
/// room touching its left edge.
///
/// `offset` is the tolerance in pixels between the two edges; `0` requires
/// the edges to meet exactly. Spans must still overlap on the other axis, so
/// rooms that only meet at a corner are not linked.
pub fn link_rooms(rooms: &[Room], offset: i32) -> RoomLinkMap {
    rooms
        .iter()
        .map(|room| {
            let up = rooms
                .iter()
                .find(|other| {
                    *other != room && (other.bottom() - room.y).abs() <= offset && other.overlaps_horizontally(room)
                })
                .copied();
            let left = rooms
                .iter()
                .find(|other| {
                    *other != room && (other.right() - room.x).abs() <= offset && other.overlaps_vertically(room)
                })
                .copied();
            (*room, LinkedRoom { up, left })
        })
        .collect()
}
