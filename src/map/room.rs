// src/map/room.rs

use std::fmt;

/// A placed room: an axis-aligned rectangle in image pixels.
///
/// Rooms follow the half-open convention: a room at `(0, 0)` with size
/// `32x32` covers pixels `0..32` on both axes, so two rooms sharing an edge
/// touch without intersecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Room {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Room {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// True if the pixel `(px, py)` lies inside the room.
    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// Open-interior overlap test. Edge-touching rooms do not intersect.
    pub fn intersects(&self, other: &Room) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// True if the horizontal spans of both rooms share at least one pixel.
    pub fn overlaps_horizontally(&self, other: &Room) -> bool {
        self.x < other.right() && other.x < self.right()
    }

    /// True if the vertical spans of both rooms share at least one pixel.
    pub fn overlaps_vertically(&self, other: &Room) -> bool {
        self.y < other.bottom() && other.y < self.bottom()
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} at ({}, {})", self.width, self.height, self.x, self.y)
    }
}

/// The rooms placed on a canvas, kept in placement order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomCollection {
    rooms: Vec<Room>,
}

impl RoomCollection {
    pub fn new() -> Self {
        Self { rooms: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Room> {
        self.rooms.iter()
    }

    pub fn as_slice(&self) -> &[Room] {
        &self.rooms
    }

    /// True if `candidate` would not intersect any placed room.
    pub fn can_place(&self, candidate: &Room) -> bool {
        !self.rooms.iter().any(|room| room.intersects(candidate))
    }

    /// Appends a room. Callers check [`RoomCollection::can_place`] first;
    /// this does not re-validate.
    pub fn place(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.rooms.push(Room::new(x, y, width, height));
    }

    /// Removes the first room, in placement order, containing the point.
    pub fn remove_at(&mut self, px: i32, py: i32) -> Option<Room> {
        let index = self.rooms.iter().position(|room| room.contains(px, py))?;
        Some(self.rooms.remove(index))
    }

    pub fn clear(&mut self) {
        self.rooms.clear();
    }

    /// Tiles the image with rooms of the given size, row by row, skipping
    /// any cell that collides with a room already placed. Partial cells on
    /// the right and bottom edges are left empty.
    ///
    /// Returns the number of rooms added.
    ///
    /// # Panics
    ///
    /// Panics on a zero room dimension.
    pub fn auto_fill_grid(&mut self, image_width: i32, image_height: i32, room_width: i32, room_height: i32) -> usize {
        assert!(
            room_width != 0 && room_height != 0,
            "auto fill requires a non-zero room size ({room_width}x{room_height})"
        );

        let rooms_across = image_width / room_width;
        let rooms_down = image_height / room_height;
        let before = self.rooms.len();

        for ry in 0..rooms_down {
            for rx in 0..rooms_across {
                let cell = Room::new(rx * room_width, ry * room_height, room_width, room_height);
                if self.can_place(&cell) {
                    self.rooms.push(cell);
                }
            }
        }
        self.rooms.len() - before
    }

    /// Rooms sorted top-to-bottom, then left-to-right.
    pub fn rooms_sorted_row_major(&self) -> Vec<Room> {
        let mut sorted = self.rooms.clone();
        sorted.sort_by_key(|room| (room.y, room.x));
        sorted
    }
}

impl<'a> IntoIterator for &'a RoomCollection {
    type Item = &'a Room;
    type IntoIter = std::slice::Iter<'a, Room>;

    fn into_iter(self) -> Self::IntoIter {
        self.rooms.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_no_overlaps(rooms: &RoomCollection) {
        for (i, a) in rooms.iter().enumerate() {
            for b in rooms.iter().skip(i + 1) {
                assert!(!a.intersects(b), "{a} overlaps {b}");
            }
        }
    }

    #[test]
    fn test_touching_rooms_do_not_intersect() {
        let a = Room::new(0, 0, 32, 32);
        assert!(!a.intersects(&Room::new(32, 0, 32, 32)));
        assert!(!a.intersects(&Room::new(0, 32, 32, 32)));
        assert!(a.intersects(&Room::new(31, 31, 32, 32)));
    }

    #[test]
    fn test_contains_is_half_open() {
        let room = Room::new(10, 10, 20, 20);
        assert!(room.contains(10, 10));
        assert!(room.contains(29, 29));
        assert!(!room.contains(30, 15));
        assert!(!room.contains(15, 30));
    }

    #[test]
    fn test_can_place() {
        let mut rooms = RoomCollection::new();
        rooms.place(0, 0, 32, 32);
        assert!(!rooms.can_place(&Room::new(16, 16, 32, 32)));
        assert!(rooms.can_place(&Room::new(32, 0, 32, 32)));
    }

    #[test]
    fn test_remove_at_removes_only_the_hit_room() {
        let mut rooms = RoomCollection::new();
        rooms.place(0, 0, 32, 32);
        rooms.place(32, 0, 32, 32);
        rooms.place(0, 32, 32, 32);

        assert_eq!(rooms.remove_at(40, 5), Some(Room::new(32, 0, 32, 32)));
        assert_eq!(rooms.as_slice(), &[Room::new(0, 0, 32, 32), Room::new(0, 32, 32, 32)]);
    }

    #[test]
    fn test_remove_at_miss_is_noop() {
        let mut rooms = RoomCollection::new();
        rooms.place(0, 0, 32, 32);
        let before = rooms.clone();
        assert_eq!(rooms.remove_at(100, 100), None);
        assert_eq!(rooms, before);
    }

    #[test]
    fn test_auto_fill_empty() {
        let mut rooms = RoomCollection::new();
        let added = rooms.auto_fill_grid(100, 70, 32, 32);

        // floor(100/32) x floor(70/32)
        assert_eq!(added, 6);
        assert_eq!(rooms.len(), 6);
        let expected: Vec<Room> = [(0, 0), (32, 0), (64, 0), (0, 32), (32, 32), (64, 32)]
            .iter()
            .map(|&(x, y)| Room::new(x, y, 32, 32))
            .collect();
        assert_eq!(rooms.as_slice(), expected.as_slice());
        assert_no_overlaps(&rooms);
    }

    #[test]
    fn test_auto_fill_skips_manual_placements() {
        let mut rooms = RoomCollection::new();
        // Off-grid manual room blocks two cells.
        rooms.place(16, 0, 32, 32);
        let added = rooms.auto_fill_grid(64, 64, 32, 32);

        assert_eq!(added, 2);
        assert_eq!(rooms.len(), 3);
        assert_no_overlaps(&rooms);
    }

    #[test]
    fn test_auto_fill_twice_adds_nothing() {
        let mut rooms = RoomCollection::new();
        rooms.auto_fill_grid(64, 64, 32, 32);
        assert_eq!(rooms.auto_fill_grid(64, 64, 32, 32), 0);
        assert_eq!(rooms.len(), 4);
    }

    #[test]
    #[should_panic]
    fn test_auto_fill_zero_size_panics() {
        RoomCollection::new().auto_fill_grid(64, 64, 0, 32);
    }

    #[test]
    fn test_sorted_row_major() {
        let mut rooms = RoomCollection::new();
        rooms.place(32, 32, 32, 32);
        rooms.place(32, 0, 32, 32);
        rooms.place(0, 32, 32, 32);
        rooms.place(0, 0, 32, 32);
        let sorted: Vec<(i32, i32)> = rooms.rooms_sorted_row_major().iter().map(|r| (r.x, r.y)).collect();
        assert_eq!(sorted, vec![(0, 0), (32, 0), (0, 32), (32, 32)]);
    }
}
