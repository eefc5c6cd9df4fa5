//! The canvas controller: owns the background image, the placed rooms, the
//! derived link map and all view state, and turns pointer and wheel input
//! into changes to them.
//!
//! Invalid interactive input (a click off the image, onto an occupied cell,
//! a removal where nothing is placed) is ignored rather than reported; it is
//! the normal result of moving the pointer around. Only image loading and
//! tile extraction return errors.

use std::path::Path;
use std::time::{Duration, Instant};

use image::RgbaImage;
use log::{debug, info, warn};

use super::events::{CanvasEvent, EventBus, ListenerId};
use super::pan::PanGesture;
use crate::config::Config;
use crate::error::CanvasError;
use crate::map::{link_rooms, Room, RoomCollection, RoomLinkMap, Tilemap};
use crate::utils::{pixel_to_grid_snapped, within_bounds, Point2D};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Places a room.
    Primary,
    /// Removes the room under the pointer.
    Secondary,
    /// Starts an autoscroll pan.
    Middle,
}

pub struct Canvas {
    config: Config,
    image: Option<RgbaImage>,
    /// Bumped on every image change so views can refresh cached textures.
    image_generation: u64,

    rooms: RoomCollection,
    /// Derived from `rooms`; empty while link mode is off.
    links: RoomLinkMap,

    scale: f64,
    pan: PanGesture,
    /// Last pointer position in widget pixels.
    pointer: Option<Point2D>,

    grid_enabled: bool,
    grid_x: i32,
    grid_y: i32,
    snap_to_grid: bool,
    place_mode: bool,
    link_mode: bool,
    room_width: i32,
    room_height: i32,

    events: EventBus,
}

impl Canvas {
    pub fn new(config: Config) -> Self {
        let settings = &config.canvas;
        Self {
            image: None,
            image_generation: 0,
            rooms: RoomCollection::new(),
            links: RoomLinkMap::new(),
            scale: settings.default_scale,
            pan: PanGesture::new(Duration::from_millis(settings.pan_interval_ms)),
            pointer: None,
            grid_enabled: false,
            grid_x: settings.grid_x,
            grid_y: settings.grid_y,
            snap_to_grid: false,
            place_mode: false,
            link_mode: false,
            room_width: settings.room_width,
            room_height: settings.room_height,
            events: EventBus::new(),
            config,
        }
    }

    /// Registers a listener for state-change notifications.
    pub fn subscribe(&mut self, listener: impl FnMut(&CanvasEvent) + Send + Sync + 'static) -> ListenerId {
        self.events.subscribe(listener)
    }

    // ============================================================
    // Image
    // ============================================================

    /// Decodes the image at `path` and starts a fresh layout on it. On
    /// failure nothing changes.
    pub fn load_image(&mut self, path: impl AsRef<Path>) -> Result<(), CanvasError> {
        let path = path.as_ref();
        let image = image::open(path)
            .map_err(|source| CanvasError::ImageLoad {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgba8();
        info!("Loaded image {:?} ({}x{})", path, image.width(), image.height());
        self.set_image(image);
        Ok(())
    }

    /// Replaces the image, dropping all rooms and resetting the zoom.
    pub fn set_image(&mut self, image: RgbaImage) {
        self.image = Some(image);
        self.image_generation += 1;
        self.rooms.clear();
        self.links.clear();
        self.scale = self.config.canvas.default_scale;
        self.pan.end();
        self.events.emit(CanvasEvent::ZoomChanged(self.scale));
        self.events.emit(CanvasEvent::Redraw);
    }

    pub fn image(&self) -> Option<&RgbaImage> {
        self.image.as_ref()
    }

    pub fn image_generation(&self) -> u64 {
        self.image_generation
    }

    pub fn image_size(&self) -> Option<(u32, u32)> {
        self.image.as_ref().map(|image| image.dimensions())
    }

    /// Smallest widget size that shows the whole image at the current zoom.
    pub fn min_size(&self) -> (f64, f64) {
        match self.image_size() {
            Some((w, h)) => (w as f64 * self.scale, h as f64 * self.scale),
            None => (0.0, 0.0),
        }
    }

    fn within_image(&self, x: i32, y: i32) -> bool {
        match self.image_size() {
            Some((w, h)) => within_bounds(x, y, w as i32, h as i32),
            None => false,
        }
    }

    // ============================================================
    // Accessors
    // ============================================================

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn rooms(&self) -> &RoomCollection {
        &self.rooms
    }

    pub fn links(&self) -> &RoomLinkMap {
        &self.links
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn grid(&self) -> (i32, i32) {
        (self.grid_x, self.grid_y)
    }

    pub fn grid_enabled(&self) -> bool {
        self.grid_enabled
    }

    pub fn snap_to_grid(&self) -> bool {
        self.snap_to_grid
    }

    pub fn room_size(&self) -> (i32, i32) {
        (self.room_width, self.room_height)
    }

    pub fn place_mode(&self) -> bool {
        self.place_mode
    }

    pub fn link_mode(&self) -> bool {
        self.link_mode
    }

    pub fn is_panning(&self) -> bool {
        self.pan.is_held()
    }

    pub fn is_pan_timer_running(&self) -> bool {
        self.pan.is_timer_running()
    }

    pub fn pan_reference(&self) -> Point2D {
        self.pan.reference()
    }

    // ============================================================
    // Settings
    // ============================================================

    pub fn set_place_rooms(&mut self, enabled: bool) {
        self.place_mode = enabled;
        self.events.emit(CanvasEvent::Redraw);
    }

    pub fn set_link_rooms(&mut self, enabled: bool) {
        self.link_mode = enabled;
        self.recalculate_room_links();
    }

    pub fn set_grid(&mut self, enabled: bool, gx: i32, gy: i32) {
        self.grid_enabled = enabled;
        self.grid_x = gx;
        self.grid_y = gy;
        self.events.emit(CanvasEvent::Redraw);
    }

    pub fn set_grid_x(&mut self, gx: i32) {
        self.grid_x = gx;
        self.events.emit(CanvasEvent::Redraw);
    }

    pub fn set_grid_y(&mut self, gy: i32) {
        self.grid_y = gy;
        self.events.emit(CanvasEvent::Redraw);
    }

    pub fn set_room_size_x(&mut self, width: i32) {
        self.room_width = width;
        self.events.emit(CanvasEvent::Redraw);
    }

    pub fn set_room_size_y(&mut self, height: i32) {
        self.room_height = height;
        self.events.emit(CanvasEvent::Redraw);
    }

    pub fn set_snap_to_grid(&mut self, enabled: bool) {
        self.snap_to_grid = enabled;
        self.events.emit(CanvasEvent::Redraw);
    }

    // ============================================================
    // Placement
    // ============================================================

    /// The pointer in image pixels, snapped when snapping is on. `None` if
    /// there is no pointer or the grid cannot be snapped to.
    pub fn snapped_pointer(&self) -> Option<(i32, i32)> {
        let (px, py) = self.pointer?.to_image(self.scale);
        if self.snap_to_grid && (self.grid_x <= 0 || self.grid_y <= 0) {
            return None;
        }
        Some(pixel_to_grid_snapped(px, py, self.grid_x, self.grid_y, self.snap_to_grid))
    }

    /// The room a primary click would place, if it fits on the image. It may
    /// still collide with an existing room.
    pub fn placement_candidate(&self) -> Option<Room> {
        if self.room_width <= 0 || self.room_height <= 0 {
            return None;
        }
        let (x, y) = self.snapped_pointer()?;
        let right = x.checked_add(self.room_width)?;
        let bottom = y.checked_add(self.room_height)?;
        let fits = self.within_image(x, y) && self.within_image(right, bottom);
        fits.then(|| Room::new(x, y, self.room_width, self.room_height))
    }

    fn try_place_room(&mut self) {
        let Some(candidate) = self.placement_candidate() else {
            debug!("Ignoring placement: no valid position under the pointer");
            return;
        };
        if !self.rooms.can_place(&candidate) {
            debug!("Ignoring placement: {} collides", candidate);
            return;
        }
        debug!("Placing room {}", candidate);
        self.rooms.place(candidate.x, candidate.y, candidate.width, candidate.height);
        self.recalculate_room_links();
    }

    fn remove_room_under_pointer(&mut self) {
        let Some((x, y)) = self.snapped_pointer() else {
            return;
        };
        match self.rooms.remove_at(x, y) {
            Some(room) => debug!("Removing room {}", room),
            None => debug!("No room at ({}, {})", x, y),
        }
        self.recalculate_room_links();
    }

    /// Fills every free grid cell of the image with a room.
    pub fn place_all_rooms(&mut self) {
        let Some((w, h)) = self.image_size() else {
            return;
        };
        if self.room_width <= 0 || self.room_height <= 0 {
            warn!("Cannot place rooms of size {}x{}", self.room_width, self.room_height);
            return;
        }
        let added = self
            .rooms
            .auto_fill_grid(w as i32, h as i32, self.room_width, self.room_height);
        info!("Placed {} rooms ({} total)", added, self.rooms.len());
        self.recalculate_room_links();
    }

    pub fn clear_all_rooms(&mut self) {
        info!("Clearing {} rooms", self.rooms.len());
        self.rooms.clear();
        self.recalculate_room_links();
    }

    fn recalculate_room_links(&mut self) {
        if self.link_mode {
            self.links = link_rooms(self.rooms.as_slice(), self.config.canvas.link_offset);
        } else {
            self.links.clear();
        }
        self.events.emit(CanvasEvent::Redraw);
    }

    // ============================================================
    // Input
    // ============================================================

    pub fn pointer_pressed(&mut self, button: PointerButton, pos: Point2D) {
        if self.image.is_none() {
            return;
        }
        self.pointer = Some(pos);
        match button {
            PointerButton::Primary => {
                if self.place_mode {
                    self.try_place_room();
                }
            }
            PointerButton::Secondary => {
                if self.place_mode {
                    self.remove_room_under_pointer();
                }
            }
            PointerButton::Middle => self.begin_pan(pos, Instant::now()),
        }
    }

    /// Starts a middle-button pan anchored at `reference`.
    pub fn begin_pan(&mut self, reference: Point2D, now: Instant) {
        if self.image.is_none() {
            return;
        }
        self.pan.begin(reference, now);
        self.events.emit(CanvasEvent::Redraw);
    }

    /// Pointer motion in widget pixels. Repeating the last position is a
    /// no-op, so hosts may forward the hover position every frame.
    pub fn pointer_moved(&mut self, pos: Point2D) {
        if self.image.is_none() || self.pointer == Some(pos) {
            return;
        }
        self.pointer = Some(pos);
        self.pan.track(pos);
        if !self.pan.is_held() {
            self.publish_pointer();
        }
    }

    pub fn pointer_released(&mut self) {
        if self.pan.is_held() {
            self.pan.end();
            self.events.emit(CanvasEvent::Redraw);
        }
    }

    pub fn pointer_left(&mut self) {
        self.pointer = None;
        self.events.emit(CanvasEvent::MouseMoved(None));
    }

    /// Wheel input. With the zoom modifier held the canvas zooms, otherwise it
    /// asks for a vertical scroll.
    pub fn wheel(&mut self, delta: f64, zoom_modifier: bool) {
        if self.image.is_none() {
            return;
        }
        if zoom_modifier {
            self.zoom(delta);
        } else {
            let increment = self.config.canvas.scroll_increment;
            let dy = if delta > 0.0 { -increment } else { increment };
            self.events.emit(CanvasEvent::ScrollVertical(dy));
            self.publish_pointer();
        }
    }

    fn zoom(&mut self, delta: f64) {
        let step = self.config.canvas.zoom_step;
        if delta > 0.0 {
            self.scale += step;
        } else {
            self.scale = step.max(self.scale - step);
        }
        self.publish_pointer();
        self.events.emit(CanvasEvent::ZoomChanged(self.scale));
        self.events.emit(CanvasEvent::Redraw);
    }

    /// Drives the pan timer; call once per frame.
    pub fn tick(&mut self, now: Instant) {
        let max_speed = self.config.canvas.max_pan_speed;
        for step in self.pan.tick(now, max_speed) {
            self.events.emit(CanvasEvent::ScrollBars { dx: step.x, dy: step.y });
        }
    }

    /// The view scrolled by `(dx, dy)` widget pixels.
    pub fn move_reference(&mut self, dx: f64, dy: f64) {
        self.pan.move_reference(dx, dy);
    }

    fn publish_pointer(&mut self) {
        let position = self
            .pointer
            .map(|pointer| pointer.to_image(self.scale))
            .filter(|&(x, y)| self.within_image(x, y));
        self.events.emit(CanvasEvent::MouseMoved(position));
    }

    // ============================================================
    // Export
    // ============================================================

    /// Cuts the placed rooms, top-to-bottom and left-to-right, into tiles.
    pub fn tilemap(&self, tile_width: u32, tile_height: u32) -> Result<Tilemap, CanvasError> {
        let image = self.image.as_ref().ok_or(CanvasError::NoImage)?;
        let rooms = self.rooms.rooms_sorted_row_major();
        Ok(Tilemap::extract(image, &rooms, tile_width, tile_height)?)
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
