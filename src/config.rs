// src/config.rs

use std::fs;
use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Environment variable naming a JSON config file.
pub const CONFIG_ENV: &str = "TILEMAP_CREATOR_CONFIG";

/// Tunables for the canvas controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    /// Zoom factor applied after an image is loaded.
    pub default_scale: f64,
    /// Zoom change per wheel notch; also the smallest allowed zoom.
    pub zoom_step: f64,
    /// Scroll distance per wheel notch without the zoom modifier.
    pub scroll_increment: f64,
    /// Period of the middle-button autoscroll timer.
    pub pan_interval_ms: u64,
    /// Upper bound on the distance scrolled per autoscroll tick.
    pub max_pan_speed: f64,
    /// Edge tolerance used when linking rooms.
    pub link_offset: i32,
    pub grid_x: i32,
    pub grid_y: i32,
    pub room_width: i32,
    pub room_height: i32,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            default_scale: 1.0,
            zoom_step: 0.25,
            scroll_increment: 20.0,
            pan_interval_ms: 5,
            max_pan_speed: 20.0,
            link_offset: 0,
            grid_x: 16,
            grid_y: 16,
            room_width: 160,
            room_height: 128,
        }
    }
}

/// Size of the markers drawn across linked edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkMarkerSettings {
    /// Extent along the shared edge.
    pub marker_short: i32,
    /// Extent across the shared edge.
    pub marker_long: i32,
}

impl Default for LinkMarkerSettings {
    fn default() -> Self {
        Self {
            marker_short: 16,
            marker_long: 32,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    pub tile_width: u32,
    pub tile_height: u32,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            tile_width: 16,
            tile_height: 16,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub canvas: CanvasSettings,
    pub links: LinkMarkerSettings,
    pub export: ExportSettings,
}

impl Config {
    /// Reads a JSON config file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path.as_ref())?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects sizes and speeds the canvas cannot work with. Every one of
    /// them must be positive; the link offset may also be zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let canvas = &self.canvas;
        positive_f64("canvas.default_scale", canvas.default_scale)?;
        positive_f64("canvas.zoom_step", canvas.zoom_step)?;
        positive_f64("canvas.max_pan_speed", canvas.max_pan_speed)?;
        positive_i32("canvas.grid_x", canvas.grid_x)?;
        positive_i32("canvas.grid_y", canvas.grid_y)?;
        positive_i32("canvas.room_width", canvas.room_width)?;
        positive_i32("canvas.room_height", canvas.room_height)?;
        if canvas.link_offset < 0 {
            return Err(invalid("canvas.link_offset", canvas.link_offset));
        }
        positive_i32("links.marker_short", self.links.marker_short)?;
        positive_i32("links.marker_long", self.links.marker_long)?;
        if self.export.tile_width == 0 {
            return Err(invalid("export.tile_width", 0));
        }
        if self.export.tile_height == 0 {
            return Err(invalid("export.tile_height", 0));
        }
        Ok(())
    }

    /// Loads the file named by `TILEMAP_CREATOR_CONFIG`, or the defaults.
    pub fn from_env() -> Self {
        let Some(path) = std::env::var_os(CONFIG_ENV) else {
            return Self::default();
        };
        match Self::load(&path) {
            Ok(config) => {
                info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                warn!("Ignoring config {:?}: {}", path, e);
                Self::default()
            }
        }
    }
}

fn invalid(field: &'static str, value: impl ToString) -> ConfigError {
    ConfigError::Invalid {
        field,
        value: value.to_string(),
    }
}

fn positive_f64(field: &'static str, value: f64) -> Result<(), ConfigError> {
    // Written this way round so NaN is rejected too.
    if value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, value))
    }
}

fn positive_i32(field: &'static str, value: i32) -> Result<(), ConfigError> {
    if value > 0 {
        Ok(())
    } else {
        Err(invalid(field, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.links.marker_short, 16);
        assert_eq!(config.links.marker_long, 32);
        assert_eq!(config.canvas.link_offset, 0);
        assert_eq!(config.canvas.pan_interval_ms, 5);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = Config::from_json(r#"{ "canvas": { "zoom_step": 0.5 }, "export": { "tile_width": 8 } }"#).unwrap();
        assert_eq!(config.canvas.zoom_step, 0.5);
        assert_eq!(config.canvas.default_scale, 1.0);
        assert_eq!(config.export.tile_width, 8);
        assert_eq!(config.export.tile_height, 16);
        assert_eq!(config.links, LinkMarkerSettings::default());
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(Config::from_json("{ nope"), Err(ConfigError::Parse(_))));
    }

    fn invalid_field(json: &str) -> &'static str {
        match Config::from_json(json) {
            Err(ConfigError::Invalid { field, .. }) => field,
            other => panic!("expected a validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_zoom_that_could_reach_zero_is_rejected() {
        assert_eq!(invalid_field(r#"{ "canvas": { "zoom_step": 0.0 } }"#), "canvas.zoom_step");
        assert_eq!(invalid_field(r#"{ "canvas": { "zoom_step": -0.25 } }"#), "canvas.zoom_step");
        assert_eq!(invalid_field(r#"{ "canvas": { "default_scale": 0.0 } }"#), "canvas.default_scale");
        assert_eq!(invalid_field(r#"{ "canvas": { "max_pan_speed": 0.0 } }"#), "canvas.max_pan_speed");
    }

    #[test]
    fn test_empty_sizes_are_rejected() {
        assert_eq!(invalid_field(r#"{ "canvas": { "room_width": 0 } }"#), "canvas.room_width");
        assert_eq!(invalid_field(r#"{ "canvas": { "room_height": -32 } }"#), "canvas.room_height");
        assert_eq!(invalid_field(r#"{ "canvas": { "grid_x": 0 } }"#), "canvas.grid_x");
        assert_eq!(invalid_field(r#"{ "canvas": { "link_offset": -1 } }"#), "canvas.link_offset");
        assert_eq!(invalid_field(r#"{ "export": { "tile_height": 0 } }"#), "export.tile_height");
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            Config::load("/definitely/not/here/tilemap.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
