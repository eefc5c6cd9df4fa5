//! # Tilemap Creator Entry Point
//!
//! Starts logging, reads the optional config named by
//! `TILEMAP_CREATOR_CONFIG`, and opens the editor window. A single optional
//! argument names a background image to load at startup.
//!
//! ```text
//! tilemap_creator [IMAGE]
//! ```

use std::error::Error;
use std::path::PathBuf;

use log::info;
use tilemap_creator::config::Config;
use tilemap_creator::ui::run_main_window;
use tilemap_creator::{APPLICATION_NAME, BUILD_VERSION};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    info!("{} {} starting...", APPLICATION_NAME, BUILD_VERSION);

    let config = Config::from_env();
    let initial_image = std::env::args_os().nth(1).map(PathBuf::from);

    run_main_window(config, initial_image)?;
    info!("{} exiting.", APPLICATION_NAME);
    Ok(())
}
