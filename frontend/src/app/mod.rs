pub mod config;
pub mod input;
pub mod map;
pub mod map_file;
pub mod utils;
pub mod view;

use std::io;

use crate::app::config::ViewerConfig;

/// Prompt for the starting view on the console, then open the map window.
///
/// Blocks until the window is closed.
pub fn launch(config: ViewerConfig) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut writer = io::stdout();

    let view = input::read_initial_view(&mut reader, &mut writer, config.zoom_policy)?;
    info!(
        "Starting at lat={}, lon={}, zoom={}",
        view.center().latitude,
        view.center().longitude,
        view.zoom()
    );

    map::run(config, view)
}
