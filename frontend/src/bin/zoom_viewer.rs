extern crate pretty_env_logger;
#[macro_use] extern crate log;

use map_viewer::app::{self, config::ViewerConfig};

fn main() {
    pretty_env_logger::init();

    info!("Starting zoom viewer...");

    if let Err(e) = app::launch(ViewerConfig::zoom_only()) {
        error!("Zoom viewer stopped: {:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    info!("Zoom viewer closed");
}
