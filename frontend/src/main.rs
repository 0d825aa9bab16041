extern crate pretty_env_logger;
#[macro_use] extern crate log;

use map_viewer::app::{self, config::ViewerConfig};

fn main() {
    pretty_env_logger::init();

    info!("Starting map viewer...");

    if let Err(e) = app::launch(ViewerConfig::full()) {
        error!("Map viewer stopped: {:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    info!("Map viewer closed");
}
