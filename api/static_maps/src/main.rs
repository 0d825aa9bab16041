use static_maps::{Coordinates, MapStyle, StaticMapRequest, StaticMapsAPI};
use std::env;
use std::path::Path;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    pretty_env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 4 {
        let program = args.first().map(|s| s.as_str()).unwrap_or("static_maps");
        eprintln!("Usage: {} <lat> <lon> <zoom> [map|skl] [output]", program);
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  {} 55.75 37.62 10", program);
        eprintln!("  {} 45.50 -73.57 12 skl montreal.png", program);
        std::process::exit(1);
    }

    let lat: f64 = args[1].parse()?;
    let lon: f64 = args[2].parse()?;
    let zoom: u8 = args[3].parse()?;
    let style = match args.get(4) {
        Some(code) => match MapStyle::from_code(code) {
            Some(style) => style,
            None => {
                eprintln!("Unknown style '{}'. Use 'map' or 'skl'", code);
                std::process::exit(1);
            }
        },
        None => MapStyle::Scheme,
    };
    let output = args.get(5).map(|s| s.as_str()).unwrap_or("map_image.png");

    let api = StaticMapsAPI::new();
    let request = StaticMapRequest::new(Coordinates::new(lat, lon), zoom, style);

    println!("Fetching {}", api.url(&request)?);

    match api.download_and_save_map(&request, Path::new(output)).await {
        Ok(_) => println!("Map saved to: {}", output),
        Err(e) => {
            eprintln!("Error downloading map: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
