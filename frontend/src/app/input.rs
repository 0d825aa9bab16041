use std::io::{BufRead, Write};

use anyhow::{anyhow, bail, Result};
use static_maps::Coordinates;

use crate::app::config::ZoomPolicy;
use crate::app::view::{ViewState, MAX_ZOOM};

pub const COORDINATES_PROMPT: &str = "Enter coordinates separated by a space (lat lon): ";
pub const ZOOM_PROMPT: &str = "Enter zoom as a percentage (1-100): ";

/// Zoom percentage after the input policy has been applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoomPercent {
    pub value: u32,
    /// Set when a lenient policy had to pull the value back into range
    pub clamped: bool,
}

/// Write `text`, then read one line from `reader` without its line ending
pub fn prompt<R: BufRead, W: Write>(reader: &mut R, writer: &mut W, text: &str) -> Result<String> {
    write!(writer, "{}", text)?;
    writer.flush()?;

    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        bail!("Input closed before an answer was given");
    }
    Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())
}

/// Parse `"lat lon"` into coordinates
pub fn parse_coordinates(text: &str) -> Result<Coordinates> {
    let invalid = || anyhow!("Enter valid coordinates (two numbers separated by a space), got '{}'", text.trim());

    let parts: Vec<&str> = text.split_whitespace().collect();
    let [lat, lon] = parts[..] else {
        return Err(invalid());
    };

    let latitude: f64 = lat.parse().map_err(|_| invalid())?;
    let longitude: f64 = lon.parse().map_err(|_| invalid())?;
    if !latitude.is_finite() || !longitude.is_finite() {
        return Err(invalid());
    }

    if !(-90.0..=90.0).contains(&latitude) {
        bail!("Latitude must be between -90 and 90, got {}", latitude);
    }
    if !(-180.0..=180.0).contains(&longitude) {
        bail!("Longitude must be between -180 and 180, got {}", longitude);
    }

    Ok(Coordinates::new(latitude, longitude))
}

/// Parse a zoom percentage. Fractions are truncated.
pub fn parse_zoom_percent(text: &str, policy: ZoomPolicy) -> Result<ZoomPercent> {
    let value: f64 = text
        .trim()
        .parse()
        .map_err(|_| anyhow!("Zoom must be a number, got '{}'", text.trim()))?;
    if !value.is_finite() {
        bail!("Zoom must be a finite number, got '{}'", text.trim());
    }

    match policy {
        ZoomPolicy::Strict => {
            if !(1.0..=100.0).contains(&value) {
                bail!("Zoom must be in the range from 1 to 100, got {}", value);
            }
            Ok(ZoomPercent { value: value.trunc() as u32, clamped: false })
        }
        ZoomPolicy::Lenient => {
            let clamped = !(0.0..=100.0).contains(&value);
            Ok(ZoomPercent { value: value.clamp(0.0, 100.0).trunc() as u32, clamped })
        }
    }
}

/// Map a 0-100 percentage linearly onto zoom levels 0-17.
///
/// Exact halves round to the even level, so 50% lands on 8.
pub fn percent_to_zoom(percent: u32) -> u8 {
    let scaled = percent.min(100) * MAX_ZOOM as u32;
    let (whole, rest) = (scaled / 100, scaled % 100);
    let level = whole + (rest > 50 || (rest == 50 && whole % 2 == 1)) as u32;
    level.min(MAX_ZOOM as u32) as u8
}

/// Ask for coordinates and zoom, producing the first view to show
pub fn read_initial_view<R: BufRead, W: Write>(reader: &mut R, writer: &mut W, policy: ZoomPolicy) -> Result<ViewState> {
    let coordinates = parse_coordinates(&prompt(reader, writer, COORDINATES_PROMPT)?)?;
    let percent = parse_zoom_percent(&prompt(reader, writer, ZOOM_PROMPT)?, policy)?;

    if percent.clamped {
        warn!("Zoom percentage out of range, clamped to {}", percent.value);
        writeln!(writer, "Zoom should be between 1 and 100, using {}", percent.value)?;
    }

    let zoom = percent_to_zoom(percent.value);
    debug!("Zoom {}% maps to level {}", percent.value, zoom);
    Ok(ViewState::new(coordinates, zoom))
}
