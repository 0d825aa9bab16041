use std::path::PathBuf;

use static_maps::{DEFAULT_BASE_URL, DEFAULT_SIZE};

use crate::app::view::Command;

/// Fixed name of the image written between fetch and display
pub const MAP_FILE_NAME: &str = "map_image.png";

/// How an out-of-range zoom percentage is treated at the prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomPolicy {
    /// Anything outside 1..=100 is an input error
    Strict,
    /// Values above 100 are clamped with a warning, negatives become 0
    Lenient,
}

/// Window controls enabled for a viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub pan: bool,
    pub theme_toggle: bool,
}

impl Controls {
    pub fn allows(&self, command: Command) -> bool {
        match command {
            Command::ZoomIn | Command::ZoomOut => true,
            Command::PanNorth | Command::PanSouth | Command::PanWest | Command::PanEast => self.pan,
            Command::ToggleStyle => self.theme_toggle,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub base_url: String,
    pub image_size: (u32, u32),
    pub map_file: PathBuf,
    pub zoom_policy: ZoomPolicy,
    pub controls: Controls,
}

impl ViewerConfig {
    /// Pan, zoom and theme toggle with strict input checks
    pub fn full() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            image_size: DEFAULT_SIZE,
            map_file: std::env::temp_dir().join(MAP_FILE_NAME),
            zoom_policy: ZoomPolicy::Strict,
            controls: Controls {
                pan: true,
                theme_toggle: true,
            },
        }
    }

    /// Zoom keys only, lenient zoom input
    pub fn zoom_only() -> Self {
        Self {
            zoom_policy: ZoomPolicy::Lenient,
            controls: Controls {
                pan: false,
                theme_toggle: false,
            },
            ..Self::full()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_only_blocks_pan_and_theme() {
        let controls = ViewerConfig::zoom_only().controls;
        assert!(controls.allows(Command::ZoomIn));
        assert!(controls.allows(Command::ZoomOut));
        assert!(!controls.allows(Command::PanNorth));
        assert!(!controls.allows(Command::PanEast));
        assert!(!controls.allows(Command::ToggleStyle));
    }

    #[test]
    fn test_full_allows_everything() {
        let controls = ViewerConfig::full().controls;
        assert!(controls.allows(Command::PanWest));
        assert!(controls.allows(Command::ToggleStyle));
    }

    #[test]
    fn test_presets_share_endpoint_and_file() {
        let full = ViewerConfig::full();
        let zoom_only = ViewerConfig::zoom_only();
        assert_eq!(full.base_url, DEFAULT_BASE_URL);
        assert_eq!(full.image_size, (600, 450));
        assert_eq!(full.map_file, zoom_only.map_file);
        assert!(full.map_file.ends_with(MAP_FILE_NAME));
        assert_eq!(zoom_only.zoom_policy, ZoomPolicy::Lenient);
    }
}
