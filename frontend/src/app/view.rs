use static_maps::{Coordinates, MapStyle, StaticMapRequest};

pub const MIN_ZOOM: u8 = 0;
pub const MAX_ZOOM: u8 = 17;

/// Degrees moved per arrow key press
pub const PAN_STEP_DEGREES: f64 = 0.1;

const MAX_LATITUDE: f64 = 90.0;
const MAX_LONGITUDE: f64 = 180.0;

/// User actions that change what the map shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ZoomIn,
    ZoomOut,
    PanNorth,
    PanSouth,
    PanWest,
    PanEast,
    ToggleStyle,
}

/// Center, zoom and style of the map currently on screen
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    center: Coordinates,
    zoom: u8,
    style: MapStyle,
}

impl ViewState {
    pub fn new(center: Coordinates, zoom: u8) -> Self {
        Self {
            center,
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            style: MapStyle::default(),
        }
    }

    pub fn center(&self) -> Coordinates {
        self.center
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn style(&self) -> MapStyle {
        self.style
    }

    /// Apply a command in place. Returns false when the view is already at
    /// the relevant bound and nothing needs refetching.
    pub fn apply(&mut self, command: Command) -> bool {
        let before = self.clone();

        match command {
            Command::ZoomIn => self.zoom = (self.zoom + 1).min(MAX_ZOOM),
            Command::ZoomOut => self.zoom = self.zoom.saturating_sub(1).max(MIN_ZOOM),
            Command::PanNorth => self.center.latitude = step(self.center.latitude, PAN_STEP_DEGREES, MAX_LATITUDE),
            Command::PanSouth => self.center.latitude = step(self.center.latitude, -PAN_STEP_DEGREES, MAX_LATITUDE),
            Command::PanWest => self.center.longitude = step(self.center.longitude, -PAN_STEP_DEGREES, MAX_LONGITUDE),
            Command::PanEast => self.center.longitude = step(self.center.longitude, PAN_STEP_DEGREES, MAX_LONGITUDE),
            Command::ToggleStyle => self.style = self.style.toggled(),
        }

        *self != before
    }

    pub fn request(&self, size: (u32, u32)) -> StaticMapRequest {
        StaticMapRequest::new(self.center, self.zoom, self.style).with_size(size.0, size.1)
    }
}

/// Move by `delta` and clamp to `[-limit, limit]`, trimming float noise to
/// six decimals so repeated steps stay readable in the URL.
fn step(value: f64, delta: f64, limit: f64) -> f64 {
    let moved = ((value + delta) * 1e6).round() / 1e6;
    moved.clamp(-limit, limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view_at(latitude: f64, longitude: f64, zoom: u8) -> ViewState {
        ViewState::new(Coordinates::new(latitude, longitude), zoom)
    }

    #[test]
    fn test_new_clamps_zoom() {
        assert_eq!(view_at(0.0, 0.0, 40).zoom(), MAX_ZOOM);
        assert_eq!(view_at(0.0, 0.0, 5).zoom(), 5);
    }

    #[test]
    fn test_new_starts_with_scheme_style() {
        assert_eq!(view_at(0.0, 0.0, 5).style(), MapStyle::Scheme);
    }

    #[test]
    fn test_zoom_steps_and_clamps() {
        let mut view = view_at(0.0, 0.0, 16);
        assert!(view.apply(Command::ZoomIn));
        assert_eq!(view.zoom(), 17);
        assert!(!view.apply(Command::ZoomIn));
        assert_eq!(view.zoom(), 17);

        let mut view = view_at(0.0, 0.0, 1);
        assert!(view.apply(Command::ZoomOut));
        assert_eq!(view.zoom(), 0);
        assert!(!view.apply(Command::ZoomOut));
        assert_eq!(view.zoom(), 0);
    }

    #[test]
    fn test_pan_moves_one_step() {
        let mut view = view_at(55.7, 37.6, 10);
        view.apply(Command::PanNorth);
        assert_eq!(view.center(), Coordinates::new(55.8, 37.6));
        view.apply(Command::PanEast);
        assert_eq!(view.center(), Coordinates::new(55.8, 37.7));
        view.apply(Command::PanSouth);
        view.apply(Command::PanWest);
        assert_eq!(view.center(), Coordinates::new(55.7, 37.6));
    }

    #[test]
    fn test_pan_clamps_at_poles_and_antimeridian() {
        let mut view = view_at(89.95, 179.95, 3);
        assert!(view.apply(Command::PanNorth));
        assert_eq!(view.center().latitude, 90.0);
        assert!(!view.apply(Command::PanNorth));

        assert!(view.apply(Command::PanEast));
        assert_eq!(view.center().longitude, 180.0);
        assert!(!view.apply(Command::PanEast));

        let mut view = view_at(-90.0, -180.0, 3);
        assert!(!view.apply(Command::PanSouth));
        assert!(!view.apply(Command::PanWest));
    }

    #[test]
    fn test_repeated_pan_has_no_float_drift() {
        let mut view = view_at(0.0, 0.0, 3);
        for _ in 0..30 {
            view.apply(Command::PanNorth);
        }
        assert_eq!(view.center().latitude, 3.0);
    }

    #[test]
    fn test_toggle_style_always_changes() {
        let mut view = view_at(0.0, 0.0, 3);
        assert!(view.apply(Command::ToggleStyle));
        assert_eq!(view.style(), MapStyle::Skeleton);
        assert!(view.apply(Command::ToggleStyle));
        assert_eq!(view.style(), MapStyle::Scheme);
    }

    #[test]
    fn test_request_reflects_state() {
        let mut view = view_at(55.75, 37.62, 9);
        view.apply(Command::ToggleStyle);
        let request = view.request((600, 450));
        assert_eq!(request.center, Coordinates::new(55.75, 37.62));
        assert_eq!(request.zoom, 9);
        assert_eq!(request.size, (600, 450));
        assert_eq!(request.style, MapStyle::Skeleton);
    }
}
