use anyhow::{anyhow, Result};
use reqwest::Client;
use serde::Serialize;
use std::path::Path;

/// Yandex static map endpoint
pub const DEFAULT_BASE_URL: &str = "http://static-maps.yandex.ru/1.x/";

/// Image size the API renders by default (width, height)
pub const DEFAULT_SIZE: (u32, u32) = (600, 450);

/// Map layer rendered by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MapStyle {
    /// Regular street scheme (`l=map`)
    #[default]
    Scheme,
    /// Road and label skeleton (`l=skl`)
    Skeleton,
}

impl MapStyle {
    pub fn code(self) -> &'static str {
        match self {
            MapStyle::Scheme => "map",
            MapStyle::Skeleton => "skl",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "map" => Some(MapStyle::Scheme),
            "skl" => Some(MapStyle::Skeleton),
            _ => None,
        }
    }

    /// The other style, used by the theme toggle
    pub fn toggled(self) -> Self {
        match self {
            MapStyle::Scheme => MapStyle::Skeleton,
            MapStyle::Skeleton => MapStyle::Scheme,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// `ll` parameter value. The API expects longitude first.
    pub fn to_ll(&self) -> String {
        format!("{},{}", self.longitude, self.latitude)
    }
}

/// Everything needed to render one map image
#[derive(Debug, Clone, PartialEq)]
pub struct StaticMapRequest {
    pub center: Coordinates,
    pub zoom: u8,
    pub size: (u32, u32),
    pub style: MapStyle,
}

#[derive(Serialize)]
struct StaticMapQuery<'a> {
    ll: String,
    z: u8,
    size: String,
    l: &'a str,
}

impl StaticMapRequest {
    pub fn new(center: Coordinates, zoom: u8, style: MapStyle) -> Self {
        Self {
            center,
            zoom,
            size: DEFAULT_SIZE,
            style,
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    /// Encoded query string, without the leading `?`
    pub fn query_string(&self) -> Result<String> {
        let query = StaticMapQuery {
            ll: self.center.to_ll(),
            z: self.zoom,
            size: format!("{},{}", self.size.0, self.size.1),
            l: self.style.code(),
        };
        Ok(serde_urlencoded::to_string(&query)?)
    }
}

/// Static map API client
pub struct StaticMapsAPI {
    client: Client,
    base_url: String,
}

impl StaticMapsAPI {
    /// Create a client for the public endpoint
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a client against a custom endpoint
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a client with a preconfigured `reqwest::Client`
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, request: &StaticMapRequest) -> Result<String> {
        Ok(format!("{}?{}", self.base_url, request.query_string()?))
    }

    /// Fetch the rendered map as raw image bytes
    pub async fn fetch_map_image(&self, request: &StaticMapRequest) -> Result<Vec<u8>> {
        let url = self.url(request)?;
        log::debug!("Requesting {}", url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(anyhow!("Static map request failed: HTTP {} - URL: {}", response.status(), url));
        }

        let bytes = response.bytes().await?;
        log::debug!("Received {} bytes", bytes.len());
        Ok(bytes.to_vec())
    }

    /// Fetch the map and write it to `output_path`, replacing any previous file
    pub async fn download_and_save_map(&self, request: &StaticMapRequest, output_path: &Path) -> Result<()> {
        let bytes = self.fetch_map_image(request).await?;
        std::fs::write(output_path, &bytes)?;
        log::info!("Saved map to {:?}", output_path);
        Ok(())
    }
}

impl Default for StaticMapsAPI {
    fn default() -> Self {
        Self::new()
    }
}
