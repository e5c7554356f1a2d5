use serde::{Deserialize, Serialize};

/// Coordenada geográfica (mismo formato que `{lat, lng}` del SDK)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Límites de un rectángulo (formato `LatLngBoundsLiteral`)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BoxBounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl BoxBounds {
    pub fn new(south: f64, west: f64, north: f64, east: f64) -> Self {
        Self { north, south, east, west }
    }
}

/// Coordenada de tile pedida por el SDK
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoord {
    pub zoom: u32,
    pub x: i64,
    pub y: i64,
}

impl TileCoord {
    pub fn new(zoom: u32, x: i64, y: i64) -> Self {
        Self { zoom, x, y }
    }
}
