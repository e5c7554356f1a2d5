// ============================================================================
// CONFIG - Configuración del componente de mapa
// ============================================================================
// Se resuelve en tiempo de compilación (build.rs inyecta las variables de .env)
// ============================================================================

use serde::{Deserialize, Serialize};

use crate::models::LatLng;
use crate::utils::constants::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapsConfig {
    /// API key por defecto si el host no define `api_key`
    pub default_api_key: String,
    pub tile_host: String,
    pub view: ViewConfig,
    pub log_level: String,
}

/// Vista inicial del mapa (constante para toda la vida del componente)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewConfig {
    pub center_lat: f64,
    pub center_lng: f64,
    pub zoom: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            center_lat: DEFAULT_CENTER_LAT,
            center_lng: DEFAULT_CENTER_LNG,
            zoom: DEFAULT_ZOOM,
        }
    }
}

impl ViewConfig {
    pub fn center(&self) -> LatLng {
        LatLng::new(self.center_lat, self.center_lng)
    }
}

impl Default for MapsConfig {
    fn default() -> Self {
        Self {
            default_api_key: String::new(),
            tile_host: DEFAULT_TILE_HOST.to_string(),
            view: ViewConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl MapsConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        Self::from_values(
            option_env!("GOOGLE_MAPS_API_KEY"),
            option_env!("TILE_SERVICE_HOST"),
            option_env!("DEFAULT_MAP_CENTER_LAT"),
            option_env!("DEFAULT_MAP_CENTER_LNG"),
            option_env!("DEFAULT_MAP_ZOOM"),
            option_env!("LOG_LEVEL"),
        )
    }

    fn from_values(
        api_key: Option<&str>,
        tile_host: Option<&str>,
        center_lat: Option<&str>,
        center_lng: Option<&str>,
        zoom: Option<&str>,
        log_level: Option<&str>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            default_api_key: api_key.unwrap_or("").to_string(),
            tile_host: tile_host
                .filter(|h| !h.is_empty())
                .unwrap_or(DEFAULT_TILE_HOST)
                .to_string(),
            view: ViewConfig {
                center_lat: center_lat
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.view.center_lat),
                center_lng: center_lng
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.view.center_lng),
                zoom: zoom
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.view.zoom),
            },
            log_level: log_level.unwrap_or("info").to_string(),
        }
    }

    /// Nivel de log para wasm-logger (por defecto Info)
    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: MapsConfig = MapsConfig::from_env();
}
