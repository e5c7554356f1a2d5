// Constantes fijas del componente de mapa (no son propiedades reactivas)

/// Script del SDK de Google Maps
pub const MAPS_SCRIPT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/js";

/// Nombre del callback global que invoca el script del SDK al terminar de cargar
pub const LOADER_CALLBACK_NAME: &str = "initMap";

/// Host por defecto del servicio de tiles (Earth Engine)
pub const DEFAULT_TILE_HOST: &str = "earthengine.googleapis.com";

/// Tamaño de tile en píxeles (cuadrado)
pub const TILE_SIZE: u32 = 256;

/// Vista inicial por defecto
pub const DEFAULT_CENTER_LAT: f64 = 37.422697;
pub const DEFAULT_CENTER_LNG: f64 = -122.084113;
pub const DEFAULT_ZOOM: f64 = 14.0;

/// Controles fijos del mapa
pub const MAP_TYPE_ID: &str = "hybrid";
pub const ZOOM_CONTROL_POSITION: &str = "LEFT_TOP";

/// Estilo del rectángulo (box)
pub const BOX_STROKE_COLOR: &str = "#FF0000";
pub const BOX_STROKE_OPACITY: f64 = 0.8;
pub const BOX_STROKE_WEIGHT: u32 = 2;
pub const BOX_FILL_COLOR: &str = "#FF0000";
pub const BOX_FILL_OPACITY: f64 = 0.35;

/// Índice donde se inserta el overlay de tiles (capa inferior)
pub const OVERLAY_INDEX: usize = 0;
