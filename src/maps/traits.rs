use std::cell::RefCell;
use std::rc::Rc;

use crate::config::ViewConfig;
use crate::models::{BoxBounds, LatLng, TileCoord};
use crate::utils::constants::*;

/// Callback de click del mapa (recibe la coordenada clicada)
pub type ClickHandler = Box<dyn FnMut(LatLng)>;

/// SDK de mapas: sólo sabe crear sesiones
pub trait MapsSdk {
    type Session: MapSession;

    fn create_session(&self, options: &MapOptions) -> Result<Self::Session, MapError>;
}

/// Sesión de mapa viva: primitivas imperativas sobre una única instancia.
///
/// Los handles son opacos; quitar un objeto del mapa consume su handle.
pub trait MapSession {
    type Marker;
    type Rectangle;
    type Overlay;
    type Listener;

    fn add_marker(&mut self, position: LatLng) -> Result<Self::Marker, MapError>;
    fn remove_marker(&mut self, marker: Self::Marker);

    fn add_rectangle(
        &mut self,
        bounds: BoxBounds,
        style: &RectangleStyle,
    ) -> Result<Self::Rectangle, MapError>;
    fn remove_rectangle(&mut self, rectangle: Self::Rectangle);

    /// Insertar un overlay de tiles en `overlayMapTypes[index]`
    fn insert_overlay(&mut self, index: usize, source: TileSource) -> Result<Self::Overlay, MapError>;
    fn set_overlay_opacity(&mut self, overlay: &Self::Overlay, opacity: f64);
    /// Quitar `overlayMapTypes[index]` (el handle se descarta aparte)
    fn remove_overlay_at(&mut self, index: usize);

    fn add_click_listener(&mut self, handler: ClickHandler) -> Result<Self::Listener, MapError>;
    fn remove_listener(&mut self, listener: Self::Listener);
}

/// Opciones fijas de creación del mapa
#[derive(Debug, Clone, PartialEq)]
pub struct MapOptions {
    pub center: LatLng,
    pub zoom: f64,
    pub street_view_control: bool,
    pub map_type_control: bool,
    pub fullscreen_control: bool,
    pub camera_control: bool,
    pub zoom_control: bool,
    /// Constante de `google.maps.ControlPosition`
    pub zoom_control_position: &'static str,
    pub tilt: f64,
    pub rotate_control: bool,
    pub clickable_icons: bool,
    /// Valor de `google.maps.MapTypeId`
    pub map_type_id: &'static str,
}

impl MapOptions {
    pub fn with_view(view: &ViewConfig) -> Self {
        Self {
            center: view.center(),
            zoom: view.zoom,
            ..Self::default()
        }
    }
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            center: LatLng::new(DEFAULT_CENTER_LAT, DEFAULT_CENTER_LNG),
            zoom: DEFAULT_ZOOM,
            street_view_control: false,
            map_type_control: true,
            fullscreen_control: false,
            camera_control: false,
            zoom_control: true,
            zoom_control_position: ZOOM_CONTROL_POSITION,
            tilt: 0.0,
            rotate_control: false,
            clickable_icons: false,
            map_type_id: MAP_TYPE_ID,
        }
    }
}

/// Estilo del rectángulo
#[derive(Debug, Clone, PartialEq)]
pub struct RectangleStyle {
    pub stroke_color: String,
    pub stroke_opacity: f64,
    pub stroke_weight: u32,
    pub fill_color: String,
    pub fill_opacity: f64,
}

impl Default for RectangleStyle {
    fn default() -> Self {
        Self {
            stroke_color: BOX_STROKE_COLOR.to_string(),
            stroke_opacity: BOX_STROKE_OPACITY,
            stroke_weight: BOX_STROKE_WEIGHT,
            fill_color: BOX_FILL_COLOR.to_string(),
            fill_opacity: BOX_FILL_OPACITY,
        }
    }
}

/// Fuente de tiles del overlay.
///
/// `map_id` es compartido con el componente: la URL se calcula con el valor
/// vigente en el momento en que el SDK pide el tile.
#[derive(Debug, Clone)]
pub struct TileSource {
    host: String,
    map_id: Rc<RefCell<String>>,
    pub tile_size: u32,
}

impl TileSource {
    pub fn new(host: impl Into<String>, map_id: Rc<RefCell<String>>) -> Self {
        Self {
            host: host.into(),
            map_id,
            tile_size: TILE_SIZE,
        }
    }

    /// `https://<host>/v1/<map_id>/tiles/<zoom>/<x>/<y>`
    pub fn tile_url(&self, coord: TileCoord) -> String {
        format!(
            "https://{}/v1/{}/tiles/{}/{}/{}",
            self.host,
            self.map_id.borrow(),
            coord.zoom,
            coord.x,
            coord.y
        )
    }
}

/// Error del mapa
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MapError {
    #[error("Maps SDK is not available")]
    SdkUnavailable,
    #[error("Maps SDK binding error: {0}")]
    Binding(String),
    #[error("Invalid property: {0}")]
    InvalidProperty(String),
}
