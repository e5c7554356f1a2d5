// ============================================================================
// LANDSCAPE MAPS - Componente Google Maps en Rust/WASM
// ============================================================================
// Arquitectura:
// - Services: carga única del SDK (bootstrap)
// - ViewModels: dueño de la sesión del mapa + sincronización de overlays
// - State: propiedades declaradas + diff explícito por campo
// - Maps: traits del SDK + implementación web (google.maps)
// - Components / Element: hosts (Yew y custom element)
// ============================================================================

pub mod component;
pub mod config;
pub mod maps;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;
pub mod viewmodels;

#[cfg(target_arch = "wasm32")]
pub mod components;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
pub mod element;

pub use component::MapComponent;
pub use config::{MapsConfig, CONFIG};
pub use models::{BoxBounds, ClickPayload, EventEmitter, LatLng, MapEvent};
pub use state::{ChangeSet, DeclaredProperties};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Inicializar panic hook para mejor debugging
    console_error_panic_hook::set_once();

    // Inicializar logging
    wasm_logger::init(wasm_logger::Config::new(CONFIG.log_level()));
    log::info!("🚀 Landscape Maps - componente de mapa listo");
    Ok(())
}
