// ============================================================================
// MAP VIEWMODEL - Dueño de la instancia del mapa
// ============================================================================
// Una sesión por componente, creada una sola vez. Es dueña de los objetos
// imperativos (marker, rectángulo, overlay) y del listener de click.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::{MapsConfig, ViewConfig};
use crate::maps::{MapOptions, MapSession, MapsSdk, RectangleStyle};
use crate::models::{EventEmitter, LatLng, MapEvent};
use crate::utils::constants::OVERLAY_INDEX;

/// Handles vivos: como máximo uno por slot
pub struct OverlaySlots<S: MapSession> {
    pub marker: Option<S::Marker>,
    pub rectangle: Option<S::Rectangle>,
    pub overlay: Option<S::Overlay>,
}

impl<S: MapSession> Default for OverlaySlots<S> {
    fn default() -> Self {
        Self {
            marker: None,
            rectangle: None,
            overlay: None,
        }
    }
}

pub struct MapViewModel<S: MapSession> {
    pub(super) session: Option<S>,
    listener: Option<S::Listener>,
    pub(super) slots: OverlaySlots<S>,
    torn_down: bool,

    // Valores vigentes que se leen en diferido (click / petición de tile)
    pub(super) click_event: Rc<RefCell<String>>,
    pub(super) map_id: Rc<RefCell<String>>,
    pub(super) show_layer: bool,
    pub(super) layer_opacity: f64,

    pub(super) tile_host: String,
    pub(super) rectangle_style: RectangleStyle,
    view: ViewConfig,
    emitter: EventEmitter,
}

impl<S: MapSession> MapViewModel<S> {
    pub fn new(config: &MapsConfig, emitter: EventEmitter) -> Self {
        Self {
            session: None,
            listener: None,
            slots: OverlaySlots::default(),
            torn_down: false,
            click_event: Rc::new(RefCell::new(String::new())),
            map_id: Rc::new(RefCell::new(String::new())),
            show_layer: true,
            layer_opacity: 1.0,
            tile_host: config.tile_host.clone(),
            rectangle_style: RectangleStyle::default(),
            view: config.view.clone(),
            emitter,
        }
    }

    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    pub fn slots(&self) -> &OverlaySlots<S> {
        &self.slots
    }

    /// Crear la sesión del mapa (idempotente). Registra el listener de click
    /// y aplica el estado declarado del overlay.
    pub fn initialize_session<Sdk>(&mut self, sdk: &Sdk)
    where
        Sdk: MapsSdk<Session = S>,
    {
        if self.session.is_some() || self.torn_down {
            return;
        }

        let options = MapOptions::with_view(&self.view);
        let mut session = match sdk.create_session(&options) {
            Ok(session) => session,
            Err(e) => {
                log::warn!("⚠️ Mapa: no se pudo crear la sesión: {}", e);
                return;
            }
        };
        log::info!(
            "🗺️ Mapa creado en ({}, {}) zoom {}",
            options.center.lat,
            options.center.lng,
            options.zoom
        );

        let click_event = self.click_event.clone();
        let emitter = self.emitter.clone();
        let handler = Box::new(move |position: LatLng| {
            let name = click_event.borrow().clone();
            if name.is_empty() {
                log::debug!("🖱️ Click en ({}, {}) sin evento configurado", position.lat, position.lng);
                return;
            }
            let event = MapEvent {
                name,
                payload: position.into(),
            };
            log::debug!(
                "📤 Emitiendo '{}': {}",
                event.name,
                serde_json::to_string(&event.payload).unwrap_or_default()
            );
            emitter(event);
        });

        match session.add_click_listener(handler) {
            Ok(listener) => self.listener = Some(listener),
            Err(e) => log::warn!("⚠️ Mapa: no se pudo registrar el listener de click: {}", e),
        }

        self.session = Some(session);
        self.update_overlay();
    }

    /// Liberar listener y objetos imperativos. La sesión no se vuelve a crear.
    pub fn teardown(&mut self) {
        self.torn_down = true;
        let Some(mut session) = self.session.take() else {
            return;
        };

        if let Some(listener) = self.listener.take() {
            session.remove_listener(listener);
        }
        if let Some(marker) = self.slots.marker.take() {
            session.remove_marker(marker);
        }
        if let Some(rectangle) = self.slots.rectangle.take() {
            session.remove_rectangle(rectangle);
        }
        if self.slots.overlay.take().is_some() {
            session.remove_overlay_at(OVERLAY_INDEX);
        }
        log::info!("🧹 Mapa: recursos liberados");
    }
}

impl<S: MapSession> Drop for MapViewModel<S> {
    fn drop(&mut self) {
        self.teardown();
    }
}
